// SPDX-License-Identifier: MPL-2.0
//! Application root state.
//!
//! The `App` struct wires together the parts of the console (configuration,
//! localization, toasts, login gate, diagnostics) and is the only place that
//! turns their outcomes into user feedback. Create it once at startup with
//! [`App::new`] and hand it back to [`App::shutdown`] when done.

pub mod paths;
pub mod persisted_state;
pub mod session;

pub use session::{Access, SessionGate, DASHBOARD_ROUTE, LOGIN_ROUTE};

use crate::config::{self, Config};
use crate::diagnostics::{DiagnosticsCollector, UserAction};
use crate::domain::payment::{CardPaymentForm, ValidationErrors};
use crate::error::{Error, Result};
use crate::i18n::I18n;
use crate::ui::notifications::{Clock, SystemClock, ToastId, ToastStore};
use std::fmt;
use std::path::PathBuf;

/// Startup options, usually filled from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Preferred UI language (e.g. `fr`).
    pub lang: Option<String>,
    /// Directory holding `settings.toml`.
    pub config_dir: Option<PathBuf>,
    /// Directory holding `state.cbor`.
    pub data_dir: Option<PathBuf>,
}

/// Root application state.
pub struct App<C: Clock = SystemClock> {
    config: Config,
    i18n: I18n,
    toasts: ToastStore<C>,
    session: SessionGate,
    diagnostics: DiagnosticsCollector,
}

impl<C: Clock> fmt::Debug for App<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("locale", self.i18n.current_locale())
            .field("toasts", &self.toasts.len())
            .field("logged_in", &self.session.is_logged_in())
            .finish()
    }
}

impl App<SystemClock> {
    /// Builds the application on the wall clock.
    #[must_use]
    pub fn new(flags: Flags) -> Self {
        Self::with_clock(flags, SystemClock)
    }
}

impl<C: Clock> App<C> {
    /// Builds the application with a custom toast clock.
    ///
    /// Problems reading the config or the saved session never abort startup;
    /// they surface as warning toasts.
    pub fn with_clock(flags: Flags, clock: C) -> Self {
        let (config, config_warning) = config::load_with_override(flags.config_dir);
        let i18n = I18n::new(flags.lang.as_deref(), config.general.language.as_deref());
        let diagnostics = DiagnosticsCollector::new(config.diagnostics_capacity());

        let mut toasts = ToastStore::with_clock(clock);
        toasts.set_diagnostics(diagnostics.handle());

        let (mut session, state_warning) = SessionGate::load(flags.data_dir);
        session.set_diagnostics(diagnostics.handle());

        let mut app = Self {
            config,
            i18n,
            toasts,
            session,
            diagnostics,
        };

        for key in [config_warning, state_warning].into_iter().flatten() {
            app.warn(&key);
        }
        tracing::debug!(locale = %app.i18n.current_locale(), "application started");
        app
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    pub fn i18n_mut(&mut self) -> &mut I18n {
        &mut self.i18n
    }

    #[must_use]
    pub fn toasts(&self) -> &ToastStore<C> {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastStore<C> {
        &mut self.toasts
    }

    #[must_use]
    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    /// Drains pending diagnostic events and returns the collector.
    pub fn diagnostics(&mut self) -> &mut DiagnosticsCollector {
        self.diagnostics.process_pending();
        &mut self.diagnostics
    }

    /// Fires due toast timers. Returns the IDs of toasts that expired.
    pub fn tick(&mut self) -> Vec<ToastId> {
        let expired = self.toasts.tick();
        self.diagnostics.process_pending();
        expired
    }

    /// Logs `user` in and saves the session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLogin`] when the gate refuses the login; an
    /// error toast is shown as well.
    pub fn login(&mut self, user: &str) -> Result<()> {
        if let Err(err) = self.session.login(user) {
            if let Error::InvalidLogin(reason) = &err {
                let title = self.i18n.tr(reason.i18n_key());
                self.toasts.error(title, None);
            }
            return Err(err);
        }

        let title = self
            .i18n
            .tr_with_args("toast-login-success", &[("user", user.trim())]);
        self.toasts.success(title, None);
        self.persist_session();
        Ok(())
    }

    /// Logs out and saves the session. Returns `false` if nobody was logged in.
    pub fn logout(&mut self) -> bool {
        if !self.session.logout() {
            return false;
        }
        let title = self.i18n.tr("toast-logout");
        self.toasts.info(title, None);
        self.persist_session();
        true
    }

    /// Decides whether `route` may be opened right now.
    #[must_use]
    pub fn guard(&self, route: &str) -> Access {
        self.session.guard(route)
    }

    /// Validates a card payment form and reports the outcome with a toast.
    ///
    /// # Errors
    ///
    /// Returns every field error found.
    pub fn submit_payment(
        &mut self,
        form: &CardPaymentForm,
    ) -> std::result::Result<(), ValidationErrors> {
        let result = form.validate();
        self.diagnostics.handle().log_action(UserAction::SubmitPaymentForm {
            valid: result.is_ok(),
        });

        match &result {
            Ok(()) => {
                let title = self.i18n.tr("toast-payment-accepted");
                self.toasts.success(title, None);
            }
            Err(errors) => {
                let title = self.i18n.tr("toast-payment-rejected");
                let description = self.localized_errors(errors).join("\n");
                self.toasts.error(title, Some(description));
            }
        }
        result
    }

    /// Translates each field error into the current language.
    #[must_use]
    pub fn localized_errors(&self, errors: &ValidationErrors) -> Vec<String> {
        errors
            .errors()
            .iter()
            .map(|error| self.i18n.tr(error.i18n_key()))
            .collect()
    }

    /// Saves the session and consumes the application.
    ///
    /// Returns an i18n warning key if the session could not be written.
    pub fn shutdown(mut self) -> Option<String> {
        let warning = self.session.persist();
        self.diagnostics.process_pending();
        tracing::debug!(events = self.diagnostics.len(), "application stopped");
        warning
    }

    fn persist_session(&mut self) {
        if let Some(key) = self.session.persist() {
            self.warn(&key);
        }
    }

    fn warn(&mut self, key: &str) {
        let title = self.i18n.tr(key);
        self.toasts.warning(title, None);
    }
}
