// SPDX-License-Identifier: MPL-2.0
//! Login gate: who is logged in and which routes they may open.
//!
//! The gate only tracks a client-side flag. It performs no credential
//! checks; any non-empty user name is accepted.

use super::persisted_state::AppState;
use crate::diagnostics::{DiagnosticsHandle, UserAction};
use crate::error::{LoginError, Result};
use std::path::PathBuf;

/// Public route where logged-out users are sent.
pub const LOGIN_ROUTE: &str = "/login";

/// Landing route for logged-in users.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Outcome of guarding a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(&'static str),
}

#[derive(Debug, Default)]
pub struct SessionGate {
    state: AppState,
    data_dir: Option<PathBuf>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl SessionGate {
    /// Creates a gate from already loaded state.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            data_dir: None,
            diagnostics: None,
        }
    }

    /// Loads the persisted session from `data_dir` (or the default location).
    ///
    /// Returns the gate and an optional i18n warning key when the stored
    /// state could not be read.
    pub fn load(data_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let (state, warning) = AppState::load_from(data_dir.clone());
        let gate = Self {
            state,
            data_dir,
            diagnostics: None,
        };
        (gate, warning)
    }

    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Marks `user` as logged in.
    ///
    /// # Errors
    ///
    /// Fails when the name is blank or another session is active.
    pub fn login(&mut self, user: &str) -> Result<()> {
        let user = user.trim();
        if user.is_empty() {
            return Err(LoginError::EmptyUser.into());
        }
        if self.state.logged_in_user.is_some() {
            return Err(LoginError::AlreadyLoggedIn.into());
        }

        self.state.logged_in_user = Some(user.to_string());
        tracing::debug!(user = %user, "logged in");
        if let Some(handle) = &self.diagnostics {
            handle.log_action(UserAction::Login);
        }
        Ok(())
    }

    /// Clears the session. Returns `false` if nobody was logged in.
    pub fn logout(&mut self) -> bool {
        let Some(user) = self.state.logged_in_user.take() else {
            return false;
        };
        tracing::debug!(user = %user, "logged out");
        if let Some(handle) = &self.diagnostics {
            handle.log_action(UserAction::Logout);
        }
        true
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state.logged_in_user.is_some()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&str> {
        self.state.logged_in_user.as_deref()
    }

    /// Decides whether `route` may be shown in the current session.
    #[must_use]
    pub fn guard(&self, route: &str) -> Access {
        let is_login = normalize_route(route) == LOGIN_ROUTE;
        match (is_login, self.is_logged_in()) {
            (true, true) => Access::Redirect(DASHBOARD_ROUTE),
            (true, false) | (false, true) => Access::Allow,
            (false, false) => Access::Redirect(LOGIN_ROUTE),
        }
    }

    /// Writes the session to disk. Returns an i18n warning key on failure.
    pub fn persist(&self) -> Option<String> {
        let warning = self.state.save_to(self.data_dir.clone());
        if let Some(key) = &warning {
            tracing::warn!(key = key.as_str(), "failed to persist session");
        }
        warning
    }
}

fn normalize_route(route: &str) -> &str {
    let route = route.split(['?', '#']).next().unwrap_or_default();
    let trimmed = route.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn logged_out_users_are_sent_to_login() {
        let gate = SessionGate::default();
        assert_eq!(gate.guard("/dashboard"), Access::Redirect(LOGIN_ROUTE));
        assert_eq!(gate.guard("/"), Access::Redirect(LOGIN_ROUTE));
        assert_eq!(gate.guard("/login"), Access::Allow);
    }

    #[test]
    fn logged_in_users_skip_login_page() {
        let mut gate = SessionGate::default();
        gate.login("alice").expect("login");
        assert_eq!(gate.guard("/login/"), Access::Redirect(DASHBOARD_ROUTE));
        assert_eq!(gate.guard("/login?next=/orders"), Access::Redirect(DASHBOARD_ROUTE));
        assert_eq!(gate.guard("/orders"), Access::Allow);
    }

    #[test]
    fn blank_user_is_rejected() {
        let mut gate = SessionGate::default();
        let err = gate.login("   ").expect_err("blank user");
        assert!(matches!(err, Error::InvalidLogin(LoginError::EmptyUser)));
        assert!(!gate.is_logged_in());
    }

    #[test]
    fn second_login_requires_logout() {
        let mut gate = SessionGate::default();
        gate.login("alice").expect("login");
        let err = gate.login("bob").expect_err("already logged in");
        assert!(matches!(err, Error::InvalidLogin(LoginError::AlreadyLoggedIn)));

        assert!(gate.logout());
        assert!(!gate.logout());
        gate.login(" bob ").expect("login after logout");
        assert_eq!(gate.current_user(), Some("bob"));
    }

    #[test]
    fn session_survives_reload() {
        let temp_dir = tempdir().expect("create temp dir");
        let dir = Some(temp_dir.path().to_path_buf());

        let (mut gate, warning) = SessionGate::load(dir.clone());
        assert!(warning.is_none());
        gate.login("alice").expect("login");
        assert!(gate.persist().is_none());

        let (reloaded, _) = SessionGate::load(dir);
        assert_eq!(reloaded.current_user(), Some("alice"));
        assert_eq!(reloaded.guard("/dashboard"), Access::Allow);
    }

    #[test]
    fn login_and_logout_are_recorded() {
        let mut collector = crate::diagnostics::DiagnosticsCollector::default();
        let mut gate = SessionGate::default();
        gate.set_diagnostics(collector.handle());

        gate.login("alice").expect("login");
        gate.logout();
        collector.process_pending();
        assert_eq!(collector.len(), 2);
    }
}
