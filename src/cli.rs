// SPDX-License-Identifier: MPL-2.0
//! Command-line front end: argument parsing and the one-shot commands.
//!
//! Commands write localized lines to any [`Write`] sink so they can be
//! exercised without a terminal. The binary only wires stdout and the
//! runtime around them.

use crate::app::{App, Flags};
use crate::domain::payment::{self, CardPaymentForm};
use crate::domain::ui::StatusVariant;
use crate::error::{Error, Result};
use crate::ui::notifications::{Clock, ToastId, ToastKind};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Exit status for malformed command lines.
pub const USAGE_EXIT: u8 = 2;

/// Delay between toasts in the live demo.
const DEMO_STAGGER: Duration = Duration::from_millis(800);

pub const HELP: &str = "\
bizdesk - business console toolkit

USAGE:
  bizdesk [OPTIONS] <COMMAND>

COMMANDS:
  card <number>               Detect the brand, check and format a card number
  expiry <month> <year>       Check that an expiry date is in the future
  validate --number <n> --month <m> --year <yy> --cvv <cvv> --name <name>
                              Validate a whole payment form
  status <text>               Classify a status badge
  toasts                      Show auto-dismissing toasts in real time

OPTIONS:
  --lang <id>                 UI language (e.g. en-US, fr)
  --config-dir <dir>          Directory holding settings.toml
  --data-dir <dir>            Directory holding state.cbor
  -h, --help                  Print this help

ENVIRONMENT:
  BIZDESK_CONFIG_DIR, BIZDESK_DATA_DIR, BIZDESK_LOG
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Card(String),
    Expiry { month: String, year: String },
    Validate(CardPaymentForm),
    Status(String),
    Toasts,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub lang: Option<String>,
    pub config_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub command: Command,
}

impl Cli {
    /// Splits off the startup flags, leaving the command to run.
    #[must_use]
    pub fn into_parts(self) -> (Flags, Command) {
        let flags = Flags {
            lang: self.lang,
            config_dir: self.config_dir,
            data_dir: self.data_dir,
        };
        (flags, self.command)
    }
}

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<bool> for Outcome {
    fn from(ok: bool) -> Self {
        if ok {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

/// Parses the command line.
///
/// Returns `Ok(None)` when help was requested or no command was given.
///
/// # Errors
///
/// Returns [`Error::Cli`] for unknown commands, missing or malformed values
/// and leftover arguments.
pub fn parse_args(mut args: pico_args::Arguments) -> Result<Option<Cli>> {
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let lang = args.opt_value_from_str("--lang")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let data_dir = args.opt_value_from_str("--data-dir")?;

    let command = match args.subcommand()?.as_deref() {
        Some("card") => Command::Card(args.free_from_str()?),
        Some("expiry") => Command::Expiry {
            month: args.free_from_str()?,
            year: args.free_from_str()?,
        },
        Some("validate") => Command::Validate(CardPaymentForm {
            card_number: args.value_from_str("--number")?,
            expiry_month: args.value_from_str("--month")?,
            expiry_year: args.value_from_str("--year")?,
            cvv: args.value_from_str("--cvv")?,
            cardholder_name: args.value_from_str("--name")?,
        }),
        Some("status") => Command::Status(args.free_from_str()?),
        Some("toasts") => Command::Toasts,
        Some(other) => return Err(Error::Cli(format!("unknown command '{}'", other))),
        None => return Ok(None),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(Error::Cli(format!("unexpected arguments: {:?}", rest)));
    }

    Ok(Some(Cli {
        lang,
        config_dir,
        data_dir,
        command,
    }))
}

/// Runs every command except the live toast demo.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn run<C: Clock, W: Write>(
    app: &mut App<C>,
    command: &Command,
    out: &mut W,
) -> Result<Outcome> {
    match command {
        Command::Card(number) => run_card(app, number, out),
        Command::Expiry { month, year } => run_expiry(app, month, year, out),
        Command::Validate(form) => run_validate(app, form, out),
        Command::Status(text) => run_status(app, text, out),
        Command::Toasts => Err(Error::Cli("toasts needs a runtime".to_string())),
    }
}

/// Prints brand, checksum verdict and grouping; fails on a bad checksum.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn run_card<C: Clock, W: Write>(app: &App<C>, number: &str, out: &mut W) -> Result<Outcome> {
    let i18n = app.i18n();
    let brand_line = match payment::validate_card(number) {
        Some(brand) => i18n.tr_with_args("cli-card-brand", &[("brand", brand.as_str())]),
        None => i18n.tr("cli-card-brand-unknown"),
    };
    writeln!(out, "{}", brand_line)?;

    let valid = payment::luhn_check(number);
    let key = if valid {
        "cli-card-luhn-valid"
    } else {
        "cli-card-luhn-invalid"
    };
    writeln!(out, "{}", i18n.tr(key))?;

    let formatted = payment::format_card_number(number);
    let args = [("number", formatted.as_str())];
    writeln!(out, "{}", i18n.tr_with_args("cli-card-formatted", &args))?;

    Ok(Outcome::from(valid))
}

/// Checks that the card has not expired.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn run_expiry<C: Clock, W: Write>(
    app: &App<C>,
    month: &str,
    year: &str,
    out: &mut W,
) -> Result<Outcome> {
    let future = payment::validate_expiry_date(month, year);
    let key = if future {
        "cli-expiry-future"
    } else {
        "cli-expiry-past"
    };
    writeln!(out, "{}", app.i18n().tr(key))?;
    Ok(Outcome::from(future))
}

/// Validates a whole form, printing one `field: message` line per problem.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn run_validate<C: Clock, W: Write>(
    app: &mut App<C>,
    form: &CardPaymentForm,
    out: &mut W,
) -> Result<Outcome> {
    match app.submit_payment(form) {
        Ok(()) => {
            writeln!(out, "{}", app.i18n().tr("cli-validate-ok"))?;
            Ok(Outcome::Success)
        }
        Err(errors) => {
            let messages = app.localized_errors(&errors);
            for (error, message) in errors.errors().iter().zip(messages) {
                writeln!(out, "{}: {}", error.field().name(), message)?;
            }
            Ok(Outcome::Failure)
        }
    }
}

/// Classifies a status badge; unknown statuses fail.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn run_status<C: Clock, W: Write>(app: &App<C>, text: &str, out: &mut W) -> Result<Outcome> {
    let i18n = app.i18n();
    match StatusVariant::classify(text) {
        Ok(variant) => {
            let line = i18n.tr_with_args("cli-status-variant", &[("variant", variant.as_str())]);
            writeln!(out, "{}", line)?;
            Ok(Outcome::Success)
        }
        Err(_) => {
            let line = i18n.tr_with_args("cli-status-unknown", &[("status", text)]);
            writeln!(out, "{}", line)?;
            Ok(Outcome::Failure)
        }
    }
}

/// Shows three toasts on the wall clock and reports each dismissal live.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub async fn run_toast_demo<W: Write>(app: &mut App, out: &mut W) -> Result<Outcome> {
    let demo = [
        (ToastKind::Info, "cli-toasts-demo-info"),
        (ToastKind::Warning, "cli-toasts-demo-warning"),
        (ToastKind::Error, "cli-toasts-demo-error"),
    ];

    let mut shown = Vec::with_capacity(demo.len());
    for (kind, key) in demo {
        let title = app.i18n().tr(key);
        let id = app.toasts_mut().add_toast(title.clone(), None, kind);
        let args = [("kind", kind.as_str()), ("title", title.as_str())];
        writeln!(out, "{}", app.i18n().tr_with_args("cli-toasts-shown", &args))?;
        shown.push(id);
        tokio::time::sleep(DEMO_STAGGER).await;
        report_expired(app, out)?;
    }

    // Close the warning early; its timer still fires later as a no-op.
    if let Some(&warning) = shown.get(1) {
        if app.toasts_mut().dismiss_toast(warning) {
            print_event(app, "cli-toasts-dismissed", warning, out)?;
        }
    }

    while let Some(deadline) = app.toasts().next_deadline() {
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        report_expired(app, out)?;
    }
    Ok(Outcome::Success)
}

fn report_expired<C: Clock, W: Write>(app: &mut App<C>, out: &mut W) -> Result<()> {
    for id in app.tick() {
        print_event(app, "cli-toasts-expired", id, out)?;
    }
    Ok(())
}

fn print_event<C: Clock, W: Write>(
    app: &App<C>,
    key: &str,
    id: ToastId,
    out: &mut W,
) -> Result<()> {
    let id = id.to_string();
    writeln!(out, "{}", app.i18n().tr_with_args(key, &[("id", id.as_str())]))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::CardField;
    use crate::ui::notifications::ManualClock;
    use std::ffi::OsString;
    use tempfile::{tempdir, TempDir};

    fn args(list: &[&str]) -> pico_args::Arguments {
        pico_args::Arguments::from_vec(list.iter().map(OsString::from).collect())
    }

    fn test_app(dir: &TempDir) -> App<ManualClock> {
        let flags = Flags {
            lang: Some("en-US".to_string()),
            config_dir: Some(dir.path().join("config")),
            data_dir: Some(dir.path().join("data")),
        };
        App::with_clock(flags, ManualClock::new())
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).expect("utf-8 output")
    }

    #[test]
    fn help_and_missing_command_print_usage() {
        assert_eq!(parse_args(args(&["--help"])).expect("parse"), None);
        assert_eq!(parse_args(args(&["-h", "card", "4111"])).expect("parse"), None);
        assert_eq!(parse_args(args(&[])).expect("parse"), None);
    }

    #[test]
    fn global_options_are_collected() {
        let cli = parse_args(args(&[
            "--lang",
            "fr",
            "--config-dir",
            "/tmp/cfg",
            "--data-dir",
            "/tmp/data",
            "status",
            "Paid",
        ]))
        .expect("parse")
        .expect("command");

        let (flags, command) = cli.into_parts();
        assert_eq!(flags.lang.as_deref(), Some("fr"));
        assert_eq!(flags.config_dir, Some(PathBuf::from("/tmp/cfg")));
        assert_eq!(flags.data_dir, Some(PathBuf::from("/tmp/data")));
        assert_eq!(command, Command::Status("Paid".to_string()));
    }

    #[test]
    fn validate_reads_every_field() {
        let cli = parse_args(args(&[
            "validate", "--number", "4111", "--month", "12", "--year", "30", "--cvv", "123",
            "--name", "Ada",
        ]))
        .expect("parse")
        .expect("command");

        let Command::Validate(form) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(form.card_number, "4111");
        assert_eq!(form.expiry_month, "12");
        assert_eq!(form.expiry_year, "30");
        assert_eq!(form.cvv, "123");
        assert_eq!(form.cardholder_name, "Ada");
    }

    #[test]
    fn usage_errors_are_reported() {
        for line in [
            &["refund", "42"][..],
            &["card"][..],
            &["card", "4111", "extra"][..],
            &["expiry", "12"][..],
            &["validate", "--number", "4111"][..],
            &["--lang"][..],
        ] {
            let result = parse_args(args(line));
            assert!(matches!(result, Err(Error::Cli(_))), "{:?}", line);
        }
    }

    #[test]
    fn card_command_reports_brand_and_checksum() {
        let dir = tempdir().expect("temp dir");
        let app = test_app(&dir);

        let mut out = Vec::new();
        let outcome = run_card(&app, "4111111111111111", &mut out).expect("write");
        assert_eq!(outcome, Outcome::Success);
        let text = output(out);
        assert!(text.contains("Brand: visa"));
        assert!(text.contains("Checksum: valid"));
        assert!(text.contains("Formatted: 4111 1111 1111 1111"));

        let mut out = Vec::new();
        let outcome = run_card(&app, "4111111111111112", &mut out).expect("write");
        assert_eq!(outcome, Outcome::Failure);
        assert!(output(out).contains("Checksum: invalid"));
    }

    #[test]
    fn expiry_command_fails_for_past_dates() {
        let dir = tempdir().expect("temp dir");
        let app = test_app(&dir);

        let mut out = Vec::new();
        assert_eq!(
            run_expiry(&app, "01", "01", &mut out).expect("write"),
            Outcome::Failure
        );
        assert_eq!(output(out).trim(), "The card has expired");

        let mut out = Vec::new();
        assert_eq!(
            run_expiry(&app, "12", "99", &mut out).expect("write"),
            Outcome::Success
        );
    }

    #[test]
    fn validate_command_lists_each_bad_field() {
        let dir = tempdir().expect("temp dir");
        let mut app = test_app(&dir);
        let form = CardPaymentForm {
            card_number: "4111".to_string(),
            expiry_month: "12".to_string(),
            expiry_year: "30".to_string(),
            cvv: "1".to_string(),
            cardholder_name: "Ada Lovelace".to_string(),
        };

        let mut out = Vec::new();
        let outcome = run(&mut app, &Command::Validate(form), &mut out).expect("write");
        assert_eq!(outcome, Outcome::Failure);

        let text = output(out);
        let mut fields: Vec<_> = text
            .lines()
            .filter_map(|line| line.split_once(": ").map(|(field, _)| field))
            .collect();
        fields.dedup();
        assert_eq!(fields, [CardField::CardNumber.name(), CardField::Cvv.name()]);
    }

    #[test]
    fn status_command_fails_on_unknown_text() {
        let dir = tempdir().expect("temp dir");
        let mut app = test_app(&dir);

        let mut out = Vec::new();
        let known = Command::Status("Out of Stock".to_string());
        assert_eq!(run(&mut app, &known, &mut out).expect("write"), Outcome::Success);
        assert!(output(out).contains("Badge: error"));

        let mut out = Vec::new();
        let unknown = Command::Status("Mystery".to_string());
        assert_eq!(run(&mut app, &unknown, &mut out).expect("write"), Outcome::Failure);
        assert!(output(out).contains("Unknown status \"Mystery\""));
    }

    #[test]
    fn outcome_maps_to_exit_code() {
        assert_eq!(Outcome::from(true), Outcome::Success);
        assert_eq!(Outcome::from(false), Outcome::Failure);
        assert_eq!(USAGE_EXIT, 2);
    }
}
