// SPDX-License-Identifier: MPL-2.0
use bizdesk::app::App;
use bizdesk::cli::{self, Command, Outcome, HELP, USAGE_EXIT};
use bizdesk::config;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const ENV_LOG: &str = "BIZDESK_LOG";

fn init_tracing(config_filter: Option<&str>) {
    let filter = EnvFilter::try_from_env(ENV_LOG)
        .ok()
        .or_else(|| config_filter.and_then(|directive| EnvFilter::try_new(directive).ok()))
        .unwrap_or_else(|| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match cli::parse_args(pico_args::Arguments::from_env()) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            print!("{}", HELP);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{}\n\n{}", err, HELP);
            return ExitCode::from(USAGE_EXIT);
        }
    };

    // The config is read once, by the app; startup warnings become toasts.
    let (flags, command) = cli.into_parts();
    let mut app = App::new(flags);
    init_tracing(app.config().general.log_filter.as_deref());

    let mut stdout = std::io::stdout().lock();
    let result = match command {
        Command::Toasts => cli::run_toast_demo(&mut app, &mut stdout).await,
        other => cli::run(&mut app, &other, &mut stdout),
    };
    let outcome = result.unwrap_or_else(|err| {
        eprintln!("{}", err);
        Outcome::Failure
    });

    if let Some(key) = app.shutdown() {
        tracing::warn!(key = key.as_str(), "session not saved");
    }
    outcome.into()
}
