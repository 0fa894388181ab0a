pub mod cli;
pub mod config;
pub mod console;
pub mod input;
pub mod logging;
pub mod model_gateway;
pub mod providers;
pub mod repl;
pub mod responder;
pub mod thinking;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::env;
use std::io::{self, IsTerminal};
use tracing::{info, warn};

use cli::Cli;
use config::Config;
use console::Console;
use input::{InputPlan, MISSING_TEXT, USAGE_EXAMPLE};
use model_gateway::HttpModelGateway;
use repl::run_repl;
use responder::Responder;

pub async fn run() -> Result<()> {
    let cli = Cli::parse_args(env::args_os());
    if cli.version {
        println!("{}", cli::version_line());
        return Ok(());
    }
    if cli.help {
        print!("{}", cli::HELP);
        return Ok(());
    }

    let _log_guard = logging::init();
    spawn_signal_handler();

    let cfg = Config::from_env().with_overrides(cli.overrides());
    info!(
        endpoint_url = %cfg.endpoint_url,
        provider = %cfg.provider,
        model = %cfg.model,
        timeout_secs = cfg.timeout_secs,
        quiet = cfg.quiet,
        has_api_key = cfg.api_key.is_some(),
        "loaded runtime configuration"
    );
    if !cfg.provider_is_supported() {
        warn!(
            provider = %cfg.provider,
            endpoint_url = %cfg.endpoint_url,
            "provider is reserved and does not change routing"
        );
    }

    let console = Console::stdout();
    let gateway = HttpModelGateway::new(&cfg)?;
    let responder = Responder::new(gateway, console.clone(), cfg.quiet);

    let stdin = io::stdin();
    let piped = if stdin.is_terminal() {
        None
    } else {
        match input::read_piped(stdin.lock()) {
            Ok(text) => Some(text),
            Err(err) => {
                console
                    .error(&format!("Error reading standard input: {err}"))
                    .context("Failed to write to stdout")?;
                return Ok(());
            }
        }
    };

    match input::resolve(cli.prompt_text().as_deref(), piped.as_deref()) {
        InputPlan::MissingText => {
            console
                .error(MISSING_TEXT)
                .and_then(|()| console.println(USAGE_EXAMPLE))
                .context("Failed to write to stdout")?;
        }
        InputPlan::Single(prompt) => {
            responder
                .respond(&prompt)
                .await
                .context("Failed to write to stdout")?;
        }
        InputPlan::Interactive => {
            let exit = run_repl(stdin.lock(), &responder).await?;
            info!(?exit, "interactive session ended");
        }
    }

    Ok(())
}

/// Exits the process as soon as SIGINT (or SIGTERM on Unix) arrives. Nothing is
/// cleaned up: in-flight requests are dropped and pending output may be lost.
fn spawn_signal_handler() {
    tokio::spawn(async {
        wait_for_termination().await;
        std::process::exit(0);
    });
}

async fn wait_for_termination() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for interrupt signal");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for terminate signal");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {}
        _ = terminate => {}
    }
}
