use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::debug;

use crate::model_gateway::ModelGateway;
use crate::responder::Responder;

const BANNER: &str = "Interactive mode started. Press Ctrl+C to quit.";
const PROMPT_MARKER: &str = "You> ";
const EXIT_COMMAND: &str = "exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplExit {
    /// The user typed `exit`.
    ExitCommand,
    /// Input ran out.
    EndOfInput,
    /// Reading input failed; the error has already been printed.
    InputError,
}

/// Reads one prompt per line until `exit`, end of input, or a read failure.
/// Every turn is an independent request; nothing is remembered between them.
pub async fn run_repl<R, G, W>(mut input: R, responder: &Responder<G, W>) -> Result<ReplExit>
where
    R: BufRead,
    G: ModelGateway,
    W: Write + Send + 'static,
{
    let console = responder.console();
    let style = console.style();
    console
        .println(&format!("{}\n", style.bold(BANNER)))
        .context("Failed to write to stdout")?;

    let mut line = Vec::new();
    loop {
        console
            .print(&style.blue(PROMPT_MARKER))
            .context("Failed to write to stdout")?;

        line.clear();
        let read = match input.read_until(b'\n', &mut line) {
            Ok(read) => read,
            Err(err) => {
                console
                    .error(&format!("Error reading input: {err}"))
                    .context("Failed to write to stdout")?;
                return Ok(ReplExit::InputError);
            }
        };
        if read == 0 {
            debug!("interactive input exhausted");
            return Ok(ReplExit::EndOfInput);
        }

        let text = String::from_utf8_lossy(&line);
        let prompt = text.trim();
        if prompt == EXIT_COMMAND {
            return Ok(ReplExit::ExitCommand);
        }
        if prompt.is_empty() {
            continue;
        }

        responder
            .respond(prompt)
            .await
            .context("Failed to write to stdout")?;
    }
}
