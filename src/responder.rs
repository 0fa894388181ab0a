use std::io::{self, Write};

use tracing::debug;

use crate::console::Console;
use crate::model_gateway::ModelGateway;
use crate::thinking::{DOT_INTERVAL, Thinking};

/// Sends prompts through a gateway and prints the outcome.
///
/// Request failures never escape: they are printed as `Error:` lines and the
/// caller moves on. Only failures to write to the console are returned.
pub struct Responder<G, W> {
    gateway: G,
    console: Console<W>,
    quiet: bool,
}

impl<G, W> Responder<G, W>
where
    G: ModelGateway,
    W: Write + Send + 'static,
{
    pub fn new(gateway: G, console: Console<W>, quiet: bool) -> Self {
        Self {
            gateway,
            console,
            quiet,
        }
    }

    pub fn console(&self) -> &Console<W> {
        &self.console
    }

    #[cfg(test)]
    pub(crate) fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn respond(&self, prompt: &str) -> io::Result<()> {
        let thinking = (!self.quiet).then(|| Thinking::start(&self.console, DOT_INTERVAL));

        let outcome = self.gateway.complete(prompt).await;

        if let Some(thinking) = thinking {
            thinking.stop().await;
            self.console.println("")?;
        }

        match outcome {
            Ok(text) => self.console.println(&format!("\n{text}")),
            Err(err) => {
                debug!(error = %format!("{err:#}"), "completion failed");
                self.console.error(&format!("{err:#}"))
            }
        }
    }
}
