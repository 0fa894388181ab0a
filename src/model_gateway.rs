use anyhow::{Context, Result};
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::config::Config;
use crate::providers::grok;

pub type CompletionFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + 'a>>;

/// One stateless prompt-in, text-out exchange with the remote model.
pub trait ModelGateway {
    fn complete<'a>(&'a self, prompt: &'a str) -> CompletionFuture<'a>;
}

pub struct HttpModelGateway<'a> {
    client: Client,
    cfg: &'a Config,
}

impl<'a> HttpModelGateway<'a> {
    pub fn new(cfg: &'a Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("Failed to initialize HTTP client")?;
        Ok(Self { client, cfg })
    }
}

impl ModelGateway for HttpModelGateway<'_> {
    fn complete<'b>(&'b self, prompt: &'b str) -> CompletionFuture<'b> {
        Box::pin(grok::complete(&self.client, self.cfg, prompt))
    }
}
