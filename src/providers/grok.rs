use anyhow::{Context, Result, bail};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Request, Url};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::providers::http_errors::transport_error;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    model: &'a str,
}

fn encode_payload(prompt: &str, model: &str) -> Result<Vec<u8>> {
    serde_json::to_vec(&CompletionRequest { prompt, model }).context("Error marshaling payload")
}

fn build_request(client: &Client, cfg: &Config, body: Vec<u8>) -> Result<Request> {
    let url = Url::parse(&cfg.endpoint_url).context("Error creating request")?;
    let mut builder = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(body);
    if let Some(api_key) = &cfg.api_key {
        builder = builder.bearer_auth(api_key);
    }
    builder.build().context("Error creating request")
}

/// Pulls the `response` string out of a completion body. A bare `null` body
/// parses but carries no fields, so it is a format error rather than a parse error.
pub(crate) fn extract_response(body: &[u8]) -> Result<String> {
    let parsed: Option<Map<String, Value>> =
        serde_json::from_slice(body).context("Error parsing response")?;
    match parsed.as_ref().and_then(|fields| fields.get("response")) {
        Some(Value::String(text)) => Ok(text.clone()),
        _ => bail!("Invalid response format"),
    }
}

/// Sends one prompt and returns the completion text. The HTTP status is not
/// interpreted: whatever body comes back is parsed.
pub async fn complete(client: &Client, cfg: &Config, prompt: &str) -> Result<String> {
    let body = encode_payload(prompt, &cfg.model)?;
    let request = build_request(client, cfg, body)?;
    debug!(
        endpoint_url = %cfg.endpoint_url,
        model = %cfg.model,
        prompt_len = prompt.len(),
        has_api_key = cfg.api_key.is_some(),
        "sending completion request"
    );

    let response = client
        .execute(request)
        .await
        .map_err(|err| {
            debug!(
                endpoint_url = %cfg.endpoint_url,
                error = %err,
                "completion request failed"
            );
            transport_error(err, &cfg.endpoint_url, cfg.timeout_secs)
        })
        .context("Error sending request")?;

    let status = response.status();
    if !status.is_success() {
        warn!(
            endpoint_url = %cfg.endpoint_url,
            status = %status,
            "endpoint returned non-success status"
        );
    }

    let body = response.bytes().await.context("Error reading response")?;
    let text = extract_response(&body)?;
    debug!(
        status = %status,
        body_len = body.len(),
        response_len = text.len(),
        "received completion response"
    );
    Ok(text)
}
