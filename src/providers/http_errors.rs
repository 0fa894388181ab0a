use anyhow::anyhow;
use std::error::Error as StdError;
use std::io::ErrorKind;

fn error_chain_matches(err: &(dyn StdError + 'static), kind: ErrorKind, needle: &str) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == kind
        {
            return true;
        }

        if source.to_string().to_ascii_lowercase().contains(needle) {
            return true;
        }

        current = source.source();
    }

    false
}

fn error_chain_has_connection_refused(err: &(dyn StdError + 'static)) -> bool {
    error_chain_matches(err, ErrorKind::ConnectionRefused, "connection refused")
}

fn error_chain_has_timeout(err: &(dyn StdError + 'static)) -> bool {
    error_chain_matches(err, ErrorKind::TimedOut, "timed out")
}

/// Turns a transport failure into a one-line, actionable description.
pub(crate) fn transport_error(
    err: reqwest::Error,
    endpoint_url: &str,
    timeout_secs: u64,
) -> anyhow::Error {
    if err.is_timeout() || error_chain_has_timeout(&err) {
        return anyhow!(
            "request to '{}' timed out after {}s; raise AI_TIMEOUT_SECS or try again later",
            endpoint_url,
            timeout_secs
        );
    }

    if err.is_connect() {
        if error_chain_has_connection_refused(&err) {
            return anyhow!(
                "connection refused by '{}'; check AI_ENDPOINT_URL",
                endpoint_url
            );
        }

        return anyhow!(
            "failed to connect to '{}'; check AI_ENDPOINT_URL and network connectivity",
            endpoint_url
        );
    }

    anyhow!("request to '{}' failed: {}", endpoint_url, err)
}
