use std::env;

pub const DEFAULT_PROVIDER: &str = "grok";
pub const DEFAULT_MODEL: &str = "grok-3";
pub const DEFAULT_ENDPOINT_URL: &str = "https://api.x.ai/v1/grok";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime settings, built once at startup and shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint_url: String,
    pub api_key: Option<String>,
    /// Reserved: accepted and logged, but requests always go to `endpoint_url`.
    pub provider: String,
    pub model: String,
    pub timeout_secs: u64,
    pub quiet: bool,
}

/// Values given on the command line; `None` keeps the environment value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub provider: Option<String>,
    pub quiet: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    fn from_env_with(mut get_var: impl FnMut(&str) -> Option<String>) -> Self {
        Self {
            endpoint_url: parse_non_blank(get_var("AI_ENDPOINT_URL").as_deref())
                .unwrap_or_else(|| DEFAULT_ENDPOINT_URL.to_string()),
            api_key: parse_non_blank(get_var("AI_API_KEY").as_deref()),
            provider: parse_provider(get_var("AI_PROVIDER").as_deref()),
            model: parse_non_blank(get_var("AI_MODEL").as_deref())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout_secs: parse_timeout_secs(get_var("AI_TIMEOUT_SECS").as_deref()),
            quiet: false,
        }
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(api_key) = overrides.api_key {
            self.api_key = parse_non_blank(Some(&api_key));
        }
        if let Some(provider) = overrides.provider {
            self.provider = parse_provider(Some(&provider));
        }
        self.quiet = overrides.quiet;
        self
    }

    pub fn provider_is_supported(&self) -> bool {
        self.provider.eq_ignore_ascii_case(DEFAULT_PROVIDER)
    }
}

fn parse_non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_provider(raw: Option<&str>) -> String {
    parse_non_blank(raw).unwrap_or_else(|| DEFAULT_PROVIDER.to_string())
}

fn parse_timeout_secs(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}
