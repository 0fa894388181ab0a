use clap::Parser;
use std::ffi::OsString;

use crate::config::Overrides;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP: &str = r#"grok-light - Lightweight terminal AI client for Grok 3

Usage:
  grok-light [flags] [prompt]

Flags:
  -h, --help          Show this help message
  -v, --version       Show version
  -q, --quiet         Quiet mode (no loading animation)
  -key string         API key for Grok 3 (or set AI_API_KEY)
  -provider string    AI provider (default: grok, or set AI_PROVIDER)

Examples:
  grok-light "What is the capital of France?"
  echo "Explain gravity" | grok-light
  grok-light -q "Define AI"

For API access, visit https://x.ai/api
"#;

/// Flags that take a value and may be spelled with a single dash (`-key`).
const LONG_FLAGS: [&str; 2] = ["key", "provider"];

#[derive(Debug, Parser)]
#[command(name = "grok-light", disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// API key sent as a bearer token.
    #[arg(long = "key", value_name = "KEY")]
    pub key: Option<String>,

    /// Provider label; reserved.
    #[arg(long = "provider", value_name = "PROVIDER")]
    pub provider: Option<String>,

    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    #[arg(short = 'v', long = "version")]
    pub version: bool,

    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Prompt text; several words are joined with spaces.
    #[arg(value_name = "PROMPT")]
    pub prompt: Vec<String>,
}

impl Cli {
    pub fn parse_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::parse_from(normalize_args(args))
    }

    /// `None` when no positional argument was given at all.
    pub fn prompt_text(&self) -> Option<String> {
        if self.prompt.is_empty() {
            None
        } else {
            Some(self.prompt.join(" "))
        }
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.key.clone(),
            provider: self.provider.clone(),
            quiet: self.quiet,
        }
    }
}

pub fn version_line() -> String {
    format!("grok-light {VERSION}")
}

/// Rewrites `-key` / `-provider=x` to their `--` spellings. Arguments after a
/// bare `--` are left alone.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut seen_terminator = false;
    args.into_iter()
        .map(|arg| {
            if seen_terminator {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                seen_terminator = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') && is_single_dash_long_flag(rest) => {
                    OsString::from(format!("--{rest}"))
                }
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long_flag(rest: &str) -> bool {
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}
