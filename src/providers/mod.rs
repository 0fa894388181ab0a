pub mod grok;
pub(crate) mod http_errors;
