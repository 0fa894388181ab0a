use std::io::{self, Read};

pub const MISSING_TEXT: &str = "You need to provide some text";
pub const USAGE_EXAMPLE: &str = r#"Example: grok-light "What is the capital of France?""#;

/// What the program does with its inputs, decided once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPlan {
    /// Answer this prompt, then exit.
    Single(String),
    /// Read prompts line by line from a terminal.
    Interactive,
    /// A prompt argument was given but is blank.
    MissingText,
}

/// Picks the prompt source: the argument first, then piped stdin, then the
/// interactive loop. Piped text next to an argument becomes a `Context:` section.
pub fn resolve(argument: Option<&str>, piped: Option<&str>) -> InputPlan {
    let piped = piped.map(str::trim).filter(|text| !text.is_empty());

    match argument.map(str::trim) {
        Some("") => InputPlan::MissingText,
        Some(prompt) => match piped {
            Some(context) => InputPlan::Single(format!("{prompt}\n\nContext:\n{context}")),
            None => InputPlan::Single(prompt.to_string()),
        },
        None => match piped {
            Some(prompt) => InputPlan::Single(prompt.to_string()),
            None => InputPlan::Interactive,
        },
    }
}

/// Reads everything piped into stdin. Invalid UTF-8 is replaced rather than rejected.
pub fn read_piped(mut reader: impl Read) -> io::Result<String> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
