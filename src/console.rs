use std::env;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";

/// ANSI styling for one output stream. Disabled styles pass text through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    enabled: bool,
}

impl Style {
    #[cfg(test)]
    pub(crate) fn plain() -> Self {
        Self { enabled: false }
    }

    #[cfg(test)]
    pub(crate) fn colored() -> Self {
        Self { enabled: true }
    }

    /// Colors are used only on a terminal and only when `NO_COLOR` is unset or empty.
    pub fn for_stdout() -> Self {
        let no_color = env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        Self {
            enabled: io::stdout().is_terminal() && !no_color,
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    pub fn blue(&self, text: &str) -> String {
        self.paint(BLUE, text)
    }

    pub fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Shared handle to the program's output stream.
///
/// Every write is flushed immediately so partial lines (`Thinking...`, `You> `)
/// show up before the program blocks.
pub struct Console<W> {
    out: Arc<Mutex<W>>,
    style: Style,
}

impl<W> Clone for Console<W> {
    fn clone(&self) -> Self {
        Self {
            out: Arc::clone(&self.out),
            style: self.style,
        }
    }
}

impl Console<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), Style::for_stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, style: Style) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
            style,
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn print(&self, text: &str) -> io::Result<()> {
        let mut out = self.lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    pub fn println(&self, text: &str) -> io::Result<()> {
        let mut out = self.lock();
        out.write_all(text.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()
    }

    /// Prints a diagnostic line prefixed with `Error:`.
    pub fn error(&self, message: &str) -> io::Result<()> {
        let line = self.style.red(&format!("Error: {message}"));
        self.println(&line)
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
impl Console<Vec<u8>> {
    pub fn buffer() -> Self {
        Self::new(Vec::new(), Style::plain())
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }
}
