//! The fixed set of color directives interleaved into rendered text.
//!
//! Output is consumed by chat clients that understand ANSI SGR codes, so
//! the directives are emitted unconditionally, whatever the local terminal.

use std::sync::LazyLock;

use regex::Regex;

/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";
/// White background.
pub const BACK_WHITE: &str = "\x1b[47m";
/// Black foreground.
pub const FORE_BLACK: &str = "\x1b[30m";

/// A foreground style applied to a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    /// No directive.
    Plain,
    /// Black foreground.
    Black,
    /// Red foreground.
    Red,
    /// Green foreground.
    Green,
    /// Yellow foreground.
    Yellow,
    /// Blue foreground.
    Blue,
    /// Magenta foreground.
    Magenta,
    /// White foreground.
    White,
    /// Black on white.
    Reverse,
}

impl Paint {
    /// The opening directive, empty for [`Paint::Plain`].
    pub fn directive(self) -> &'static str {
        match self {
            Paint::Plain => "",
            Paint::Black => FORE_BLACK,
            Paint::Red => "\x1b[31m",
            Paint::Green => "\x1b[32m",
            Paint::Yellow => "\x1b[33m",
            Paint::Blue => "\x1b[34m",
            Paint::Magenta => "\x1b[35m",
            Paint::White => "\x1b[37m",
            Paint::Reverse => "\x1b[47m\x1b[30m",
        }
    }

    /// Wrap `text` in this style followed by a reset.
    pub fn paint(self, text: &str) -> String {
        match self {
            Paint::Plain => text.to_string(),
            _ => format!("{}{text}{RESET}", self.directive()),
        }
    }
}

static DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid directive regex"));

/// Remove every color directive from `text`.
pub fn strip_directives(text: &str) -> String {
    DIRECTIVE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_wraps_with_reset() {
        assert_eq!(Paint::Yellow.paint("27ж"), "\x1b[33m27ж\x1b[0m");
        assert_eq!(Paint::Reverse.paint("A"), "\x1b[47m\x1b[30mA\x1b[0m");
        assert_eq!(Paint::Plain.paint("A"), "A");
    }

    #[test]
    fn strip_removes_all_directives() {
        let text = format!("{}#{}", Paint::Red.paint("Н"), Paint::Reverse.paint("A"));
        assert_eq!(strip_directives(&text), "Н#A");
    }
}
