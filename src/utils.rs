//! Small helpers shared by the farm scripts.

/// Escapes angle brackets so arbitrary text survives Telegram HTML messages.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('<', "\\<").replace('>', "\\>")
}
