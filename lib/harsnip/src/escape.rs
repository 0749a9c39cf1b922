//! String escaping for generated source code.

use std::fmt::Write;

/// Quote a value for a POSIX shell.
///
/// Values made only of characters that are safe unquoted are returned as-is;
/// anything else is wrapped in single quotes, with embedded single quotes
/// written as `'\''`.
///
/// ```
/// use harsnip::escape::shell_quote;
///
/// assert_eq!(shell_quote("foo=bar"), "foo=bar");
/// assert_eq!(shell_quote("it's"), r"'it'\''s'");
/// ```
#[must_use]
pub fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(
                    c,
                    '-' | '_' | '/' | '@' | '%' | '^' | '=' | ':' | ',' | '.' | '+'
                )
        });
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

/// Escape a value for a double-quoted string literal (C-like languages).
#[must_use]
pub fn escape_double_quotes(value: &str) -> String {
    escape(value, '"')
}

/// Escape a value for a single-quoted string literal (JavaScript).
#[must_use]
pub fn escape_single_quotes(value: &str) -> String {
    escape(value, '\'')
}

fn escape(value: &str, delimiter: char) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str(r"\\"),
            '\n' => escaped.push_str(r"\n"),
            '\r' => escaped.push_str(r"\r"),
            '\t' => escaped.push_str(r"\t"),
            c if c == delimiter => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_control() => {
                let _ = write!(escaped, "\\u{:04x}", u32::from(c));
            }
            c => escaped.push(c),
        }
    }
    escaped
}
