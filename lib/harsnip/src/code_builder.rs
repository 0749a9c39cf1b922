//! Line accumulator used by renderers.

/// Accumulates indented lines and joins them.
///
/// # Example
///
/// ```
/// use harsnip::CodeBuilder;
///
/// let mut code = CodeBuilder::new("  ");
/// code.push("if (ok) {").push_indented(1, "run();").push("}");
/// assert_eq!(code.join(), "if (ok) {\n  run();\n}");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent: String,
    join: String,
    lines: Vec<String>,
}

impl CodeBuilder {
    /// Create a builder indenting with `indent` and joining lines with `\n`.
    #[must_use]
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
            join: "\n".to_string(),
            lines: Vec::new(),
        }
    }

    /// Join lines with `join` instead of `\n`.
    #[must_use]
    pub fn with_join(mut self, join: impl Into<String>) -> Self {
        self.join = join.into();
        self
    }

    /// Push a line at indentation level zero.
    pub fn push(&mut self, line: impl AsRef<str>) -> &mut Self {
        self.push_indented(0, line)
    }

    /// Push a line at the given indentation level.
    pub fn push_indented(&mut self, level: usize, line: impl AsRef<str>) -> &mut Self {
        self.lines
            .push(format!("{}{}", self.indent.repeat(level), line.as_ref()));
        self
    }

    /// Push an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Number of lines pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if nothing was pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join every line.
    #[must_use]
    pub fn join(&self) -> String {
        self.lines.join(&self.join)
    }
}
