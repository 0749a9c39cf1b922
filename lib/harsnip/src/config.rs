//! Render options.

use serde::{Deserialize, Serialize};

/// Indentation setting: a string to indent with, or a flag.
///
/// `false` renders shell commands on a single line; `true` keeps the
/// renderer's default indentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Indent {
    /// Enable or disable indentation.
    Enabled(bool),
    /// Indent with this string.
    With(String),
}

/// Options passed to every renderer.
///
/// Every key is optional; each renderer applies its own default for unset
/// keys and ignores keys it does not understand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Indentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<Indent>,
    /// Pretty-print structured payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
    /// Use short command-line flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<bool>,
    /// Ask the generated command for verbose output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
    /// Send the body as binary data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<bool>,
}

impl RenderOptions {
    /// Create a new options builder.
    #[must_use]
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::default()
    }

    /// Parse options from a JSON object. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a known key has the wrong type.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        crate::from_json(text)
    }

    /// Indentation string, or `None` when indentation is disabled.
    #[must_use]
    pub fn indent_or(&self, default: &str) -> Option<String> {
        match &self.indent {
            None | Some(Indent::Enabled(true)) => Some(default.to_string()),
            Some(Indent::Enabled(false)) => None,
            Some(Indent::With(indent)) => Some(indent.clone()),
        }
    }

    /// Indentation string, falling back to `default` even when disabled.
    #[must_use]
    pub fn indent_str(&self, default: &str) -> String {
        self.indent_or(default)
            .unwrap_or_else(|| default.to_string())
    }

    /// `pretty`, defaulting to `true`.
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.pretty.unwrap_or(true)
    }

    /// `short`, defaulting to `false`.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.short.unwrap_or(false)
    }

    /// `verbose`, defaulting to `false`.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    /// `binary`, defaulting to `false`.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.binary.unwrap_or(false)
    }
}

/// Builder for [`RenderOptions`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    /// Indent with this string.
    #[must_use]
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.options.indent = Some(Indent::With(indent.into()));
        self
    }

    /// Render without indentation (single line where supported).
    #[must_use]
    pub fn no_indent(mut self) -> Self {
        self.options.indent = Some(Indent::Enabled(false));
        self
    }

    /// Set pretty-printing.
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.options.pretty = Some(pretty);
        self
    }

    /// Set short flags.
    #[must_use]
    pub const fn short(mut self, short: bool) -> Self {
        self.options.short = Some(short);
        self
    }

    /// Set verbose output.
    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.options.verbose = Some(verbose);
        self
    }

    /// Set binary body.
    #[must_use]
    pub const fn binary(mut self, binary: bool) -> Self {
        self.options.binary = Some(binary);
        self
    }

    /// Build the options.
    #[must_use]
    pub fn build(self) -> RenderOptions {
        self.options
    }
}
