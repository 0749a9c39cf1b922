//! Body classification and serialization utilities.

use crate::{PairMap, Result};

/// How the normalizer treats a declared body MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeKind {
    /// `multipart/{form-data,mixed,related,alternative}`.
    Multipart,
    /// `application/x-www-form-urlencoded`.
    FormUrlEncoded,
    /// `application/json` and its aliases.
    Json,
    /// Anything else, passed through untouched.
    Other,
}

impl MimeKind {
    /// Classify a declared MIME type.
    ///
    /// The match is exact: parameters such as `; charset=utf-8` make the
    /// type fall into [`MimeKind::Other`].
    #[must_use]
    pub fn of(mime_type: &str) -> Self {
        match mime_type {
            "multipart/mixed"
            | "multipart/related"
            | "multipart/form-data"
            | "multipart/alternative" => Self::Multipart,
            "application/x-www-form-urlencoded" => Self::FormUrlEncoded,
            "text/json" | "text/x-json" | "application/json" | "application/x-json" => Self::Json,
            _ => Self::Other,
        }
    }

    /// Canonical MIME type for this kind, if it has one.
    #[must_use]
    pub const fn canonical(&self) -> Option<&'static str> {
        match self {
            Self::Multipart => Some(MULTIPART_FORM_DATA),
            Self::FormUrlEncoded => Some(FORM_URL_ENCODED),
            Self::Json => Some(APPLICATION_JSON),
            Self::Other => None,
        }
    }
}

/// `multipart/form-data`.
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";
/// `application/x-www-form-urlencoded`.
pub const FORM_URL_ENCODED: &str = "application/x-www-form-urlencoded";
/// `application/json`.
pub const APPLICATION_JSON: &str = "application/json";
/// `text/plain`.
pub const TEXT_PLAIN: &str = "text/plain";

/// Serialize pairs as an `application/x-www-form-urlencoded` string.
///
/// # Errors
///
/// Returns an error if form serialization fails.
///
/// # Example
///
/// ```
/// use harsnip_core::{PairMap, to_form};
///
/// let pairs: PairMap = [("a", "1"), ("b", "x y")].into_iter().collect();
/// assert_eq!(to_form(&pairs).expect("serialize"), "a=1&b=x+y");
/// ```
pub fn to_form(pairs: &PairMap) -> Result<String> {
    let pairs: Vec<(&str, &str)> = pairs.iter().collect();
    serde_urlencoded::to_string(pairs).map_err(Into::into)
}

/// Deserialize JSON text with path-aware error messages.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON for `T`.
pub fn from_json<T: serde::de::DeserializeOwned>(text: &str) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })?;
    deserializer.end()?;
    Ok(value)
}
