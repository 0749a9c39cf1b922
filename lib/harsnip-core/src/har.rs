//! HAR input model.
//!
//! A [`RawRequest`] mirrors the HAR `request` object, with every field
//! optional so that partial requests can be accepted and defaulted before
//! validation. [`Input`] is the explicit boundary type: callers hand over
//! either one request or a whole HAR log.
//!
//! # Example
//!
//! ```
//! use harsnip_core::Input;
//!
//! let input = Input::from_json(r#"{"method": "GET", "url": "https://example.com"}"#)
//!     .expect("valid input");
//! assert_eq!(input.into_requests().len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::{Error, Result};

/// Default HTTP version applied to requests without one.
pub const DEFAULT_HTTP_VERSION: &str = "HTTP/1.1";

/// Default MIME type applied to bodies without one.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// A `name`/`value` pair, used for query string entries, headers and cookies.
///
/// Both fields are required when decoding; an empty name is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValue {
    /// Entry name.
    pub name: String,
    /// Entry value.
    pub value: String,
}

impl NameValue {
    /// Create a pair.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A posted parameter of a form or multipart body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Parameter value, or the file content when `file_name` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Name of the posted file, if this parameter is a file reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Content type of the posted file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl Param {
    /// Create a plain value parameter.
    #[must_use]
    pub fn value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Create a file reference parameter.
    #[must_use]
    pub fn file(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: Some(file_name.into()),
            ..Self::default()
        }
    }

    /// Set the content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// The HAR `postData` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPostData {
    /// Declared MIME type of the body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Raw body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Posted parameters (form and multipart bodies).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Param>>,
    /// Multipart boundary, if the capture recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<String>,
    /// Body size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

/// The HAR `request` object, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRequest {
    /// HTTP method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Absolute request URL, possibly with a query string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTTP version (e.g. `HTTP/1.1`, `HTTP/2.0`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_version: Option<String>,
    /// Explicit query string entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string: Option<Vec<NameValue>>,
    /// Request headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<NameValue>>,
    /// Request cookies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<NameValue>>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_data: Option<RawPostData>,
    /// Total size of the request headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers_size: Option<i64>,
    /// Size of the request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_size: Option<i64>,
}

impl RawRequest {
    /// Create a request with a method and URL.
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Set the HTTP version.
    #[must_use]
    pub fn http_version(mut self, version: impl Into<String>) -> Self {
        self.http_version = Some(version.into());
        self
    }

    /// Append a query string entry.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string
            .get_or_insert_with(Vec::new)
            .push(NameValue::new(name, value));
        self
    }

    /// Append a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Vec::new)
            .push(NameValue::new(name, value));
        self
    }

    /// Append a cookie.
    #[must_use]
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies
            .get_or_insert_with(Vec::new)
            .push(NameValue::new(name, value));
        self
    }

    /// Set a text body.
    #[must_use]
    pub fn text_body(mut self, mime_type: impl Into<String>, text: impl Into<String>) -> Self {
        let post_data = self.post_data.get_or_insert_with(RawPostData::default);
        post_data.mime_type = Some(mime_type.into());
        post_data.text = Some(text.into());
        self
    }

    /// Set a parameter body (form or multipart).
    #[must_use]
    pub fn params_body(
        mut self,
        mime_type: impl Into<String>,
        params: impl IntoIterator<Item = Param>,
    ) -> Self {
        let post_data = self.post_data.get_or_insert_with(RawPostData::default);
        post_data.mime_type = Some(mime_type.into());
        post_data.params = Some(params.into_iter().collect());
        self
    }

    /// Fill in every optional field that validation requires.
    ///
    /// The HTTP version falls back to `HTTP/1.1`, lists become empty, the
    /// body becomes an empty `application/octet-stream` body, and every size
    /// field is reset to `0`.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        if self.http_version.as_deref().is_none_or(str::is_empty) {
            self.http_version = Some(DEFAULT_HTTP_VERSION.to_string());
        }
        self.query_string.get_or_insert_with(Vec::new);
        self.headers.get_or_insert_with(Vec::new);
        self.cookies.get_or_insert_with(Vec::new);

        let post_data = self.post_data.get_or_insert_with(RawPostData::default);
        if post_data.mime_type.as_deref().is_none_or(str::is_empty) {
            post_data.mime_type = Some(DEFAULT_MIME_TYPE.to_string());
        }
        post_data.size = Some(0);

        self.headers_size = Some(0);
        self.body_size = Some(0);
        self
    }
}

/// A HAR log entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The captured request.
    pub request: RawRequest,
}

/// The HAR `log` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarLog {
    /// Captured entries, in order.
    pub entries: Vec<Entry>,
}

/// A HAR document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Har {
    /// The log.
    pub log: HarLog,
}

impl FromIterator<RawRequest> for Har {
    fn from_iter<I: IntoIterator<Item = RawRequest>>(iter: I) -> Self {
        Self {
            log: HarLog {
                entries: iter.into_iter().map(|request| Entry { request }).collect(),
            },
        }
    }
}

/// Input accepted by a snippet session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A single HAR request object.
    Request(RawRequest),
    /// A HAR document holding any number of entries.
    Har(Har),
}

impl Input {
    /// Parse an input from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or the document is neither a
    /// request object nor a HAR log.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Build an input from a JSON value.
    ///
    /// An object with a `log` member is read as a HAR log: its `entries`
    /// must be an array, and entries whose `request` cannot be read as a
    /// request object are dropped. Any other object is read as a single
    /// request.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object, if `log.entries` is
    /// not an array, or if a single request has fields of the wrong type.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut object) = value else {
            return Err(Error::invalid_input(format!(
                "expected a request or a HAR log object, got {}",
                json_kind(&value)
            )));
        };

        let Some(log) = object.remove("log") else {
            return deserialize(Value::Object(object)).map(Self::Request);
        };

        let Value::Object(mut log) = log else {
            return Err(Error::invalid_input("HAR `log` must be an object"));
        };
        let Some(Value::Array(entries)) = log.remove("entries") else {
            return Err(Error::invalid_input("HAR `log.entries` must be an array"));
        };

        let entries = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, mut entry)| {
                let request = entry.get_mut("request").map(Value::take)?;
                match deserialize::<RawRequest>(request) {
                    Ok(request) => Some(Entry { request }),
                    Err(err) => {
                        warn!(index, error = %err, "dropping unreadable HAR entry");
                        None
                    }
                }
            })
            .collect();

        Ok(Self::Har(Har {
            log: HarLog { entries },
        }))
    }

    /// The raw requests held by this input, in order.
    #[must_use]
    pub fn into_requests(self) -> Vec<RawRequest> {
        match self {
            Self::Request(request) => vec![request],
            Self::Har(har) => har
                .log
                .entries
                .into_iter()
                .map(|entry| entry.request)
                .collect(),
        }
    }
}

impl From<RawRequest> for Input {
    fn from(request: RawRequest) -> Self {
        Self::Request(request)
    }
}

impl From<Har> for Input {
    fn from(har: Har) -> Self {
        Self::Har(har)
    }
}

fn deserialize<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value)
        .map_err(|e| Error::json_deserialization(e.path().to_string(), e.inner().to_string()))
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
