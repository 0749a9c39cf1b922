//! HAR request validation.
//!
//! [`validate`] turns a defaulted [`RawRequest`] into a [`HarRequest`] whose
//! shape is guaranteed, so the normalizer never has to re-check it.

use derive_more::{Display, Error};
use url::Url;

use crate::har::{NameValue, Param, RawPostData, RawRequest};

/// Why a request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum Invalid {
    /// The `method` field is missing.
    #[display("missing `method`")]
    MissingMethod,

    /// The `method` is not a valid HTTP token.
    #[display("`{_0}` is not a valid HTTP method")]
    BadMethod(#[error(not(source))] String),

    /// The `url` field is missing.
    #[display("missing `url`")]
    MissingUrl,

    /// The `url` is not an absolute URL.
    #[display("`{url}` is not an absolute URL: {reason}")]
    BadUrl {
        /// Offending URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The `httpVersion` field is missing or empty.
    #[display("missing `httpVersion`")]
    MissingHttpVersion,
}

/// A validated request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarPostData {
    /// Declared MIME type.
    pub mime_type: String,
    /// Raw body text.
    pub text: Option<String>,
    /// Posted parameters.
    pub params: Option<Vec<Param>>,
}

/// A validated HAR request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarRequest {
    /// HTTP method, as written in the input.
    pub method: String,
    /// Parsed absolute URL.
    pub url: Url,
    /// HTTP version.
    pub http_version: String,
    /// Explicit query string entries.
    pub query_string: Vec<NameValue>,
    /// Headers.
    pub headers: Vec<NameValue>,
    /// Cookies.
    pub cookies: Vec<NameValue>,
    /// Body.
    pub post_data: HarPostData,
}

/// Returns `true` if the request would pass [`validate`].
#[must_use]
pub fn is_valid(request: &RawRequest) -> bool {
    validate(request.clone()).is_ok()
}

/// Validate a request.
///
/// Missing optional fields are defaulted first, so only `method` and `url`
/// are strictly required.
///
/// # Errors
///
/// Returns the first [`Invalid`] reason found.
pub fn validate(request: RawRequest) -> Result<HarRequest, Invalid> {
    let RawRequest {
        method,
        url,
        http_version,
        query_string,
        headers,
        cookies,
        post_data,
        ..
    } = request.with_defaults();

    let method = method.ok_or(Invalid::MissingMethod)?;
    if http::Method::from_bytes(method.as_bytes()).is_err() {
        return Err(Invalid::BadMethod(method));
    }

    let raw_url = url.ok_or(Invalid::MissingUrl)?;
    let url = Url::parse(&raw_url).map_err(|e| Invalid::BadUrl {
        url: raw_url.clone(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(Invalid::BadUrl {
            url: raw_url,
            reason: "URL cannot be a base".to_string(),
        });
    }

    let http_version = http_version
        .filter(|version| !version.is_empty())
        .ok_or(Invalid::MissingHttpVersion)?;

    let RawPostData {
        mime_type,
        text,
        params,
        ..
    } = post_data.unwrap_or_default();

    Ok(HarRequest {
        method,
        url,
        http_version,
        query_string: query_string.unwrap_or_default(),
        headers: headers.unwrap_or_default(),
        cookies: cookies.unwrap_or_default(),
        post_data: HarPostData {
            mime_type: mime_type.unwrap_or_default(),
            text,
            params,
        },
    })
}
