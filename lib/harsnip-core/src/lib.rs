//! Core types for harsnip.
//!
//! This crate holds the request side of the pipeline:
//! - [`Input`], [`Har`] and [`RawRequest`] - HAR input model
//! - [`validate`] and [`HarRequest`] - defaulting and shape validation
//! - [`NormalizedRequest`] and [`PostData`] - the canonical request renderers consume
//! - [`PairMap`] - insertion-ordered name/value map
//! - [`Form`] and [`Part`] - multipart body builder
//! - [`Method`] - HTTP method helper
//! - [`Error`] and [`Result`] - Error handling
//!
//! # Example
//!
//! ```
//! use harsnip_core::{NormalizedRequest, RawRequest};
//!
//! let raw = RawRequest::new("GET", "http://x.test/p?x=1").query("y", "2");
//! let request = NormalizedRequest::try_from(raw).expect("valid request");
//! assert_eq!(request.full_url(), "http://x.test/p?y=2&x=1");
//! ```

pub mod body;
mod error;
mod har;
mod method;
mod multipart;
mod normalize;
mod pairs;
pub mod prelude;
mod validate;

pub use body::{MimeKind, from_json, to_form};
pub use error::{Error, Result};
pub use har::{
    DEFAULT_HTTP_VERSION, DEFAULT_MIME_TYPE, Entry, Har, HarLog, Input, NameValue, Param,
    RawPostData, RawRequest,
};
pub use method::Method;
pub use multipart::{BOUNDARY, Chunks, Form, Part};
pub use normalize::{NormalizedRequest, PostData};
pub use pairs::PairMap;
pub use validate::{HarPostData, HarRequest, Invalid, is_valid, validate};
