//! Turn HAR requests into ready-to-run HTTP client code.
//!
//! A [`Snippet`] validates and normalizes every request of a HAR log (or a
//! single HAR request), then renders them with a client picked from a
//! [`Registry`] of targets.
//!
//! # Example
//!
//! ```
//! use harsnip::prelude::*;
//!
//! let har = r#"{"method": "POST", "url": "https://api.example.com/users",
//!     "postData": {"mimeType": "application/json", "text": "{\"name\":\"ada\"}"}}"#;
//!
//! let snippet = Snippet::from_json(har)?;
//! let code = snippet.convert("shell", None).expect("shell is built-in");
//! assert_eq!(
//!     code.as_single(),
//!     Some("curl --request POST \\\n  --url https://api.example.com/users \\\n  --data '{\"name\":\"ada\"}'")
//! );
//! # Ok::<(), harsnip::Error>(())
//! ```
//!
//! Built-in targets: `shell` (`curl`, `wget`), `python` (`requests`),
//! `java` (`okhttp`) and `javascript` (`fetch`). Register your own with
//! [`Registry::register_target`] and [`Registry::register_client`].

mod code_builder;
mod config;
pub mod escape;
pub mod prelude;
mod registry;
mod snippet;
mod targets;

pub use code_builder::CodeBuilder;
pub use config::{Indent, RenderOptions, RenderOptionsBuilder};
pub use registry::{Client, ClientInfo, Registry, Renderer, Target, TargetInfo, TargetSummary};
pub use snippet::{Conversion, Snippet};

// Re-export core types
pub use harsnip_core::{
    Error, Form, Har, HarLog, Input, Method, MimeKind, NameValue, NormalizedRequest, PairMap,
    Param, Part, PostData, RawPostData, RawRequest, Result, from_json, is_valid, validate,
};
