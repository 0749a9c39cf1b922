//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy glob
//! importing:
//!
//! ```ignore
//! use harsnip::prelude::*;
//! ```

pub use crate::{
    Client, ClientInfo, Conversion, Error, Har, Input, NormalizedRequest, Param, RawRequest,
    Registry, RenderOptions, Renderer, Result, Snippet, Target, TargetInfo,
};
