//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use harsnip_core::prelude::*;
//! ```

pub use crate::{
    Error, Form, Har, Input, Method, NameValue, NormalizedRequest, PairMap, Param, Part, PostData,
    RawRequest, Result, validate,
};
