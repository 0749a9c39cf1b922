//! Snippet session.

use std::sync::Arc;

use harsnip_core::{Input, NormalizedRequest};
use tracing::{debug, warn};

use crate::{Registry, RenderOptions, Result};

/// Output of [`Snippet::convert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// The session held exactly one request.
    Single(String),
    /// The session held zero or several requests, in input order.
    Many(Vec<String>),
}

impl Conversion {
    /// The snippet, if there was exactly one request.
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(snippet) => Some(snippet),
            Self::Many(_) => None,
        }
    }

    /// Every snippet, in input order.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Single(snippet) => vec![snippet],
            Self::Many(snippets) => snippets,
        }
    }
}

/// A set of normalized requests ready to be rendered.
///
/// # Example
///
/// ```
/// use harsnip::{RawRequest, Snippet};
///
/// let snippet = Snippet::new(RawRequest::new("GET", "https://example.com").header("accept", "*/*"));
/// let code = snippet.convert("shell", Some("curl")).expect("known target");
/// assert_eq!(
///     code.as_single(),
///     Some("curl --request GET \\\n  --url https://example.com/ \\\n  --header 'accept: */*'")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Snippet {
    requests: Vec<NormalizedRequest>,
    registry: Arc<Registry>,
}

impl Snippet {
    /// Create a session backed by the built-in targets.
    #[must_use]
    pub fn new(input: impl Into<Input>) -> Self {
        Self::with_registry(input, Arc::new(Registry::with_builtins()))
    }

    /// Create a session backed by `registry`.
    ///
    /// Every request is defaulted, validated and normalized; requests that
    /// fail validation are dropped.
    #[must_use]
    pub fn with_registry(input: impl Into<Input>, registry: Arc<Registry>) -> Self {
        let requests = input
            .into()
            .into_requests()
            .into_iter()
            .enumerate()
            .filter_map(|(index, request)| match NormalizedRequest::try_from(request) {
                Ok(request) => Some(request),
                Err(err) => {
                    warn!(index, error = %err, "dropping invalid request");
                    None
                }
            })
            .collect();

        Self { requests, registry }
    }

    /// Create a session from JSON text holding a request or a HAR log.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or is neither a request nor a
    /// HAR log.
    pub fn from_json(text: &str) -> Result<Self> {
        Input::from_json(text).map(Self::new)
    }

    /// Normalized requests, in input order.
    #[must_use]
    pub fn requests(&self) -> &[NormalizedRequest] {
        &self.requests
    }

    /// The registry used to resolve targets.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render every request with default options.
    ///
    /// See [`Self::convert_with`].
    #[must_use]
    pub fn convert(&self, target_id: &str, client_id: Option<&str>) -> Option<Conversion> {
        self.convert_with(target_id, client_id, &RenderOptions::default())
    }

    /// Render every request for a target and client.
    ///
    /// An unknown or missing client falls back to the target's default
    /// client. Returns `None` if the target is unknown.
    #[must_use]
    pub fn convert_with(
        &self,
        target_id: &str,
        client_id: Option<&str>,
        options: &RenderOptions,
    ) -> Option<Conversion> {
        let Some(renderer) = self.registry.resolve(target_id, client_id) else {
            debug!(target_id, client_id, "no renderer found");
            return None;
        };

        debug!(target_id, client_id, requests = self.requests.len(), "converting");
        let mut snippets: Vec<String> = self
            .requests
            .iter()
            .map(|request| renderer.render(request, options))
            .collect();

        Some(match snippets.len() {
            1 => Conversion::Single(snippets.remove(0)),
            _ => Conversion::Many(snippets),
        })
    }
}
