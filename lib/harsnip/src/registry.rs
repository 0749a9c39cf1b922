//! Target and client registry.
//!
//! A [`Registry`] is an explicit value: build one with
//! [`Registry::with_builtins`] (or [`Registry::new`] for an empty one), extend
//! it with [`Registry::register_target`] / [`Registry::register_client`], and
//! hand it to a [`crate::Snippet`]. Entries are never removed.
//!
//! # Example
//!
//! ```
//! use harsnip::{Client, ClientInfo, NormalizedRequest, Registry, RenderOptions, Target, TargetInfo};
//!
//! let mut registry = Registry::new();
//! registry
//!     .register_target(
//!         Target::new(TargetInfo::new("http", "HTTP", ".txt", "raw"))
//!             .client(Client::new(
//!                 ClientInfo::new("raw", "Raw"),
//!                 |request: &NormalizedRequest, _: &RenderOptions| {
//!                     format!("{} {}", request.method(), request.full_url())
//!                 },
//!             )),
//!     )
//!     .expect("valid target");
//!
//! assert_eq!(registry.extension_for("http"), ".txt");
//! assert!(registry.resolve("http", Some("unknown")).is_some());
//! ```

use std::sync::Arc;

use harsnip_core::NormalizedRequest;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, RenderOptions, Result};

/// Turns a normalized request into source code for one client library.
///
/// Renderers are pure: the same request and options always give the same
/// output. Any `Fn(&NormalizedRequest, &RenderOptions) -> String` is a
/// renderer.
pub trait Renderer: Send + Sync {
    /// Render the request.
    fn render(&self, request: &NormalizedRequest, options: &RenderOptions) -> String;
}

impl<F> Renderer for F
where
    F: Fn(&NormalizedRequest, &RenderOptions) -> String + Send + Sync,
{
    fn render(&self, request: &NormalizedRequest, options: &RenderOptions) -> String {
        self(request, options)
    }
}

/// Descriptive information about a target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInfo {
    /// Stable key (e.g. `shell`).
    pub key: String,
    /// Display title.
    pub title: String,
    /// File extension, including the dot (e.g. `.sh`).
    pub extname: String,
    /// Key of the client used when none (or an unknown one) is requested.
    pub default: String,
}

impl TargetInfo {
    /// Create target info.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        extname: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            extname: extname.into(),
            default: default.into(),
        }
    }

    fn check(&self) -> Result<()> {
        for (field, value) in [
            ("key", &self.key),
            ("title", &self.title),
            ("extname", &self.extname),
            ("default", &self.default),
        ] {
            if value.trim().is_empty() {
                return Err(Error::MissingTargetField { field });
            }
        }
        Ok(())
    }
}

/// Descriptive information about a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Stable key (e.g. `curl`).
    pub key: String,
    /// Display title.
    pub title: String,
    /// Link to the library documentation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,
    /// Short description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl ClientInfo {
    /// Create client info.
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the documentation link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn check(&self) -> Result<()> {
        for (field, value) in [("key", &self.key), ("title", &self.title)] {
            if value.trim().is_empty() {
                return Err(Error::MissingClientField { field });
            }
        }
        Ok(())
    }
}

/// A client library with its renderer.
#[derive(Clone, derive_more::Debug)]
pub struct Client {
    info: ClientInfo,
    #[debug(skip)]
    renderer: Arc<dyn Renderer>,
}

impl Client {
    /// Create a client.
    pub fn new(info: ClientInfo, renderer: impl Renderer + 'static) -> Self {
        Self {
            info,
            renderer: Arc::new(renderer),
        }
    }

    /// Client info.
    #[must_use]
    pub const fn info(&self) -> &ClientInfo {
        &self.info
    }

    /// Client key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.info.key
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }
}

/// An output ecosystem owning an ordered set of clients.
#[derive(Debug, Clone)]
pub struct Target {
    info: TargetInfo,
    clients: Vec<Client>,
}

impl Target {
    /// Create a target without clients.
    #[must_use]
    pub const fn new(info: TargetInfo) -> Self {
        Self {
            info,
            clients: Vec::new(),
        }
    }

    /// Add a client.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.clients.push(client);
        self
    }

    /// Target info.
    #[must_use]
    pub const fn info(&self) -> &TargetInfo {
        &self.info
    }

    /// Target key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.info.key
    }

    /// Clients, in registration order.
    #[must_use]
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Client by key.
    #[must_use]
    pub fn find_client(&self, key: &str) -> Option<&Client> {
        self.clients.iter().find(|client| client.key() == key)
    }

    /// The default client, if it is registered.
    #[must_use]
    pub fn default_client(&self) -> Option<&Client> {
        self.find_client(&self.info.default)
    }
}

/// A target's info together with the info of each of its clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSummary {
    /// Target info.
    #[serde(flatten)]
    pub info: TargetInfo,
    /// Info of every client, in registration order.
    pub clients: Vec<ClientInfo>,
}

/// Registry of targets and their clients.
///
/// The default registry holds the built-in targets.
#[derive(Debug, Clone)]
pub struct Registry {
    targets: Vec<Target>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// Create a registry holding every built-in target.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self {
            targets: crate::targets::builtins(),
        }
    }

    /// Register a new target.
    ///
    /// Nothing is inserted when the target is rejected.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an info field is blank, if a target
    /// with the same key exists, if the target has no client, or if two of
    /// its clients share a key.
    pub fn register_target(&mut self, target: Target) -> Result<()> {
        target.info.check()?;
        if self.target(target.key()).is_some() {
            return Err(Error::DuplicateTarget(target.info.key));
        }
        if target.clients.is_empty() {
            return Err(Error::TargetWithoutClients(target.info.key));
        }
        for (index, client) in target.clients.iter().enumerate() {
            client.info.check()?;
            if target
                .clients
                .iter()
                .take(index)
                .any(|other| other.key() == client.key())
            {
                return Err(Error::DuplicateClient {
                    target: target.info.key.clone(),
                    client: client.info.key.clone(),
                });
            }
        }
        if target.default_client().is_none() {
            debug!(
                target_id = target.key(),
                default = target.info.default.as_str(),
                "default client is not registered yet"
            );
        }

        info!(
            target_id = target.key(),
            clients = target.clients.len(),
            "registered target"
        );
        self.targets.push(target);
        Ok(())
    }

    /// Register a new client on an existing target.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the target is unknown, if an info
    /// field is blank, or if the target already has a client with this key.
    pub fn register_client(&mut self, target_id: &str, client: Client) -> Result<()> {
        let Some(target) = self
            .targets
            .iter_mut()
            .find(|target| target.key() == target_id)
        else {
            return Err(Error::UnknownTarget(target_id.to_string()));
        };
        client.info.check()?;
        if target.find_client(client.key()).is_some() {
            return Err(Error::DuplicateClient {
                target: target_id.to_string(),
                client: client.info.key,
            });
        }

        info!(target_id, client_id = client.key(), "registered client");
        target.clients.push(client);
        Ok(())
    }

    /// Target by key.
    #[must_use]
    pub fn target(&self, key: &str) -> Option<&Target> {
        self.targets.iter().find(|target| target.key() == key)
    }

    /// Targets, in registration order.
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Resolve the renderer for a target and client.
    ///
    /// Returns `None` if the target is unknown. An unknown or missing client
    /// falls back to the target's default client.
    #[must_use]
    pub fn resolve(&self, target_id: &str, client_id: Option<&str>) -> Option<&dyn Renderer> {
        let target = self.target(target_id)?;
        client_id
            .and_then(|key| target.find_client(key))
            .or_else(|| target.default_client())
            .map(Client::renderer)
    }

    /// Info of every target with its clients.
    #[must_use]
    pub fn list_targets(&self) -> Vec<TargetSummary> {
        self.targets
            .iter()
            .map(|target| TargetSummary {
                info: target.info.clone(),
                clients: target
                    .clients
                    .iter()
                    .map(|client| client.info.clone())
                    .collect(),
            })
            .collect()
    }

    /// File extension of a target, or `""` if the target is unknown.
    #[must_use]
    pub fn extension_for(&self, target_id: &str) -> &str {
        self.target(target_id)
            .map_or("", |target| target.info.extname.as_str())
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    fn echo(name: &'static str) -> impl Renderer {
        move |_: &NormalizedRequest, _: &RenderOptions| name.to_string()
    }

    fn target(key: &str) -> Target {
        Target::new(TargetInfo::new(key, "Demo", ".demo", "first"))
            .client(Client::new(ClientInfo::new("first", "First"), echo("first")))
            .client(Client::new(ClientInfo::new("second", "Second"), echo("second")))
    }

    fn request() -> NormalizedRequest {
        let_assert!(
            Ok(request) =
                NormalizedRequest::try_from(harsnip_core::RawRequest::new("GET", "https://x.test"))
        );
        request
    }

    #[test]
    fn register_and_resolve() {
        let mut registry = Registry::new();
        registry.register_target(target("demo")).expect("register");

        let request = request();
        let options = RenderOptions::default();
        let_assert!(Some(renderer) = registry.resolve("demo", Some("second")));
        check!(renderer.render(&request, &options) == "second");
    }

    #[test]
    fn resolve_falls_back_to_default_client() {
        let mut registry = Registry::new();
        registry.register_target(target("demo")).expect("register");

        let request = request();
        let options = RenderOptions::default();
        for client in [None, Some("nope")] {
            let_assert!(Some(renderer) = registry.resolve("demo", client));
            check!(renderer.render(&request, &options) == "first");
        }
    }

    #[test]
    fn resolve_unknown_target() {
        let registry = Registry::new();
        check!(registry.resolve("demo", Some("first")).is_none());
    }

    #[test]
    fn register_target_missing_field() {
        let mut registry = Registry::new();
        let target = Target::new(TargetInfo::new("demo", "Demo", "", "first"))
            .client(Client::new(ClientInfo::new("first", "First"), echo("first")));

        let_assert!(Err(err) = registry.register_target(target));
        check!(err.is_configuration());
        check!(err.to_string().contains("extname"));
        check!(registry.targets().is_empty());
    }

    #[test]
    fn register_target_duplicate() {
        let mut registry = Registry::new();
        registry.register_target(target("demo")).expect("register");
        let_assert!(Err(Error::DuplicateTarget(key)) = registry.register_target(target("demo")));
        check!(key == "demo");
        check!(registry.targets().len() == 1);
    }

    #[test]
    fn register_target_without_clients() {
        let mut registry = Registry::new();
        let target = Target::new(TargetInfo::new("demo", "Demo", ".demo", "first"));
        let_assert!(Err(Error::TargetWithoutClients(_)) = registry.register_target(target));
    }

    #[test]
    fn register_target_duplicate_clients() {
        let mut registry = Registry::new();
        let target = target("demo").client(Client::new(ClientInfo::new("first", "Again"), echo("x")));
        let_assert!(Err(Error::DuplicateClient { client, .. }) = registry.register_target(target));
        check!(client == "first");
        check!(registry.target("demo").is_none());
    }

    #[test]
    fn register_client() {
        let mut registry = Registry::new();
        registry.register_target(target("demo")).expect("register");
        registry
            .register_client("demo", Client::new(ClientInfo::new("third", "Third"), echo("third")))
            .expect("register client");

        let_assert!(Some(target) = registry.target("demo"));
        check!(target.clients().iter().map(Client::key).collect::<Vec<_>>() == ["first", "second", "third"]);
    }

    #[test]
    fn register_client_errors() {
        let mut registry = Registry::new();
        registry.register_target(target("demo")).expect("register");

        let_assert!(
            Err(Error::UnknownTarget(_)) = registry
                .register_client("nope", Client::new(ClientInfo::new("x", "X"), echo("x")))
        );
        let_assert!(
            Err(Error::MissingClientField { field: "title" }) = registry
                .register_client("demo", Client::new(ClientInfo::new("x", " "), echo("x")))
        );
        let_assert!(
            Err(Error::DuplicateClient { .. }) = registry
                .register_client("demo", Client::new(ClientInfo::new("first", "F"), echo("x")))
        );
        check!(registry.target("demo").map(|t| t.clients().len()) == Some(2));
    }

    #[test]
    fn list_and_extension() {
        let mut registry = Registry::new();
        registry.register_target(target("demo")).expect("register");

        let targets = registry.list_targets();
        check!(targets.len() == 1);
        check!(targets[0].info.key == "demo");
        check!(targets[0].clients.iter().map(|c| c.key.as_str()).collect::<Vec<_>>() == ["first", "second"]);

        check!(registry.extension_for("demo") == ".demo");
        check!(registry.extension_for("nope") == "");
    }

    #[test]
    fn builtins_pass_registration_checks() {
        let mut registry = Registry::new();
        for target in crate::targets::builtins() {
            let key = target.key().to_string();
            let_assert!(Ok(()) = registry.register_target(target));
            let_assert!(Some(target) = registry.target(&key));
            check!(target.default_client().is_some());
        }
    }
}
