//! Endpoint descriptor
//!
//! The address a client dials. OrionDB routes a socket to a collection by
//! its path: `/<namespace>@<shard>/<collection>`.

use std::fmt;

/// Default scheme for plain-text sockets
pub const DEFAULT_SCHEME: &str = "ws";

/// Default host
pub const DEFAULT_HOST: &str = "localhost";

/// Default OrionDB socket port
pub const DEFAULT_PORT: u16 = 5665;

/// Address of the target service.
///
/// Held as the rendered URL string. Nothing is validated here; a malformed
/// endpoint surfaces as a connect error from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
}

impl Endpoint {
    /// Wrap an already formed URL
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Create a builder for the `scheme://host:port/namespace@shard/collection` form
    pub fn builder() -> EndpointBuilder {
        EndpointBuilder::default()
    }

    /// The URL handed to the transport
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::builder().build()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl From<&str> for Endpoint {
    fn from(url: &str) -> Self {
        Endpoint::new(url)
    }
}

impl From<String> for Endpoint {
    fn from(url: String) -> Self {
        Endpoint::new(url)
    }
}

/// Builder for Endpoint
#[derive(Debug, Clone)]
pub struct EndpointBuilder {
    scheme: String,
    host: String,
    port: u16,
    namespace: String,
    shard: String,
    collection: String,
}

impl Default for EndpointBuilder {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            namespace: String::new(),
            shard: String::new(),
            collection: String::new(),
        }
    }
}

impl EndpointBuilder {
    /// Set the URL scheme (`ws` or `wss`)
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set the host name or address
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the database namespace
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the shard segment that follows `@`
    pub fn shard(mut self, shard: impl Into<String>) -> Self {
        self.shard = shard.into();
        self
    }

    /// Set the target collection
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Render the endpoint. Without a namespace the route is `/`.
    pub fn build(self) -> Endpoint {
        let route = if self.namespace.is_empty() {
            String::from("/")
        } else {
            format!("/{}@{}/{}", self.namespace, self.shard, self.collection)
        };

        Endpoint::new(format!(
            "{}://{}:{}{}",
            self.scheme, self.host, self.port, route
        ))
    }
}
