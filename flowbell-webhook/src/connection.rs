//! Connection records and resolution

use std::collections::HashMap;
use std::env;

use crate::{Result, WebhookError};

/// A named webhook destination resolved from an external store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Destination webhook URL
    pub host: String,

    /// Shared signing secret, present when the bot has signature
    /// verification enabled
    pub secret: Option<String>,
}

impl Connection {
    /// Create a connection to the given webhook URL.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            secret: None,
        }
    }

    /// Attach a signing secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// Resolves connection records by id.
///
/// The store itself is owned externally; implementations are read-only
/// and must be safe to share across concurrent sends.
pub trait ConnectionProvider: Send + Sync {
    /// Look up the connection registered under `id`.
    fn resolve(&self, id: &str) -> Result<Connection>;
}

/// In-memory connection provider.
#[derive(Debug, Clone, Default)]
pub struct StaticConnections {
    connections: HashMap<String, Connection>,
}

impl StaticConnections {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection under the given id.
    pub fn with(mut self, id: impl Into<String>, connection: Connection) -> Self {
        self.connections.insert(id.into(), connection);
        self
    }
}

impl ConnectionProvider for StaticConnections {
    fn resolve(&self, id: &str) -> Result<Connection> {
        self.connections
            .get(id)
            .cloned()
            .ok_or_else(|| WebhookError::ConnectionNotFound(id.to_string()))
    }
}

/// Connection provider backed by process environment variables.
///
/// A connection id `ops-alerts` resolves from `FLOWBELL_CONN_OPS_ALERTS_URL`
/// and, optionally, `FLOWBELL_CONN_OPS_ALERTS_SECRET`.
#[derive(Debug, Clone)]
pub struct EnvConnections {
    prefix: String,
}

impl EnvConnections {
    /// Create a provider with the default `FLOWBELL_CONN` prefix.
    pub fn new() -> Self {
        Self {
            prefix: "FLOWBELL_CONN".to_string(),
        }
    }

    /// Create a provider with a custom variable prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn var_name(&self, id: &str, field: &str) -> String {
        let id = id.to_uppercase().replace('-', "_");
        format!("{}_{}_{}", self.prefix, id, field)
    }
}

impl Default for EnvConnections {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionProvider for EnvConnections {
    fn resolve(&self, id: &str) -> Result<Connection> {
        let host = env::var(self.var_name(id, "URL"))
            .map_err(|_| WebhookError::ConnectionNotFound(id.to_string()))?;
        let secret = env::var(self.var_name(id, "SECRET")).ok();

        Ok(Connection { host, secret })
    }
}
