//! Database connection configuration.
//!
//! Connection parameters can be supplied explicitly via builder methods
//! or read from the environment (`DATABASE_HOST`, `DATABASE_PORT`,
//! `DATABASE_NAME`, `DATABASE_USER`, `DATABASE_PASS`). Explicit values
//! win over environment lookups. The config only carries parameters;
//! establishing connections is the driver's concern.

use std::collections::HashMap;
use std::env;

/// Connection parameters for a PostgreSQL database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Hostname or IP address
    pub host: String,
    /// Port number (default: 5432)
    pub port: u16,
    /// Username for authentication
    pub user: String,
    /// Password for authentication
    pub password: Option<String>,
    /// Database name to connect to
    pub database: String,
    /// Application name (visible in pg_stat_activity)
    pub application_name: Option<String>,
    /// Additional connection parameters (e.g. `search_path`)
    pub options: HashMap<String, String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: String::new(),
            password: None,
            database: String::new(),
            application_name: None,
            options: HashMap::new(),
        }
    }
}

impl DbConfig {
    /// Create a new configuration with the given connection components.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            database: database.into(),
            ..Default::default()
        }
    }

    /// Read configuration from `DATABASE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    ///
    /// `from_env` is this with `std::env::var`; tests inject their own
    /// lookup to avoid mutating process state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(host) = lookup("DATABASE_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("DATABASE_PORT").and_then(|p| p.parse().ok()) {
            config.port = port;
        }
        if let Some(database) = lookup("DATABASE_NAME") {
            config.database = database;
        }
        if let Some(user) = lookup("DATABASE_USER") {
            config.user = user;
        }
        config.password = lookup("DATABASE_PASS");
        config
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the application name.
    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    /// Set an additional connection option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Render a `postgres://` connection URL for drivers that accept one.
    pub fn dsn(&self) -> String {
        let mut url = String::from("postgres://");
        url.push_str(&self.user);
        if let Some(password) = &self.password {
            url.push(':');
            url.push_str(password);
        }
        url.push('@');
        url.push_str(&self.host);
        url.push(':');
        url.push_str(&self.port.to_string());
        url.push('/');
        url.push_str(&self.database);
        url
    }

    /// Get the socket address string for connection.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chain() {
        let config = DbConfig::new("db.example.com", "svc", "appdb")
            .port(5433)
            .password("secret")
            .application_name("worker")
            .option("search_path", "analytics");

        assert_eq!(config.host, "db.example.com");
        assert_eq!(config.port, 5433);
        assert_eq!(config.password, Some("secret".to_string()));
        assert_eq!(config.application_name, Some("worker".to_string()));
        assert_eq!(
            config.options.get("search_path"),
            Some(&"analytics".to_string())
        );
    }

    #[test]
    fn lookup_fallbacks() {
        let vars: std::collections::HashMap<&str, &str> = [
            ("DATABASE_HOST", "pg.internal"),
            ("DATABASE_PORT", "6432"),
            ("DATABASE_NAME", "warehouse"),
            ("DATABASE_USER", "loader"),
            ("DATABASE_PASS", "pw"),
        ]
        .into_iter()
        .collect();

        let config = DbConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_string()));
        assert_eq!(config.host, "pg.internal");
        assert_eq!(config.port, 6432);
        assert_eq!(config.database, "warehouse");
        assert_eq!(config.user, "loader");
        assert_eq!(config.password, Some("pw".to_string()));
    }

    #[test]
    fn missing_vars_keep_defaults() {
        let config = DbConfig::from_lookup(|_| None);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.password, None);
    }

    #[test]
    fn dsn_rendering() {
        let config = DbConfig::new("localhost", "svc", "appdb").password("pw").port(5433);
        assert_eq!(config.dsn(), "postgres://svc:pw@localhost:5433/appdb");

        let no_pass = DbConfig::new("localhost", "svc", "appdb");
        assert_eq!(no_pass.dsn(), "postgres://svc@localhost:5432/appdb");
    }

    #[test]
    fn socket_addr() {
        let config = DbConfig::new("db.example.com", "u", "d").port(5433);
        assert_eq!(config.socket_addr(), "db.example.com:5433");
    }
}
