/// MongoDB connection configuration
///
/// One `MongoConfig` describes one database host. Several logical databases
/// (and therefore several domains) may share the client built from it.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// // Full connection string
/// let config = MongoConfig::new("mongodb://db1:27017,db2:27017/?replicaSet=rs0");
///
/// // Bare host, as written in a domain section's dbHost
/// let config = MongoConfig::from_host("localhost:27017").with_app_name("rest-json-api");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MongoConfig {
    /// MongoDB connection URL
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Create a new MongoConfig from a connection string
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Create a MongoConfig from either a bare `host[:port]` or a full URI.
    ///
    /// Bare hosts get the `mongodb://` scheme prepended.
    pub fn from_host(host: &str) -> Self {
        let host = host.trim();
        if host.starts_with("mongodb://") || host.starts_with("mongodb+srv://") {
            Self::new(host)
        } else {
            Self::new(format!("mongodb://{}", host))
        }
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Get a reference to the MongoDB URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 0,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_new() {
        let config = MongoConfig::new("mongodb://localhost:27017");
        assert_eq!(config.url, "mongodb://localhost:27017");
        assert_eq!(config.max_pool_size, 100);
        assert_eq!(config.min_pool_size, 0);
    }

    #[test]
    fn test_from_host_prefixes_bare_host() {
        let config = MongoConfig::from_host("db.internal:27018");
        assert_eq!(config.url(), "mongodb://db.internal:27018");

        let config = MongoConfig::from_host(" localhost ");
        assert_eq!(config.url(), "mongodb://localhost");
    }

    #[test]
    fn test_from_host_keeps_full_uri() {
        let config = MongoConfig::from_host("mongodb+srv://cluster.example.com");
        assert_eq!(config.url(), "mongodb+srv://cluster.example.com");

        let config = MongoConfig::from_host("mongodb://a:27017,b:27017/?replicaSet=rs0");
        assert_eq!(config.url(), "mongodb://a:27017,b:27017/?replicaSet=rs0");
    }

    #[test]
    fn test_mongo_config_builders() {
        let config = MongoConfig::new("mongodb://localhost:27017")
            .with_app_name("my-app");
        assert_eq!(config.app_name, Some("my-app".to_string()));
    }
}
