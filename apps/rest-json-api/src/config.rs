use axum::http::HeaderValue;
use core_config::{AppInfo, ConfigError, ConfigFile, app_info, server::ServerConfig};
use domain_documents::{DEFAULT_CONTENT_TYPE, ProxyBinding};
use std::path::{Path, PathBuf};

// Re-export Environment for use in other modules
pub use core_config::Environment;

pub const DEFAULT_SECTION: &str = "default";

/// Path prefixes the binary mounts itself; no domain may take them.
const RESERVED_PATHS: [&str; 3] = ["html", "health", "ready"];

/// One `[<domain>]` section.
#[derive(Clone, Debug)]
pub struct DomainConfig {
    pub name: String,
    pub db_host: String,
    pub db_name: String,
    pub json_parameter: String,
    pub service_proxy: Option<ProxyBinding>,
    pub content_type: HeaderValue,
}

/// Application configuration, loaded once at startup and never mutated.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub verbose: bool,
    pub content_directory: Option<PathBuf>,
    pub domains: Vec<DomainConfig>,
    /// Defaults applied while loading, logged once tracing is up.
    pub warnings: Vec<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = ConfigFile::read(path)?;
        Self::from_file(&file, Environment::from_env())
    }

    pub fn from_file(file: &ConfigFile, environment: Environment) -> Result<Self, ConfigError> {
        let mut warnings = Vec::new();

        let hostname = file.required_string(DEFAULT_SECTION, "hostname")?;
        let server = hostname.parse::<ServerConfig>()?;

        let verbose = match file.get_bool(DEFAULT_SECTION, "verbose") {
            Ok(Some(verbose)) => verbose,
            Ok(None) => {
                warnings.push("[CONFIG] [verbose] not set in [default], defaulting to true".into());
                true
            }
            Err(e) => {
                warnings.push(format!("{}, defaulting to true", e));
                true
            }
        };

        let content_directory = file
            .get_string(DEFAULT_SECTION, "contentDirectory")?
            .map(PathBuf::from);

        let domains = file
            .sections()
            .filter(|section| *section != DEFAULT_SECTION)
            .map(|section| DomainConfig::from_section(file, section, &mut warnings))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            verbose,
            content_directory,
            domains,
            warnings,
        })
    }
}

impl DomainConfig {
    fn from_section(
        file: &ConfigFile,
        section: &str,
        warnings: &mut Vec<String>,
    ) -> Result<Self, ConfigError> {
        let invalid = |key: &str, details: String| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            details,
        };

        if section.is_empty() || section.contains('/') || RESERVED_PATHS.contains(&section) {
            return Err(invalid(
                "section",
                format!("'{}' cannot be used as a path segment", section),
            ));
        }

        let db_host = file.required_string(section, "dbHost")?.to_string();
        let db_name = file.required_string(section, "dbName")?.to_string();
        let json_parameter = file.required_string(section, "jsonParameter")?.to_string();

        let service_proxy = file
            .get_string(section, "serviceProxy")?
            .map(|url| ProxyBinding::parse(url).map_err(|e| invalid("serviceProxy", e.to_string())))
            .transpose()?;

        let content_type = match file.get_string(section, "contentType")? {
            Some(value) => HeaderValue::from_str(value)
                .map_err(|e| invalid("contentType", e.to_string()))?,
            None => {
                warnings.push(format!(
                    "[CONFIG] [contentType] not set in [{}], using {}",
                    section, DEFAULT_CONTENT_TYPE
                ));
                HeaderValue::from_static(DEFAULT_CONTENT_TYPE)
            }
        };

        Ok(Self {
            name: section.to_string(),
            db_host,
            db_name,
            json_parameter,
            service_proxy,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(contents: &str) -> Result<Config, ConfigError> {
        Config::from_file(&ConfigFile::parse(contents).unwrap(), Environment::Development)
    }

    const FULL: &str = r#"
        [default]
        hostname = "127.0.0.1:9000"
        verbose = false
        contentDirectory = "./html"

        [jobs]
        dbHost = "localhost:27017"
        dbName = "scheduler"
        jsonParameter = "job"
        serviceProxy = "http://localhost:9100/api"
        contentType = "application/vnd.jobs+json"

        [nodes]
        dbHost = "mongodb://db.internal"
        dbName = "inventory"
        jsonParameter = "node"
    "#;

    #[test]
    fn test_full_config() {
        let config = load(FULL).unwrap();
        assert_eq!(config.server.address(), "127.0.0.1:9000");
        assert!(!config.verbose);
        assert_eq!(config.content_directory, Some(PathBuf::from("./html")));
        assert_eq!(config.domains.len(), 2);

        let jobs = &config.domains[0];
        assert_eq!(jobs.name, "jobs");
        assert_eq!(jobs.json_parameter, "job");
        assert_eq!(
            jobs.service_proxy.as_ref().unwrap().target().as_str(),
            "http://localhost:9100/api"
        );
        assert_eq!(jobs.content_type, "application/vnd.jobs+json");

        let nodes = &config.domains[1];
        assert!(nodes.service_proxy.is_none());
        assert_eq!(nodes.content_type, DEFAULT_CONTENT_TYPE);
        assert_eq!(config.warnings.len(), 1);
        assert!(config.warnings[0].contains("[nodes]"));
    }

    #[test]
    fn test_missing_hostname_is_fatal() {
        let err = load("[default]\nverbose = true\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "[CONFIG] [hostname] required in section [default]"
        );
    }

    #[test]
    fn test_missing_domain_key_names_section() {
        let err = load(
            r#"
            [default]
            hostname = ":8080"

            [jobs]
            dbHost = "localhost"
            jsonParameter = "job"
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingKey { ref section, ref key } if section == "jobs" && key == "dbName"
        ));
    }

    #[test]
    fn test_empty_required_value_counts_as_missing() {
        let err = load(
            r#"
            [default]
            hostname = ":8080"

            [jobs]
            dbHost = "localhost"
            dbName = "db"
            jsonParameter = ""
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { ref key, .. } if key == "jsonParameter"));
    }

    #[test]
    fn test_verbose_defaults_to_true_with_warning() {
        let config = load("[default]\nhostname = \":8080\"\nverbose = \"yes\"\n").unwrap();
        assert!(config.verbose);
        assert_eq!(config.warnings.len(), 1);

        let config = load("[default]\nhostname = \":8080\"\n").unwrap();
        assert!(config.verbose);
        assert!(config.domains.is_empty());
    }

    #[test]
    fn test_bad_proxy_url_is_rejected() {
        let err = load(
            r#"
            [default]
            hostname = ":8080"

            [jobs]
            dbHost = "localhost"
            dbName = "db"
            jsonParameter = "job"
            serviceProxy = "not a url"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "serviceProxy"));
    }

    #[test]
    fn test_reserved_domain_names_are_rejected() {
        let err = load(
            r#"
            [default]
            hostname = ":8080"

            [health]
            dbHost = "localhost"
            dbName = "db"
            jsonParameter = "h"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref section, .. } if section == "health"));
    }
}
