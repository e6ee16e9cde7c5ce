use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Where the job catalog is read from at startup and on reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
    Database,
}

impl CatalogSource {
    pub fn label(&self) -> &'static str {
        match self {
            CatalogSource::Builtin => "builtin",
            CatalogSource::File(_) => "file",
            CatalogSource::Database => "database",
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub catalog_source: CatalogSource,
    pub database_url: Option<String>,
    pub recommendation_limit: usize,
    pub max_query_terms: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());

        let catalog_source = match lookup("CATALOG_SOURCE")
            .unwrap_or_else(|| "builtin".to_string())
            .trim()
            .to_lowercase()
            .as_str()
        {
            "builtin" => CatalogSource::Builtin,
            "file" => {
                let path = lookup("CATALOG_PATH").context(
                    "Required environment variable 'CATALOG_PATH' is not set (CATALOG_SOURCE=file)",
                )?;
                CatalogSource::File(PathBuf::from(path))
            }
            "database" => {
                if database_url.is_none() {
                    bail!("Required environment variable 'DATABASE_URL' is not set (CATALOG_SOURCE=database)");
                }
                CatalogSource::Database
            }
            other => bail!("CATALOG_SOURCE must be one of builtin, file, database (got '{other}')"),
        };

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            catalog_source,
            database_url,
            recommendation_limit: positive(&lookup, "RECOMMENDATION_LIMIT", 4)?,
            max_query_terms: positive(&lookup, "MAX_QUERY_TERMS", 32)?,
        })
    }
}

fn positive<F>(lookup: &F, key: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<usize>()
        .with_context(|| format!("{key} must be a positive integer"))?;
    if value == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.catalog_source, CatalogSource::Builtin);
        assert_eq!(config.recommendation_limit, 4);
        assert_eq!(config.max_query_terms, 32);
    }

    #[test]
    fn test_file_source_requires_path() {
        assert!(config_from(&[("CATALOG_SOURCE", "file")]).is_err());

        let config =
            config_from(&[("CATALOG_SOURCE", "FILE"), ("CATALOG_PATH", "/data/jobs.json")]).unwrap();
        assert_eq!(
            config.catalog_source,
            CatalogSource::File(PathBuf::from("/data/jobs.json"))
        );
    }

    #[test]
    fn test_database_source_requires_url() {
        assert!(config_from(&[("CATALOG_SOURCE", "database")]).is_err());

        let config = config_from(&[
            ("CATALOG_SOURCE", "database"),
            ("DATABASE_URL", "postgres://localhost/jobs"),
        ])
        .unwrap();
        assert_eq!(config.catalog_source, CatalogSource::Database);
    }

    #[test]
    fn test_unknown_source_rejected() {
        let err = config_from(&[("CATALOG_SOURCE", "s3")]).unwrap_err();
        assert!(err.to_string().contains("s3"));
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert!(config_from(&[("RECOMMENDATION_LIMIT", "0")]).is_err());
        assert!(config_from(&[("MAX_QUERY_TERMS", "many")]).is_err());
    }

    #[test]
    fn test_bad_port_rejected() {
        assert!(config_from(&[("PORT", "99999")]).is_err());
    }
}
