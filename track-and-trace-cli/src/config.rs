//! Configuration loading
//!
//! Precedence, lowest first: TOML file, environment, command-line flags.
//! Environment and flags are merged by clap before they reach this module.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use track_and_trace_gateway::GatewayConfig;

use crate::cli::Cli;

/// On-disk configuration. Every key is optional so the file can supply only part
/// of the settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub user_endpoint: Option<String>,
    pub scraper_endpoint: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Resolve the gateway configuration from the file and the parsed arguments.
pub fn resolve(cli: &Cli) -> Result<GatewayConfig> {
    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    merge(file, cli.user_endpoint.clone(), cli.scraper_endpoint.clone())
}

fn merge(
    file: FileConfig,
    user_endpoint: Option<String>,
    scraper_endpoint: Option<String>,
) -> Result<GatewayConfig> {
    let Some(user) = user_endpoint.or(file.user_endpoint) else {
        bail!("User service endpoint is not configured (--user-endpoint, USER_ENDPOINT or config file)");
    };
    let Some(scraper) = scraper_endpoint.or(file.scraper_endpoint) else {
        bail!(
            "Scraper endpoint is not configured (--scraper-endpoint, COMPLEX_SCRAPER_ENDPOINT or config file)"
        );
    };

    let config = GatewayConfig::new(&user, &scraper)?
        .with_timeouts(file.connect_timeout_secs, file.request_timeout_secs);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_override_file() {
        let file = FileConfig {
            user_endpoint: Some("http://file-user".into()),
            scraper_endpoint: Some("http://file-scraper".into()),
            connect_timeout_secs: None,
            request_timeout_secs: Some(15),
        };
        let config = merge(file, Some("http://flag-user".into()), None).unwrap();
        assert_eq!(config.user_endpoint.as_str(), "http://flag-user/");
        assert_eq!(config.scraper_endpoint.as_str(), "http://file-scraper/");
        assert_eq!(config.request_timeout_secs, Some(15));
    }

    #[test]
    fn missing_endpoint_is_reported() {
        let err = merge(FileConfig::default(), None, Some("http://scraper".into())).unwrap_err();
        assert!(err.to_string().contains("User service endpoint"));
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let file = FileConfig {
            connect_timeout_secs: Some(0),
            ..FileConfig::default()
        };
        assert!(merge(file, Some("http://u".into()), Some("http://s".into())).is_err());
    }

    #[test]
    fn parses_toml() {
        let file: FileConfig = toml::from_str(
            r#"
            user_endpoint = "http://localhost:5002/user"
            scraper_endpoint = "http://localhost:8080"
            request_timeout_secs = 30
            "#,
        )
        .unwrap();
        assert_eq!(file.request_timeout_secs, Some(30));
        assert!(toml::from_str::<FileConfig>("colour = \"blue\"").is_err());
    }
}
