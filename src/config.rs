use std::env;

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

pub const API_URL_ENV: &str = "FLOMO_API_URL";

/// Command line of the server process.
#[derive(Debug, Parser)]
#[command(name = "flomo-mcp", version, about = "MCP server that writes notes to flomo")]
pub struct Cli {
    /// flomo incoming webhook URL (falls back to FLOMO_API_URL)
    #[arg(long = "flomo_api_url", value_name = "URL")]
    pub flomo_api_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub flomo_api_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("flomo api url must be an absolute http(s) URL")]
    InvalidApiUrl,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let cli = Cli::parse();
        Self::from_sources(cli.flomo_api_url, env::var(API_URL_ENV).ok())
    }

    /// Resolves the endpoint from the flag, then the environment, then empty.
    pub fn from_sources(
        flag: Option<String>,
        env_value: Option<String>,
    ) -> Result<Self, ConfigError> {
        let flomo_api_url = [flag, env_value]
            .into_iter()
            .flatten()
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .unwrap_or_default();

        if !flomo_api_url.is_empty() {
            let url = Url::parse(&flomo_api_url).map_err(|_| ConfigError::InvalidApiUrl)?;
            if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
                return Err(ConfigError::InvalidApiUrl);
            }
        }

        Ok(Self { flomo_api_url })
    }

    pub fn is_configured(&self) -> bool {
        !self.flomo_api_url.is_empty()
    }

    /// Endpoint suitable for logs; the webhook token lives in the path and is dropped.
    pub fn redacted_api_url(&self) -> String {
        match Url::parse(&self.flomo_api_url) {
            Ok(url) => format!(
                "{}://{}/…",
                url.scheme(),
                url.host_str().unwrap_or_default()
            ),
            Err(_) => "<unset>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEBHOOK: &str = "https://flomoapp.com/iwh/MTA4MjYz/1b5817dcd3decd55c834249fd9c7f9ae/";

    #[test]
    fn flag_takes_priority_over_env() {
        let config = Config::from_sources(
            Some(WEBHOOK.to_string()),
            Some("https://example.com/other".to_string()),
        )
        .expect("config should parse");
        assert_eq!(config.flomo_api_url, WEBHOOK);
    }

    #[test]
    fn env_used_when_flag_absent_or_blank() {
        let config = Config::from_sources(None, Some(WEBHOOK.to_string()))
            .expect("config should parse");
        assert_eq!(config.flomo_api_url, WEBHOOK);

        let config = Config::from_sources(Some("  ".to_string()), Some(WEBHOOK.to_string()))
            .expect("config should parse");
        assert_eq!(config.flomo_api_url, WEBHOOK);
    }

    #[test]
    fn defaults_to_empty() {
        let config = Config::from_sources(None, None).expect("config should parse");
        assert_eq!(config.flomo_api_url, "");
        assert!(!config.is_configured());
        assert_eq!(config.redacted_api_url(), "<unset>");
    }

    #[test]
    fn rejects_relative_or_non_http_url() {
        let err = Config::from_sources(Some("not a url".to_string()), None)
            .expect_err("expected invalid url");
        assert!(matches!(err, ConfigError::InvalidApiUrl));

        let err = Config::from_sources(Some("ftp://flomoapp.com/iwh".to_string()), None)
            .expect_err("expected invalid scheme");
        assert!(matches!(err, ConfigError::InvalidApiUrl));
    }

    #[test]
    fn redacted_url_hides_webhook_token() {
        let config =
            Config::from_sources(Some(WEBHOOK.to_string()), None).expect("config should parse");
        let redacted = config.redacted_api_url();
        assert_eq!(redacted, "https://flomoapp.com/…");
        assert!(!redacted.contains("1b5817dcd3decd55c834249fd9c7f9ae"));
    }

    #[test]
    fn cli_accepts_equals_form() {
        let flag = format!("--flomo_api_url={WEBHOOK}");
        let cli = Cli::try_parse_from(["flomo-mcp", flag.as_str()]).expect("cli should parse");
        assert_eq!(cli.flomo_api_url.as_deref(), Some(WEBHOOK));
    }
}
