use std::env;
use std::time::Duration;

use crate::food::error::FoodError;

const DEFAULT_USDA_API_URL: &str = "https://api.nal.usda.gov/fdc/v1";
const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct FoodConfig {
    pub usda_api_key: String,
    pub usda_api_url: String,
    pub youtube_api_key: Option<String>,
    pub youtube_api_url: String,
    pub request_timeout: Duration,
}

impl FoodConfig {
    pub fn from_env() -> Result<Self, FoodError> {
        Ok(Self {
            usda_api_key: env::var("USDA_API_KEY")
                .map_err(|_| FoodError::Config("USDA_API_KEY environment variable not set".to_string()))?,
            usda_api_url: env::var("USDA_API_URL").unwrap_or_else(|_| DEFAULT_USDA_API_URL.to_string()),
            youtube_api_key: env::var("YOUTUBE_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            youtube_api_url: env::var("YOUTUBE_API_URL")
                .unwrap_or_else(|_| DEFAULT_YOUTUBE_API_URL.to_string()),
            request_timeout: timeout_from_env(),
        })
    }

    /// Config pointing both services at `base_url`, for tests against a mock server.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            usda_api_key: "test-usda-key".to_string(),
            usda_api_url: base_url.to_string(),
            youtube_api_key: Some("test-youtube-key".to_string()),
            youtube_api_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }
}

pub fn timeout_from_env() -> Duration {
    parse_timeout(env::var("REQUEST_TIMEOUT_SECS").ok().as_deref())
}

/// Zero would fail every request immediately, so it counts as unset.
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn parse_timeout(value: Option<&str>) -> Duration {
    value
        .and_then(|t| t.trim().parse().ok())
        .and_then(timeout_from_secs)
        .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout(Some("12")), Duration::from_secs(12));
        assert_eq!(parse_timeout(Some(" 7 ")), Duration::from_secs(7));
        assert_eq!(parse_timeout(Some("0")), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(parse_timeout(Some("soon")), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(parse_timeout(None), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_zero_seconds_is_no_timeout_override() {
        assert_eq!(timeout_from_secs(0), None);
        assert_eq!(timeout_from_secs(3), Some(Duration::from_secs(3)));
    }
}
