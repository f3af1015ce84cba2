use std::env;

use crate::prelude::*;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.vizdiff.io";
pub const API_URL_ENV: &str = "VIZDIFF_API_URL";
pub const TOKEN_ENV: &str = "VIZDIFF_TOKEN";

/// Location of the Vizdiff API.
///
/// The base URL never ends with a slash so that endpoint paths can be appended directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        Url::parse(base_url).map_err(|e| anyhow!("Invalid API URL: {base_url}, {e}"))?;
        Ok(Self {
            base_url: base_url.to_string(),
        })
    }

    /// Load the API location, `VIZDIFF_API_URL` overrides the production endpoint
    pub fn from_env() -> Result<Self> {
        match env::var(API_URL_ENV) {
            Ok(api_url) if !api_url.trim().is_empty() => {
                debug!("Using API URL from {API_URL_ENV}: {api_url}");
                Self::new(api_url.trim())
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload/storybook", self.base_url)
    }
}
