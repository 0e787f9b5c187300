use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::{info, warn};

use crate::locale::Locale;

pub const DEFAULT_CONFIG_PATH: &str = "configs/advisor.toml";

// Compiled in so the built-in fallback list matches the shipped file.
const SHIPPED_CONFIG: &str = include_str!("../../configs/advisor.toml");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub segments: SegmentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: String,
    pub features_path: String,
    pub predict_path: String,
    pub timeout_seconds: Option<u64>,
    // Optional environment variable name for overriding base_url
    pub env_base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub default_locale: Locale,
}

/// Feature identifiers shown when the feature endpoint is unreachable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    pub features: Vec<String>,
}

/// Upper price bounds (TRY) for the entry and mid market segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentConfig {
    pub entry_max: f64,
    pub mid_max: f64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            features_path: "/get_features".to_string(),
            predict_path: "/predict".to_string(),
            timeout_seconds: Some(10),
            env_base_url: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::Tr,
        }
    }
}

#[derive(Deserialize)]
struct ShippedFallback {
    fallback: FallbackConfig,
}

impl Default for FallbackConfig {
    /// The `[fallback]` list of the shipped `configs/advisor.toml`.
    fn default() -> Self {
        match toml::from_str::<ShippedFallback>(SHIPPED_CONFIG) {
            Ok(shipped) => shipped.fallback,
            Err(e) => {
                warn!("Shipped config has no usable [fallback] section: {}", e);
                Self { features: Vec::new() }
            }
        }
    }
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            entry_max: 15_000.0,
            mid_max: 40_000.0,
        }
    }
}

impl AdvisorConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read advisor config file: {}", path))?;

        let config: AdvisorConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse advisor config file: {}", path))?;

        Ok(config)
    }

    /// Load the config file if it exists, otherwise start from defaults.
    /// Environment overrides are applied in both cases.
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            let config = Self::from_file(path)?;
            info!("Loaded advisor configuration from {}", path);
            config
        } else {
            warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        let base_url_var = self
            .api
            .env_base_url
            .as_deref()
            .unwrap_or("ADVISOR_API_BASE_URL");

        if let Ok(base_url) = env::var(base_url_var) {
            info!("Using API base URL from {}", base_url_var);
            self.api.base_url = base_url;
        }

        if let Ok(code) = env::var("ADVISOR_LOCALE") {
            match Locale::parse(&code) {
                Some(locale) => self.ui.default_locale = locale,
                None => warn!("Ignoring unsupported ADVISOR_LOCALE value: {}", code),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("API base URL cannot be empty"));
        }

        if self.segments.entry_max >= self.segments.mid_max {
            return Err(anyhow::anyhow!(
                "Segment thresholds must satisfy entry_max < mid_max (got {} and {})",
                self.segments.entry_max,
                self.segments.mid_max
            ));
        }

        Ok(())
    }

    pub fn features_url(&self) -> String {
        join_url(&self.api.base_url, &self.api.features_path)
    }

    pub fn predict_url(&self) -> String {
        join_url(&self.api.base_url, &self.api.predict_path)
    }

    pub fn default_locale(&self) -> Locale {
        self.ui.default_locale
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
