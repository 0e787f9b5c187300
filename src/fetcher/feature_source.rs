use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info, warn};

/// Anything that can supply the list of feature identifiers the model accepts.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    async fn fetch_features(&self) -> Result<Vec<String>>;

    fn name(&self) -> &str;
}

/// A fixed feature list, used offline and as the fallback.
#[derive(Debug, Clone, Default)]
pub struct StaticFeatureSource {
    features: Vec<String>,
}

impl StaticFeatureSource {
    pub fn new(features: Vec<String>) -> Self {
        Self { features }
    }
}

#[async_trait]
impl FeatureSource for StaticFeatureSource {
    async fn fetch_features(&self) -> Result<Vec<String>> {
        Ok(self.features.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFeatures {
    pub features: Vec<String>,
    /// True when the fallback list stands in for the real source.
    pub degraded: bool,
    /// Why the real source failed, when it did.
    pub error: Option<String>,
}

/// Fetch features once from `source`; on failure log it and use `fallback`.
pub async fn load_features(source: &dyn FeatureSource, fallback: &[String]) -> LoadedFeatures {
    match source.fetch_features().await {
        Ok(features) => {
            info!("Loaded {} features from {} source", features.len(), source.name());
            if features.is_empty() {
                warn!("Source {} returned an empty feature list", source.name());
            }
            LoadedFeatures { features, degraded: false, error: None }
        }
        Err(e) => {
            error!("Failed to load features from {} source: {:#}", source.name(), e);
            warn!("Using {} fallback features", fallback.len());
            LoadedFeatures {
                features: fallback.to_vec(),
                degraded: true,
                error: Some(format!("{:#}", e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FeatureSource for FailingSource {
        async fn fetch_features(&self) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("connection refused"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn fallback() -> Vec<String> {
        vec!["ekran_ekran_boyutu".to_string(), "batarya_hizli_sarj".to_string()]
    }

    #[tokio::test]
    async fn test_static_source_is_not_degraded() {
        let source = StaticFeatureSource::new(vec!["ana_islemci_cpu".to_string()]);
        let loaded = load_features(&source, &fallback()).await;
        assert!(!loaded.degraded);
        assert!(loaded.error.is_none());
        assert_eq!(loaded.features, vec!["ana_islemci_cpu".to_string()]);
    }

    #[tokio::test]
    async fn test_failure_uses_fallback_after_single_attempt() {
        let source = FailingSource { calls: AtomicUsize::new(0) };
        let loaded = load_features(&source, &fallback()).await;

        assert!(loaded.degraded);
        assert_eq!(loaded.error.as_deref(), Some("connection refused"));
        assert_eq!(loaded.features, fallback());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_list_is_passed_through() {
        let source = StaticFeatureSource::default();
        let loaded = load_features(&source, &fallback()).await;
        assert!(!loaded.degraded);
        assert!(loaded.features.is_empty());
    }
}
