use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};
use wreq::{Client, Response};
use wreq_util::Emulation;

use super::feature_source::FeatureSource;
use crate::config::AdvisorConfig;
use crate::models::{FeatureSelection, FeaturesResponse, PredictResponse};

/// Client for the price-prediction service.
pub struct ApiClient {
    client: Client,
    features_url: String,
    predict_url: String,
}

impl ApiClient {
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        let mut builder = Client::builder().emulation(Emulation::Firefox136);
        if let Some(seconds) = config.api.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(ApiClient {
            client,
            features_url: config.features_url(),
            predict_url: config.predict_url(),
        })
    }

    pub async fn get_features(&self) -> Result<Vec<String>> {
        info!("Fetching feature list from {}", self.features_url);

        let response = self
            .client
            .get(&self.features_url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.features_url))?;
        let response = ensure_success(response)?;

        let body: FeaturesResponse = response
            .json()
            .await
            .context("Feature list response is not valid JSON")?;

        if let Some(error) = body.error {
            return Err(anyhow!("Feature service reported an error: {}", error));
        }

        info!("Received {} features", body.features.len());
        Ok(body.features)
    }

    pub async fn predict(&self, selection: &FeatureSelection) -> Result<f64> {
        info!(
            "Requesting prediction for {} selected features",
            selection.selected_count()
        );

        let response = self
            .client
            .post(&self.predict_url)
            .header("Content-Type", "application/json")
            .json(selection)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.predict_url))?;
        let response = ensure_success(response)?;

        let body: PredictResponse = response
            .json()
            .await
            .context("Prediction response is not valid JSON")?;

        if let Some(error) = body.error {
            warn!("Prediction service returned an error: {}", error);
            return Err(anyhow!(error));
        }

        body.predicted_price
            .ok_or_else(|| anyhow!("Prediction response has no predicted_price"))
    }
}

fn ensure_success(response: Response) -> Result<Response> {
    if !response.status().is_success() {
        return Err(anyhow!("HTTP error: {}", response.status()));
    }
    Ok(response)
}

#[async_trait]
impl FeatureSource for ApiClient {
    async fn fetch_features(&self) -> Result<Vec<String>> {
        self.get_features().await
    }

    fn name(&self) -> &str {
        "api"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_configured_urls() {
        let mut config = AdvisorConfig::default();
        config.api.base_url = "http://localhost:8080/".to_string();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.features_url, "http://localhost:8080/get_features");
        assert_eq!(client.predict_url, "http://localhost:8080/predict");
    }

    #[tokio::test]
    #[ignore] // Run with: ADVISOR_API_BASE_URL=http://127.0.0.1:5000 cargo test -- --ignored
    async fn test_live_feature_endpoint() {
        let mut config = AdvisorConfig::default();
        config.apply_env_overrides();
        let client = ApiClient::new(&config).unwrap();

        let features = client.get_features().await.unwrap();
        assert!(!features.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        let mut config = AdvisorConfig::default();
        // Port 9 (discard) is not expected to serve HTTP
        config.api.base_url = "http://127.0.0.1:9".to_string();
        config.api.timeout_seconds = Some(2);
        let client = ApiClient::new(&config).unwrap();

        assert!(client.get_features().await.is_err());
        assert!(client.predict(&FeatureSelection::new()).await.is_err());
    }
}
