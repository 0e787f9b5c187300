use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Confidence band shown around every prediction, in percent.
pub const RANGE_PERCENT: u8 = 8;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturesResponse {
    #[serde(default)]
    pub features: Vec<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predicted_price: Option<f64>,
    pub error: Option<String>,
}

/// Chosen value per feature identifier; the body of a prediction request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSelection {
    values: BTreeMap<String, String>,
}

impl FeatureSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Feature selection must be a JSON object of strings")
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read selection file: {}", path))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse selection file: {}", path))
    }

    pub fn set(&mut self, feature: impl Into<String>, value: impl Into<String>) {
        self.values.insert(feature.into(), value.into());
    }

    pub fn get(&self, feature: &str) -> Option<&str> {
        self.values.get(feature).map(|v| v.as_str())
    }

    /// Entries with a non-blank value.
    pub fn selected_count(&self) -> usize {
        self.values.values().filter(|v| !v.trim().is_empty()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub price: f64,
    pub range_percent: u8,
    pub confidence_score: u8,
    pub predicted_at: DateTime<Utc>,
}

impl Prediction {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            range_percent: RANGE_PERCENT,
            confidence_score: 100u8.saturating_sub(RANGE_PERCENT).min(100),
            predicted_at: Utc::now(),
        }
    }

    pub fn formatted_price(&self) -> String {
        format_try(self.price)
    }

    pub fn formatted_range(&self) -> String {
        format!("±{}%", self.range_percent)
    }
}

/// Format an amount the Turkish way: `₺ 12.345,67`.
pub fn format_try(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("₺ {}", amount);
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("₺ {}{},{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_try() {
        assert_eq!(format_try(12345.678), "₺ 12.345,68");
        assert_eq!(format_try(999.0), "₺ 999,00");
        assert_eq!(format_try(1_000.0), "₺ 1.000,00");
        assert_eq!(format_try(1_234_567.5), "₺ 1.234.567,50");
        assert_eq!(format_try(0.0), "₺ 0,00");
        assert_eq!(format_try(-1500.0), "₺ -1.500,00");
    }

    #[test]
    fn test_prediction_confidence() {
        let prediction = Prediction::new(25_000.0);
        assert_eq!(prediction.range_percent, 8);
        assert_eq!(prediction.confidence_score, 92);
        assert_eq!(prediction.formatted_range(), "±8%");
        assert_eq!(prediction.formatted_price(), "₺ 25.000,00");
    }

    #[test]
    fn test_selection_counts_non_empty_values() {
        let selection = FeatureSelection::from_json(
            r#"{"ekran_ekran_boyutu": "6.7", "batarya_hizli_sarj": "", "tasarim_agirlik": "  "}"#,
        )
        .unwrap();
        assert_eq!(selection.selected_count(), 1);
        assert_eq!(selection.get("ekran_ekran_boyutu"), Some("6.7"));

        let mut selection = FeatureSelection::new();
        assert_eq!(selection.selected_count(), 0);
        selection.set("temel_donanim_bellek_ram", "8 GB");
        assert_eq!(selection.selected_count(), 1);
    }

    #[test]
    fn test_selection_serializes_as_flat_object() {
        let mut selection = FeatureSelection::new();
        selection.set("ekran_ekran_boyutu", "6.1");
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json, serde_json::json!({"ekran_ekran_boyutu": "6.1"}));
    }

    #[test]
    fn test_selection_rejects_non_object() {
        assert!(FeatureSelection::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_responses_tolerate_missing_fields() {
        let response: FeaturesResponse = serde_json::from_str(r#"{"error": "no dataset"}"#).unwrap();
        assert!(response.features.is_empty());
        assert_eq!(response.error.as_deref(), Some("no dataset"));

        let response: PredictResponse = serde_json::from_str(r#"{"predicted_price": 18999.9}"#).unwrap();
        assert_eq!(response.predicted_price, Some(18999.9));
        assert!(response.error.is_none());
    }
}
