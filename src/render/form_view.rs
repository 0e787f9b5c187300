use anyhow::Result;
use std::fmt::Write;
use tracing::{error, info};

use crate::config::SegmentConfig;
use crate::locale::{Locale, catalog};
use crate::models::{FeatureSelection, Prediction};
use crate::processor::recommendation::{AdviceTopic, design_advice, marketing_copy, positioning, suggest};
use crate::processor::{ClassificationTree, Segment, format_label, group_title, subgroup_title};

#[derive(Debug, Clone, PartialEq)]
enum Notice {
    PredictionSucceeded,
    PredictionFailed(String),
}

/// Terminal rendering of a classified feature form and its prediction state.
///
/// Holds only identifiers, values and outcome kinds; every visible string is
/// produced at render time in the current locale.
#[derive(Debug, Clone)]
pub struct FormView {
    tree: ClassificationTree,
    locale: Locale,
    degraded: bool,
    load_error: Option<String>,
    selection: FeatureSelection,
    prediction: Option<Prediction>,
    notice: Option<Notice>,
    segments: SegmentConfig,
}

impl FormView {
    pub fn new(tree: ClassificationTree, locale: Locale, degraded: bool) -> Self {
        Self {
            tree,
            locale,
            degraded,
            load_error: None,
            selection: FeatureSelection::new(),
            prediction: None,
            notice: None,
            segments: SegmentConfig::default(),
        }
    }

    pub fn with_segments(mut self, segments: SegmentConfig) -> Self {
        self.segments = segments;
        self
    }

    /// Attach the reason the feature list could not be fetched.
    pub fn with_load_error(mut self, error: Option<String>) -> Self {
        self.load_error = error;
        self
    }

    pub fn tree(&self) -> &ClassificationTree {
        &self.tree
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    pub fn toggle_locale(&mut self) -> Locale {
        self.locale = self.locale.toggle();
        info!("Switched locale to {}", self.locale);
        self.locale
    }

    pub fn set_selection(&mut self, selection: FeatureSelection) {
        self.selection = selection;
    }

    pub fn selection(&self) -> &FeatureSelection {
        &self.selection
    }

    pub fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    pub fn status_line(&self) -> String {
        let count = self.selected_count().to_string();
        catalog().render(self.locale, "status.selected_count", &[("count", count.as_str())])
    }

    /// Store the outcome of a prediction request. A failure keeps the
    /// previous result on screen.
    pub fn record_prediction(&mut self, outcome: Result<f64>) {
        match outcome {
            Ok(price) => {
                info!("Predicted price: {:.2}", price);
                self.prediction = Some(Prediction::new(price));
                self.notice = Some(Notice::PredictionSucceeded);
            }
            Err(e) => {
                error!("Prediction failed: {:#}", e);
                self.notice = Some(Notice::PredictionFailed(e.to_string()));
            }
        }
    }

    pub fn segment(&self) -> Option<Segment> {
        self.prediction
            .as_ref()
            .map(|p| Segment::from_price(p.price, &self.segments))
    }

    /// Grouped form: group titles, subgroup titles, then one entry per feature
    /// with its chosen value or a selection placeholder.
    pub fn render_form(&self) -> String {
        let mut out = String::new();

        for group in &self.tree.groups {
            let _ = writeln!(out, "## {}", group_title(self.locale, &group.key));
            for subgroup in &group.subgroups {
                let _ = writeln!(out, "  {}", subgroup_title(self.locale, subgroup.key));
                for feature in &subgroup.features {
                    let label = format_label(self.locale, &group.key, feature);
                    let value = match self.selection.get(feature).filter(|v| !v.trim().is_empty()) {
                        Some(value) => value.to_string(),
                        None => catalog().render(
                            self.locale,
                            "form.select_placeholder",
                            &[("label", label.as_str())],
                        ),
                    };
                    let _ = writeln!(out, "    - {}: {}", label, value);
                }
            }
        }

        out
    }

    pub fn render_result(&self) -> String {
        let mut out = String::new();

        match &self.notice {
            Some(Notice::PredictionSucceeded) => {
                let _ = writeln!(out, "{}", catalog().render(self.locale, "status.prediction_success", &[]));
            }
            Some(Notice::PredictionFailed(message)) => {
                let text = catalog().render(self.locale, "status.prediction_error", &[("error", message.as_str())]);
                let _ = writeln!(out, "{}", text);
            }
            None => {}
        }

        let Some(prediction) = &self.prediction else {
            return out;
        };

        let price = prediction.formatted_price();
        let range = prediction.formatted_range();
        let score = prediction.confidence_score.to_string();
        let _ = writeln!(out, "{}", catalog().render(self.locale, "result.price", &[("price", price.as_str())]));
        let _ = writeln!(out, "{}", catalog().render(self.locale, "result.range", &[("range", range.as_str())]));
        let _ = writeln!(out, "{}", catalog().render(self.locale, "result.score", &[("score", score.as_str())]));

        if let Some(segment) = self.segment() {
            let name = catalog().render(self.locale, &format!("segments.{}", segment.key()), &[]);
            let _ = writeln!(out, "{}", catalog().render(self.locale, "result.segment", &[("segment", name.as_str())]));
            out.push_str(&self.render_advice(segment));
        }

        out
    }

    /// Advice for the predicted segment: positioning, design, one suggestion
    /// per advice topic among the selected features, and a marketing line.
    fn render_advice(&self, segment: Segment) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n{}", catalog().render(self.locale, "advice.heading", &[]));
        let _ = writeln!(out, "  {}", positioning(self.locale, segment));
        let _ = writeln!(out, "  {}", design_advice(self.locale, segment));

        let features = self.advised_features();
        let mut topics: Vec<AdviceTopic> = Vec::new();
        for feature in &features {
            let topic = AdviceTopic::for_feature(feature);
            if !topics.contains(&topic) {
                topics.push(topic);
                let _ = writeln!(out, "  * {}", suggest(self.locale, segment, feature));
            }
        }

        if let Some(feature) = features.first() {
            let _ = writeln!(out, "  \"{}\"", marketing_copy(self.locale, segment, feature));
        }

        out
    }

    /// Selected features in form order; the whole form when nothing is selected.
    fn advised_features(&self) -> Vec<&str> {
        let selected: Vec<&str> = self
            .tree
            .feature_ids()
            .filter(|f| self.selection.get(f).is_some_and(|v| !v.trim().is_empty()))
            .collect();

        if selected.is_empty() {
            self.tree.feature_ids().collect()
        } else {
            selected
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}\n", catalog().render(self.locale, "form.title", &[]));

        if self.tree.is_empty() {
            let _ = writeln!(out, "{}", catalog().render(self.locale, "status.no_features", &[]));
        } else {
            out.push_str(&self.render_form());
        }

        let _ = writeln!(out, "\n{}", self.status_line());
        if self.degraded {
            let _ = writeln!(out, "{}", catalog().render(self.locale, "status.degraded", &[]));
        }
        if let Some(error) = &self.load_error {
            let _ = writeln!(
                out,
                "{}",
                catalog().render(self.locale, "status.features_error", &[("error", error.as_str())])
            );
        }

        let result = self.render_result();
        if !result.is_empty() {
            let _ = writeln!(out, "\n{}", result.trim_end());
        }

        out
    }
}
