use serde::{Deserialize, Serialize};
use std::fmt;

use super::group_classifier::{Group, GroupKey, classify_group};
use super::label_formatter::format_label;
use crate::config::SegmentConfig;
use crate::locale::{Locale, catalog};

/// Coarse market tier of a predicted product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Entry,
    #[default]
    Mid,
    Top,
}

impl Segment {
    pub fn key(&self) -> &'static str {
        match self {
            Segment::Entry => "entry",
            Segment::Mid => "mid",
            Segment::Top => "top",
        }
    }

    /// Unrecognized input falls back to the mid tier.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "entry" | "giris" | "low" | "budget" => Segment::Entry,
            "top" | "ust" | "high" | "flagship" | "premium" => Segment::Top,
            _ => Segment::Mid,
        }
    }

    pub fn from_price(price: f64, thresholds: &SegmentConfig) -> Self {
        if price < thresholds.entry_max {
            Segment::Entry
        } else if price < thresholds.mid_max {
            Segment::Mid
        } else {
            Segment::Top
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Advice categories; several feature groups share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceTopic {
    Processor,
    Memory,
    Display,
    Power,
    Camera,
    Connectivity,
    Build,
    General,
}

impl AdviceTopic {
    pub fn key(&self) -> &'static str {
        match self {
            AdviceTopic::Processor => "processor",
            AdviceTopic::Memory => "memory",
            AdviceTopic::Display => "display",
            AdviceTopic::Power => "power",
            AdviceTopic::Camera => "camera",
            AdviceTopic::Connectivity => "connectivity",
            AdviceTopic::Build => "build",
            AdviceTopic::General => "general",
        }
    }

    pub fn for_group(group: &GroupKey) -> Self {
        match group.known() {
            Some(Group::Processor) => AdviceTopic::Processor,
            Some(Group::Ram | Group::Storage) => AdviceTopic::Memory,
            Some(Group::Display) => AdviceTopic::Display,
            Some(Group::Battery | Group::Charging) => AdviceTopic::Power,
            Some(Group::Camera) => AdviceTopic::Camera,
            Some(Group::Network) => AdviceTopic::Connectivity,
            Some(Group::Design | Group::Material | Group::Weight) => AdviceTopic::Build,
            _ => AdviceTopic::General,
        }
    }

    pub fn for_feature(feature: &str) -> Self {
        Self::for_group(&classify_group(feature))
    }
}

/// Advice for improving `feature` in a product of the given segment.
pub fn suggest(locale: Locale, segment: Segment, feature: &str) -> String {
    let topic = AdviceTopic::for_feature(feature);
    let path = format!("advice.suggest.{}.{}", segment.key(), topic.key());
    let general = format!("advice.suggest.{}.general", segment.key());

    catalog()
        .lookup(locale, &path)
        .or_else(|| catalog().lookup(locale, &general))
        .unwrap_or_default()
        .to_string()
}

pub fn positioning(locale: Locale, segment: Segment) -> String {
    catalog().render(locale, &format!("advice.positioning.{}", segment.key()), &[])
}

pub fn design_advice(locale: Locale, segment: Segment) -> String {
    catalog().render(locale, &format!("advice.design.{}", segment.key()), &[])
}

/// Marketing line highlighting `feature`, named by its display label.
pub fn marketing_copy(locale: Locale, segment: Segment, feature: &str) -> String {
    let group = classify_group(feature);
    let label = format_label(locale, &group, feature);
    catalog().render(
        locale,
        &format!("advice.marketing.{}", segment.key()),
        &[("feature", label.as_str())],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_mid() {
        assert_eq!(Segment::parse("entry"), Segment::Entry);
        assert_eq!(Segment::parse(" TOP "), Segment::Top);
        assert_eq!(Segment::parse("mid"), Segment::Mid);
        assert_eq!(Segment::parse("whatever"), Segment::Mid);
        assert_eq!(Segment::parse(""), Segment::Mid);
    }

    #[test]
    fn test_segment_from_price() {
        let thresholds = SegmentConfig::default();
        assert_eq!(Segment::from_price(9_999.0, &thresholds), Segment::Entry);
        assert_eq!(Segment::from_price(15_000.0, &thresholds), Segment::Mid);
        assert_eq!(Segment::from_price(39_999.99, &thresholds), Segment::Mid);
        assert_eq!(Segment::from_price(64_999.0, &thresholds), Segment::Top);
    }

    #[test]
    fn test_topics() {
        assert_eq!(AdviceTopic::for_feature("temel_donanim_bellek_ram"), AdviceTopic::Memory);
        assert_eq!(AdviceTopic::for_feature("batarya_hizli_sarj"), AdviceTopic::Power);
        assert_eq!(AdviceTopic::for_feature("tasarim_agirlik"), AdviceTopic::Build);
        assert_eq!(AdviceTopic::for_feature("unknown_custom_field"), AdviceTopic::General);
    }

    #[test]
    fn test_every_segment_and_topic_has_text() {
        let topics = [
            AdviceTopic::Processor,
            AdviceTopic::Memory,
            AdviceTopic::Display,
            AdviceTopic::Power,
            AdviceTopic::Camera,
            AdviceTopic::Connectivity,
            AdviceTopic::Build,
            AdviceTopic::General,
        ];

        for locale in Locale::ALL {
            for segment in [Segment::Entry, Segment::Mid, Segment::Top] {
                for topic in topics {
                    let path = format!("advice.suggest.{}.{}", segment.key(), topic.key());
                    assert!(catalog().lookup_exact(locale, &path).is_some(), "{} {}", locale, path);
                }
                assert!(!positioning(locale, segment).starts_with("advice."));
                assert!(!design_advice(locale, segment).starts_with("advice."));
            }
        }
    }

    #[test]
    fn test_suggest_is_keyed_by_segment_and_topic() {
        let entry = suggest(Locale::En, Segment::Entry, "temel_donanim_cpu_cekirdegi");
        let top = suggest(Locale::En, Segment::Top, "temel_donanim_cpu_cekirdegi");
        assert!(!entry.is_empty());
        assert_ne!(entry, top);
        assert_eq!(
            suggest(Locale::En, Segment::Mid, "xyz_unknown_field"),
            suggest(Locale::En, Segment::parse("???"), "abc_custom")
        );
    }

    #[test]
    fn test_marketing_copy_names_the_feature() {
        let copy = marketing_copy(Locale::En, Segment::Top, "ekran_ekran_boyutu");
        assert!(copy.contains("Screen Size"), "{}", copy);
        let copy = marketing_copy(Locale::Tr, Segment::Entry, "ana_islemci_cpu");
        assert!(copy.contains("Ana İşlemci (CPU)"), "{}", copy);
    }
}
