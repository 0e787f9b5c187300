use regex::Regex;
use std::sync::LazyLock;

use super::group_classifier::{Group, GroupKey};
use super::processor_fields::lookup_processor_field;
use super::subgroup_classifier::Subgroup;
use super::text_normalizer::{NormalizedId, tokenize};
use crate::locale::{Locale, catalog};

static VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d+$").expect("Invalid regex"));
static GENERATION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+g$").expect("Invalid regex"));

const ACRONYMS: &[(&str, &str)] = &[
    ("cpu", "CPU"),
    ("gpu", "GPU"),
    ("npu", "NPU"),
    ("soc", "SoC"),
    ("ai", "AI"),
    ("ram", "RAM"),
    ("ssd", "SSD"),
    ("hdd", "HDD"),
    ("ufs", "UFS"),
    ("emmc", "eMMC"),
    ("nvme", "NVMe"),
    ("nfc", "NFC"),
    ("usb", "USB"),
    ("gps", "GPS"),
    ("lte", "LTE"),
    ("sim", "SIM"),
    ("wifi", "Wi-Fi"),
    ("ois", "OIS"),
    ("eis", "EIS"),
    ("os", "OS"),
    ("ios", "iOS"),
    ("hdr", "HDR"),
    ("oled", "OLED"),
    ("amoled", "AMOLED"),
    ("lcd", "LCD"),
    ("ips", "IPS"),
    ("ppi", "PPI"),
    ("fps", "FPS"),
    ("mah", "mAh"),
    ("mp", "MP"),
    ("hz", "Hz"),
    ("ghz", "GHz"),
    ("gb", "GB"),
    ("tb", "TB"),
    ("ip67", "IP67"),
    ("ip68", "IP68"),
    ("antutu", "AnTuTu"),
];

/// Leading token sequences that repeat the group name in dataset columns.
fn known_prefixes(group: Group) -> &'static [&'static [&'static str]] {
    match group {
        Group::Processor | Group::Ram | Group::Storage => &[&["temel", "donanim"]],
        Group::Display => &[&["ekran"]],
        Group::Battery => &[&["batarya"]],
        Group::Camera => &[&["kamera"]],
        Group::Design | Group::Material | Group::Weight => &[&["tasarim"]],
        Group::Network => &[
            &["ag", "baglantilari"],
            &["kablosuz", "baglantilar"],
            &["baglantilar"],
        ],
        Group::Os => &[&["isletim", "sistemi"]],
        Group::Features => &[&["ozellikler"]],
        Group::Basics => &[&["temel", "bilgiler"]],
        Group::Product => &[&["urun"]],
        Group::Multimedia => &[&["multimedya"]],
        Group::Charging => &[],
    }
}

/// Display label for a feature in `locale`.
///
/// Processor fields use curated labels from the string catalog; everything
/// else, and any catalog gap, goes through [`generic_label`].
pub fn format_label(locale: Locale, group: &GroupKey, feature: &str) -> String {
    let id = NormalizedId::new(feature);

    if group.known() == Some(Group::Processor) {
        if let Some(field) = lookup_processor_field(&id) {
            let path = format!("labels.processor.{}", field.label_key);
            if let Some(label) = catalog().lookup(locale, &path) {
                return label.to_string();
            }
        }
    }

    let path = format!("labels.fields.{}", id.tokens().join("_"));
    catalog().text_or_else(locale, &path, || generic_label(locale, group, feature))
}

/// Label built from the identifier's tokens: group prefix stripped, a doubled
/// leading token collapsed, acronyms fixed, the rest capitalized using the
/// casing rules of `locale`.
pub fn generic_label(locale: Locale, group: &GroupKey, feature: &str) -> String {
    let tokens = tokenize(feature);
    if tokens.is_empty() {
        return feature.trim().to_string();
    }

    let mut rest: &[String] = strip_prefix(group, &tokens);
    if rest.is_empty() {
        rest = &tokens;
    }
    if rest.len() > 1 && rest[0] == rest[1] {
        rest = &rest[1..];
    }

    rest.iter()
        .map(|token| format_token(locale, token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_prefix<'a>(group: &GroupKey, tokens: &'a [String]) -> &'a [String] {
    match group {
        GroupKey::Fallback(key) => {
            if tokens.first().is_some_and(|t| t == key) {
                &tokens[1..]
            } else {
                tokens
            }
        }
        GroupKey::Known(group) => {
            for prefix in known_prefixes(*group) {
                if tokens.len() >= prefix.len()
                    && tokens.iter().zip(prefix.iter()).all(|(t, p)| t == p)
                {
                    return &tokens[prefix.len()..];
                }
            }
            tokens
        }
    }
}

fn format_token(locale: Locale, token: &str) -> String {
    if let Some((_, fixed)) = ACRONYMS.iter().find(|(raw, _)| *raw == token) {
        return fixed.to_string();
    }

    if VERSION_TOKEN.is_match(token) || GENERATION_TOKEN.is_match(token) {
        return token.to_uppercase();
    }

    capitalize(locale, token)
}

/// Upper-case the first letter. Turkish maps dotted `i` to `İ`, not `I`.
fn capitalize(locale: Locale, token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some('i') if locale == Locale::Tr => std::iter::once('İ').chain(chars).collect(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn a snake_case key into a readable title, e.g. `refresh_rate` → `Refresh Rate`.
pub fn humanize_key(locale: Locale, key: &str) -> String {
    tokenize(key)
        .iter()
        .map(|token| format_token(locale, token))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn group_title(locale: Locale, group: &GroupKey) -> String {
    let path = format!("groups.{}", group.as_str());
    match group {
        GroupKey::Known(_) => catalog().text_or_else(locale, &path, || humanize_key(locale, group.as_str())),
        GroupKey::Fallback(key) => humanize_key(locale, key),
    }
}

pub fn subgroup_title(locale: Locale, subgroup: Subgroup) -> String {
    let path = format!("subgroups.{}", subgroup.key());
    catalog().text_or_else(locale, &path, || humanize_key(locale, subgroup.key()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::group_classifier::classify_group;
    use crate::processor::subgroup_classifier::subgroup_priority;

    fn generic(feature: &str) -> String {
        generic_label(Locale::En, &classify_group(feature), feature)
    }

    #[test]
    fn test_curated_processor_label() {
        let group = GroupKey::Known(Group::Processor);
        assert_eq!(format_label(Locale::Tr, &group, "ana_islemci_cpu"), "Ana İşlemci (CPU)");
        assert_eq!(format_label(Locale::En, &group, "ana_islemci_cpu"), "Main Processor (CPU)");
        assert_eq!(
            format_label(Locale::En, &group, "temel_donanim_cpu_cekirdegi"),
            "CPU Core Count"
        );
    }

    #[test]
    fn test_unmatched_processor_field_uses_generic_label() {
        let group = GroupKey::Known(Group::Processor);
        assert_eq!(format_label(Locale::Tr, &group, "islemci_sicakligi"), "İslemci Sicakligi");
        assert_eq!(format_label(Locale::En, &group, "islemci_sicakligi"), "Islemci Sicakligi");
    }

    #[test]
    fn test_turkish_capitalization_keeps_the_dot() {
        let group = GroupKey::Fallback("ozel".to_string());
        assert_eq!(generic_label(Locale::Tr, &group, "ozel_ic_isik_sensoru"), "İc İsik Sensoru");
        assert_eq!(generic_label(Locale::En, &group, "ozel_ic_isik_sensoru"), "Ic Isik Sensoru");
        assert_eq!(group_title(Locale::Tr, &GroupKey::Fallback("ithalat".into())), "İthalat");
        // Acronyms are fixed before casing applies
        assert_eq!(format_token(Locale::Tr, "ios"), "iOS");
        assert_eq!(format_token(Locale::Tr, "ips"), "IPS");
    }

    #[test]
    fn test_generic_label_strips_group_prefix() {
        assert_eq!(generic("temel_donanim_bellek_ram"), "Bellek RAM");
        assert_eq!(generic("ekran_ekran_boyutu"), "Ekran Boyutu");
        assert_eq!(generic("batarya_batarya_kapasitesi_tipik"), "Batarya Kapasitesi Tipik");
        assert_eq!(generic("ag_baglantilari_5g"), "5G");
        assert_eq!(generic("kablosuz_baglantilar_bluetooth_versiyonu"), "Bluetooth Versiyonu");
        assert_eq!(generic("isletim_sistemi_isletim_sistemi"), "Isletim Sistemi");
    }

    #[test]
    fn test_generic_label_collapses_repeated_leading_token() {
        let group = GroupKey::Known(Group::Ram);
        assert_eq!(generic_label(Locale::En, &group, "ram_ram_tipi"), "RAM Tipi");
    }

    #[test]
    fn test_generic_label_keeps_tokens_when_prefix_is_everything() {
        assert_eq!(generic("ekran"), "Ekran");
        assert_eq!(generic("isletim_sistemi"), "Isletim Sistemi");
    }

    #[test]
    fn test_fallback_group_label() {
        assert_eq!(generic("unknown_custom_field"), "Custom Field");
        assert_eq!(generic("12345"), "12345");
        assert_eq!(generic(""), "");
    }

    #[test]
    fn test_acronyms_and_versions() {
        let group = GroupKey::Known(Group::Processor);
        assert_eq!(generic_label(Locale::En, &group, "temel_donanim_antutu_puani_v10"), "AnTuTu Puani V10");
        let group = GroupKey::Known(Group::Camera);
        assert_eq!(
            generic_label(Locale::En, &group, "kamera_optik_goruntu_sabitleyici_ois"),
            "Optik Goruntu Sabitleyici OIS"
        );
        assert_eq!(format_token(Locale::En, "4g"), "4G");
        assert_eq!(format_token(Locale::En, "wifi"), "Wi-Fi");
    }

    #[test]
    fn test_label_is_stable() {
        for locale in Locale::ALL {
            for feature in ["ana_islemci_cpu", "ekran_ekran_boyutu", "unknown_custom_field", ""] {
                let group = classify_group(feature);
                let first = format_label(locale, &group, feature);
                let second = format_label(locale, &group, feature);
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_catalog_field_labels() {
        let group = classify_group("ekran_ekran_boyutu");
        assert_eq!(format_label(Locale::Tr, &group, "ekran_ekran_boyutu"), "Ekran Boyutu");
        assert_eq!(format_label(Locale::En, &group, "ekran_ekran_boyutu"), "Screen Size");
    }

    #[test]
    fn test_titles() {
        assert_eq!(group_title(Locale::Tr, &GroupKey::Known(Group::Processor)), "İşlemci");
        assert_eq!(group_title(Locale::En, &GroupKey::Known(Group::Processor)), "Processor");
        assert_eq!(group_title(Locale::En, &GroupKey::Fallback("unknown".into())), "Unknown");
        assert_eq!(subgroup_title(Locale::En, Subgroup::RefreshRate), "Refresh Rate");
        assert_eq!(subgroup_title(Locale::Tr, Subgroup::Other), "Diğer");
    }

    #[test]
    fn test_catalog_has_every_title() {
        for locale in Locale::ALL {
            for group in Group::ALL {
                let path = format!("groups.{}", group.key());
                assert!(catalog().lookup_exact(locale, &path).is_some(), "{} {}", locale, path);

                for subgroup in subgroup_priority(&GroupKey::Known(group)) {
                    let path = format!("subgroups.{}", subgroup.key());
                    assert!(catalog().lookup_exact(locale, &path).is_some(), "{} {}", locale, path);
                }
            }
            assert!(catalog().lookup_exact(locale, "subgroups.other").is_some());
        }
    }
}
