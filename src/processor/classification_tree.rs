use serde::Serialize;
use tracing::debug;

use super::group_classifier::{Group, GroupKey, classify_normalized};
use super::label_formatter::format_label;
use super::ordering::{collation_key, order_groups, order_subgroups};
use super::processor_fields::processor_rank;
use super::subgroup_classifier::{Subgroup, classify_subgroup_normalized};
use super::text_normalizer::NormalizedId;
use crate::locale::Locale;

/// Group and subgroup assigned to one feature identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub group: GroupKey,
    pub subgroup: Subgroup,
}

pub fn classify_feature(feature: &str) -> Classification {
    let id = NormalizedId::new(feature);
    let group = classify_normalized(&id);
    let subgroup = classify_subgroup_normalized(&group, &id);
    Classification { group, subgroup }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubgroupNode {
    #[serde(serialize_with = "serialize_subgroup")]
    pub key: Subgroup,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupNode {
    #[serde(serialize_with = "serialize_group")]
    pub key: GroupKey,
    pub subgroups: Vec<SubgroupNode>,
}

/// Features grouped by group and subgroup, every level in display order.
///
/// Only identifiers are stored; labels and titles are derived on demand so a
/// locale switch re-renders text without touching the structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationTree {
    pub groups: Vec<GroupNode>,
}

impl ClassificationTree {
    /// Classify and order `features`. Feature order within a subgroup is
    /// collated in `locale`. Duplicate identifiers are kept once.
    pub fn build<S: AsRef<str>>(features: &[S], locale: Locale) -> Self {
        // Canonical input order makes the result independent of arrival order
        let mut ids: Vec<&str> = features.iter().map(|f| f.as_ref()).collect();
        ids.sort_unstable();
        ids.dedup();

        let mut buckets: Vec<(GroupKey, Vec<(Subgroup, Vec<&str>)>)> = Vec::new();
        for id in ids {
            let Classification { group, subgroup } = classify_feature(id);

            let position = match buckets.iter().position(|(key, _)| *key == group) {
                Some(position) => position,
                None => {
                    buckets.push((group, Vec::new()));
                    buckets.len() - 1
                }
            };

            let subgroups = &mut buckets[position].1;
            match subgroups.iter_mut().find(|(key, _)| *key == subgroup) {
                Some((_, members)) => members.push(id),
                None => subgroups.push((subgroup, vec![id])),
            }
        }

        let present: Vec<GroupKey> = buckets.iter().map(|(key, _)| key.clone()).collect();
        let mut groups = Vec::with_capacity(buckets.len());

        for group in order_groups(&present) {
            let Some(index) = buckets.iter().position(|(key, _)| *key == group) else {
                continue;
            };
            let (_, mut subgroup_buckets) = buckets.swap_remove(index);

            let present_subgroups: Vec<Subgroup> = subgroup_buckets.iter().map(|(key, _)| *key).collect();
            let mut subgroups = Vec::with_capacity(subgroup_buckets.len());

            for subgroup in order_subgroups(&group, &present_subgroups) {
                let Some(position) = subgroup_buckets.iter().position(|(key, _)| *key == subgroup) else {
                    continue;
                };
                let (_, members) = subgroup_buckets.swap_remove(position);
                subgroups.push(SubgroupNode {
                    key: subgroup,
                    features: order_features(&group, &members, locale),
                });
            }

            debug!("Group '{}' holds {} subgroups", group, subgroups.len());
            groups.push(GroupNode { key: group, subgroups });
        }

        ClassificationTree { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn feature_count(&self) -> usize {
        self.feature_ids().count()
    }

    pub fn feature_ids(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.subgroups.iter())
            .flat_map(|s| s.features.iter().map(|f| f.as_str()))
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.feature_ids().any(|f| f == feature)
    }

    pub fn group(&self, key: &GroupKey) -> Option<&GroupNode> {
        self.groups.iter().find(|g| g.key == *key)
    }
}

/// Processor features sort by rank first; every other group purely by label.
/// The raw identifier breaks any remaining tie.
fn order_features(group: &GroupKey, members: &[&str], locale: Locale) -> Vec<String> {
    let is_processor = group.known() == Some(Group::Processor);

    let mut keyed: Vec<_> = members
        .iter()
        .map(|id| {
            let rank = if is_processor {
                processor_rank(&NormalizedId::new(id))
            } else {
                0
            };
            let label = format_label(locale, group, id);
            (rank, collation_key(&label, locale), *id)
        })
        .collect();

    keyed.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.cmp(&b.1))
            .then_with(|| a.2.cmp(&b.2))
    });

    keyed.into_iter().map(|(_, _, id)| id.to_string()).collect()
}

fn serialize_group<S: serde::Serializer>(key: &GroupKey, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(key.as_str())
}

fn serialize_subgroup<S: serde::Serializer>(key: &Subgroup, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(key.key())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(tree: &ClassificationTree) -> Vec<String> {
        tree.groups.iter().map(|g| g.key.to_string()).collect()
    }

    #[test]
    fn test_scenario_three_groups_in_priority_order() {
        let tree = ClassificationTree::build(
            &["ram_kapasitesi", "ana_islemci_cpu", "batarya_hizli_sarj"],
            Locale::Tr,
        );

        assert_eq!(keys(&tree), vec!["processor", "ram", "battery"]);
        for group in &tree.groups {
            let count: usize = group.subgroups.iter().map(|s| s.features.len()).sum();
            assert_eq!(count, 1);
        }
        assert_eq!(
            format_label(Locale::Tr, &tree.groups[0].key, "ana_islemci_cpu"),
            "Ana İşlemci (CPU)"
        );
    }

    #[test]
    fn test_scenario_unknown_feature() {
        let tree = ClassificationTree::build(&["unknown_custom_field"], Locale::En);

        assert_eq!(tree.groups.len(), 1);
        let group = &tree.groups[0];
        assert_eq!(group.key, GroupKey::Fallback("unknown".to_string()));
        assert_eq!(group.subgroups.len(), 1);
        assert_eq!(group.subgroups[0].key, Subgroup::Other);
        assert_eq!(format_label(Locale::En, &group.key, "unknown_custom_field"), "Custom Field");
    }

    #[test]
    fn test_scenario_empty_input() {
        let features: Vec<String> = Vec::new();
        let tree = ClassificationTree::build(&features, Locale::Tr);
        assert!(tree.is_empty());
        assert_eq!(tree.feature_count(), 0);
    }

    #[test]
    fn test_scenario_label_order_within_subgroup() {
        // Both land in display/technology, which has no rank table
        let tree = ClassificationTree::build(&["ekran_panel_tipi", "ekran_ekran_teknolojisi"], Locale::Tr);
        let technology = &tree.groups[0].subgroups[0];
        assert_eq!(technology.key, Subgroup::Technology);
        assert_eq!(
            technology.features,
            vec!["ekran_ekran_teknolojisi".to_string(), "ekran_panel_tipi".to_string()]
        );
    }

    #[test]
    fn test_processor_rank_beats_label_order() {
        let tree = ClassificationTree::build(
            &["temel_donanim_cpu_uretim_teknolojisi", "temel_donanim_cpu_cekirdegi", "ana_islemci_cpu"],
            Locale::En,
        );
        let cpu = &tree.groups[0].subgroups[0];
        assert_eq!(cpu.key, Subgroup::Cpu);
        assert_eq!(
            cpu.features,
            vec![
                "ana_islemci_cpu".to_string(),
                "temel_donanim_cpu_cekirdegi".to_string(),
                "temel_donanim_cpu_uretim_teknolojisi".to_string(),
            ]
        );
    }

    #[test]
    fn test_shuffled_input_builds_identical_tree() {
        let features = vec![
            "kamera_on_kamera_cozunurlugu",
            "temel_donanim_bellek_ram",
            "xyz_unknown_field",
            "ekran_ekran_boyutu",
            "abc_custom",
            "temel_donanim_cpu_cekirdegi",
            "kamera_kamera_cozunurlugu",
            "batarya_hizli_sarj",
            "batarya_batarya_kapasitesi_tipik",
        ];
        let mut reversed = features.clone();
        reversed.reverse();
        let mut rotated = features.clone();
        rotated.rotate_left(4);

        let base = ClassificationTree::build(&features, Locale::Tr);
        assert_eq!(base, ClassificationTree::build(&reversed, Locale::Tr));
        assert_eq!(base, ClassificationTree::build(&rotated, Locale::Tr));
        assert_eq!(
            serde_json::to_string(&base).unwrap(),
            serde_json::to_string(&ClassificationTree::build(&features, Locale::Tr)).unwrap()
        );
        assert_eq!(keys(&base).last().map(String::as_str), Some("xyz"));
    }

    #[test]
    fn test_every_feature_is_kept_exactly_once() {
        let features = ["ekran_ekran_boyutu", "ekran_ekran_boyutu", "", "12345", "tasarim_agirlik"];
        let tree = ClassificationTree::build(&features, Locale::Tr);
        assert_eq!(tree.feature_count(), 4);
        for feature in features {
            assert!(tree.contains(feature));
        }
    }

    #[test]
    fn test_serialized_shape() {
        let tree = ClassificationTree::build(&["batarya_hizli_sarj"], Locale::Tr);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["groups"][0]["key"], "battery");
        assert_eq!(json["groups"][0]["subgroups"][0]["key"], "charging");
        assert_eq!(json["groups"][0]["subgroups"][0]["features"][0], "batarya_hizli_sarj");
    }
}
