pub mod classification_tree;
pub mod group_classifier;
pub mod label_formatter;
pub mod ordering;
pub mod processor_fields;
pub mod recommendation;
pub mod rules;
pub mod subgroup_classifier;
pub mod text_normalizer;

pub use classification_tree::*;
pub use group_classifier::{Group, GroupKey, classify_group};
pub use label_formatter::{format_label, generic_label, group_title, subgroup_title};
pub use ordering::{compare_labels, order_groups, order_subgroups};
pub use recommendation::{AdviceTopic, Segment, design_advice, marketing_copy, positioning, suggest};
pub use subgroup_classifier::{Subgroup, classify_subgroup};
pub use text_normalizer::{normalize, tokenize};
