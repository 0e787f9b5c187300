use super::rules::Matcher::{Substr, Token};
use super::rules::{AllOfRule, first_match_all};
use super::text_normalizer::NormalizedId;

/// A well-known processor field: its catalog label key and display rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorField {
    pub label_key: &'static str,
    pub rank: u8,
}

/// Rank of processor fields that match no known pattern.
pub const UNRANKED: u8 = 99;

const fn field(label_key: &'static str, rank: u8) -> ProcessorField {
    ProcessorField { label_key, rank }
}

// Keyword co-occurrence patterns; first match wins, so the coprocessor and
// graphics patterns sit above the generic "islemci" ones.
const PROCESSOR_FIELDS: &[AllOfRule<ProcessorField>] = &[
    AllOfRule { all_of: &[Substr("yardimci"), Substr("islemci")], result: field("coprocessor", 80) },
    AllOfRule { all_of: &[Substr("grafik"), Substr("islemci")], result: field("gpu_model", 60) },
    AllOfRule { all_of: &[Token("gpu"), Substr("frekans")], result: field("gpu_frequency", 61) },
    AllOfRule { all_of: &[Token("ana"), Substr("islemci")], result: field("main_cpu", 0) },
    AllOfRule { all_of: &[Substr("islemci"), Token("modeli")], result: field("main_cpu", 0) },
    AllOfRule { all_of: &[Substr("yonga"), Substr("seti")], result: field("chipset", 10) },
    AllOfRule { all_of: &[Substr("chipset")], result: field("chipset", 10) },
    AllOfRule { all_of: &[Token("cpu"), Substr("cekirde")], result: field("cpu_cores", 20) },
    AllOfRule { all_of: &[Token("cpu"), Substr("frekans")], result: field("cpu_frequency", 30) },
    AllOfRule { all_of: &[Token("cpu"), Token("hizi")], result: field("cpu_frequency", 30) },
    AllOfRule { all_of: &[Substr("uretim"), Substr("teknoloji")], result: field("process_node", 40) },
    AllOfRule { all_of: &[Substr("islemci"), Substr("mimari")], result: field("architecture", 50) },
    AllOfRule { all_of: &[Token("gpu")], result: field("gpu_model", 60) },
    AllOfRule { all_of: &[Token("npu")], result: field("coprocessor", 80) },
    AllOfRule { all_of: &[Substr("antutu")], result: field("antutu", 90) },
];

pub fn lookup_processor_field(id: &NormalizedId) -> Option<ProcessorField> {
    first_match_all(PROCESSOR_FIELDS, id)
}

pub fn processor_rank(id: &NormalizedId) -> u8 {
    lookup_processor_field(id).map_or(UNRANKED, |f| f.rank)
}
