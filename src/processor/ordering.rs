use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::group_classifier::{Group, GroupKey};
use super::subgroup_classifier::{Subgroup, subgroup_priority};
use crate::locale::Locale;

pub const GROUP_PRIORITY: [Group; 16] = [
    Group::Processor,
    Group::Ram,
    Group::Storage,
    Group::Display,
    Group::Battery,
    Group::Charging,
    Group::Camera,
    Group::Network,
    Group::Os,
    Group::Design,
    Group::Material,
    Group::Weight,
    Group::Multimedia,
    Group::Features,
    Group::Product,
    Group::Basics,
];

const TURKISH_ALPHABET: &str = "abcçdefgğhıijklmnoöpqrsştuüvwxyz";
const LATIN_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Order groups by [`GROUP_PRIORITY`]; groups outside it keep the order in
/// which they were first seen.
pub fn order_groups(present: &[GroupKey]) -> Vec<GroupKey> {
    let mut ordered: Vec<GroupKey> = GROUP_PRIORITY
        .iter()
        .map(|group| GroupKey::Known(*group))
        .filter(|key| present.contains(key))
        .collect();

    for key in present {
        if !ordered.contains(key) {
            ordered.push(key.clone());
        }
    }

    ordered
}

/// Order a group's subgroups by its priority list, unlisted ones last.
pub fn order_subgroups(group: &GroupKey, present: &[Subgroup]) -> Vec<Subgroup> {
    let priority = subgroup_priority(group);
    let mut ordered: Vec<Subgroup> = priority
        .iter()
        .copied()
        .filter(|subgroup| present.contains(subgroup))
        .collect();

    for subgroup in present {
        if !ordered.contains(subgroup) {
            ordered.push(*subgroup);
        }
    }

    ordered
}

/// Sort key with three strength levels: base letters, then accents, then case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<(u8, u32)>,
    secondary: Vec<u8>,
    tertiary: Vec<u8>,
}

pub fn collation_key(text: &str, locale: Locale) -> CollationKey {
    let alphabet = match locale {
        Locale::Tr => TURKISH_ALPHABET,
        Locale::En => LATIN_ALPHABET,
    };

    let mut key = CollationKey {
        primary: Vec::with_capacity(text.len()),
        secondary: Vec::with_capacity(text.len()),
        tertiary: Vec::with_capacity(text.len()),
    };

    for c in text.chars() {
        let lower = lowercase_char(c, locale);
        key.tertiary.push(u8::from(lower != c));

        if lower.is_whitespace() {
            key.primary.push((0, 0));
            key.secondary.push(0);
        } else if let Some(digit) = lower.to_digit(10) {
            key.primary.push((2, digit));
            key.secondary.push(0);
        } else if let Some(index) = alphabet_index(alphabet, lower) {
            key.primary.push((3, index));
            key.secondary.push(0);
        } else {
            let base = base_letter(lower);
            match alphabet_index(alphabet, base) {
                Some(index) => {
                    key.primary.push((3, index));
                    key.secondary.push(1);
                }
                None if lower.is_alphabetic() => {
                    key.primary.push((4, lower as u32));
                    key.secondary.push(0);
                }
                None => {
                    key.primary.push((1, lower as u32));
                    key.secondary.push(0);
                }
            }
        }
    }

    key
}

/// Locale-aware comparison of display labels.
pub fn compare_labels(a: &str, b: &str, locale: Locale) -> Ordering {
    collation_key(a, locale).cmp(&collation_key(b, locale))
}

fn lowercase_char(c: char, locale: Locale) -> char {
    match (locale, c) {
        (Locale::Tr, 'I') => 'ı',
        (Locale::Tr, 'İ') => 'i',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

fn alphabet_index(alphabet: &str, c: char) -> Option<u32> {
    alphabet.chars().position(|a| a == c).map(|i| i as u32)
}

fn base_letter(c: char) -> char {
    if c == 'ı' {
        return 'i';
    }
    c.to_string()
        .nfd()
        .find(|d| !is_combining_mark(*d))
        .unwrap_or(c)
}
