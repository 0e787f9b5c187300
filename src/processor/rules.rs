use super::text_normalizer::NormalizedId;

/// A single predicate over a normalized identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Substring of the space-joined token phrase.
    Substr(&'static str),
    /// Whole token equality.
    Token(&'static str),
}

impl Matcher {
    pub fn matches(&self, id: &NormalizedId) -> bool {
        match self {
            Matcher::Substr(needle) => id.contains(needle),
            Matcher::Token(token) => id.has_token(token),
        }
    }
}

/// Maps to `result` when any matcher fires.
#[derive(Debug, Clone, Copy)]
pub struct Rule<T: 'static> {
    pub any_of: &'static [Matcher],
    pub result: T,
}

/// Maps to `result` only when every matcher fires (keyword co-occurrence).
#[derive(Debug, Clone, Copy)]
pub struct AllOfRule<T: 'static> {
    pub all_of: &'static [Matcher],
    pub result: T,
}

pub fn any_matches(matchers: &[Matcher], id: &NormalizedId) -> bool {
    matchers.iter().any(|m| m.matches(id))
}

pub fn all_match(matchers: &[Matcher], id: &NormalizedId) -> bool {
    !matchers.is_empty() && matchers.iter().all(|m| m.matches(id))
}

/// Evaluate `rules` in order and return the first result whose matchers fire.
pub fn first_match<T: Copy>(rules: &[Rule<T>], id: &NormalizedId) -> Option<T> {
    rules
        .iter()
        .find(|rule| any_matches(rule.any_of, id))
        .map(|rule| rule.result)
}

pub fn first_match_all<T: Copy>(rules: &[AllOfRule<T>], id: &NormalizedId) -> Option<T> {
    rules
        .iter()
        .find(|rule| all_match(rule.all_of, id))
        .map(|rule| rule.result)
}
