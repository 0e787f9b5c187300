use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{Nd}]+").expect("Invalid regex"));

/// Lowercase with Turkish casing rules, decompose, drop combining marks and
/// fold dotless `ı` into `i`.
///
/// `"İŞLETİM_Sistemi"` and `"isletim_sistemi"` normalize to the same string.
pub fn normalize(input: &str) -> String {
    let lowered = input
        .chars()
        .map(|c| match c {
            'İ' => 'i',
            'I' => 'ı',
            other => other,
        })
        .collect::<String>()
        .to_lowercase();

    lowered
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == 'ı' { 'i' } else { c })
        .collect()
}

/// Split an identifier into normalized tokens. Underscores and any other
/// non-alphanumeric runs separate tokens.
pub fn tokenize(input: &str) -> Vec<String> {
    let normalized = normalize(input);
    NON_ALNUM
        .replace_all(&normalized, " ")
        .split_whitespace()
        .map(|token| token.to_string())
        .collect()
}

/// A feature identifier prepared for rule matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedId {
    phrase: String,
    tokens: Vec<String>,
}

impl NormalizedId {
    pub fn new(feature: &str) -> Self {
        let tokens = tokenize(feature);
        let phrase = tokens.join(" ");
        Self { phrase, tokens }
    }

    /// Tokens joined by single spaces, e.g. `"on kamera cozunurlugu"`.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn first_token(&self) -> Option<&str> {
        self.tokens.first().map(|t| t.as_str())
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.phrase.contains(needle)
    }

    pub fn has_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_turkish_letters() {
        assert_eq!(normalize("İşletim Sistemi"), "isletim sistemi");
        assert_eq!(normalize("ÇÖZÜNÜRLÜĞÜ"), "cozunurlugu");
        assert_eq!(normalize("hızlı_şarj"), "hizli_sarj");
        assert_eq!(normalize("ağırlık"), "agirlik");
    }

    #[test]
    fn test_dotted_and_dotless_i_are_identical() {
        assert_eq!(normalize("ı"), normalize("i"));
        assert_eq!(normalize("I"), normalize("İ"));
        // Lowercase i followed by a combining dot above, as some exports emit it
        assert_eq!(normalize("i\u{307}şleti\u{307}m"), "isletim");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("batarya_hızlı_şarj_gücü_maks."),
            vec!["batarya", "hizli", "sarj", "gucu", "maks"]
        );
        assert_eq!(tokenize("  ağ -- bağlantıları__5G "), vec!["ag", "baglantilari", "5g"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("___").is_empty());
    }

    #[test]
    fn test_normalized_id_matching() {
        let id = NormalizedId::new("kamera_ön_kamera_çözünürlüğü");
        assert_eq!(id.phrase(), "kamera on kamera cozunurlugu");
        assert_eq!(id.first_token(), Some("kamera"));
        assert!(id.contains("on kamera"));
        assert!(id.has_token("on"));
        assert!(!id.has_token("kam"));

        let empty = NormalizedId::new("");
        assert!(empty.tokens().is_empty());
        assert_eq!(empty.first_token(), None);
    }
}
