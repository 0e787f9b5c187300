use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

use super::Locale;

static STRINGS_JSON: &str = include_str!("../../assets/strings.json");

static CATALOG: LazyLock<Catalog> = LazyLock::new(|| match Catalog::from_json(STRINGS_JSON) {
    Ok(catalog) => catalog,
    Err(e) => {
        warn!("Failed to load string catalog, falling back to generated labels: {}", e);
        Catalog::empty()
    }
});

/// The string catalog embedded in the binary.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// Locale-keyed string tables resolved by dotted path (`groups.processor`).
///
/// Lookups try the requested locale first, then the default locale. Callers
/// supply the last fallback themselves, usually a generated label.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<Locale, Value>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json).context("String catalog is not valid JSON")?;
        let object = root
            .as_object()
            .ok_or_else(|| anyhow!("String catalog root must be an object keyed by locale"))?;

        let mut tables = HashMap::new();
        for (code, table) in object {
            match Locale::parse(code) {
                Some(locale) => {
                    tables.insert(locale, table.clone());
                }
                None => warn!("Skipping strings for unsupported locale: {}", code),
            }
        }

        Ok(Self { tables })
    }

    /// Resolve `path` in `locale`, falling back to the default locale.
    pub fn lookup(&self, locale: Locale, path: &str) -> Option<&str> {
        self.lookup_exact(locale, path).or_else(|| {
            if locale == Locale::default() {
                None
            } else {
                self.lookup_exact(Locale::default(), path)
            }
        })
    }

    /// Resolve `path` in `locale` only.
    pub fn lookup_exact(&self, locale: Locale, path: &str) -> Option<&str> {
        let mut node = self.tables.get(&locale)?;
        for key in path.split('.') {
            node = node.get(key)?;
        }
        node.as_str()
    }

    pub fn text_or_else<F>(&self, locale: Locale, path: &str, fallback: F) -> String
    where
        F: FnOnce() -> String,
    {
        match self.lookup(locale, path) {
            Some(text) => text.to_string(),
            None => fallback(),
        }
    }

    /// Resolve `path` and substitute `{name}` placeholders. A missing entry
    /// renders as the path itself so gaps stay visible.
    pub fn render(&self, locale: Locale, path: &str, args: &[(&str, &str)]) -> String {
        let template = self.lookup(locale, path).unwrap_or(path);
        args.iter().fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }
}
