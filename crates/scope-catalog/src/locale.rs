//! Locale string tables.

use serde_json::Value;

use scope_model::Locale;

use crate::error::{CatalogError, Result};

/// Nested description strings of one locale, addressed by dotted keys
/// such as `testcase.verify.valid_payment_method`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleTable {
    locale: Locale,
    root: Value,
}

impl LocaleTable {
    pub fn from_json(locale: Locale, content: &str) -> Result<Self> {
        let root = serde_json::from_str(content).map_err(|source| CatalogError::Parse {
            what: format!("locale table '{locale}'"),
            source,
        })?;
        Ok(Self { locale, root })
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// String at `key`, or `None` when any segment is missing or the leaf
    /// is not a string.
    pub fn get(&self, key: &str) -> Option<&str> {
        key.split('.')
            .try_fold(&self.root, |node, segment| node.get(segment))
            .and_then(Value::as_str)
    }

    /// Like [`get`](Self::get), but a missing key is an error.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| CatalogError::MissingDescription {
            locale: self.locale.to_string(),
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_lookup() {
        let table = LocaleTable::from_json(
            Locale::english(),
            r#"{"testcase": {"verify": {"ok": "Verify a card", "nested": {"x": 1}}}}"#,
        )
        .unwrap();
        assert_eq!(table.get("testcase.verify.ok"), Some("Verify a card"));
        assert_eq!(table.get("testcase.verify.missing"), None);
        assert_eq!(table.get("testcase.verify.nested"), None);
        assert_eq!(table.get("testcase.verify.nested.x"), None);
        assert!(matches!(
            table.require("testcase.nope"),
            Err(CatalogError::MissingDescription { .. })
        ));
    }
}
