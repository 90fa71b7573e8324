//! Embedded catalog data.
//!
//! The template catalog and its locale tables are embedded at compile time
//! using `include_str!()`, so generation never touches the file system.
//!
//! # Adding a Locale
//!
//! Add `data/i18n/<code>.json` with every `description_key` referenced by
//! `data/catalog.json`, then list it in [`LOCALES`].

// =============================================================================
// Catalog
// =============================================================================

/// Feature templates, master templates, and default environment tags.
pub const CATALOG: &str = include_str!("../data/catalog.json");

// =============================================================================
// Locale tables
// =============================================================================

/// English descriptions.
pub const LOCALE_EN: &str = include_str!("../data/i18n/en.json");

/// Spanish descriptions.
pub const LOCALE_ES: &str = include_str!("../data/i18n/es.json");

/// Portuguese descriptions.
pub const LOCALE_PT: &str = include_str!("../data/i18n/pt.json");

/// Every embedded locale as `(code, content)`.
pub const LOCALES: [(&str, &str); 3] = [("en", LOCALE_EN), ("es", LOCALE_ES), ("pt", LOCALE_PT)];
