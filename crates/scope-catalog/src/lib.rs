//! Test case template catalog.
//!
//! This crate provides:
//!
//! - **Template catalog**: feature name to ordered test case templates
//! - **Master rules**: merchant-wide templates emitted once per run
//! - **Locale tables**: English, Spanish and Portuguese descriptions,
//!   resolved when cases are generated
//! - **Environment policy**: per-feature sandbox/production tags with
//!   configurable overrides
//!
//! All data is embedded at compile time (see [`embedded`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use scope_catalog::{EnvironmentPolicy, TemplateCatalog};
//!
//! let catalog = TemplateCatalog::embedded()?;
//! for template in catalog.templates_for("Verify") {
//!     println!("{} {}", template.code_prefix, template.description_key);
//! }
//! let policy = EnvironmentPolicy::from_catalog(&catalog);
//! ```

pub mod catalog;
pub mod embedded;
pub mod error;
pub mod locale;
pub mod policy;

pub use catalog::{FeatureEntry, TemplateCatalog};
pub use error::{CatalogError, Result};
pub use locale::LocaleTable;
pub use policy::EnvironmentPolicy;
