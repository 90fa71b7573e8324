//! Merchant-facing documents for generated test cases.
//!
//! Both renderers take a finished [`GenerationResult`](scope_model::GenerationResult)
//! and lay it out the same way: one part per environment section, then
//! provider + payment method, then feature, one row per test case. The
//! result is only read, never reordered.

#![deny(unsafe_code)]

pub mod error;
pub mod html;
pub mod layout;
pub mod markdown;
pub mod options;

pub use error::{ReportError, Result};
pub use html::render_html;
pub use layout::{FeatureGroup, ProviderGroup, group_cases};
pub use markdown::render_markdown;
pub use options::{DEFAULT_MERCHANT, DocumentOptions, TIMESTAMP_FORMAT};
