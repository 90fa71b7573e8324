//! Data model for implementation scoping documents and the test cases
//! derived from them.
//!
//! Everything in this crate is plain data: the raw matrix handed over by a
//! CSV reader, the column keys and feature records extracted from it, the
//! template and test case types, and the environment-partitioned result.
//! No type here performs I/O.

#![deny(unsafe_code)]

pub mod enums;
pub mod error;
pub mod feature;
pub mod locale;
pub mod matrix;
pub mod options;
pub mod result;
pub mod test_case;

pub use enums::{Category, Environment, EnvironmentMode, EnvironmentTag, FeatureGate};
pub use error::{ModelError, Result};
pub use feature::{ColumnFeatures, EnrichedFeature, FeatureRecord, FeatureSet, IMPLEMENTED_MARKERS};
pub use locale::Locale;
pub use matrix::{ColumnKey, NOT_AVAILABLE, RawMatrix};
pub use options::GenerateOptions;
pub use result::{EnvironmentSection, GenerationResult, GenerationStats};
pub use test_case::{
    MASTER_PAYMENT_METHOD, MASTER_PROVIDER, MASTER_RULES_FEATURE, TestCase, TestCaseTemplate,
};
