//! Test case generation.
//!
//! Turns extracted feature records into uniquely identified test cases and
//! partitions them by deployment environment.
//!
//! # Pipeline
//!
//! 1. For each valid column (in matrix order), each feature record (in row
//!    order), and each catalog template of that feature (in catalog order),
//!    plan one case. Unknown features plan nothing.
//! 2. Resolve every description in the requested locale.
//! 3. Number cases per provider + payment method group and code prefix, and
//!    attach a random suffix: `VRF0001.ai5xgb`.
//! 4. Partition into the requested environment view.
//!
//! # Example
//!
//! ```rust,ignore
//! use scope_generate::{RandomSuffix, TestCaseGenerator};
//! use scope_model::GenerateOptions;
//!
//! let generator = TestCaseGenerator::embedded()?;
//! let options = GenerateOptions::default();
//! let result = generator.generate_with(&features, &options, &mut RandomSuffix::seeded(42))?;
//! println!("{} test cases", result.total());
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod generator;
pub mod ids;
pub mod partition;

pub use error::{GenerateError, Result};
pub use generator::TestCaseGenerator;
pub use ids::{
    IdGenerator, MAX_SEQUENCE, MAX_SUFFIX_ATTEMPTS, RandomSuffix, SUFFIX_ALPHABET, SUFFIX_LEN,
    SequenceTracker, SuffixSource, format_id,
};
pub use partition::{compute_stats, partition};
