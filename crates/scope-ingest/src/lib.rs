//! Scoping matrix ingestion.
//!
//! This crate turns the tabular scoping document into feature records:
//!
//! - **CSV Loading**: read a CSV file or string into a [`RawMatrix`]
//! - **Column Validation**: find the usable provider + payment method columns
//! - **Feature Extraction**: collect each valid column's feature records
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use scope_ingest::{MatrixLayout, extract_matrix, read_matrix};
//!
//! let matrix = read_matrix(Path::new("scoping.csv"))?;
//! let features = extract_matrix(&matrix, &MatrixLayout::scoping_sheet())?;
//! ```
//!
//! [`RawMatrix`]: scope_model::RawMatrix

mod columns;
mod error;
mod features;
mod layout;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Layout ===
pub use layout::{HEADER_ROWS, MatrixLayout, PAYMENT_METHOD_ROW, PROVIDER_ROW};

// === CSV Reading ===
pub use reader::{parse_matrix, read_matrix};

// === Column Validation ===
pub use columns::{identify_valid_columns, identify_valid_columns_with, is_present};

// === Feature Extraction ===
pub use features::{extract_features, extract_features_with, extract_matrix};
