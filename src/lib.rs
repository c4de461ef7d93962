//! Subswap - CLI tool for rewriting files in place with ordered literal
//! substitution rules.
//!
//! This library provides the core functionality for subswap, including:
//! - Rule file parsing into ordered (pattern, replacement) pairs
//! - Line-by-line literal substitution with sequential rule chaining
//! - Atomic replacement of the target file via a temp-rename swap
//!
//! # Example
//!
//! ```
//! use subswap_cli::config::Separator;
//! use subswap_cli::rules::{apply_rules, read_rules};
//!
//! let rules = read_rules("foo bar\nbar baz\n".as_bytes(), Separator::Blank).unwrap();
//!
//! // Rules chain: rule 2 sees rule 1's output.
//! assert_eq!(apply_rules(b"foo", &rules), b"baz");
//! ```

pub mod config;
pub mod error;
pub mod publish;
pub mod rules;

pub use error::{Result, SubswapError};
