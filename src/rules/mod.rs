//! Rule loading and line rewriting.
//!
//! This module handles:
//! - Parsing rule files into ordered (pattern, replacement) pairs
//! - Applying the rule list to each line of a target file

pub mod engine;
pub mod loader;

pub use engine::{Outcome, apply_rules, rewrite_file};
pub use loader::{Rule, load_rules, read_rules};
