//! Run configuration for subswap.
//!
//! All configuration comes from command-line flags. The binary builds one
//! `Config` at startup and passes it by reference into each component; there
//! is no ambient or global state.

use clap::ValueEnum;
use std::path::PathBuf;

/// Separator between pattern and replacement in a rule line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Separator {
	/// A single ASCII space.
	#[default]
	Blank,

	/// A single tab character.
	Tab,
}

impl Separator {
	/// The literal byte a rule line is split on.
	pub fn byte(self) -> u8 {
		match self {
			Separator::Blank => b' ',
			Separator::Tab => b'\t',
		}
	}
}

/// Configuration for one run, built from CLI flags.
#[derive(Debug, Clone)]
pub struct Config {
	/// Path to the rule file, one `pattern<SEP>replacement` per line.
	pub rule_file: PathBuf,

	/// Path to the file to rewrite in place.
	pub target_file: PathBuf,

	/// Separator used when splitting rule lines.
	pub separator: Separator,

	/// Print loaded rules and every changed line to stdout.
	pub debug: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_separator_bytes() {
		assert_eq!(Separator::Blank.byte(), b' ');
		assert_eq!(Separator::Tab.byte(), b'\t');
	}

	#[test]
	fn test_separator_default_is_blank() {
		assert_eq!(Separator::default(), Separator::Blank);
	}
}
