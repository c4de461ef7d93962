use std::path::PathBuf;

use crate::publish::SwapState;

/// Library-level structured errors for subswap.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum SubswapError {
	#[error("Failed to read rule file: {path}")]
	RuleFileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to stat target file: {path}")]
	TargetStat {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to open target file: {path}")]
	TargetOpen {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read target file: {path}")]
	TargetRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to create output file: {path}")]
	OutputCreate {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write output file: {path}")]
	OutputWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to copy permissions onto output file: {path}")]
	OutputPermissions {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Cannot publish, file missing: {path}")]
	SwapInputMissing {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Swap rename failed in state {state:?}: {from} -> {to}")]
	SwapRename {
		state: SwapState,
		from: PathBuf,
		to: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Swap failed to remove temp file: {path}")]
	SwapTempRemove {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Result type alias using SubswapError.
pub type Result<T> = std::result::Result<T, SubswapError>;
