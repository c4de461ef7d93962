//! Atomic publishing of a rewritten file.
//!
//! This module owns the sibling-path convention (`<target>.new` for the
//! rewritten copy, `<target>.tmp` for the vacated original) and the
//! three-step swap that moves the rewritten copy into place.

use crate::config::Config;
use crate::error::{Result, SubswapError};
use std::fs;
use std::path::{Path, PathBuf};

const OUTPUT_SUFFIX: &str = "new";
const TEMP_SUFFIX: &str = "tmp";

/// Progress of the swap. Each value is the last state reached; a failed
/// transition reports the state it failed out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapState {
	/// Both files verified, nothing renamed yet.
	Original,

	/// The original has been moved aside to the temp path.
	Vacated,

	/// The rewritten copy now sits at the original path.
	Swapped,

	/// The temp copy of the original has been deleted.
	TempCleared,
}

/// Sibling path the rewritten copy is staged at.
pub fn output_path(target: &Path) -> PathBuf {
	sibling(target, OUTPUT_SUFFIX)
}

/// Sibling path the original is parked at mid-swap.
pub fn temp_path(target: &Path) -> PathBuf {
	sibling(target, TEMP_SUFFIX)
}

// Appends `.suffix` to the whole file name. `Path::with_extension` would
// clobber an existing extension, turning `notes.txt` into `notes.new`.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
	let mut name = path.as_os_str().to_os_string();
	name.push(".");
	name.push(suffix);
	PathBuf::from(name)
}

/// Replace the target file with its rewritten sibling.
///
/// Both the target and `<target>.new` must exist. The swap then runs in
/// three steps: the original is renamed to `<target>.tmp`, the rewritten
/// copy is renamed onto the original path, and the temp file is removed.
/// Each step must succeed before the next is attempted; a failure returns
/// immediately and nothing is rolled back, so a failure after the first
/// rename leaves the original parked at the temp path.
pub fn publish(config: &Config) -> Result<()> {
	let target = config.target_file.as_path();
	let output = output_path(target);
	let temp = temp_path(target);

	for path in [target, output.as_path()] {
		fs::metadata(path).map_err(|source| SubswapError::SwapInputMissing {
			path: path.to_path_buf(),
			source,
		})?;
	}

	let mut state = SwapState::Original;
	loop {
		state = match state {
			SwapState::Original => {
				rename(state, target, &temp)?;
				SwapState::Vacated
			}
			SwapState::Vacated => {
				rename(state, &output, target)?;
				SwapState::Swapped
			}
			SwapState::Swapped => {
				fs::remove_file(&temp).map_err(|source| SubswapError::SwapTempRemove {
					path: temp.clone(),
					source,
				})?;
				SwapState::TempCleared
			}
			SwapState::TempCleared => break,
		};
	}

	Ok(())
}

fn rename(state: SwapState, from: &Path, to: &Path) -> Result<()> {
	fs::rename(from, to).map_err(|source| SubswapError::SwapRename {
		state,
		from: from.to_path_buf(),
		to: to.to_path_buf(),
		source,
	})
}
