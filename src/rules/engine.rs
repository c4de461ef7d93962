use crate::config::Config;
use crate::error::{Result, SubswapError};
use crate::publish::output_path;
use crate::rules::Rule;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};

/// What the rewrite pass did with the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	/// A rewritten sibling file was produced and is ready to publish.
	Applied,

	/// The rule set was empty; the target was not touched.
	NoOp,
}

/// Rewrite the target file into its `.new` sibling, line by line.
///
/// With an empty rule set this returns [`Outcome::NoOp`] before touching
/// anything on disk. Otherwise every line is run through [`apply_rules`],
/// written to the sibling with its terminator preserved verbatim, and the
/// sibling ends up with the target's permission bits. When `config.debug`
/// is set, each changed line is reported to stdout with its 1-based line
/// number.
///
/// On error the partially written sibling is left behind; the caller does
/// not clean it up.
pub fn rewrite_file(config: &Config, rules: &[Rule]) -> Result<Outcome> {
	if rules.is_empty() {
		return Ok(Outcome::NoOp);
	}

	let target = config.target_file.as_path();
	let output = output_path(target);

	let metadata = fs::metadata(target).map_err(|source| SubswapError::TargetStat {
		path: target.to_path_buf(),
		source,
	})?;
	let source_file = File::open(target).map_err(|source| SubswapError::TargetOpen {
		path: target.to_path_buf(),
		source,
	})?;
	let output_file = File::create(&output).map_err(|source| SubswapError::OutputCreate {
		path: output.clone(),
		source,
	})?;

	let mut reader = BufReader::new(source_file);
	let mut writer = BufWriter::new(output_file);
	let write_err = |source| SubswapError::OutputWrite {
		path: output.clone(),
		source,
	};

	let mut line = Vec::new();
	let mut line_number: u64 = 0;

	loop {
		line.clear();
		let read = reader
			.read_until(b'\n', &mut line)
			.map_err(|source| SubswapError::TargetRead {
				path: target.to_path_buf(),
				source,
			})?;
		if read == 0 {
			break;
		}
		line_number += 1;

		// Rules never see the terminator, so they cannot eat or move it.
		let terminated = line.last() == Some(&b'\n');
		let content = if terminated { &line[..line.len() - 1] } else { &line[..] };

		let rewritten = apply_rules(content, rules);
		if config.debug && rewritten != content {
			println!("line {line_number} changed:");
			println!("  old: {}", String::from_utf8_lossy(content));
			println!("  new: {}", String::from_utf8_lossy(&rewritten));
		}

		writer.write_all(&rewritten).map_err(write_err)?;
		if terminated {
			writer.write_all(b"\n").map_err(write_err)?;
		}
	}

	writer.flush().map_err(write_err)?;

	fs::set_permissions(&output, metadata.permissions()).map_err(|source| {
		SubswapError::OutputPermissions {
			path: output.clone(),
			source,
		}
	})?;

	Ok(Outcome::Applied)
}

/// Apply every rule, in order, to one line's content.
///
/// Each rule runs to completion across the whole line before the next rule
/// starts, so a later rule can match text introduced by an earlier rule's
/// replacement.
pub fn apply_rules(line: &[u8], rules: &[Rule]) -> Vec<u8> {
	let mut current = line.to_vec();
	for rule in rules {
		current = replace_all(&current, &rule.pattern, &rule.replacement);
	}
	current
}

/// Replace every non-overlapping occurrence of `pattern`, scanning left to
/// right. Just-inserted replacement text is never rescanned.
fn replace_all(haystack: &[u8], pattern: &[u8], replacement: &[u8]) -> Vec<u8> {
	if pattern.is_empty() || pattern.len() > haystack.len() {
		return haystack.to_vec();
	}

	let mut result = Vec::with_capacity(haystack.len());
	let mut rest = haystack;
	while let Some(at) = find(rest, pattern) {
		result.extend_from_slice(&rest[..at]);
		result.extend_from_slice(replacement);
		rest = &rest[at + pattern.len()..];
	}
	result.extend_from_slice(rest);
	result
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	haystack.windows(needle.len()).position(|window| window == needle)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Separator;
	use crate::publish::temp_path;
	use std::path::Path;

	fn rule(pattern: &str, replacement: &str) -> Rule {
		Rule {
			pattern: pattern.as_bytes().to_vec(),
			replacement: replacement.as_bytes().to_vec(),
		}
	}

	fn config_for(target: &Path) -> Config {
		Config {
			rule_file: target.with_file_name("unused.rules"),
			target_file: target.to_path_buf(),
			separator: Separator::Blank,
			debug: false,
		}
	}

	#[test]
	fn test_replace_all_single_occurrence() {
		assert_eq!(replace_all(b"foo", b"foo", b"bar"), b"bar");
	}

	#[test]
	fn test_replace_all_every_occurrence() {
		assert_eq!(replace_all(b"xayaz", b"a", b"b"), b"xbybz");
	}

	#[test]
	fn test_replace_all_is_non_overlapping() {
		// "aaa" holds one full "aa" starting from the left; the trailing
		// "a" does not combine with replaced text.
		assert_eq!(replace_all(b"aaa", b"aa", b"b"), b"ba");
	}

	#[test]
	fn test_replace_all_never_rescans_replacement() {
		// Growing replacements containing the pattern must terminate.
		assert_eq!(replace_all(b"aa", b"a", b"aa"), b"aaaa");
	}

	#[test]
	fn test_replace_all_no_match_returns_input() {
		assert_eq!(replace_all(b"hello", b"xyz", b"!"), b"hello");
	}

	#[test]
	fn test_replace_all_can_delete() {
		assert_eq!(replace_all(b"a-b-c", b"-", b""), b"abc");
	}

	#[test]
	fn test_replace_all_empty_pattern_is_inert() {
		assert_eq!(replace_all(b"abc", b"", b"x"), b"abc");
	}

	#[test]
	fn test_apply_rules_chains_sequentially() {
		let rules = vec![rule("foo", "bar"), rule("bar", "baz")];
		assert_eq!(apply_rules(b"foo", &rules), b"baz");
	}

	#[test]
	fn test_apply_rules_order_matters() {
		let forward = vec![rule("a", "b"), rule("b", "c")];
		let backward = vec![rule("b", "c"), rule("a", "b")];
		assert_eq!(apply_rules(b"a", &forward), b"c");
		assert_eq!(apply_rules(b"a", &backward), b"b");
	}

	#[test]
	fn test_apply_rules_is_deterministic_and_idempotent_without_matches() {
		let rules = vec![rule("foo", "bar")];
		let line = b"nothing to see here";
		assert_eq!(apply_rules(line, &rules), line);
	}

	#[test]
	fn test_rewrite_file_noop_with_empty_rules() {
		let dir = tempfile::tempdir().unwrap();
		let target = dir.path().join("notes.txt");
		std::fs::write(&target, "foo\n").unwrap();

		let outcome = rewrite_file(&config_for(&target), &[]).unwrap();

		assert_eq!(outcome, Outcome::NoOp);
		assert_eq!(std::fs::read_to_string(&target).unwrap(), "foo\n");
		assert!(!output_path(&target).exists());
		assert!(!temp_path(&target).exists());
	}

	#[test]
	fn test_rewrite_file_writes_sibling_and_keeps_target() {
		let dir = tempfile::tempdir().unwrap();
		let target = dir.path().join("notes.txt");
		std::fs::write(&target, "foo\nplain\nfoo foo\n").unwrap();

		let rules = vec![rule("foo", "bar")];
		let outcome = rewrite_file(&config_for(&target), &rules).unwrap();

		assert_eq!(outcome, Outcome::Applied);
		assert_eq!(std::fs::read_to_string(&target).unwrap(), "foo\nplain\nfoo foo\n");
		assert_eq!(
			std::fs::read_to_string(output_path(&target)).unwrap(),
			"bar\nplain\nbar bar\n"
		);
	}

	#[test]
	fn test_rewrite_file_preserves_missing_final_terminator() {
		let dir = tempfile::tempdir().unwrap();
		let target = dir.path().join("notes.txt");
		std::fs::write(&target, "foo\nfoo").unwrap();

		let rules = vec![rule("foo", "bar")];
		rewrite_file(&config_for(&target), &rules).unwrap();

		assert_eq!(std::fs::read_to_string(output_path(&target)).unwrap(), "bar\nbar");
	}

	#[test]
	fn test_rewrite_file_missing_target_errors() {
		let dir = tempfile::tempdir().unwrap();
		let target = dir.path().join("absent.txt");

		let rules = vec![rule("foo", "bar")];
		let result = rewrite_file(&config_for(&target), &rules);
		assert!(matches!(
			result.unwrap_err(),
			SubswapError::TargetStat { .. }
		));
	}

	#[cfg(unix)]
	#[test]
	fn test_rewrite_file_copies_permission_bits() {
		use std::os::unix::fs::PermissionsExt;

		let dir = tempfile::tempdir().unwrap();
		let target = dir.path().join("notes.txt");
		std::fs::write(&target, "foo\n").unwrap();
		std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o640)).unwrap();

		let rules = vec![rule("foo", "bar")];
		rewrite_file(&config_for(&target), &rules).unwrap();

		let mode = std::fs::metadata(output_path(&target))
			.unwrap()
			.permissions()
			.mode();
		assert_eq!(mode & 0o777, 0o640);
	}
}
