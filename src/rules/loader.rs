use crate::config::{Config, Separator};
use crate::error::{Result, SubswapError};
use std::fs::File;
use std::io::{BufRead, BufReader};

/// An ordered substitution rule: replace every occurrence of `pattern`
/// with `replacement`.
///
/// Both sides are raw bytes; a pattern is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
	/// The literal byte sequence to search for.
	pub pattern: Vec<u8>,

	/// The bytes substituted for each occurrence. May be empty.
	pub replacement: Vec<u8>,
}

/// Load the rule file named by the config.
///
/// Returns the rules in file order. An empty rule file yields an empty
/// rule set; a file that cannot be opened or read is an error, and no
/// partial rule set is returned in that case.
pub fn load_rules(config: &Config) -> Result<Vec<Rule>> {
	let file = File::open(&config.rule_file).map_err(|source| SubswapError::RuleFileRead {
		path: config.rule_file.clone(),
		source,
	})?;

	read_rules(BufReader::new(file), config.separator).map_err(|source| {
		SubswapError::RuleFileRead {
			path: config.rule_file.clone(),
			source,
		}
	})
}

/// Read rules from any buffered source (useful for testing).
///
/// Each line is split on the first occurrence of the separator byte into
/// pattern and replacement. Lines without the separator, empty lines, and
/// lines whose pattern half comes out empty are silently dropped.
pub fn read_rules<R: BufRead>(mut reader: R, separator: Separator) -> std::io::Result<Vec<Rule>> {
	let sep = separator.byte();
	let mut rules = Vec::new();
	let mut line = Vec::new();

	loop {
		line.clear();
		if reader.read_until(b'\n', &mut line)? == 0 {
			break;
		}
		if line.last() == Some(&b'\n') {
			line.pop();
		}

		let Some(split_at) = line.iter().position(|&b| b == sep) else {
			continue;
		};
		// A leading separator would mean an empty pattern; such lines are
		// dropped like any other malformed line.
		if split_at == 0 {
			continue;
		}

		rules.push(Rule {
			pattern: line[..split_at].to_vec(),
			replacement: line[split_at + 1..].to_vec(),
		});
	}

	Ok(rules)
}
