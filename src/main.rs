use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use subswap_cli::config::{Config, Separator};
use subswap_cli::publish::publish;
use subswap_cli::rules::{Outcome, Rule, load_rules, rewrite_file};

// Each pipeline stage owns an exit code so callers can tell where a run
// failed without parsing stderr.
const EXIT_RULE_LOAD: u8 = 1;
const EXIT_REWRITE: u8 = 2;
const EXIT_PUBLISH: u8 = 3;

#[derive(Parser)]
#[command(name = "subswap")]
#[command(
	author,
	version,
	about = "Rewrites a file in place by applying ordered literal substitution rules"
)]
struct Cli {
	/// File holding one `pattern<SEP>replacement` rule per line
	#[arg(long, value_name = "PATH", value_parser = parse_path_arg)]
	rule_file: Option<PathBuf>,

	/// File to rewrite in place
	#[arg(long, value_name = "PATH", value_parser = parse_path_arg)]
	target_file: Option<PathBuf>,

	/// Character separating pattern from replacement in rule lines
	#[arg(long, value_enum, default_value_t = Separator::Blank)]
	sep_char: Separator,

	/// Print the loaded rules and every changed line
	#[arg(
		long,
		value_name = "BOOL",
		default_value_t = false,
		default_missing_value = "true",
		num_args = 0..=1,
		action = clap::ArgAction::Set
	)]
	debug: bool,
}

fn main() -> ExitCode {
	run(Cli::parse())
}

fn run(cli: Cli) -> ExitCode {
	// Both paths are required for anything to happen. A missing or empty
	// path is a quiet no-op, not an error, so wrapper scripts can disable
	// the tool by leaving a flag unset.
	let Some(config) = config_from_cli(cli) else {
		return ExitCode::SUCCESS;
	};

	let rules = match load_rules(&config)
		.with_context(|| format!("Loading rules from {}", config.rule_file.display()))
	{
		Ok(rules) => rules,
		Err(e) => return fail(e, EXIT_RULE_LOAD),
	};

	if config.debug {
		print_rules(&rules);
	}

	match rewrite_file(&config, &rules)
		.with_context(|| format!("Rewriting {}", config.target_file.display()))
	{
		Ok(Outcome::Applied) => {}
		Ok(Outcome::NoOp) => return ExitCode::SUCCESS,
		Err(e) => return fail(e, EXIT_REWRITE),
	}

	match publish(&config)
		.with_context(|| format!("Publishing {}", config.target_file.display()))
	{
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => fail(e, EXIT_PUBLISH),
	}
}

// Accept any path string, including the empty string. clap's default
// `PathBuf` parser rejects empty values, but the spec treats an empty
// `--rule-file`/`--target-file` as a quiet no-op handled in `config_from_cli`.
fn parse_path_arg(value: &str) -> Result<PathBuf, std::convert::Infallible> {
	Ok(PathBuf::from(value))
}

fn config_from_cli(cli: Cli) -> Option<Config> {
	let rule_file = cli.rule_file.filter(|path| !path.as_os_str().is_empty())?;
	let target_file = cli.target_file.filter(|path| !path.as_os_str().is_empty())?;

	Some(Config {
		rule_file,
		target_file,
		separator: cli.sep_char,
		debug: cli.debug,
	})
}

fn print_rules(rules: &[Rule]) {
	println!("replace rules:");
	for (index, rule) in rules.iter().enumerate() {
		println!(
			"  rule {index}: {} -> {}",
			String::from_utf8_lossy(&rule.pattern),
			String::from_utf8_lossy(&rule.replacement)
		);
	}
	println!();
}

fn fail(error: anyhow::Error, code: u8) -> ExitCode {
	// `{:#}` keeps the whole context chain on one line.
	eprintln!("error: {error:#}");
	ExitCode::from(code)
}
