//! Integration with `clap`

use std::path::PathBuf;

use clap::Parser;

/// Commandline arguments
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
pub(crate) struct Args {
	#[arg(short, long)]
	/// Optional path to a config TOML file
	pub(crate) config: Option<PathBuf>,
}

/// Parse commandline arguments into structured data
#[must_use]
pub(crate) fn parse() -> Args { Args::parse() }

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn config_defaults_to_none() {
		let args = Args::try_parse_from(["sliding-sync-proxy"]).unwrap();
		assert_eq!(args.config, None);
	}

	#[test]
	fn config_flag_is_parsed() {
		let args = Args::try_parse_from(["sliding-sync-proxy", "--config", "/etc/ssync.toml"]).unwrap();
		assert_eq!(args.config, Some(PathBuf::from("/etc/ssync.toml")));
	}
}
