use std::path::PathBuf;

use log::{info, LevelFilter};

use covid_eda::{Prepared, DEFAULT_INPUT, DEFAULT_OUTPUT_DIR};


#[derive(Debug, Clone)]
struct Config {
	input: PathBuf,
	output_dir: PathBuf,
}

impl Config {
	fn from_args<I: Iterator<Item = String>>(mut argv: I) -> Result<Self, String> {
		// program name
		argv.next();
		let input = argv.next().unwrap_or_else(|| DEFAULT_INPUT.into());
		let output_dir = argv.next().unwrap_or_else(|| DEFAULT_OUTPUT_DIR.into());
		if let Some(extra) = argv.next() {
			return Err(format!("unexpected argument {:?}\nusage: prepare_tables [INPUT [OUTPUT_DIR]]", extra))
		}
		Ok(Self{
			input: input.into(),
			output_dir: output_dir.into(),
		})
	}
}


fn init_logging() {
	env_logger::Builder::new()
		.filter_level(LevelFilter::Info)
		.parse_default_env()
		.init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	init_logging();
	let config = Config::from_args(std::env::args())?;

	info!("loading {} ...", config.input.display());
	let records = covid_eda::load_path(&mut *covid_eda::default_output(), &config.input)?;

	info!("normalizing ...");
	let rows = covid_eda::normalize(records);
	if let Some(summary) = covid_eda::describe_dates(&rows) {
		info!(
			"{} rows over {} dates, {} .. {}",
			summary.count, summary.unique, summary.first, summary.last,
		);
	}

	info!("aggregating ...");
	let prepared = Prepared::from_rows(&rows);
	if let Some(latest) = &prepared.latest {
		info!("latest snapshot: {} rows on {}", latest.len(), latest.date);
	}

	covid_eda::export::write_all(&config.output_dir, &prepared)?;
	Ok(())
}


#[cfg(test)]
mod tests {
	use super::*;

	fn args(v: &[&str]) -> impl Iterator<Item = String> {
		v.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
	}

	#[test]
	fn defaults_apply_without_arguments() {
		let config = Config::from_args(args(&["prepare_tables"])).unwrap();
		assert_eq!(config.input, PathBuf::from(DEFAULT_INPUT));
		assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
	}

	#[test]
	fn positional_arguments_override_defaults() {
		let config = Config::from_args(args(&["prepare_tables", "data.csv.gz", "out"])).unwrap();
		assert_eq!(config.input, PathBuf::from("data.csv.gz"));
		assert_eq!(config.output_dir, PathBuf::from("out"));
	}

	#[test]
	fn surplus_arguments_are_rejected() {
		assert!(Config::from_args(args(&["prepare_tables", "a", "b", "c"])).is_err());
	}
}
