use std::convert::TryFrom;
use std::io;
use std::path::Path;

use log::debug;

use super::error::{Error, FormatError};
use super::ioutil::magic_open;
use super::progress::{CountMeter, ProgressSink};
use super::record::{RawRecord, Record, REQUIRED_COLUMNS};


fn check_header(headers: &csv::StringRecord) -> Result<(), FormatError> {
	for name in REQUIRED_COLUMNS.iter().copied() {
		if !headers.iter().any(|h| h.trim() == name) {
			return Err(FormatError::MissingColumn(name))
		}
	}
	Ok(())
}

/// Read the whole table from `r`.
///
/// Either every row parses or the load fails; there are no partial results.
pub fn load_records<R: io::Read, S: ProgressSink + ?Sized>(
	s: &mut S,
	r: R,
) -> Result<Vec<Record>, Error> {
	let mut r = csv::ReaderBuilder::new()
		.trim(csv::Trim::Headers)
		.from_reader(r);
	let headers = r.headers()?.clone();
	check_header(&headers)?;

	let mut pm = CountMeter::new(s);
	let mut result = Vec::new();
	let mut row = csv::StringRecord::new();
	while r.read_record(&mut row)? {
		// every field is text, so this can only fail on the row structure
		let raw: RawRecord = row.deserialize(Some(&headers))?;
		let rec = match Record::try_from(raw) {
			Ok(rec) => rec,
			Err((column, message)) => return Err(FormatError::InvalidValue{
				line: row.position().map(|p| p.line()),
				column: Some(column.into()),
				message,
			}.into()),
		};
		result.push(rec);
		pm.tick(result.len());
	}
	pm.finish(result.len());
	debug!("loaded {} records", result.len());
	Ok(result)
}

pub fn load_path<P: AsRef<Path>, S: ProgressSink + ?Sized>(
	s: &mut S,
	path: P,
) -> Result<Vec<Record>, Error> {
	let r = magic_open(path)?;
	load_records(s, r)
}
