use std::io;
use std::path::Path;

use log::info;

use serde::Serialize;

use chrono::NaiveDate;

use super::aggregate::{sort_descending, Case, CaseCountRow, DateRegionRow, Metric, RegionRow};
use super::error::Error;
use super::ioutil::create_in;
use super::record::NormalizedRecord;
use super::Prepared;


pub const BY_DATE_REGION_FILE: &'static str = "by_date_region.csv";
pub const BY_REGION_FILE: &'static str = "by_region.csv";
pub const BY_DATE_LONG_FILE: &'static str = "by_date_long.csv";
pub const LATEST_FILE: &'static str = "latest.csv";

static COUNTER_COLUMNS: [&'static str; 4] = ["Confirmed", "Deaths", "Recovered", "Active"];


#[derive(Serialize)]
struct DateRegionOut<'x> {
	date: NaiveDate,
	region: &'x str,
	confirmed: i64,
	deaths: i64,
	recovered: i64,
	active: i64,
}

#[derive(Serialize)]
struct RegionOut<'x> {
	region: &'x str,
	confirmed: i64,
	deaths: i64,
	recovered: i64,
	active: i64,
}

#[derive(Serialize)]
struct CaseCountOut {
	date: NaiveDate,
	case: Case,
	count: i64,
}


fn writer<W: io::Write>(w: W, key_columns: &[&str], value_columns: &[&str]) -> Result<csv::Writer<W>, Error> {
	let mut w = csv::WriterBuilder::new()
		.has_headers(false)
		.from_writer(w);
	w.write_record(key_columns.iter().chain(value_columns.iter()))?;
	Ok(w)
}

/// Write the (date, region) table in the order given.
pub fn write_by_date_region<W: io::Write>(w: W, rows: &[DateRegionRow]) -> Result<(), Error> {
	let mut w = writer(w, &["Date", "Country/Region"], &COUNTER_COLUMNS)?;
	for row in rows {
		w.serialize(DateRegionOut{
			date: row.date,
			region: &row.region,
			confirmed: row.totals.confirmed,
			deaths: row.totals.deaths,
			recovered: row.totals.recovered,
			active: row.totals.active,
		})?;
	}
	w.flush()?;
	Ok(())
}

pub fn write_by_region<W: io::Write>(w: W, rows: &[RegionRow]) -> Result<(), Error> {
	let mut w = writer(w, &["Country/Region"], &COUNTER_COLUMNS)?;
	for row in rows {
		w.serialize(RegionOut{
			region: &row.region,
			confirmed: row.totals.confirmed,
			deaths: row.totals.deaths,
			recovered: row.totals.recovered,
			active: row.totals.active,
		})?;
	}
	w.flush()?;
	Ok(())
}

pub fn write_by_date_long<W: io::Write>(w: W, rows: &[CaseCountRow]) -> Result<(), Error> {
	let mut w = writer(w, &["Date", "Case"], &["Count"])?;
	for row in rows {
		w.serialize(CaseCountOut{
			date: row.date,
			case: row.case,
			count: row.count,
		})?;
	}
	w.flush()?;
	Ok(())
}

pub fn write_records<W: io::Write>(w: W, rows: &[&NormalizedRecord]) -> Result<(), Error> {
	let mut w = writer(w, &["Province/State", "Country/Region", "Lat", "Long", "Date"], &COUNTER_COLUMNS)?;
	for row in rows {
		w.serialize(row)?;
	}
	w.flush()?;
	Ok(())
}


/// Write every prepared table into `dir` for the renderer.
///
/// Grouped tables and the snapshot go out in display order, i.e. with the
/// most confirmed cases first.
pub fn write_all<P: AsRef<Path>>(dir: P, prepared: &Prepared<'_>) -> Result<(), Error> {
	let dir = dir.as_ref();

	let mut by_date_region = prepared.by_date_region.clone();
	sort_descending(&mut by_date_region, Metric::Confirmed);
	write_by_date_region(create_in(dir, BY_DATE_REGION_FILE)?, &by_date_region)?;

	let mut by_region = prepared.by_region.clone();
	sort_descending(&mut by_region, Metric::Confirmed);
	write_by_region(create_in(dir, BY_REGION_FILE)?, &by_region)?;

	write_by_date_long(create_in(dir, BY_DATE_LONG_FILE)?, &prepared.by_date)?;

	let mut latest = match &prepared.latest {
		Some(snap) => snap.rows.clone(),
		None => Vec::new(),
	};
	sort_descending(&mut latest, Metric::Confirmed);
	write_records(create_in(dir, LATEST_FILE)?, &latest)?;

	info!("wrote prepared tables to {}", dir.display());
	Ok(())
}
