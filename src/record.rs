use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

use smartstring::alias::{String as SmartString};

use chrono::naive::NaiveDate;


pub const COL_SUBREGION: &'static str = "Province/State";
pub const COL_REGION: &'static str = "Country/Region";
pub const COL_LAT: &'static str = "Lat";
pub const COL_LONG: &'static str = "Long";
pub const COL_DATE: &'static str = "Date";
pub const COL_CONFIRMED: &'static str = "Confirmed";
pub const COL_DEATHS: &'static str = "Deaths";
pub const COL_RECOVERED: &'static str = "Recovered";

pub const REQUIRED_COLUMNS: [&'static str; 8] = [
	COL_SUBREGION,
	COL_REGION,
	COL_LAT,
	COL_LONG,
	COL_DATE,
	COL_CONFIRMED,
	COL_DEATHS,
	COL_RECOVERED,
];


/// Parse a `Date` cell.
///
/// Accepted forms are `YYYY-MM-DD` and `YYYY/MM/DD` (month and day may be
/// unpadded) and the US forms `M/D/YY` and `M/D/YYYY`. A trailing time of
/// day, as in `2020-01-22 00:00:00` or `2020-01-22T00:00:00`, is ignored.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
	let s = s.trim();
	let date = match s.find(|c: char| c == ' ' || c == 'T') {
		Some(i) => &s[..i],
		None => s,
	};
	let sep = if date.contains('-') {
		'-'
	} else if date.contains('/') {
		'/'
	} else {
		return Err(format!("unrecognized date format: {:?}", s))
	};
	let year_first = date.split(sep).next().map(|p| p.len() == 4).unwrap_or(false);
	let fmt = match (sep, year_first) {
		('-', true) => "%Y-%m-%d",
		('/', true) => "%Y/%m/%d",
		// US style, as found in the JHU exports: 1/22/20 or 1/22/2020
		('/', false) => match date.rsplit('/').next() {
			Some(year) if year.len() == 2 => "%m/%d/%y",
			_ => "%m/%d/%Y",
		},
		_ => return Err(format!("unrecognized date format: {:?}", s)),
	};
	NaiveDate::parse_from_str(date, fmt).map_err(|e| e.to_string())
}

/// Parse a case count cell; empty means missing.
///
/// Counts are bounded to `u32` so that deriving `active` and summing over
/// any realistic number of rows stays within `i64`.
pub(crate) fn parse_count(s: &str) -> Result<Option<i64>, String> {
	let s = s.trim();
	if s.is_empty() {
		return Ok(None)
	}
	let v = match s.parse::<u32>() {
		Ok(v) => v,
		Err(int_err) => {
			// counts which went through a float column upstream, e.g. "28.0"
			let v = s.parse::<f64>().map_err(|_| int_err.to_string())?;
			if v.is_nan() {
				return Err(format!("not a count: {}", s))
			}
			if v.is_sign_negative() {
				return Err(format!("negative count: {}", s))
			}
			if v >= (u32::MAX as f64) + 1.0 {
				return Err(format!("count out of range: {}", s))
			}
			v.trunc() as u32
		},
	};
	Ok(Some(i64::from(v)))
}

/// One row of the raw table, fields still as text.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawRecord {
	#[serde(rename = "Province/State")]
	subregion: SmartString,
	#[serde(rename = "Country/Region")]
	region: SmartString,
	#[serde(rename = "Lat")]
	lat: SmartString,
	#[serde(rename = "Long")]
	long: SmartString,
	#[serde(rename = "Date")]
	date: SmartString,
	#[serde(rename = "Confirmed")]
	confirmed: SmartString,
	#[serde(rename = "Deaths")]
	deaths: SmartString,
	#[serde(rename = "Recovered")]
	recovered: SmartString,
}


/// One typed row of the input table.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
	pub region: SmartString,
	pub subregion: Option<SmartString>,
	pub date: NaiveDate,
	pub confirmed: Option<i64>,
	pub deaths: Option<i64>,
	pub recovered: Option<i64>,
	pub lat: f64,
	pub long: f64,
}

fn parse_coordinate(s: &str) -> Result<f64, String> {
	s.trim().parse::<f64>().map_err(|e| e.to_string())
}

fn in_column<T>(column: &'static str, r: Result<T, String>) -> Result<T, (&'static str, String)> {
	r.map_err(|message| (column, message))
}

impl TryFrom<RawRecord> for Record {
	type Error = (&'static str, String);

	fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
		let subregion = if raw.subregion.is_empty() {
			None
		} else {
			Some(raw.subregion)
		};
		Ok(Self{
			region: raw.region,
			subregion,
			date: in_column(COL_DATE, parse_date(&raw.date))?,
			confirmed: in_column(COL_CONFIRMED, parse_count(&raw.confirmed))?,
			deaths: in_column(COL_DEATHS, parse_count(&raw.deaths))?,
			recovered: in_column(COL_RECOVERED, parse_count(&raw.recovered))?,
			lat: in_column(COL_LAT, parse_coordinate(&raw.lat))?,
			long: in_column(COL_LONG, parse_coordinate(&raw.long))?,
		})
	}
}


/// A row after missing values have been filled and `active` derived.
///
/// `active` is `confirmed - deaths - recovered` and is not clamped: a
/// negative value means the upstream counters are inconsistent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
	#[serde(rename = "Province/State")]
	pub subregion: SmartString,
	#[serde(rename = "Country/Region")]
	pub region: SmartString,
	#[serde(rename = "Lat")]
	pub lat: f64,
	#[serde(rename = "Long")]
	pub long: f64,
	#[serde(rename = "Date")]
	pub date: NaiveDate,
	#[serde(rename = "Confirmed")]
	pub confirmed: i64,
	#[serde(rename = "Deaths")]
	pub deaths: i64,
	#[serde(rename = "Recovered")]
	pub recovered: i64,
	#[serde(rename = "Active")]
	pub active: i64,
}
