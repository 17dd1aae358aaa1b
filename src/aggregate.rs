use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::AddAssign;

use serde::Serialize;

use enum_map::{Enum, EnumMap};

use smartstring::alias::{String as SmartString};

use chrono::NaiveDate;

use super::record::NormalizedRecord;


/// The counters which are plotted against each other over time.
///
/// Declaration order is the order of the long-form output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Enum)]
pub enum Case {
	Recovered,
	Deaths,
	Active,
}

impl Case {
	pub const ALL: [Case; 3] = [Case::Recovered, Case::Deaths, Case::Active];
}

impl fmt::Display for Case {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Recovered => f.write_str("Recovered"),
			Self::Deaths => f.write_str("Deaths"),
			Self::Active => f.write_str("Active"),
		}
	}
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
	Confirmed,
	Deaths,
	Recovered,
	Active,
}

impl From<Case> for Metric {
	fn from(other: Case) -> Self {
		match other {
			Case::Recovered => Self::Recovered,
			Case::Deaths => Self::Deaths,
			Case::Active => Self::Active,
		}
	}
}


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
	pub confirmed: i64,
	pub deaths: i64,
	pub recovered: i64,
	pub active: i64,
}

impl Totals {
	pub fn get(&self, metric: Metric) -> i64 {
		match metric {
			Metric::Confirmed => self.confirmed,
			Metric::Deaths => self.deaths,
			Metric::Recovered => self.recovered,
			Metric::Active => self.active,
		}
	}
}

impl From<&NormalizedRecord> for Totals {
	fn from(rec: &NormalizedRecord) -> Self {
		Self{
			confirmed: rec.confirmed,
			deaths: rec.deaths,
			recovered: rec.recovered,
			active: rec.active,
		}
	}
}

impl AddAssign for Totals {
	fn add_assign(&mut self, other: Self) {
		self.confirmed += other.confirmed;
		self.deaths += other.deaths;
		self.recovered += other.recovered;
		self.active += other.active;
	}
}


/// Anything which carries the four counters.
pub trait Counted {
	fn count(&self, metric: Metric) -> i64;
}

impl Counted for Totals {
	fn count(&self, metric: Metric) -> i64 {
		self.get(metric)
	}
}

impl Counted for NormalizedRecord {
	fn count(&self, metric: Metric) -> i64 {
		Totals::from(self).get(metric)
	}
}

impl<T: Counted + ?Sized> Counted for &T {
	fn count(&self, metric: Metric) -> i64 {
		(**self).count(metric)
	}
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRegionRow {
	pub date: NaiveDate,
	pub region: SmartString,
	pub totals: Totals,
}

impl Counted for DateRegionRow {
	fn count(&self, metric: Metric) -> i64 {
		self.totals.get(metric)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRow {
	pub region: SmartString,
	pub totals: Totals,
}

impl Counted for RegionRow {
	fn count(&self, metric: Metric) -> i64 {
		self.totals.get(metric)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseCountRow {
	pub date: NaiveDate,
	pub case: Case,
	pub count: i64,
}

pub type AggregatedByDateRegion = Vec<DateRegionRow>;
pub type AggregatedByRegion = Vec<RegionRow>;
pub type ReshapedByDate = Vec<CaseCountRow>;


/// Sum the counters per (date, region), ordered by date and then region.
pub fn group_by_date_region(rows: &[NormalizedRecord]) -> AggregatedByDateRegion {
	let mut groups: BTreeMap<(NaiveDate, SmartString), Totals> = BTreeMap::new();
	for rec in rows {
		*groups.entry((rec.date, rec.region.clone())).or_default() += Totals::from(rec);
	}
	groups.into_iter().map(|((date, region), totals)| {
		DateRegionRow{date, region, totals}
	}).collect()
}

/// Sum the counters per region over all dates, ordered by region.
pub fn group_by_region(rows: &[NormalizedRecord]) -> AggregatedByRegion {
	let mut groups: BTreeMap<SmartString, Totals> = BTreeMap::new();
	for rec in rows {
		*groups.entry(rec.region.clone()).or_default() += Totals::from(rec);
	}
	groups.into_iter().map(|(region, totals)| {
		RegionRow{region, totals}
	}).collect()
}

/// Sum recovered, deaths and active per date and unpivot them into one row
/// per (date, case).
pub fn reshape_by_date(rows: &[NormalizedRecord]) -> ReshapedByDate {
	let mut sums: BTreeMap<NaiveDate, EnumMap<Case, i64>> = BTreeMap::new();
	for rec in rows {
		let per_case = sums.entry(rec.date).or_default();
		for case in Case::ALL.iter() {
			per_case[*case] += rec.count((*case).into());
		}
	}
	let mut result = Vec::with_capacity(sums.len() * Case::ALL.len());
	for (date, per_case) in sums.into_iter() {
		for (case, count) in per_case.iter() {
			result.push(CaseCountRow{date, case, count: *count});
		}
	}
	result
}

/// Stable sort, largest `metric` first.
pub fn sort_descending<T: Counted>(rows: &mut [T], metric: Metric) {
	rows.sort_by_key(|row| Reverse(row.count(metric)));
}
