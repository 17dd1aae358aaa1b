use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::record::NormalizedRecord;


/// The rows of the most recent date in the table.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestSnapshot<'x> {
	pub date: NaiveDate,
	pub rows: Vec<&'x NormalizedRecord>,
}

impl<'x> LatestSnapshot<'x> {
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

/// Filter `rows` down to the latest date, keeping input order.
///
/// Returns `None` only for an empty table.
pub fn latest_snapshot(rows: &[NormalizedRecord]) -> Option<LatestSnapshot<'_>> {
	let date = rows.iter().map(|r| r.date).max()?;
	Some(LatestSnapshot{
		date,
		rows: rows.iter().filter(|r| r.date == date).collect(),
	})
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSummary {
	pub count: usize,
	pub unique: usize,
	pub first: NaiveDate,
	pub last: NaiveDate,
}

pub fn describe_dates(rows: &[NormalizedRecord]) -> Option<DateSummary> {
	let dates: BTreeSet<NaiveDate> = rows.iter().map(|r| r.date).collect();
	Some(DateSummary{
		count: rows.len(),
		unique: dates.len(),
		first: *dates.iter().next()?,
		last: *dates.iter().next_back()?,
	})
}
