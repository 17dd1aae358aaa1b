use log::{debug, warn};

use smartstring::alias::{String as SmartString};

use super::record::{NormalizedRecord, Record};


/// Region names which are reported under more than one spelling.
static REGION_ALIASES: &[(&'static str, &'static str)] = &[
	("Mainland China", "China"),
];

fn alias_target(name: &str) -> Option<&'static str> {
	REGION_ALIASES.iter()
		.find(|(alias, _)| *alias == name)
		.map(|(_, canonical)| *canonical)
}

fn derive_active(rec: &Record) -> Option<i64> {
	// missing operands propagate, the fill below turns them into zero
	Some(rec.confirmed? - rec.deaths? - rec.recovered?)
}


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
	pub aliases_rewritten: usize,
	pub values_filled: usize,
	pub negative_active: usize,
}

impl NormalizeStats {
	fn fill(&mut self, v: Option<i64>) -> i64 {
		match v {
			Some(v) => v,
			None => {
				self.values_filled += 1;
				0
			},
		}
	}
}


pub fn normalize_record(rec: Record, stats: &mut NormalizeStats) -> NormalizedRecord {
	let active = derive_active(&rec);
	let region = match alias_target(&rec.region) {
		Some(canonical) => {
			stats.aliases_rewritten += 1;
			SmartString::from(canonical)
		},
		None => rec.region,
	};
	let subregion = rec.subregion.unwrap_or_default();
	let confirmed = stats.fill(rec.confirmed);
	let deaths = stats.fill(rec.deaths);
	let recovered = stats.fill(rec.recovered);
	let active = stats.fill(active);
	if active < 0 {
		stats.negative_active += 1;
	}
	NormalizedRecord{
		region,
		subregion,
		date: rec.date,
		confirmed,
		deaths,
		recovered,
		active,
		lat: rec.lat,
		long: rec.long,
	}
}

/// Fill missing values, derive `active` and canonicalize region names.
///
/// Row count and order are preserved. Negative `active` values are kept as
/// they are and only reported.
pub fn normalize(rows: Vec<Record>) -> Vec<NormalizedRecord> {
	let mut stats = NormalizeStats::default();
	let result: Vec<_> = rows.into_iter().map(|rec| normalize_record(rec, &mut stats)).collect();
	debug!(
		"normalized {} rows: {} region aliases rewritten, {} missing values filled",
		result.len(), stats.aliases_rewritten, stats.values_filled,
	);
	if stats.negative_active > 0 {
		warn!("{} rows have fewer confirmed cases than deaths plus recovered, their active count is negative", stats.negative_active);
	}
	result
}
