mod aggregate;
mod error;
pub mod export;
mod ioutil;
mod loader;
mod normalize;
mod progress;
mod record;
mod views;

pub use aggregate::*;
pub use error::*;
pub use ioutil::{magic_open, create_in};
pub use loader::*;
pub use normalize::*;
pub use progress::*;
pub use record::{NormalizedRecord, Record, REQUIRED_COLUMNS};
pub use views::*;


/// Default location of the input table.
pub const DEFAULT_INPUT: &'static str = "covid_19_clean_complete.csv";
/// Default directory for the exported tables.
pub const DEFAULT_OUTPUT_DIR: &'static str = "prepared";


/// All derived views of one normalized table.
#[derive(Debug, Clone)]
pub struct Prepared<'x> {
	pub by_date_region: AggregatedByDateRegion,
	pub by_region: AggregatedByRegion,
	pub by_date: ReshapedByDate,
	pub latest: Option<LatestSnapshot<'x>>,
}

impl<'x> Prepared<'x> {
	pub fn from_rows(rows: &'x [NormalizedRecord]) -> Self {
		Self{
			by_date_region: group_by_date_region(rows),
			by_region: group_by_region(rows),
			by_date: reshape_by_date(rows),
			latest: latest_snapshot(rows),
		}
	}
}
