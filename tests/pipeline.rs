use std::fs;

use chrono::NaiveDate;

use covid_eda::{Case, Error, FormatError, Metric, NullSink, Prepared, Totals};


static DATA: &'static str = "\
Province/State,Country/Region,Lat,Long,Date,Confirmed,Deaths,Recovered
Hubei,China,30.9756,112.2707,2020-01-22,444,17,28
Beijing,Mainland China,40.1824,116.4142,2020-01-22,14,0,0
,Italy,41.8719,12.5674,2020-01-22,0,0,
Hubei,China,30.9756,112.2707,2020-01-23,444,17,28
Beijing,Mainland China,40.1824,116.4142,2020-01-23,22,0,0
,Italy,41.8719,12.5674,2020-01-23,3,0,0
,Japan,36.0,138.0,2020-01-23,2,0,3
";

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
	NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn load_normalized(data: &str) -> Vec<covid_eda::NormalizedRecord> {
	let records = covid_eda::load_records(&mut NullSink(), data.as_bytes()).unwrap();
	covid_eda::normalize(records)
}


#[test]
fn worked_example_end_to_end() {
	let data = "\
Province/State,Country/Region,Lat,Long,Date,Confirmed,Deaths,Recovered
Hubei,China,30.9756,112.2707,2020-01-22,444,17,28
Beijing,Mainland China,40.1824,116.4142,2020-01-22,14,0,0
";
	let rows = load_normalized(data);
	assert_eq!(rows[0].active, 399);
	assert_eq!(rows[1].active, 14);
	assert_eq!(rows[1].region.as_str(), "China");

	let by_region = covid_eda::group_by_region(&rows);
	assert_eq!(by_region.len(), 1);
	assert_eq!(by_region[0].region.as_str(), "China");
	assert_eq!(by_region[0].totals, Totals{confirmed: 458, deaths: 17, recovered: 28, active: 413});
}

#[test]
fn normalization_invariants_hold() {
	let records = covid_eda::load_records(&mut NullSink(), DATA.as_bytes()).unwrap();
	let raw_regions: Vec<String> = records.iter().map(|r| r.region.to_string()).collect();
	let rows = covid_eda::normalize(records);
	assert_eq!(rows.len(), raw_regions.len());
	for (raw, row) in raw_regions.iter().zip(rows.iter()) {
		assert_ne!(row.region.as_str(), "Mainland China");
		if raw != "Mainland China" {
			assert_eq!(row.region.as_str(), raw.as_str());
		}
		assert_eq!(row.active, row.confirmed - row.deaths - row.recovered);
	}
	// Japan reports more recovered than confirmed, which is kept as-is
	assert_eq!(rows[6].active, -1);
}

#[test]
fn aggregates_conserve_and_agree() {
	let rows = load_normalized(DATA);
	let prepared = Prepared::from_rows(&rows);

	let total: i64 = rows.iter().map(|r| r.confirmed).sum();
	let by_region: i64 = prepared.by_region.iter().map(|r| r.totals.confirmed).sum();
	assert_eq!(by_region, total);

	let dates: std::collections::BTreeSet<NaiveDate> = rows.iter().map(|r| r.date).collect();
	assert_eq!(prepared.by_date.len(), 3 * dates.len());
	for r in prepared.by_date.iter() {
		let expected: i64 = prepared.by_date_region.iter()
			.filter(|g| g.date == r.date)
			.map(|g| g.totals.get(Metric::from(r.case)))
			.sum();
		assert_eq!(r.count, expected);
	}

	let active_23 = prepared.by_date.iter()
		.find(|r| r.date == ymd(2020, 1, 23) && r.case == Case::Active)
		.unwrap();
	assert_eq!(active_23.count, 399 + 22 + 3 - 1);
}

#[test]
fn latest_snapshot_covers_the_last_day() {
	let rows = load_normalized(DATA);
	let prepared = Prepared::from_rows(&rows);
	let latest = prepared.latest.unwrap();
	assert_eq!(latest.date, ymd(2020, 1, 23));
	assert_eq!(latest.len(), 4);
	assert!(latest.rows.iter().all(|r| r.date == latest.date));
}

#[test]
fn malformed_input_aborts_the_load() {
	let data = "\
Province/State,Country/Region,Lat,Long,Date,Confirmed,Deaths,Recovered
Hubei,China,30.9756,112.2707,2020-01-22,444,17,28
Hubei,China,30.9756,112.2707,2020-01-23,many,17,28
";
	match covid_eda::load_records(&mut NullSink(), data.as_bytes()) {
		Err(Error::Format(FormatError::InvalidValue{column, ..})) => {
			assert_eq!(column.as_deref(), Some("Confirmed"));
		},
		other => panic!("unexpected result: {:?}", other),
	}
}

#[test]
fn export_writes_all_tables_in_display_order() {
	let dir = std::env::temp_dir().join(format!("covid-eda-pipeline-{}", std::process::id()));
	let input = dir.join("input.csv");
	fs::create_dir_all(&dir).unwrap();
	fs::write(&input, DATA).unwrap();

	let records = covid_eda::load_path(&mut NullSink(), &input).unwrap();
	let rows = covid_eda::normalize(records);
	let prepared = Prepared::from_rows(&rows);
	let out = dir.join("out");
	covid_eda::export::write_all(&out, &prepared).unwrap();

	let by_region = fs::read_to_string(out.join(covid_eda::export::BY_REGION_FILE)).unwrap();
	let lines: Vec<&str> = by_region.lines().collect();
	assert_eq!(lines, vec![
		"Country/Region,Confirmed,Deaths,Recovered,Active",
		"China,924,34,56,834",
		"Italy,3,0,0,3",
		"Japan,2,0,3,-1",
	]);

	let long = fs::read_to_string(out.join(covid_eda::export::BY_DATE_LONG_FILE)).unwrap();
	assert_eq!(long.lines().count(), 1 + 6);
	assert!(long.starts_with("Date,Case,Count\n2020-01-22,Recovered,28\n"));

	let latest = fs::read_to_string(out.join(covid_eda::export::LATEST_FILE)).unwrap();
	let latest_lines: Vec<&str> = latest.lines().collect();
	assert_eq!(latest_lines.len(), 1 + 4);
	assert!(latest_lines[1].starts_with("Hubei,China,"));

	let by_date_region = fs::read_to_string(out.join(covid_eda::export::BY_DATE_REGION_FILE)).unwrap();
	let second = by_date_region.lines().nth(1).unwrap();
	assert_eq!(second, "2020-01-23,China,466,17,28,421");

	fs::remove_dir_all(&dir).unwrap();
}
