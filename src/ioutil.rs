use std::fs;
use std::io;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

use flate2;


/// Open `path` for reading, gunzipping on the fly if it ends in `.gz`.
pub fn magic_open<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn Read>> {
	let path = path.as_ref();
	let f = BufReader::new(fs::File::open(path)?);
	match path.extension() {
		Some(x) if x == "gz" => {
			Ok(Box::new(flate2::read::GzDecoder::new(f)))
		},
		_ => Ok(Box::new(f)),
	}
}

/// Create (or truncate) `name` inside `dir`, creating `dir` as needed.
pub fn create_in<P: AsRef<Path>>(dir: P, name: &str) -> io::Result<BufWriter<fs::File>> {
	let dir = dir.as_ref();
	fs::create_dir_all(dir)?;
	Ok(BufWriter::new(fs::File::create(dir.join(name))?))
}
