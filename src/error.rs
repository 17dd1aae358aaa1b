use std::fmt;
use std::io;

use smartstring::alias::{String as SmartString};


/// The input table does not match the expected schema.
#[derive(Debug)]
pub enum FormatError {
	MissingColumn(&'static str),
	InvalidValue{
		line: Option<u64>,
		column: Option<SmartString>,
		message: String,
	},
	Csv(csv::Error),
}

impl fmt::Display for FormatError {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::MissingColumn(name) => write!(f, "required column {:?} is missing from the header", name),
			Self::InvalidValue{line, column, message} => {
				f.write_str("invalid value")?;
				if let Some(line) = line {
					write!(f, " on line {}", line)?;
				}
				if let Some(column) = column {
					write!(f, " in column {:?}", column.as_str())?;
				}
				write!(f, ": {}", message)
			},
			Self::Csv(e) => fmt::Display::fmt(e, f),
		}
	}
}

impl std::error::Error for FormatError {}


#[derive(Debug)]
pub enum Error {
	Io(io::Error),
	Format(FormatError),
}

impl fmt::Display for Error {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Io(e) => fmt::Display::fmt(e, f),
			Self::Format(e) => fmt::Display::fmt(e, f),
		}
	}
}

impl From<io::Error> for Error {
	fn from(err: io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<FormatError> for Error {
	fn from(err: FormatError) -> Self {
		Self::Format(err)
	}
}

impl From<csv::Error> for Error {
	fn from(err: csv::Error) -> Self {
		if err.is_io_error() {
			match err.into_kind() {
				csv::ErrorKind::Io(e) => return Self::Io(e),
				_ => unreachable!(),
			}
		}
		Self::Format(FormatError::Csv(err))
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io(e) => Some(e),
			Self::Format(e) => Some(e),
		}
	}
}
