use std::io;
use std::io::Write;
use std::time;

use log::info;


pub trait ProgressSink {
	fn update(&mut self, inow: usize, n: Option<usize>);
	fn finish(&mut self, inow: usize, n: Option<usize>);
}


/// Carriage-return meter for interactive terminals.
pub struct TtySink {
	t0: time::Instant,
	tprev: time::Instant,
	iprev: usize,
}

impl TtySink {
	pub fn new() -> Self {
		let now = time::Instant::now();
		Self{
			t0: now,
			tprev: now,
			iprev: 0,
		}
	}

	fn print(&self, inow: usize, n: Option<usize>, rate: f64) {
		match n {
			Some(n) if n > 0 => {
				let done = (inow as f64) / (n as f64);
				eprint!("{:6.0}% [{:9.2}/s]\r", done * 100.0, rate);
			},
			_ => {
				eprint!("{:12} [{:9.2}/s]\r", inow, rate);
			},
		}
		// a failed flush only loses a progress line
		let _ = io::stderr().flush();
	}
}

impl ProgressSink for TtySink {
	fn update(&mut self, inow: usize, n: Option<usize>) {
		let now = time::Instant::now();
		let dt = (now - self.tprev).as_secs_f64();
		let rate = inow.saturating_sub(self.iprev) as f64 / dt.max(1e-9);
		self.print(inow, n, rate);
		self.iprev = inow;
		self.tprev = now;
	}

	fn finish(&mut self, inow: usize, n: Option<usize>) {
		let dt = self.t0.elapsed().as_secs_f64();
		let rate = inow as f64 / dt.max(1e-9);
		self.print(inow, n.or(Some(inow)), rate);
		eprintln!();
	}
}


/// Reports progress through the log when nobody is watching the terminal.
pub struct LogSink {
	t0: time::Instant,
}

impl LogSink {
	pub fn new() -> Self {
		Self{t0: time::Instant::now()}
	}
}

impl ProgressSink for LogSink {
	fn update(&mut self, _inow: usize, _n: Option<usize>) {}

	fn finish(&mut self, inow: usize, _n: Option<usize>) {
		info!("processed {} rows in {:.2}s", inow, self.t0.elapsed().as_secs_f64());
	}
}


pub struct NullSink();

impl ProgressSink for NullSink {
	fn update(&mut self, _inow: usize, _n: Option<usize>) {}

	fn finish(&mut self, _inow: usize, _n: Option<usize>) {}
}


pub fn default_output() -> Box<dyn ProgressSink> {
	if isatty::stderr_isatty() {
		Box::new(TtySink::new())
	} else {
		Box::new(LogSink::new())
	}
}


/// Progress over an open-ended stream of items, e.g. rows of a CSV file.
pub struct CountMeter<'s, S: ProgressSink + ?Sized> {
	sink: &'s mut S,
	every: usize,
}

impl<'s, S: ProgressSink + ?Sized> CountMeter<'s, S> {
	pub fn new(sink: &'s mut S) -> Self {
		Self::with_interval(sink, 10000)
	}

	pub fn with_interval(sink: &'s mut S, every: usize) -> Self {
		Self{
			sink,
			every: every.max(1),
		}
	}

	/// Notify the sink if `inow` is at a reporting boundary.
	pub fn tick(&mut self, inow: usize) {
		if inow % self.every == 0 {
			self.sink.update(inow, None);
		}
	}

	pub fn finish(self, n: usize) {
		self.sink.finish(n, None);
	}
}
