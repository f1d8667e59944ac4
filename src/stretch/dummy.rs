//! A deterministic, zero-latency [`Elastic`] for tests.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	error::StretchError,
	stretch::Elastic,
};

//---------------------------------------------------------------------------------------------------- Dummy
/// Scales by `rate * tempo` with nearest-neighbor frame picking.
///
/// Every `put()` is converted immediately, a fractional
/// source position is carried across calls so output
/// length is exact over a stream.
#[derive(Debug)]
pub(crate) struct Dummy {
	pub(crate) channels:    usize,
	pub(crate) sample_rate: u32,
	pub(crate) rate:        f64,
	pub(crate) tempo:       f64,
	pub(crate) anti_alias:  bool,
	pub(crate) quick_seek:  bool,

	// Counters tests assert on.
	pub(crate) clears:  usize,
	pub(crate) flushes: usize,
	pub(crate) put:     usize, // frames

	position: f64, // fractional read position into the next `put()`
	output:   Vec<f32>,
}

impl Dummy {
	pub(crate) fn new(sample_rate: u32, channels: usize) -> Self {
		Self {
			channels,
			sample_rate,
			rate: 1.0,
			tempo: 1.0,
			anti_alias: true,
			quick_seek: true,
			clears: 0,
			flushes: 0,
			put: 0,
			position: 0.0,
			output: Vec::new(),
		}
	}
}

impl Elastic for Dummy {
	fn put(&mut self, samples: &[f32]) -> Result<(), StretchError> {
		if samples.len() % self.channels != 0 {
			return Err(StretchError::Misaligned { len: samples.len(), channels: self.channels });
		}

		let c      = self.channels;
		let frames = samples.len() / c;
		let step   = self.rate * self.tempo;
		self.put  += frames;

		while (self.position as usize) < frames {
			let i = self.position as usize;
			self.output.extend_from_slice(&samples[i * c..(i + 1) * c]);
			self.position += step;
		}
		self.position -= frames as f64;

		Ok(())
	}

	fn flush(&mut self) -> Result<(), StretchError> {
		self.flushes += 1;
		self.position = 0.0;
		Ok(())
	}

	fn receive(&mut self, out: &mut [f32]) -> usize {
		let frames = (out.len() / self.channels).min(self.available());
		let len    = frames * self.channels;
		out[..len].copy_from_slice(&self.output[..len]);
		self.output.drain(..len);
		frames
	}

	fn available(&self) -> usize {
		self.output.len() / self.channels
	}

	fn set_rate(&mut self, rate: f64) {
		self.rate = rate;
	}

	fn set_tempo(&mut self, tempo: f64) {
		self.tempo = tempo;
	}

	fn set_channels(&mut self, channels: usize) -> Result<(), StretchError> {
		if channels == 0 {
			return Err(StretchError::Channels(channels));
		}
		self.channels = channels;
		self.clear();
		Ok(())
	}

	fn set_sample_rate(&mut self, sample_rate: u32) -> Result<(), StretchError> {
		if sample_rate == 0 {
			return Err(StretchError::SampleRate(sample_rate));
		}
		self.sample_rate = sample_rate;
		self.clear();
		Ok(())
	}

	fn set_use_antialiasing(&mut self, enable: bool) {
		self.anti_alias = enable;
	}

	fn set_use_quickseek(&mut self, enable: bool) {
		self.quick_seek = enable;
	}

	fn clear(&mut self) {
		self.clears  += 1;
		self.position = 0.0;
		self.output.clear();
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn halves_at_double_speed() {
		let mut d = Dummy::new(48_000, 1);
		d.set_tempo(2.0);
		d.put(&[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
		d.put(&[5.0, 6.0, 7.0]).unwrap();

		let mut out = [0.0; 8];
		assert_eq!(d.receive(&mut out), 4);
		assert_eq!(&out[..4], &[0.0, 2.0, 4.0, 6.0]);
	}

	#[test]
	fn repeats_when_slow() {
		let mut d = Dummy::new(48_000, 2);
		d.set_rate(0.5);
		d.put(&[1.0, -1.0, 2.0, -2.0]).unwrap();
		assert_eq!(d.available(), 4);
	}
}
