//! Collect output in memory.

//---------------------------------------------------------------------------------------------------- use
use std::time::Duration;
use crate::{
	error::SinkError,
	sink::{AudioSink,sink::check_span},
};

//---------------------------------------------------------------------------------------------------- MemorySink
#[derive(Clone,Debug,Default,PartialEq)]
/// Appends everything written to a `Vec<f32>`.
pub struct MemorySink {
	samples:     Vec<f32>,
	sample_rate: u32,
	channels:    usize,
	finalized:   bool,
}

impl MemorySink {
	/// Create an empty sink.
	///
	/// # Errors
	/// `sample_rate` or `channels` is `0`.
	pub fn new(sample_rate: u32, channels: usize) -> Result<Self, SinkError> {
		if sample_rate == 0 {
			return Err(SinkError::SampleRate(sample_rate));
		}
		if channels == 0 {
			return Err(SinkError::Channels(channels));
		}
		Ok(Self { samples: Vec::new(), sample_rate, channels, finalized: false })
	}

	#[inline]
	#[must_use]
	/// Everything written so far.
	pub fn samples(&self) -> &[f32] {
		&self.samples
	}

	#[inline]
	#[must_use]
	/// Frames written so far.
	pub fn frames(&self) -> usize {
		self.samples.len() / self.channels
	}

	#[inline]
	#[must_use]
	/// Duration written so far.
	pub fn duration(&self) -> Duration {
		Duration::from_secs_f64(self.frames() as f64 / f64::from(self.sample_rate))
	}

	#[inline]
	#[must_use]
	/// If [`AudioSink::finalize`] was called.
	pub const fn is_finalized(&self) -> bool {
		self.finalized
	}

	#[inline]
	#[must_use]
	/// Return the inner samples.
	pub fn into_inner(self) -> Vec<f32> {
		self.samples
	}
}

impl AudioSink for MemorySink {
	fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	fn channels(&self) -> usize {
		self.channels
	}

	fn write(&mut self, samples: &[f32]) -> Result<(), SinkError> {
		if self.finalized {
			return Err(SinkError::Finalized);
		}
		check_span(samples.len(), self.channels)?;
		self.samples.extend_from_slice(samples);
		Ok(())
	}

	fn finalize(&mut self) -> Result<(), SinkError> {
		self.finalized = true;
		Ok(())
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn writes_in_order() {
		let mut s = MemorySink::new(4, 2).unwrap();
		s.write(&[1.0, 2.0]).unwrap();
		s.write(&[]).unwrap();
		s.write(&[3.0, 4.0, 5.0, 6.0]).unwrap();
		assert_eq!(s.samples(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
		assert_eq!(s.frames(), 3);
		assert_eq!(s.duration(), Duration::from_millis(750));
	}

	#[test]
	fn rejects_partial_frames_and_late_writes() {
		let mut s = MemorySink::new(44_100, 2).unwrap();
		assert!(matches!(s.write(&[0.0]), Err(SinkError::Misaligned { len: 1, channels: 2 })));
		s.finalize().unwrap();
		assert!(s.is_finalized());
		assert!(matches!(s.write(&[0.0, 0.0]), Err(SinkError::Finalized)));
	}

	#[test]
	fn rejects_zero_format() {
		assert!(MemorySink::new(0, 2).is_err());
		assert!(MemorySink::new(44_100, 0).is_err());
	}
}
