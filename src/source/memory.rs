//! A source backed by a buffer.

//---------------------------------------------------------------------------------------------------- use
use std::time::Duration;
use crate::{
	error::SourceError,
	source::{AudioSource,source::check_frames},
};

//---------------------------------------------------------------------------------------------------- MemorySource
#[derive(Clone,Debug,Default,PartialEq)]
/// Interleaved samples played back from memory.
///
/// ```rust
/// # use realign::source::*;
/// let mut source = MemorySource::new(vec![0.1, 0.2, 0.3, 0.4], 8_000, 2).unwrap();
/// let mut out = [0.0; 8];
///
/// assert_eq!(source.read(&mut out).unwrap(), 2);
/// assert_eq!(source.read(&mut out).unwrap(), 0);
/// ```
pub struct MemorySource {
	samples:     Vec<f32>,
	sample_rate: u32,
	channels:    usize,
	position:    usize, // in samples
}

impl MemorySource {
	/// Wrap interleaved `samples`.
	///
	/// # Errors
	/// `sample_rate` or `channels` is `0`, or `samples`
	/// is not a whole number of frames.
	pub fn new(samples: Vec<f32>, sample_rate: u32, channels: usize) -> Result<Self, SourceError> {
		if sample_rate == 0 {
			return Err(SourceError::SampleRate);
		}
		if channels == 0 {
			return Err(SourceError::Channels);
		}
		check_frames(samples.len(), channels)?;

		Ok(Self { samples, sample_rate, channels, position: 0 })
	}

	/// Read all of `source` into memory.
	///
	/// # Errors
	/// Whatever `source` returns.
	pub fn collect<S: AudioSource>(mut source: S) -> Result<Self, SourceError> {
		let channels    = source.channels();
		let sample_rate = source.sample_rate();

		let mut samples = Vec::new();
		let mut chunk   = vec![0.0; 4096 * channels];
		loop {
			let frames = source.read(&mut chunk)?;
			if frames == 0 {
				break;
			}
			samples.extend_from_slice(&chunk[..frames * channels]);
		}

		Self::new(samples, sample_rate, channels)
	}

	#[inline]
	#[must_use]
	/// Total frames, played or not.
	pub fn frames(&self) -> usize {
		self.samples.len() / self.channels
	}

	#[inline]
	#[must_use]
	/// Total duration, played or not.
	pub fn duration(&self) -> Duration {
		Duration::from_secs_f64(self.frames() as f64 / f64::from(self.sample_rate))
	}

	#[inline]
	#[must_use]
	/// All the samples.
	pub fn samples(&self) -> &[f32] {
		&self.samples
	}

	#[inline]
	/// Start over from the first frame.
	pub fn rewind(&mut self) {
		self.position = 0;
	}

	#[inline]
	#[must_use]
	/// Return the inner samples.
	pub fn into_inner(self) -> Vec<f32> {
		self.samples
	}
}

impl AudioSource for MemorySource {
	fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	fn channels(&self) -> usize {
		self.channels
	}

	fn read(&mut self, out: &mut [f32]) -> Result<usize, SourceError> {
		check_frames(out.len(), self.channels)?;

		let len = out.len().min(self.samples.len() - self.position);
		out[..len].copy_from_slice(&self.samples[self.position..self.position + len]);
		self.position += len;

		Ok(len / self.channels)
	}
}
