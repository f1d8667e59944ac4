//! Crop a source to a time interval.

//---------------------------------------------------------------------------------------------------- use
use std::time::Duration;
use crate::{
	align::Interval,
	error::SourceError,
	source::{AudioSource,duration_to_frames,source::check_frames},
};

//---------------------------------------------------------------------------------------------------- Crop
#[derive(Clone,Debug,PartialEq)]
/// Only the `[from, to)` part of an [`AudioSource`].
///
/// Frames before `from` are read and thrown away on the first
/// [`AudioSource::read`], the stream ends at `to` (or earlier,
/// if the inner source ends first).
///
/// ```rust
/// # use realign::{source::*, align::Interval};
/// # use std::time::Duration;
/// let samples = (0..10).map(|i| i as f32).collect();
/// let inner   = MemorySource::new(samples, 10, 1).unwrap();
/// let range   = Interval::new(Duration::from_millis(200), Duration::from_millis(500));
/// let mut crop = Crop::new(inner, range);
///
/// let mut out = [0.0; 10];
/// assert_eq!(crop.read(&mut out).unwrap(), 3);
/// assert_eq!(&out[..3], &[2.0, 3.0, 4.0]);
/// assert_eq!(crop.read(&mut out).unwrap(), 0);
/// ```
pub struct Crop<S> {
	source:    S,
	skip:      usize, // frames before `from` not yet thrown away
	remaining: usize, // frames left before `to`
}

impl<S: AudioSource> Crop<S> {
	#[must_use]
	/// Crop `source` to `interval`.
	pub fn new(source: S, interval: Interval) -> Self {
		let sample_rate = source.sample_rate();
		let skip = duration_to_frames(interval.from, sample_rate);
		let end  = duration_to_frames(interval.to, sample_rate);
		Self {
			source,
			skip,
			remaining: end.saturating_sub(skip),
		}
	}

	#[must_use]
	/// Skip the first `from` of `source`, keep the rest.
	pub fn starting_at(source: S, from: Duration) -> Self {
		Self::new(source, Interval::new(from, Duration::MAX))
	}

	#[inline]
	#[must_use]
	/// Frames left before the end of the crop.
	pub const fn remaining(&self) -> usize {
		self.remaining
	}

	#[inline]
	#[must_use]
	/// Return the inner source.
	pub fn into_inner(self) -> S {
		self.source
	}
}

impl<S: AudioSource> AudioSource for Crop<S> {
	fn sample_rate(&self) -> u32 {
		self.source.sample_rate()
	}

	fn channels(&self) -> usize {
		self.source.channels()
	}

	fn read(&mut self, out: &mut [f32]) -> Result<usize, SourceError> {
		let channels = self.channels();
		let frames   = check_frames(out.len(), channels)?;
		if frames == 0 {
			return Ok(0);
		}

		// `out` doubles as the scratch buffer for skipped frames.
		while self.skip > 0 {
			let want = self.skip.min(frames);
			let read = self.source.read(&mut out[..want * channels])?;
			if read == 0 {
				self.skip      = 0;
				self.remaining = 0;
				return Ok(0);
			}
			self.skip -= read;
		}

		let want = self.remaining.min(frames);
		if want == 0 {
			return Ok(0);
		}
		let read = self.source.read(&mut out[..want * channels])?;
		self.remaining -= read;
		Ok(read)
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use crate::source::MemorySource;
	use pretty_assertions::assert_eq;

	fn ramp(frames: usize, channels: usize) -> MemorySource {
		let samples = (0..frames * channels).map(|i| (i / channels) as f32).collect();
		MemorySource::new(samples, 100, channels).unwrap()
	}

	fn drain<S: AudioSource>(mut s: S, chunk: usize) -> Vec<f32> {
		let mut all = Vec::new();
		let mut out = vec![0.0; chunk * s.channels()];
		loop {
			let n = s.read(&mut out).unwrap();
			if n == 0 {
				return all;
			}
			all.extend_from_slice(&out[..n * s.channels()]);
		}
	}

	#[test]
	fn crops_both_ends() {
		let range = Interval::new(Duration::from_millis(250), Duration::from_millis(500));
		let crop  = Crop::new(ramp(100, 2), range);
		let out   = drain(crop, 7);
		assert_eq!(out.len(), 25 * 2);
		assert_eq!(out[0], 25.0);
		assert_eq!(out[out.len() - 1], 49.0);
	}

	#[test]
	fn open_ended() {
		let crop = Crop::starting_at(ramp(100, 1), Duration::from_millis(900));
		assert_eq!(drain(crop, 3), (90..100).map(|i| i as f32).collect::<Vec<f32>>());
	}

	#[test]
	fn past_the_end() {
		let range = Interval::new(Duration::from_secs(5), Duration::from_secs(6));
		assert!(drain(Crop::new(ramp(100, 1), range), 16).is_empty());
	}

	#[test]
	fn inverted_interval_is_empty() {
		let range = Interval::new(Duration::from_millis(500), Duration::from_millis(100));
		let crop  = Crop::new(ramp(100, 1), range);
		assert_eq!(crop.remaining(), 0);
		assert!(drain(crop, 16).is_empty());
	}
}
