//! The pull-based source trait and frame helpers.

//---------------------------------------------------------------------------------------------------- use
use std::time::Duration;
use crate::error::SourceError;

//---------------------------------------------------------------------------------------------------- AudioSource
/// A pull-based provider of interleaved PCM frames.
///
/// The sample rate and channel count are fixed for the
/// lifetime of the source.
pub trait AudioSource {
	/// Frames per second.
	fn sample_rate(&self) -> u32;

	/// Samples per frame.
	fn channels(&self) -> usize;

	/// Fill `out` with up to `out.len() / channels()` frames.
	///
	/// Returns how many frames were written. Fewer frames than
	/// requested is fine, `0` means the source has ended.
	///
	/// # Errors
	/// `out.len()` must be a multiple of [`AudioSource::channels`],
	/// anything else depends on the implementation.
	fn read(&mut self, out: &mut [f32]) -> Result<usize, SourceError>;
}

impl<S: AudioSource + ?Sized> AudioSource for &mut S {
	fn sample_rate(&self) -> u32 { (**self).sample_rate() }
	fn channels(&self) -> usize { (**self).channels() }
	fn read(&mut self, out: &mut [f32]) -> Result<usize, SourceError> { (**self).read(out) }
}

impl<S: AudioSource + ?Sized> AudioSource for Box<S> {
	fn sample_rate(&self) -> u32 { (**self).sample_rate() }
	fn channels(&self) -> usize { (**self).channels() }
	fn read(&mut self, out: &mut [f32]) -> Result<usize, SourceError> { (**self).read(out) }
}

//---------------------------------------------------------------------------------------------------- Free functions
#[inline]
#[must_use]
/// How many frames `duration` is at `sample_rate`, rounded to the nearest frame.
///
/// ```rust
/// # use realign::source::*;
/// # use std::time::Duration;
/// assert_eq!(duration_to_frames(Duration::from_millis(100), 44_100), 4_410);
/// assert_eq!(duration_to_frames(Duration::from_secs(2), 48_000), 96_000);
/// ```
pub fn duration_to_frames(duration: Duration, sample_rate: u32) -> usize {
	(duration.as_secs_f64() * f64::from(sample_rate)).round() as usize
}

/// Error if `len` samples is not a whole number of frames.
pub(crate) fn check_frames(len: usize, channels: usize) -> Result<usize, SourceError> {
	if channels == 0 || len % channels != 0 {
		Err(SourceError::Misaligned { len, channels })
	} else {
		Ok(len / channels)
	}
}
