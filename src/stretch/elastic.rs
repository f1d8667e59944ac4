// Elastic time-stretch engine
//
// This file defines the `Elastic` trait.
//
// An elastic engine takes interleaved audio samples as input
// ([f32]'s) and hands back the same audio played at another
// tempo and/or rate. Samples go in with `put()`, come out with
// `receive()`, and `flush()` pushes out whatever the engine is
// still holding onto once the input has ended.
//
// Implementors hold input back (latency), so `available()`
// may be `0` right after a `put()`, that is not the end of audio.

//----------------------------------------------------------------------------------------------- use
use crate::error::StretchError;

//----------------------------------------------------------------------------------------------- Elastic
/// An elastic time-stretch buffer.
///
/// All sample slices are interleaved, all counts are in frames.
///
/// `rate` changes duration and pitch together, `tempo` changes
/// duration only. Output length is `input / (rate * tempo)`.
pub trait Elastic {
	/// Push interleaved samples in.
	///
	/// `samples.len()` must be a multiple of the channel count.
	fn put(&mut self, samples: &[f32]) -> Result<(), StretchError>;

	/// No more input is coming, make everything held back available.
	fn flush(&mut self) -> Result<(), StretchError>;

	/// Move up to `out.len() / channels` frames of output into `out`.
	///
	/// Returns how many frames were written.
	fn receive(&mut self, out: &mut [f32]) -> usize;

	/// How many frames [`Elastic::receive`] can hand out right now.
	fn available(&self) -> usize;

	/// Set the playback rate (pitch follows), `1.0` is unchanged.
	fn set_rate(&mut self, rate: f64);

	/// Set the tempo (pitch kept), `1.0` is unchanged.
	fn set_tempo(&mut self, tempo: f64);

	/// Set the channel count, this clears the engine.
	fn set_channels(&mut self, channels: usize) -> Result<(), StretchError>;

	/// Set the sample rate, this clears the engine.
	fn set_sample_rate(&mut self, sample_rate: u32) -> Result<(), StretchError>;

	/// Low-pass before transposing upwards.
	fn set_use_antialiasing(&mut self, enable: bool);

	/// Use a coarse-then-fine overlap search.
	fn set_use_quickseek(&mut self, enable: bool);

	/// Drop all buffered input and output.
	fn clear(&mut self);
}

impl<E: Elastic + ?Sized> Elastic for Box<E> {
	fn put(&mut self, samples: &[f32]) -> Result<(), StretchError> { (**self).put(samples) }
	fn flush(&mut self) -> Result<(), StretchError> { (**self).flush() }
	fn receive(&mut self, out: &mut [f32]) -> usize { (**self).receive(out) }
	fn available(&self) -> usize { (**self).available() }
	fn set_rate(&mut self, rate: f64) { (**self).set_rate(rate) }
	fn set_tempo(&mut self, tempo: f64) { (**self).set_tempo(tempo) }
	fn set_channels(&mut self, channels: usize) -> Result<(), StretchError> { (**self).set_channels(channels) }
	fn set_sample_rate(&mut self, sample_rate: u32) -> Result<(), StretchError> { (**self).set_sample_rate(sample_rate) }
	fn set_use_antialiasing(&mut self, enable: bool) { (**self).set_use_antialiasing(enable) }
	fn set_use_quickseek(&mut self, enable: bool) { (**self).set_use_quickseek(enable) }
	fn clear(&mut self) { (**self).clear() }
}
