//---------------------------------------------------------------------------------------------------- use
use crate::error::SinkError;

//---------------------------------------------------------------------------------------------------- AudioSink
/// Accepts interleaved PCM frame spans, in order.
pub trait AudioSink {
	/// Frames per second the sink expects.
	fn sample_rate(&self) -> u32;

	/// Samples per frame the sink expects.
	fn channels(&self) -> usize;

	/// Append `samples`.
	///
	/// # Errors
	/// `samples.len()` must be a multiple of [`AudioSink::channels`],
	/// and the sink must not be finalized.
	fn write(&mut self, samples: &[f32]) -> Result<(), SinkError>;

	/// Flush and close, further writes fail.
	///
	/// # Errors
	/// Depends on the implementation, e.g. IO.
	fn finalize(&mut self) -> Result<(), SinkError>;
}

impl<K: AudioSink + ?Sized> AudioSink for &mut K {
	fn sample_rate(&self) -> u32 { (**self).sample_rate() }
	fn channels(&self) -> usize { (**self).channels() }
	fn write(&mut self, samples: &[f32]) -> Result<(), SinkError> { (**self).write(samples) }
	fn finalize(&mut self) -> Result<(), SinkError> { (**self).finalize() }
}

impl<K: AudioSink + ?Sized> AudioSink for Box<K> {
	fn sample_rate(&self) -> u32 { (**self).sample_rate() }
	fn channels(&self) -> usize { (**self).channels() }
	fn write(&mut self, samples: &[f32]) -> Result<(), SinkError> { (**self).write(samples) }
	fn finalize(&mut self) -> Result<(), SinkError> { (**self).finalize() }
}

/// Error if `len` samples is not a whole number of frames.
pub(super) fn check_span(len: usize, channels: usize) -> Result<(), SinkError> {
	if len % channels == 0 {
		Ok(())
	} else {
		Err(SinkError::Misaligned { len, channels })
	}
}
