//---------------------------------------------------------------------------------------------------- use
#[allow(unused_imports)] // docs
use crate::sink::{AudioSink,WavSink};

//---------------------------------------------------------------------------------------------------- SinkError
#[derive(thiserror::Error, Debug)]
/// Errors when writing to an [`AudioSink`]
pub enum SinkError {
	#[error("failed to write wav: {0}")]
	/// Error from `hound` while creating, writing or finalizing a [`WavSink`]
	Wav(#[from] hound::Error),

	#[error("unsupported channel count: {0}")]
	/// The channel count was `0`, or too large for the container
	Channels(usize),

	#[error("unsupported sample rate: {0}")]
	/// The sample rate was `0`
	SampleRate(u32),

	#[error("sink is already finalized")]
	/// A write was attempted after [`AudioSink::finalize`]
	Finalized,

	#[error("span length `{len}` is not a multiple of the channel count `{channels}`")]
	/// A span did not contain a whole number of frames
	Misaligned {
		/// Length of the span
		len: usize,
		/// Channel count of the sink
		channels: usize,
	},
}
