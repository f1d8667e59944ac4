//---------------------------------------------------------------------------------------------------- use
#[allow(unused_imports)] // docs
use crate::stretch::{Elastic,Stretcher};

//---------------------------------------------------------------------------------------------------- StretchError
#[derive(thiserror::Error, Debug)]
/// Errors from an [`Elastic`] time-stretch engine
pub enum StretchError {
	#[error("failed to create resampler: {0}")]
	/// `rubato` refused the resampler parameters of [`Stretcher`]
	Construction(#[from] rubato::ResamplerConstructionError),

	#[error("failed to resample: {0}")]
	/// `rubato` failed while processing a chunk
	Resample(#[from] rubato::ResampleError),

	#[error("invalid channel count: {0}")]
	/// Channel count was `0`
	Channels(usize),

	#[error("invalid sample rate: {0}")]
	/// Sample rate was `0`
	SampleRate(u32),

	#[error("input length `{len}` is not a multiple of the channel count `{channels}`")]
	/// Samples passed to [`Elastic::put`] did not contain a whole number of frames
	Misaligned {
		/// Length of the input
		len: usize,
		/// Channel count of the engine
		channels: usize,
	},
}
