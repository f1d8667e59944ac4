//---------------------------------------------------------------------------------------------------- use
#[allow(unused_imports)] // docs
use crate::source::{AudioSource,DecodedSource};

//---------------------------------------------------------------------------------------------------- SourceError
#[derive(thiserror::Error, Debug)]
/// Errors when opening or pulling frames from an [`AudioSource`]
///
/// This includes things like:
/// - File IO errors (non-existent PATH, lacking-permissions, etc)
/// - The data not actually be audio
/// - Unsupported audio codec
///
/// Reaching the end of a source is _not_ an error,
/// [`AudioSource::read`] returns `Ok(0)` instead.
pub enum SourceError {
	#[error("failed to open file: {0}")]
	/// Error occurred while reading a [`std::fs::File`] (most likely missing)
	File(#[from] std::io::Error),

	#[error("failed to probe or decode audio data: {0}")]
	/// Error occurred while probing or decoding with `symphonia` ([`DecodedSource`])
	Symphonia(#[from] symphonia::core::errors::Error),

	#[error("failed to find a decodable track")]
	/// The container did not have a track with a known codec
	Track,

	#[error("failed to find the codecs sample rate")]
	/// The audio codec did not specify a sample rate
	SampleRate,

	#[error("failed to find the codecs channel layout")]
	/// The audio codec did not specify its channels
	Channels,

	#[error("buffer length `{len}` is not a multiple of the channel count `{channels}`")]
	/// A read buffer could not hold a whole number of frames
	Misaligned {
		/// Length of the buffer passed to [`AudioSource::read`]
		len: usize,
		/// Channel count of the source
		channels: usize,
	},
}
