//---------------------------------------------------------------------------------------------------- use
use crate::error::{SinkError,SourceError,StretchError};
#[allow(unused_imports)] // docs
use crate::{config::RenderConfig,render::{Driver,Varispeed}};

//---------------------------------------------------------------------------------------------------- RenderError
#[derive(thiserror::Error, Debug)]
/// Errors while rendering with [`Varispeed`] and [`Driver`]
pub enum RenderError {
	#[error("source: {0}")]
	/// The wrapped source failed
	Source(#[from] SourceError),

	#[error("sink: {0}")]
	/// The output sink failed
	Sink(#[from] SinkError),

	#[error("stretch: {0}")]
	/// The elastic engine failed
	Stretch(#[from] StretchError),

	#[error("renderer has {renderer} channels but sink has {sink}")]
	/// The renderer and sink disagree on channel count
	Channels {
		/// Renderer channel count
		renderer: usize,
		/// Sink channel count
		sink: usize,
	},

	#[error("renderer runs at {renderer}hz but sink expects {sink}hz")]
	/// The renderer and sink disagree on sample rate
	SampleRate {
		/// Renderer sample rate
		renderer: u32,
		/// Sink sample rate
		sink: u32,
	},

	#[error("invalid rate range `{min}..={max}`")]
	/// [`RenderConfig`]'s `min_rate` is not positive or is above `max_rate`
	RateRange {
		/// `min_rate`
		min: f64,
		/// `max_rate`
		max: f64,
	},

	#[error("buffer length `{len}` is not a multiple of the channel count `{channels}`")]
	/// An output buffer could not hold a whole number of frames
	Misaligned {
		/// Length of the output buffer
		len: usize,
		/// Channel count of the renderer
		channels: usize,
	},
}
