//! Shared constants.

//---------------------------------------------------------------------------------------------------- Use
use std::time::Duration;

//---------------------------------------------------------------------------------------------------- Constants
/// How much audio [`Varispeed`](crate::render::Varispeed) pulls from its source at once.
pub const SOURCE_CHUNK_DURATION: Duration = Duration::from_millis(SOURCE_CHUNK_DURATION_MS);
/// [`SOURCE_CHUNK_DURATION`] in milliseconds.
pub(crate) const SOURCE_CHUNK_DURATION_MS: u64 = 100;

/// The slowest playback rate the renderer buffers are sized for.
///
/// The stretch-output buffer holds `1 / MIN_SUPPORTED_RATE` source chunks.
pub const MIN_SUPPORTED_RATE: f64 = 0.1;

/// The fastest playback rate the elastic engine accepts.
pub const MAX_SUPPORTED_RATE: f64 = 10.0;

/// Length of the window handed to a similarity function, centered on each anchor.
pub const SIMILARITY_WINDOW: Duration = Duration::from_secs(1);

/// Default search width of the alignment engine, also used for cue trimming.
pub const DEFAULT_SEARCH_WIDTH: Duration = Duration::from_secs(DEFAULT_SEARCH_WIDTH_SECS);
/// [`DEFAULT_SEARCH_WIDTH`] in seconds.
pub(crate) const DEFAULT_SEARCH_WIDTH_SECS: u64 = 30;

/// Default distance between anchors, in path points.
pub const DEFAULT_ANCHOR_SPACING: usize = 100;

/// Stretch-output buffer size relative to the source-read buffer.
///
/// `ceil(1 / MIN_SUPPORTED_RATE)`.
pub(crate) const OUTPUT_BUFFER_FACTOR: usize = 10;

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn source_chunk_duration() {
		assert_eq!(SOURCE_CHUNK_DURATION.as_secs_f32(), 0.1);
		assert_eq!(SOURCE_CHUNK_DURATION.as_millis() as u64, SOURCE_CHUNK_DURATION_MS);
	}

	#[test]
	fn output_buffer_covers_min_rate() {
		assert!(OUTPUT_BUFFER_FACTOR as f64 >= 1.0 / MIN_SUPPORTED_RATE);
		assert_eq!(MAX_SUPPORTED_RATE, 1.0 / MIN_SUPPORTED_RATE);
	}

	#[test]
	fn default_search_width() {
		assert_eq!(DEFAULT_SEARCH_WIDTH.as_secs(), DEFAULT_SEARCH_WIDTH_SECS);
	}
}
