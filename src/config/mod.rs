//! Configuration for post-processing and rendering.

mod constants;
pub use constants::{
	SOURCE_CHUNK_DURATION,
	MIN_SUPPORTED_RATE,
	MAX_SUPPORTED_RATE,
	SIMILARITY_WINDOW,
	DEFAULT_SEARCH_WIDTH,
	DEFAULT_ANCHOR_SPACING,
};
pub(crate) use constants::OUTPUT_BUFFER_FACTOR;

mod config;
pub use config::{PostProcess,RenderConfig};

mod profile;
pub use profile::{Profile,StretchMode};
