//---------------------------------------------------------------------------------------------------- use
use std::time::Duration;
use crate::config::{
	Profile,
	DEFAULT_SEARCH_WIDTH,
	DEFAULT_ANCHOR_SPACING,
	MIN_SUPPORTED_RATE,
	MAX_SUPPORTED_RATE,
};

//---------------------------------------------------------------------------------------------------- PostProcess
#[derive(Copy,Clone,Debug,PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Settings for [`align::process`](crate::align::process).
pub struct PostProcess {
	/// Trim the unreliable region near the start of both intervals.
	pub cue_in: bool,
	/// Trim the unreliable region near the end of both intervals.
	pub cue_out: bool,
	/// Search width the alignment engine was run with.
	///
	/// Path points closer than this to an interval edge
	/// are dropped when cue trimming is enabled.
	pub search_width: Duration,
	/// Take every `anchor_spacing`-th path point as an anchor.
	///
	/// `0` is treated as `1`.
	pub anchor_spacing: usize,
	/// Median-smooth the drift at interior anchors.
	pub smoothing: bool,
}

impl PostProcess {
	/// No cue trimming, smoothing on, [`DEFAULT_SEARCH_WIDTH`] and [`DEFAULT_ANCHOR_SPACING`].
	pub const DEFAULT: Self = Self {
		cue_in:         false,
		cue_out:        false,
		search_width:   DEFAULT_SEARCH_WIDTH,
		anchor_spacing: DEFAULT_ANCHOR_SPACING,
		smoothing:      true,
	};

	#[must_use]
	/// Set [`Self::cue_in`] and [`Self::cue_out`].
	pub const fn with_cues(mut self, cue_in: bool, cue_out: bool) -> Self {
		self.cue_in  = cue_in;
		self.cue_out = cue_out;
		self
	}

	#[must_use]
	/// Set [`Self::search_width`].
	pub const fn with_search_width(mut self, search_width: Duration) -> Self {
		self.search_width = search_width;
		self
	}

	#[must_use]
	/// Set [`Self::anchor_spacing`].
	pub const fn with_anchor_spacing(mut self, anchor_spacing: usize) -> Self {
		self.anchor_spacing = anchor_spacing;
		self
	}

	#[must_use]
	/// Set [`Self::smoothing`].
	pub const fn with_smoothing(mut self, smoothing: bool) -> Self {
		self.smoothing = smoothing;
		self
	}

	#[inline]
	/// The anchor spacing actually used, never `0`.
	pub(crate) const fn spacing(&self) -> usize {
		if self.anchor_spacing == 0 { 1 } else { self.anchor_spacing }
	}

	#[inline]
	/// Width of the median window around each anchor.
	///
	/// `clamp(spacing / 10, 1, spacing)`
	pub(crate) fn smoothing_width(&self) -> usize {
		let spacing = self.spacing();
		(spacing / 10).clamp(1, spacing)
	}
}

impl Default for PostProcess {
	#[inline]
	fn default() -> Self {
		Self::DEFAULT
	}
}

//---------------------------------------------------------------------------------------------------- RenderConfig
#[derive(Copy,Clone,Debug,PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Settings for [`render::Driver`](crate::render::Driver).
pub struct RenderConfig {
	/// How the renderer applies rate changes.
	pub profile: Profile,
	/// Emit silence up to the first match's `time2`
	/// so the output timeline starts at `0`.
	pub pad_start: bool,
	/// Segment rates below this are clamped.
	pub min_rate: f64,
	/// Segment rates above this are clamped.
	pub max_rate: f64,
}

impl RenderConfig {
	/// [`Profile::DEFAULT`], padding on, full supported rate range.
	pub const DEFAULT: Self = Self {
		profile:   Profile::DEFAULT,
		pad_start: true,
		min_rate:  MIN_SUPPORTED_RATE,
		max_rate:  MAX_SUPPORTED_RATE,
	};

	#[must_use]
	/// Set [`Self::profile`].
	pub const fn with_profile(mut self, profile: Profile) -> Self {
		self.profile = profile;
		self
	}

	#[must_use]
	/// Set [`Self::pad_start`].
	pub const fn with_pad_start(mut self, pad_start: bool) -> Self {
		self.pad_start = pad_start;
		self
	}
}

impl Default for RenderConfig {
	#[inline]
	fn default() -> Self {
		Self::DEFAULT
	}
}
