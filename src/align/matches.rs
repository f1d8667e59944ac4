//! The refined output unit of post-processing.

//---------------------------------------------------------------------------------------------------- use
use std::time::Duration;
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	EnumString,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- MatchSource
/// Where a [`Match`] came from.
#[derive(Copy,Clone,Debug,Default,PartialEq,PartialOrd,Eq,Ord,Hash)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,EnumString,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchSource {
	#[default]
	/// An anchor of a dense alignment path (DTW/OLTW)
	Path,
	/// An acoustic fingerprint hit
	Fingerprint,
	/// Entered by hand
	Manual,
}

//---------------------------------------------------------------------------------------------------- Match
#[derive(Copy,Clone,Debug,PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// `time1` on track 1 and `time2` on track 2 are the same instant.
///
/// Times are absolute, i.e. relative to the start of each
/// (uncropped) track. Immutable once created.
pub struct Match {
	/// Time on track 1
	pub time1: Duration,
	/// Time on track 2
	pub time2: Duration,
	/// How alike the audio around both times is, `0.0..=1.0`
	pub similarity: f32,
	/// What produced this match
	pub source: MatchSource,
}

impl Match {
	#[inline]
	#[must_use]
	/// Create a new [`Match`].
	///
	/// `similarity` is clamped to `0.0..=1.0`, `NaN` becomes `0.0`.
	pub fn new(time1: Duration, time2: Duration, similarity: f32, source: MatchSource) -> Self {
		let similarity = if similarity.is_nan() { 0.0 } else { similarity.clamp(0.0, 1.0) };
		Self { time1, time2, similarity, source }
	}

	#[inline]
	#[must_use]
	/// `time2 - time1` in seconds, may be negative.
	pub fn offset(&self) -> f64 {
		self.time2.as_secs_f64() - self.time1.as_secs_f64()
	}
}
