//! These are helper functions used for testing throughout the codebase.

//---------------------------------------------------------------------------------------------------- Use
use std::time::Duration;
use crate::{
	align::{AlignmentPath,CorrespondencePoint},
	source::MemorySource,
};

//---------------------------------------------------------------------------------------------------- Time
/// `f64` seconds as a [`Duration`].
pub(crate) fn secs(secs: f64) -> Duration {
	Duration::from_secs_f64(secs)
}

//---------------------------------------------------------------------------------------------------- Paths
/// `n` evenly spaced points from `(0, 0)` to `(len_a, len_b)` seconds,
/// crops starting at `0`.
pub(crate) fn linear_path(n: usize, len_a: f64, len_b: f64) -> AlignmentPath {
	let last   = n.saturating_sub(1).max(1) as f64;
	let points = (0..n)
		.map(|i| {
			let t = i as f64 / last;
			CorrespondencePoint::from_secs_f64(t * len_a, t * len_b)
		})
		.collect();
	AlignmentPath::from_points(points, Duration::ZERO, Duration::ZERO)
}

//---------------------------------------------------------------------------------------------------- Sources
/// A source whose every sample is its frame index.
pub(crate) fn ramp(frames: usize, sample_rate: u32, channels: usize) -> MemorySource {
	let samples = (0..frames * channels).map(|i| (i / channels) as f32).collect();
	MemorySource::new(samples, sample_rate, channels).unwrap()
}
