//! Correspondences between two timelines.

//---------------------------------------------------------------------------------------------------- use
use std::time::Duration;

//---------------------------------------------------------------------------------------------------- CorrespondencePoint
#[derive(Copy,Clone,Debug,Default,PartialEq,PartialOrd,Eq,Ord,Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// "These two instants are the same event."
///
/// `a` is a time on timeline A, `b` on timeline B,
/// both relative to the start of their [`Interval`].
pub struct CorrespondencePoint {
	/// Time on timeline A
	pub a: Duration,
	/// Time on timeline B
	pub b: Duration,
}

impl CorrespondencePoint {
	#[inline]
	#[must_use]
	/// Create a new [`CorrespondencePoint`].
	pub const fn new(a: Duration, b: Duration) -> Self {
		Self { a, b }
	}

	#[inline]
	#[must_use]
	/// Create a new [`CorrespondencePoint`] from `f64` seconds.
	///
	/// Negative, `NaN` and overflowing values saturate into `0` or [`Duration::MAX`].
	pub fn from_secs_f64(a: f64, b: f64) -> Self {
		Self { a: saturating_secs(a), b: saturating_secs(b) }
	}

	#[inline]
	#[must_use]
	/// `b - a` in seconds, may be negative.
	pub fn drift(&self) -> f64 {
		self.b.as_secs_f64() - self.a.as_secs_f64()
	}
}

/// `f64` seconds to a [`Duration`], clamped instead of panicking.
pub(crate) fn saturating_secs(secs: f64) -> Duration {
	if secs.is_nan() || secs <= 0.0 {
		Duration::ZERO
	} else {
		Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
	}
}

//---------------------------------------------------------------------------------------------------- Interval
#[derive(Copy,Clone,Debug,Default,PartialEq,PartialOrd,Eq,Ord,Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// A cropped region `[from, to]` of a track's timeline.
pub struct Interval {
	/// Start, relative to the start of the track
	pub from: Duration,
	/// End, relative to the start of the track
	pub to: Duration,
}

impl Interval {
	#[inline]
	#[must_use]
	/// Create a new [`Interval`].
	pub const fn new(from: Duration, to: Duration) -> Self {
		Self { from, to }
	}

	#[inline]
	#[must_use]
	/// `to - from`, or `0` if the interval is inverted.
	pub const fn length(&self) -> Duration {
		self.to.saturating_sub(self.from)
	}
}

//---------------------------------------------------------------------------------------------------- AlignmentPath
#[derive(Clone,Debug,Default,PartialEq,Eq,Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// An ordered correspondence between two cropped timelines.
///
/// Produced by an external alignment engine.
///
/// ## Invariants
/// - `points` are ordered by `a`
/// - `points[0]` is `(0, 0)` and the last point is
///   `(a.length(), b.length())`, relative to the crop
pub struct AlignmentPath {
	/// The path, crop-relative
	pub points: Vec<CorrespondencePoint>,
	/// Crop of timeline A
	pub a: Interval,
	/// Crop of timeline B
	pub b: Interval,
}

impl AlignmentPath {
	#[must_use]
	/// Create a new [`AlignmentPath`].
	pub const fn new(points: Vec<CorrespondencePoint>, a: Interval, b: Interval) -> Self {
		Self { points, a, b }
	}

	#[must_use]
	/// Create an [`AlignmentPath`] whose crops start at `a_from`/`b_from`
	/// and end wherever the last point lands.
	///
	/// Useful when the alignment engine only hands back points.
	pub fn from_points(points: Vec<CorrespondencePoint>, a_from: Duration, b_from: Duration) -> Self {
		let last = points.last().copied().unwrap_or_default();
		Self {
			points,
			a: Interval::new(a_from, a_from.saturating_add(last.a)),
			b: Interval::new(b_from, b_from.saturating_add(last.b)),
		}
	}

	#[inline]
	#[must_use]
	/// Number of points.
	pub fn len(&self) -> usize {
		self.points.len()
	}

	#[inline]
	#[must_use]
	/// `true` if the engine found no path.
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}
}
