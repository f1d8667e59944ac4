//! A stretch of output between two consecutive matches.

//---------------------------------------------------------------------------------------------------- use
use crate::align::Match;

//---------------------------------------------------------------------------------------------------- Segment
#[derive(Copy,Clone,Debug,PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Two consecutive [`Match`]'s: `from` and `to`.
///
/// Output runs on track 2's timeline (`time2`), the
/// source being rendered runs on track 1's (`time1`).
pub struct Segment {
	/// Position of `from` in the match list.
	pub index: usize,
	/// Where the segment starts.
	pub from: Match,
	/// Where the segment ends.
	pub to: Match,
}

impl Segment {
	/// Every consecutive pair of `matches`, in order.
	///
	/// Nothing is yielded after the last match.
	///
	/// ```rust
	/// # use realign::{render::Segment, align::*};
	/// # use std::time::Duration;
	/// let m = |s| Match::new(Duration::from_secs(s), Duration::from_secs(s), 1.0, MatchSource::Path);
	/// let matches = [m(0), m(1), m(2)];
	///
	/// let segments: Vec<Segment> = Segment::pairs(&matches).collect();
	/// assert_eq!(segments.len(), 2);
	/// assert_eq!(segments[1].index, 1);
	/// assert_eq!(segments[1].to, matches[2]);
	/// ```
	pub fn pairs(matches: &[Match]) -> impl Iterator<Item = Self> + '_ {
		matches
			.windows(2)
			.enumerate()
			.map(|(index, pair)| Self { index, from: pair[0], to: pair[1] })
	}

	#[inline]
	#[must_use]
	/// How much the offset changes across the segment, in seconds.
	pub fn offset_delta(&self) -> f64 {
		self.to.offset() - self.from.offset()
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use crate::{align::MatchSource, tests::secs};

	fn m(time1: f64, time2: f64) -> Match {
		Match::new(secs(time1), secs(time2), 1.0, MatchSource::Path)
	}

	#[test]
	fn pairs() {
		assert_eq!(Segment::pairs(&[]).count(), 0);
		assert_eq!(Segment::pairs(&[m(0.0, 0.0)]).count(), 0);
		assert_eq!(Segment::pairs(&[m(0.0, 0.0), m(1.0, 1.0), m(2.0, 2.0), m(3.0, 3.0)]).count(), 3);
	}

	#[test]
	fn offset_delta() {
		let s = Segment { index: 0, from: m(10.0, 12.0), to: m(20.0, 24.0) };
		assert!((s.offset_delta() - 2.0).abs() < 1e-9);

		let s = Segment { index: 0, from: m(1.0, 5.0), to: m(2.0, 6.0) };
		assert_eq!(s.offset_delta(), 0.0);
	}
}
