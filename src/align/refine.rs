//! Sparse match lists → monotone match lists.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	align::Match,
	macros::debug2,
};

//---------------------------------------------------------------------------------------------------- refine
/// Order a sparse, possibly noisy list of [`Match`]'s for rendering.
///
/// Fingerprint matchers hand back hits in no particular order, and some
/// of them contradict each other (one jumps back in time on one track
/// while moving forward on the other). This sorts by `time2` and keeps
/// the largest subset that is _strictly_ increasing in both `time1`
/// and `time2`, which is what [`Driver`](crate::render::Driver) expects.
///
/// ```rust
/// # use realign::align::*;
/// # use std::time::Duration;
/// let m = |a, b| Match::new(Duration::from_secs(a), Duration::from_secs(b), 1.0, MatchSource::Fingerprint);
///
/// let refined = refine(vec![m(30, 31), m(10, 11), m(25, 5), m(20, 21)]);
/// assert_eq!(refined, vec![m(10, 11), m(20, 21), m(30, 31)]);
/// ```
pub fn refine(mut matches: Vec<Match>) -> Vec<Match> {
	let len = matches.len();

	// Equal `time2`'s sort with descending `time1`
	// so at most one of them can be picked below.
	matches.sort_by(|x, y| x.time2.cmp(&y.time2).then(y.time1.cmp(&x.time1)));

	// Longest strictly increasing subsequence on `time1`.
	let mut tails: Vec<usize> = Vec::new();
	let mut prev: Vec<Option<usize>> = vec![None; len];
	for i in 0..len {
		let time1 = matches[i].time1;
		let pos = tails.partition_point(|&j| matches[j].time1 < time1);
		if pos > 0 {
			prev[i] = Some(tails[pos - 1]);
		}
		if pos == tails.len() {
			tails.push(i);
		} else {
			tails[pos] = i;
		}
	}

	let mut refined = Vec::with_capacity(tails.len());
	let mut next = tails.last().copied();
	while let Some(i) = next {
		refined.push(matches[i]);
		next = prev[i];
	}
	refined.reverse();

	debug2!("refine - kept {}/{len} matches", refined.len());
	refined
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use crate::align::MatchSource;
	use pretty_assertions::assert_eq;
	use std::time::Duration;

	fn m(a: u64, b: u64) -> Match {
		Match::new(Duration::from_secs(a), Duration::from_secs(b), 1.0, MatchSource::Fingerprint)
	}

	#[test]
	fn empty() {
		assert!(refine(Vec::new()).is_empty());
	}

	#[test]
	fn already_monotone() {
		let v = vec![m(1, 2), m(2, 3), m(3, 4)];
		assert_eq!(refine(v.clone()), v);
	}

	#[test]
	fn drops_outliers() {
		let v = vec![m(1, 2), m(50, 3), m(3, 4), m(4, 5), m(0, 6), m(6, 7)];
		assert_eq!(refine(v), vec![m(1, 2), m(3, 4), m(4, 5), m(6, 7)]);
	}

	#[test]
	fn duplicate_times_collapse() {
		let v = vec![m(1, 2), m(1, 3), m(2, 3), m(3, 3)];
		let refined = refine(v);
		assert_eq!(refined.len(), 2);
		for pair in refined.windows(2) {
			assert!(pair[1].time1 > pair[0].time1);
			assert!(pair[1].time2 > pair[0].time2);
		}
	}
}
