//! Pairwise track offsets → one offset per track.

//---------------------------------------------------------------------------------------------------- Use
use std::{
	collections::HashMap,
	hash::Hash,
};
use crate::macros::{debug2,trace2};

//---------------------------------------------------------------------------------------------------- TrackOffset
#[derive(Clone,Debug,PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// One observation from a fingerprint matcher:
/// track `b` starts `offset` seconds later than track `a`.
pub struct TrackOffset<T> {
	/// First track
	pub a: T,
	/// Second track
	pub b: T,
	/// `time_b - time_a` in seconds
	pub offset: f64,
}

impl<T> TrackOffset<T> {
	#[inline]
	/// Create a new [`TrackOffset`].
	pub const fn new(a: T, b: T, offset: f64) -> Self {
		Self { a, b, offset }
	}
}

//---------------------------------------------------------------------------------------------------- Resolved
#[derive(Clone,Debug,PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// The output of [`resolve`].
pub struct Resolved<T> {
	/// The track everything is relative to
	pub reference: T,
	/// `(track, offset)`, reference first (at `0.0`),
	/// the rest in the order they were first seen.
	pub offsets: Vec<(T, f64)>,
}

impl<T: PartialEq> Resolved<T> {
	#[must_use]
	/// Offset of `track` relative to [`Self::reference`].
	///
	/// `None` if `track` was never matched against the reference.
	pub fn get(&self, track: &T) -> Option<f64> {
		self.offsets
			.iter()
			.find(|(t, _)| t == track)
			.map(|(_, offset)| *offset)
	}
}

//---------------------------------------------------------------------------------------------------- Table
/// `track -> counterpart -> observed offsets`, in insertion order.
struct Table<T> {
	/// Track ids, in the order they were first seen
	tracks: Vec<T>,
	/// `rows[i]` are `(counterpart index, offsets of counterpart relative to tracks[i])`
	rows: Vec<Vec<(usize, Vec<f64>)>>,
	/// Track id -> index into `tracks`
	index: HashMap<T, usize>,
}

impl<T: Clone + Eq + Hash> Table<T> {
	fn new() -> Self {
		Self { tracks: Vec::new(), rows: Vec::new(), index: HashMap::new() }
	}

	fn track(&mut self, track: &T) -> usize {
		if let Some(i) = self.index.get(track) {
			return *i;
		}
		let i = self.tracks.len();
		self.tracks.push(track.clone());
		self.rows.push(Vec::new());
		self.index.insert(track.clone(), i);
		i
	}

	fn push(&mut self, row: usize, col: usize, offset: f64) {
		let cells = &mut self.rows[row];
		match cells.iter_mut().find(|(c, _)| *c == col) {
			Some((_, offsets)) => offsets.push(offset),
			None => cells.push((col, vec![offset])),
		}
	}
}

//---------------------------------------------------------------------------------------------------- resolve
/// Pick a reference track and reduce every other track's
/// observed offsets against it to a single offset.
///
/// The reference is the track matched against the most distinct
/// other tracks. Ties go to the track with more total observations,
/// then to the track seen first.
///
/// Each other track gets the element at index `len / 2` of its
/// ascending-sorted offsets against the reference. Tracks never
/// matched directly against the reference are left out, offsets
/// are not chained through other tracks.
///
/// Returns `None` when there are no usable observations.
///
/// ```rust
/// # use realign::align::*;
/// let resolved = resolve([
///     TrackOffset::new("a", "b", 1.0),
///     TrackOffset::new("a", "b", 1.2),
///     TrackOffset::new("a", "b", 0.9),
///     TrackOffset::new("a", "c", -3.0),
/// ]).unwrap();
///
/// assert_eq!(resolved.reference, "a");
/// assert_eq!(resolved.get(&"a"), Some(0.0));
/// assert_eq!(resolved.get(&"b"), Some(1.0));
/// assert_eq!(resolved.get(&"c"), Some(-3.0));
/// ```
pub fn resolve<T, I>(observations: I) -> Option<Resolved<T>>
where
	T: Clone + Eq + Hash,
	I: IntoIterator<Item = TrackOffset<T>>,
{
	let mut table = Table::new();

	for TrackOffset { a, b, offset } in observations {
		if a == b || !offset.is_finite() {
			trace2!("resolve - skipping observation, offset: {offset}");
			continue;
		}
		let ia = table.track(&a);
		let ib = table.track(&b);
		table.push(ia, ib, offset);
		table.push(ib, ia, -offset);
	}

	// (distinct counterparts, total observations)
	let score = |row: &Vec<(usize, Vec<f64>)>| {
		(row.len(), row.iter().map(|(_, o)| o.len()).sum::<usize>())
	};

	let mut reference = None;
	for (i, row) in table.rows.iter().enumerate() {
		if row.is_empty() {
			continue;
		}
		match reference {
			Some((_, best)) if score(row) <= best => (),
			_ => reference = Some((i, score(row))),
		}
	}
	let (reference, (counterparts, _)) = reference?;

	debug2!("resolve - {} tracks, reference index {reference} with {counterparts} counterparts", table.tracks.len());

	let mut offsets = Vec::with_capacity(counterparts + 1);
	offsets.push((table.tracks[reference].clone(), 0.0));

	let mut row = std::mem::take(&mut table.rows[reference]);
	row.sort_by_key(|(col, _)| *col);
	for (col, mut observed) in row {
		observed.sort_unstable_by(f64::total_cmp);
		offsets.push((table.tracks[col].clone(), observed[observed.len() / 2]));
	}

	Some(Resolved {
		reference: table.tracks[reference].clone(),
		offsets,
	})
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn empty() {
		assert_eq!(resolve(Vec::<TrackOffset<u8>>::new()), None);
		assert_eq!(resolve([TrackOffset::new(1, 1, 0.5)]), None);
	}

	#[test]
	fn most_counterparts_is_reference() {
		let resolved = resolve([
			TrackOffset::new("b", "c", 7.0),
			TrackOffset::new("a", "b", 1.0),
			TrackOffset::new("a", "b", 1.2),
			TrackOffset::new("a", "b", 0.9),
			TrackOffset::new("a", "c", 2.0),
			TrackOffset::new("d", "a", 4.0),
		]).unwrap();

		assert_eq!(resolved.reference, "a");
		assert_eq!(resolved.offsets, vec![
			("a", 0.0),
			("b", 1.0),
			("c", 2.0),
			// `d` was matched as the first track, so flipped.
			("d", -4.0),
		]);
	}

	#[test]
	fn even_count_takes_upper_middle() {
		let resolved = resolve([
			TrackOffset::new(0, 1, 4.0),
			TrackOffset::new(0, 1, 1.0),
			TrackOffset::new(0, 1, 3.0),
			TrackOffset::new(0, 1, 2.0),
		]).unwrap();
		assert_eq!(resolved.get(&1), Some(3.0));
	}

	#[test]
	fn tie_breaks_on_observations_then_order() {
		// Everyone has 1 counterpart, `r` and `s` have more observations.
		let resolved = resolve([
			TrackOffset::new("p", "q", 1.0),
			TrackOffset::new("r", "s", 2.0),
			TrackOffset::new("r", "s", 3.0),
		]).unwrap();
		assert_eq!(resolved.reference, "r");
		assert_eq!(resolved.offsets, vec![("r", 0.0), ("s", 3.0)]);
		assert_eq!(resolved.get(&"p"), None);

		// Equal in everything, first seen wins.
		let resolved = resolve([TrackOffset::new("x", "y", 1.0)]).unwrap();
		assert_eq!(resolved.reference, "x");
		assert_eq!(resolved.get(&"y"), Some(1.0));
	}

	#[test]
	fn not_chained() {
		let resolved = resolve([
			TrackOffset::new("a", "b", 1.0),
			TrackOffset::new("a", "c", 1.0),
			TrackOffset::new("c", "e", 1.0),
			TrackOffset::new("a", "d", 1.0),
		]).unwrap();
		assert_eq!(resolved.reference, "a");
		assert_eq!(resolved.get(&"e"), None);
	}

	#[test]
	fn reference_seen_only_as_second_track() {
		let resolved = resolve([
			TrackOffset::new("b", "hub", 1.0),
			TrackOffset::new("c", "hub", 2.0),
			TrackOffset::new("d", "hub", -0.5),
		]).unwrap();
		assert_eq!(resolved.reference, "hub");
		assert_eq!(resolved.get(&"hub"), Some(0.0));
		assert_eq!(resolved.get(&"b"), Some(-1.0));
		assert_eq!(resolved.get(&"c"), Some(-2.0));
		assert_eq!(resolved.get(&"d"), Some(0.5));
	}
}
