//---------------------------------------------------------------------------------------------------- use
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	EnumString,
	IntoStaticStr,
};

#[allow(unused_imports)] // docs
use crate::render::Varispeed;

//---------------------------------------------------------------------------------------------------- State
/// Where a [`Varispeed`] is in its lifecycle.
///
/// ```text
///            rate == 0                  source returns 0        engine empty
/// Idle <--------------> Streaming ------------------> Draining -------------> Exhausted
///  ^                                                      |                       |
///  +------------------------------------------------------+-----------------------+
///                                  rate == 0
/// ```
/// Every non-`Idle` state goes to `Idle` on a read at rate `0`,
/// and back to where it was on the next read at any other rate.
#[derive(Copy,Clone,Debug,Default,PartialEq,PartialOrd,Eq,Ord,Hash)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,EnumString,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum State {
	/// Rate is `0`, reads return silence, the engine is untouched
	Idle,
	#[default]
	/// The source still has audio, reads pull from it as needed
	Streaming,
	/// The source ended and the engine was flushed, what it still holds is handed out
	Draining,
	/// Nothing is left, reads return `0` frames
	Exhausted,
}

impl State {
	#[inline]
	#[must_use]
	/// `true` once no more audio will come out.
	pub const fn is_exhausted(self) -> bool {
		matches!(self, Self::Exhausted)
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use std::str::FromStr;
	use strum::{EnumCount,IntoEnumIterator};

	#[test]
	fn strings() {
		assert_eq!(State::COUNT, 4);
		assert_eq!(State::iter().map(|s| s.to_string()).collect::<Vec<_>>(), ["idle", "streaming", "draining", "exhausted"]);
		assert_eq!(State::from_str("draining").unwrap(), State::Draining);
		assert_eq!(State::default(), State::Streaming);
	}
}
