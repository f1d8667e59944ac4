//---------------------------------------------------------------------------------------------------- use
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	EnumString,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- StretchMode
/// Which knob of the elastic engine a playback rate is applied to.
#[derive(Copy,Clone,Debug,Default,PartialEq,PartialOrd,Eq,Ord,Hash)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,EnumString,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StretchMode {
	#[default]
	/// Change duration, keep pitch
	Tempo,
	/// Change duration and pitch together, like a turntable
	Speed,
}

//---------------------------------------------------------------------------------------------------- Profile
/// How [`Varispeed`](crate::render::Varispeed) configures its elastic engine.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile {
	/// Apply rate changes as tempo (pitch-preserving) instead of speed.
	pub use_tempo: bool,
	/// Low-pass before transposing upwards.
	pub anti_alias: bool,
	/// Use a coarse-then-fine overlap search instead of a full one.
	pub quick_seek: bool,
}

impl Profile {
	/// Tempo mode, anti-aliasing on, quick seek on.
	pub const DEFAULT: Self = Self {
		use_tempo:  true,
		anti_alias: true,
		quick_seek: true,
	};

	/// Speed mode, anti-aliasing on, quick seek on.
	pub const SPEED: Self = Self {
		use_tempo:  false,
		anti_alias: true,
		quick_seek: true,
	};

	#[inline]
	#[must_use]
	/// The [`StretchMode`] this profile selects.
	pub const fn mode(&self) -> StretchMode {
		if self.use_tempo {
			StretchMode::Tempo
		} else {
			StretchMode::Speed
		}
	}
}

impl Default for Profile {
	#[inline]
	fn default() -> Self {
		Self::DEFAULT
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use std::str::FromStr;

	#[test]
	fn mode() {
		assert_eq!(Profile::DEFAULT.mode(), StretchMode::Tempo);
		assert_eq!(Profile::SPEED.mode(), StretchMode::Speed);
	}

	#[test]
	fn mode_str() {
		assert_eq!(StretchMode::Tempo.as_ref(), "tempo");
		assert_eq!(StretchMode::from_str("speed").unwrap(), StretchMode::Speed);
	}
}
