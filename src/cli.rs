//! Command line interface.

//---------------------------------------------------------------------------------------------------- Use
use clap::{Args,Parser,Subcommand};
use std::path::PathBuf;
use realign::config::{DEFAULT_ANCHOR_SPACING,DEFAULT_SEARCH_WIDTH};

//---------------------------------------------------------------------------------------------------- Cli
/// Time-warp one recording onto another.
#[derive(Parser,Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Command,
}

/// Available commands.
#[derive(Subcommand,Debug)]
pub enum Command {
	/// Render WARP so its timing follows BASE
	Warp(WarpCommand),

	/// Resolve pairwise fingerprint offsets into one offset per track
	Offsets(OffsetsCommand),
}

//---------------------------------------------------------------------------------------------------- Warp
/// Render `warp` so its timing follows `base`.
///
/// `comparison` and `warp` share a timeline (e.g. a mix and one
/// of its stems), the alignment maps `comparison` onto `base`.
#[derive(Parser,Debug)]
pub struct WarpCommand {
	/// The reference recording (track 2)
	pub base: PathBuf,

	/// The recording that was aligned against BASE (track 1)
	pub comparison: PathBuf,

	/// The audio to render, on the same timeline as COMPARISON
	pub warp: PathBuf,

	/// Where to write the rendered WAV
	pub output: PathBuf,

	#[command(flatten)]
	pub alignment: Alignment,

	/// Search width of the alignment engine in seconds, also used for cue trimming
	#[arg(long, default_value_t = DEFAULT_SEARCH_WIDTH.as_secs_f64())]
	pub search_width: f64,

	/// Distance between anchors, in path points
	#[arg(long, default_value_t = DEFAULT_ANCHOR_SPACING)]
	pub anchor_spacing: usize,

	/// Fingerprint matches with a bit error rate above this are dropped
	#[arg(long, default_value_t = 0.35)]
	pub ber_threshold: f64,

	/// Drop the start of the path where it hugs the interval start
	#[arg(long)]
	pub cue_in: bool,

	/// Drop the end of the path where it hugs the interval end
	#[arg(long)]
	pub cue_out: bool,

	/// Do not median-smooth the anchors
	#[arg(long)]
	pub no_smoothing: bool,

	/// Change speed (pitch follows) instead of tempo
	#[arg(long)]
	pub speed: bool,

	/// Do not pad the output with silence up to the first match
	#[arg(long)]
	pub no_pad: bool,

	/// Score every anchor by correlating BASE and COMPARISON (decodes both into memory)
	#[arg(long)]
	pub similarity: bool,
}

/// Where the alignment comes from, exactly one is required.
#[derive(Args,Debug)]
#[group(required = true, multiple = false)]
pub struct Alignment {
	/// CSV alignment path, columns `time_a,time_b` (seconds, COMPARISON then BASE)
	#[arg(long)]
	pub path: Option<PathBuf>,

	/// CSV fingerprint matches, columns `time1,time2,ber` (seconds, COMPARISON then BASE)
	#[arg(long)]
	pub matches: Option<PathBuf>,
}

//---------------------------------------------------------------------------------------------------- Offsets
/// Resolve pairwise offsets.
#[derive(Parser,Debug)]
pub struct OffsetsCommand {
	/// CSV fingerprint offsets, columns `track_a,track_b,offset,ber`
	pub matches: PathBuf,

	/// Offsets with a bit error rate above this are dropped
	#[arg(long, default_value_t = 0.35)]
	pub ber_threshold: f64,
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn debug_assert() {
		Cli::command().debug_assert();
	}

	#[test]
	fn warp_needs_one_alignment() {
		assert!(Cli::try_parse_from(["realign", "warp", "a", "b", "c", "d"]).is_err());
		assert!(Cli::try_parse_from(["realign", "warp", "a", "b", "c", "d", "--path", "p", "--matches", "m"]).is_err());

		let cli = Cli::try_parse_from(["realign", "warp", "a", "b", "c", "d", "--path", "p.csv", "--cue-in"]).unwrap();
		let Command::Warp(warp) = cli.command else {
			panic!("expected warp");
		};
		assert_eq!(warp.alignment.path, Some(PathBuf::from("p.csv")));
		assert!(warp.cue_in);
		assert!(!warp.cue_out);
		assert_eq!(warp.anchor_spacing, DEFAULT_ANCHOR_SPACING);
		assert_eq!(warp.search_width, 30.0);
	}
}
