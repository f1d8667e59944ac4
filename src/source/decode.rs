//! Decode audio files with `symphonia`.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	error::SourceError,
	macros::{debug2,error2,warn2},
	source::{AudioSource,source::check_frames},
};
use std::{
	fs::File,
	io::Cursor,
	path::Path,
};
use symphonia::core::{
	audio::SampleBuffer,
	codecs::{Decoder,DecoderOptions,CODEC_TYPE_NULL},
	errors::Error,
	formats::{FormatReader,FormatOptions},
	io::{MediaSourceStream,MediaSourceStreamOptions},
	probe::Hint,
	meta::{MetadataOptions,Limit},
};
use symphonia::default::{get_probe,get_codecs};

//---------------------------------------------------------------------------------------------------- Constants
// `symphonia` format options.
//
// These are some misc options `Symphonia` needs.
// Most of these are the default values, but as `const`.

/// Gapless on, so the decoded length matches the real audio length.
pub(crate) const FORMAT_OPTIONS: FormatOptions = FormatOptions {
	enable_gapless: true,
	prebuild_seek_index: false,
	seek_index_fill_rate: 20,
};

/// Metadata is not used, but `symphonia` still parses it.
pub(crate) const METADATA_OPTIONS: MetadataOptions = MetadataOptions {
	limit_metadata_bytes: Limit::Default,
	limit_visual_bytes: Limit::Default,
};

/// No checksum verification.
pub(crate) const DECODER_OPTIONS: DecoderOptions = DecoderOptions {
	verify: false,
};

/// 64 KiB read-ahead.
pub(crate) const MEDIA_SOURCE_STREAM_OPTIONS: MediaSourceStreamOptions = MediaSourceStreamOptions {
	buffer_len: 64 * 1024,
};

//---------------------------------------------------------------------------------------------------- DecodedSource
/// An [`AudioSource`] decoding a file (or bytes) packet by packet.
///
/// The first track with a known codec is decoded, samples
/// are converted to interleaved `f32`.
///
/// Packets that fail to decode are skipped with a warning,
/// the end of the container is the end of the source.
pub struct DecodedSource {
	/// The container.
	reader: Box<dyn FormatReader>,
	/// The decoder for `track`.
	decoder: Box<dyn Decoder>,
	/// The track being decoded.
	track: u32,
	/// The track's sample rate.
	sample_rate: u32,
	/// The track's channel count.
	channels: usize,
	/// Conversion buffer, re-created when a packet outgrows it.
	buffer: Option<SampleBuffer<f32>>,
	/// How many samples `buffer` holds.
	buffer_len: usize,
	/// Decoded samples not handed out yet.
	pending: Vec<f32>,
	/// Read position into `pending`.
	cursor: usize,
	/// The container has no more packets.
	done: bool,
}

impl std::fmt::Debug for DecodedSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DecodedSource")
			.field("track", &self.track)
			.field("sample_rate", &self.sample_rate)
			.field("channels", &self.channels)
			.field("pending", &(self.pending.len() - self.cursor))
			.field("done", &self.done)
			.finish_non_exhaustive()
	}
}

impl DecodedSource {
	/// Open and probe the file at `path`.
	///
	/// The file extension (if any) is given to the prober as a hint.
	///
	/// # Errors
	/// The file could not be opened, was not audio, or
	/// has no track with a supported codec.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
		let path = path.as_ref();
		let file = File::open(path)?;
		let mss  = MediaSourceStream::new(Box::new(file), MEDIA_SOURCE_STREAM_OPTIONS);

		let mut hint = Hint::new();
		if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
			hint.with_extension(extension);
		}

		Self::probe(mss, &hint)
	}

	/// Probe audio already in memory.
	///
	/// # Errors
	/// The bytes were not audio, or had no track with a supported codec.
	pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, SourceError> {
		let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), MEDIA_SOURCE_STREAM_OPTIONS);
		Self::probe(mss, &Hint::new())
	}

	fn probe(mss: MediaSourceStream, hint: &Hint) -> Result<Self, SourceError> {
		let result = get_probe().format(
			hint,
			mss,
			&FORMAT_OPTIONS,
			&METADATA_OPTIONS,
		)?;

		let reader = result.format;
		let codecs = get_codecs();

		// Select the first track with a known codec.
		let Some(track) = reader
			.tracks()
			.iter()
			.find(|t| {
				// Make sure it is not null.
				t.codec_params.codec != CODEC_TYPE_NULL &&
				// And it exists in our codec registry.
				codecs.get_codec(t.codec_params.codec).is_some()
			})
		else {
			return Err(SourceError::Track);
		};

		let Some(sample_rate) = track.codec_params.sample_rate else {
			return Err(SourceError::SampleRate);
		};

		let Some(channels) = track.codec_params.channels.map(|c| c.count()) else {
			return Err(SourceError::Channels);
		};

		let decoder = codecs.make(&track.codec_params, &DECODER_OPTIONS)?;
		let track   = track.id;

		debug2!("DecodedSource - track {track}, {sample_rate}hz, {channels} channels");

		Ok(Self {
			reader,
			decoder,
			track,
			sample_rate,
			channels,
			buffer: None,
			buffer_len: 0,
			pending: Vec::new(),
			cursor: 0,
			done: false,
		})
	}

	/// Decode the next packet of our track into `pending`.
	///
	/// Returns `false` once there are no packets left.
	fn decode_next(&mut self) -> Result<bool, SourceError> {
		loop {
			let packet = match self.reader.next_packet() {
				Ok(packet) => packet,
				// This is how `symphonia` signals the end of a container.
				Err(Error::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(false),
				Err(e) => return Err(e.into()),
			};

			if packet.track_id() != self.track {
				continue;
			}

			let decoded = match self.decoder.decode(&packet) {
				Ok(decoded) => decoded,
				Err(Error::DecodeError(e)) => {
					warn2!("DecodedSource - skipping undecodable packet: {e}");
					continue;
				},
				Err(e) => {
					error2!("DecodedSource - decoder failed: {e}");
					return Err(e.into());
				},
			};

			let spec   = *decoded.spec();
			let frames = decoded.capacity();
			let needed = frames * spec.channels.count();
			let buffer = match &mut self.buffer {
				Some(buffer) if self.buffer_len >= needed => buffer,
				slot => {
					self.buffer_len = needed;
					slot.insert(SampleBuffer::new(frames as u64, spec))
				},
			};
			buffer.copy_interleaved_ref(decoded);

			self.pending.clear();
			self.pending.extend_from_slice(buffer.samples());
			self.cursor = 0;
			return Ok(true);
		}
	}
}

impl AudioSource for DecodedSource {
	fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	fn channels(&self) -> usize {
		self.channels
	}

	fn read(&mut self, out: &mut [f32]) -> Result<usize, SourceError> {
		check_frames(out.len(), self.channels)?;

		let mut written = 0;
		while written < out.len() {
			if self.cursor == self.pending.len() {
				if self.done || !self.decode_next()? {
					self.done = true;
					break;
				}
				continue;
			}

			let len = (out.len() - written).min(self.pending.len() - self.cursor);
			out[written..written + len].copy_from_slice(&self.pending[self.cursor..self.cursor + len]);
			self.cursor += len;
			written     += len;
		}

		Ok(written / self.channels)
	}
}
