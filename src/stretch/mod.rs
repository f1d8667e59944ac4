//! Elastic time-stretch engines.
//!
//! [`Elastic`] is the contract [`Varispeed`](crate::render::Varispeed)
//! drives. [`Stretcher`] is the default implementor:
//!
//! | Stage     | Knob          | Backend                         |
//! |-----------|---------------|---------------------------------|
//! | Tempo     | `set_tempo()` | WSOLA overlap-add (pitch kept)  |
//! | Anti-alias| `set_rate()`  | biquad low-pass, only when `rate > 1` |
//! | Rate      | `set_rate()`  | `rubato` sinc resampler         |

mod elastic;
pub use elastic::Elastic;

mod stretcher;
pub use stretcher::Stretcher;

mod tempo;
mod rate;
mod filter;

cfg_if::cfg_if! {
	if #[cfg(test)] {
		mod dummy;
		pub(crate) use dummy::Dummy;
	}
}
