//! Alignment path post-processing.
//!
//! Everything here is pure: inputs in, [`Match`]'s out.

mod point;
pub use point::{CorrespondencePoint,Interval,AlignmentPath};

mod matches;
pub use matches::{Match,MatchSource};

mod median;
pub use median::median;

mod process;
pub use process::{process,Window};

mod refine;
pub use refine::refine;

mod offset;
pub use offset::{resolve,TrackOffset,Resolved};
