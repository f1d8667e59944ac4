//! Time-warp one recording onto another.
//!
//! `realign` takes the output of an external alignment engine (a dense
//! alignment path, or a sparse list of matched timestamps) and turns it
//! into a time-corrected rendering of an audio stream whose timing tracks
//! a reference recording.
//!
//! The pipeline is:
//!
//! | Stage                          | Input                      | Output                 |
//! |--------------------------------|----------------------------|------------------------|
//! | [`align::process`]             | [`align::AlignmentPath`]   | `Vec<`[`align::Match`]`>` |
//! | [`render::Driver`]             | `&[`[`align::Match`]`]`    | rate changes + reads   |
//! | [`render::Varispeed`]          | an [`source::AudioSource`] | stretched PCM frames   |
//! | [`sink::AudioSink`]            | PCM frames                 | a file, memory, etc    |
//!
//! [`align::resolve`] is a separate, smaller flow that turns pairwise
//! fingerprint offsets into a single offset per track.

//---------------------------------------------------------------------------------------------------- Lints
#![allow(
    clippy::len_zero,
    clippy::type_complexity,
    clippy::module_inception,
)]

#![deny(
    nonstandard_style,
    deprecated,
    missing_docs,
)]

#![warn(
    unused_mut,
    unreachable_pub,
)]

#![forbid(
    unused_unsafe,
    future_incompatible,
    break_with_label_and_loop,
    coherence_leak_check,
    duplicate_macro_attributes,
    exported_private_dependencies,
    for_loops_over_fallibles,
    large_assignments,
    overlapping_range_endpoints,
    semicolon_in_expressions_from_macros,
    redundant_semicolons,
    unconditional_recursion,
    unreachable_patterns,
    unused_allocation,
    unused_braces,
    unused_comparisons,
    unused_doc_comments,
    unused_parens,
    unused_labels,
    while_true,
    keyword_idents,
    non_ascii_idents,
    noop_method_call,
    single_use_lifetimes,
)]

//---------------------------------------------------------------------------------------------------- Public API
pub mod align;
pub mod config;
pub mod error;
pub mod render;
pub mod sink;
pub mod source;
pub mod stretch;

//---------------------------------------------------------------------------------------------------- Private Usage
mod macros;

#[cfg(test)]
mod tests;
