//! Incremental extraction from an infinite-scroll listing.
//!
//! The engine is split leaf-first:
//!
//! | Part | Module | Role |
//! |------|--------|------|
//! | Views | [`document`] | Typed, read-only queries over a rendered snapshot |
//! | Extractor | [`extractor`] | Posts beyond a skip count -> candidate records |
//! | Controller | [`controller`] | Scroll, extract, filter, decide whether to continue |
//!
//! The controller talks to the page only through [`crate::driver::PageDriver`],
//! so the same loop runs against a live browser or saved snapshots.

pub mod controller;
pub mod document;
pub mod extractor;

#[cfg(test)]
pub(crate) mod fixtures;
