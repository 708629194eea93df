//! Output writers for harvested records.
//!
//! - [`json`]: compact JSON array, for programmatic consumers
//! - [`html`]: a standalone page with an ordered list, for reading
//!
//! Both writers take records already sorted by the caller and preserve that
//! order.

pub mod html;
pub mod json;
