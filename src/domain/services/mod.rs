//! # Domain Services
//!
//! Domain logic that does not belong to a single entity.
//!
//! ## Services
//!
//! - [`markup_pricing`]: term filtering and markup arithmetic

pub mod markup_pricing;

pub use markup_pricing::{apply_markup, filter_by_term_ceiling, sell_price};
