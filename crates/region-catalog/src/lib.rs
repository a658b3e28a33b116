//! Region catalogue builder (spec.md §4.B): fills gaps by differential
//! rotation, computes per-region lifetime and area, trims samples beyond the
//! limb, detects duplicate regions by pairwise overlap, and materialises the
//! final processed bbox table.

pub mod area;
pub mod builder;
pub mod duplicates;
pub mod error;
pub mod gapfill;
pub mod ingest;
pub mod lifetime;
pub mod limb;

pub use builder::build_catalog;
pub use error::{CatalogError, Result};
pub use ingest::{parse_region_series, RawRow};
