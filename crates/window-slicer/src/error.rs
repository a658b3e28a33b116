//! `window-slicer` error type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlicerError {
    #[error("region catalogue is empty, nothing to slice")]
    NoRegions,
}

pub type Result<T> = std::result::Result<T, SlicerError>;
