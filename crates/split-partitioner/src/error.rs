//! `split-partitioner` error type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartitionError {
    #[error("region catalogue is empty, nothing to partition")]
    NoRegions,
}

pub type Result<T> = std::result::Result<T, PartitionError>;
