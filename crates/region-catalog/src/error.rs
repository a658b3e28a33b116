use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("timestamp {0} is not aligned to the 12-minute grid")]
    Misaligned(chrono::NaiveDateTime),
    #[error("region has zero samples remaining after trimming")]
    NoBBoxData,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
