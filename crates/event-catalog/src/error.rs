use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{skipped} of {total} rows in {stage} were skipped, exceeding the {threshold:.0}% failure threshold")]
    SkipThresholdExceeded {
        stage: &'static str,
        skipped: usize,
        total: usize,
        threshold: f64,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Fails the stage if the skipped fraction exceeds `threshold` (spec.md
/// §4.C: "a threshold on skipped fraction fails the stage").
pub fn check_skip_threshold(stage: &'static str, skipped: usize, total: usize, threshold: f64) -> Result<()> {
    if total > 0 && (skipped as f64 / total as f64) > threshold {
        return Err(CatalogError::SkipThresholdExceeded {
            stage,
            skipped,
            total,
            threshold: threshold * 100.0,
        });
    }
    Ok(())
}
