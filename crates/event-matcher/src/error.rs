use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error(transparent)]
    Geom(#[from] heliogeom::GeomError),
}

pub type Result<T> = std::result::Result<T, MatcherError>;
