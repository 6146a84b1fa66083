#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("invalid projection parameters: {0}")]
    InvalidParameters(String),
    #[error("projection of ({x}, {y}) produced a non-finite coordinate")]
    NonFinite { x: f64, y: f64 },
    #[error("latitude iteration did not converge for ({x}, {y})")]
    NoConvergence { x: f64, y: f64 },
}
