use thiserror::Error;

/// Errors reported before any maze state is allocated. Everything past
/// input validation is total; bad cell ids are caller bugs and panic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("maze side must be at least 1, got {0}")]
    InvalidSize(u8),
}
