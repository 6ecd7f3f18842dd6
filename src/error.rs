use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CrossFadeError {
    #[error("invalid timeout {0:?}: expected a whole number of milliseconds")]
    InvalidTimeout(String),

    #[error("cross-fade was torn down")]
    Unmounted,
}
