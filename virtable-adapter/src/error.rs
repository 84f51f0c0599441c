use thiserror::Error;

/// Errors returned by [`crate::TableController`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdapterError {
    /// The table configuration was rejected.
    #[error(transparent)]
    Config(#[from] virtable::ConfigError),

    /// The operation needs a host surface; call `mount` first.
    #[error("table is not mounted")]
    NotMounted,

    /// `mount` was called while a host surface is attached; call `dispose` first.
    #[error("table is already mounted")]
    AlreadyMounted,
}
