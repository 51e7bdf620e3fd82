//! Construction errors.

/// Error returned when a map is configured with unusable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The root table needs at least one slot to take a modulus against.
    ZeroRootSize,
    /// A leaf must be allowed at least two items, otherwise a split can
    /// never separate them.
    DegreeTooSmall {
        /// The rejected degree.
        degree: usize,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroRootSize => write!(f, "root table size must be at least 1"),
            ConfigError::DegreeTooSmall { degree } => {
                write!(f, "split degree must be at least 2 (got {})", degree)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type for map construction.
pub type Result<T> = std::result::Result<T, ConfigError>;
