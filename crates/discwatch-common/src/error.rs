//! Error types shared by the discwatch crates.
//!
//! Startup failures ([`Error::Unavailable`], [`Error::NotFound`]) stop the
//! watcher. Per-device failures ([`Error::PropertyMissing`],
//! [`Error::Allocation`]) only skip the device they occurred on.

/// Common error type for discwatch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The hardware-info service could not be opened.
    #[error("Hardware info unavailable: {0}")]
    Unavailable(String),

    /// A required collaborator or entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "playlist", "category node").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// A device advertised a disc but a property needed to describe it was
    /// not resolvable.
    #[error("Device {device} is missing property {property}")]
    PropertyMissing {
        /// Handle of the device being classified.
        device: String,
        /// Property key that could not be read.
        property: String,
    },

    /// The playlist refused to construct a new item.
    #[error("Failed to allocate playlist item: {0}")]
    Allocation(String),

    /// Configuration or input data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a new Unavailable error.
    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a new NotFound error.
    pub fn not_found<E: Into<String>, I: Into<String>>(entity: E, id: I) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a new PropertyMissing error.
    pub fn property_missing<D: Into<String>, P: Into<String>>(device: D, property: P) -> Self {
        Self::PropertyMissing {
            device: device.into(),
            property: property.into(),
        }
    }

    /// Create a new Allocation error.
    pub fn allocation<S: Into<String>>(msg: S) -> Self {
        Self::Allocation(msg.into())
    }

    /// Create a new Validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether this error ends the watcher rather than a single device pass.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::NotFound { .. })
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
