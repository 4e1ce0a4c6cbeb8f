use thiserror::Error;

/// Result type of fallible stream operations.
/// See [`StreamError`].
pub type StreamResult<T> = std::result::Result<T, StreamError>;

/// Errors surfaced by stream operations.
///
/// Every error is returned synchronously by the offending call and none is
/// retried internally. Retry policy, if any, belongs to the component
/// stream layer, not to the combinators of this crate.
#[derive(Error, Debug)]
pub enum StreamError {
    /// A malformed argument: a non-readable component pushed on a stack,
    /// or an invalid stream description handed to a factory.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Read attempted on a stream opened without read access.
    #[error("cannot read from a non-readable stream")]
    NotReadable,
    /// Write attempted on a read-only stream.
    #[error("cannot write to a non-writable stream")]
    NotWritable,
    /// Seek attempted on a stream that cannot seek, or with an unsupported
    /// seek mode.
    #[error("stream is not seekable: {0}")]
    NotSeekable(String),
    /// A component stream failed to restore its position while a seek was
    /// being replayed.
    #[error("failed to restore stream position {position}")]
    Seek {
        position: u64,
        source: Box<StreamError>,
    },
    /// Operation attempted after `close()` or `detach()`.
    #[error("stream is detached")]
    Detached,
    /// Error bubbled up from the operating system.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
