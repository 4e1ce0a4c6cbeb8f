//! Free constructors for the streams of this crate.
//!
//! These helpers cover the common cases: bytes already in memory, a file
//! on disk, a deferred source, or a sequence of sources to present as
//! one stream.
//!
//! ## Examples
//!
//! ```
//! use bytestack::factory;
//! use bytestack::Stream;
//!
//! let mut stream =
//!     factory::stack(["Hello, ".into(), "Besame Mucho".into()]).unwrap();
//! assert_eq!(stream.contents().unwrap(), b"Hello, Besame Mucho");
//! ```

use crate::{
    FileStream, LazySource, LazyStream, MemoryStream, StackSource, StackedStream,
    StreamResult,
};
use std::path::Path;

/// Stream over owned bytes.
pub fn content<T: Into<Vec<u8>>>(content: T) -> MemoryStream {
    MemoryStream::with_content(content)
}

/// Read-only stream over the existing file pointed by `path`.
pub fn file<P: AsRef<Path>>(path: P) -> StreamResult<FileStream> {
    FileStream::open(path)
}

/// Stream materialized from `source` on first access.
pub fn lazy<S: Into<LazySource>>(source: S) -> LazyStream {
    LazyStream::new(source)
}

/// Stacked stream over `sources`, pushed in order.
pub fn stack<I>(sources: I) -> StreamResult<StackedStream>
where
    I: IntoIterator<Item = StackSource>,
{
    StackedStream::from_sources(sources)
}
