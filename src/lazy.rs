use crate::{Metadata, MemoryStream, Resource, Stream, StreamResult};
use std::io::SeekFrom;

/// Facility to spawn streams.
///
/// The factory is handed to a [`LazyStream`] and invoked at most once,
/// when the wrapped stream is first needed. Any
/// `FnMut() -> StreamResult<Box<dyn Stream>>` closure is a factory.
pub trait StreamFactory {
    fn create(&mut self) -> StreamResult<Box<dyn Stream>>;
}

impl<F> StreamFactory for F
where
    F: FnMut() -> StreamResult<Box<dyn Stream>>,
{
    fn create(&mut self) -> StreamResult<Box<dyn Stream>> {
        self()
    }
}

/// Deferred recipe for a stream.
pub enum LazySource {
    /// Bytes served through an in-memory stream.
    Content(Vec<u8>),
    /// Factory invoked on first access.
    Factory(Box<dyn StreamFactory>),
}

impl From<&str> for LazySource {
    fn from(content: &str) -> Self {
        LazySource::Content(content.as_bytes().to_vec())
    }
}

impl From<String> for LazySource {
    fn from(content: String) -> Self {
        LazySource::Content(content.into_bytes())
    }
}

impl From<Vec<u8>> for LazySource {
    fn from(content: Vec<u8>) -> Self {
        LazySource::Content(content)
    }
}

impl From<&[u8]> for LazySource {
    fn from(content: &[u8]) -> Self {
        LazySource::Content(content.to_vec())
    }
}

impl From<Box<dyn StreamFactory>> for LazySource {
    fn from(factory: Box<dyn StreamFactory>) -> Self {
        LazySource::Factory(factory)
    }
}

/// A [`Stream`] that defers the creation of the stream it wraps.
///
/// The wrapped stream is materialized from a [`LazySource`] the first
/// time any stream operation needs it, then memoized: a factory source
/// runs at most once. Every [`Stream`] method delegates to the
/// materialized stream.
///
/// A factory that fails leaves its error to surface from the delegating
/// call; the source is kept so that a later call may try again.
///
/// ## Examples
///
/// ```
/// use bytestack::{LazyStream, Stream};
///
/// let mut stream = LazyStream::with_content("deferred");
/// assert_eq!(stream.size(), Some(8));
/// assert_eq!(stream.read(8).unwrap(), b"deferred");
/// ```
pub struct LazyStream {
    source: Option<LazySource>,
    stream: Option<Box<dyn Stream>>,
}

impl LazyStream {
    /// Lazy stream over any source convertible to a [`LazySource`].
    pub fn new<S: Into<LazySource>>(source: S) -> Self {
        LazyStream {
            source: Some(source.into()),
            stream: None,
        }
    }

    /// Lazy stream over owned bytes.
    pub fn with_content<T: Into<Vec<u8>>>(content: T) -> Self {
        Self::new(LazySource::Content(content.into()))
    }

    /// Lazy stream spawning its underlying stream from `factory` on
    /// first access.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: FnMut() -> StreamResult<Box<dyn Stream>> + 'static,
    {
        Self::new(LazySource::Factory(Box::new(factory)))
    }

    /// The memoized underlying stream, materialized on the first call.
    pub fn stream(&mut self) -> StreamResult<&mut Box<dyn Stream>> {
        if self.stream.is_none() {
            let stream = match self.source.take() {
                None => return Err(crate::StreamError::Detached),
                Some(LazySource::Content(content)) => {
                    Box::new(MemoryStream::with_content(content)) as Box<dyn Stream>
                }
                Some(LazySource::Factory(mut factory)) => match factory.create() {
                    Ok(stream) => stream,
                    Err(e) => {
                        self.source = Some(LazySource::Factory(factory));
                        return Err(e);
                    }
                },
            };
            self.stream = Some(stream);
        }
        match self.stream.as_mut() {
            Some(stream) => Ok(stream),
            None => Err(crate::StreamError::Detached),
        }
    }
}

impl Default for LazyStream {
    fn default() -> Self {
        Self::with_content(Vec::new())
    }
}

impl Stream for LazyStream {
    fn is_readable(&mut self) -> bool {
        self.stream().map(|stream| stream.is_readable()).unwrap_or(false)
    }

    fn is_writable(&mut self) -> bool {
        self.stream().map(|stream| stream.is_writable()).unwrap_or(false)
    }

    fn is_seekable(&mut self) -> bool {
        self.stream().map(|stream| stream.is_seekable()).unwrap_or(false)
    }

    fn size(&mut self) -> Option<u64> {
        self.stream().ok().and_then(|stream| stream.size())
    }

    fn eof(&mut self) -> bool {
        self.stream().map(|stream| stream.eof()).unwrap_or(true)
    }

    fn tell(&mut self) -> StreamResult<u64> {
        self.stream()?.tell()
    }

    fn read(&mut self, length: usize) -> StreamResult<Vec<u8>> {
        self.stream()?.read(length)
    }

    fn write(&mut self, data: &[u8]) -> StreamResult<usize> {
        self.stream()?.write(data)
    }

    fn seek(&mut self, pos: SeekFrom) -> StreamResult<u64> {
        self.stream()?.seek(pos)
    }

    fn rewind(&mut self) -> StreamResult<()> {
        self.stream()?.rewind()
    }

    fn contents(&mut self) -> StreamResult<Vec<u8>> {
        self.stream()?.contents()
    }

    fn metadata(&mut self) -> Metadata {
        self.stream()
            .map(|stream| stream.metadata())
            .unwrap_or_default()
    }

    fn close(&mut self) {
        if let Ok(stream) = self.stream() {
            stream.close();
        }
    }

    fn detach(&mut self) -> Option<Resource> {
        self.stream().ok().and_then(|stream| stream.detach())
    }
}
