use crate::{FileStream, LazyStream, MemoryStream, Stream};

/// A value that can be appended onto a
/// [`StackedStream`](super::StackedStream).
///
/// Streams are used as-is. Raw content is wrapped through the lazy path
/// into an in-memory component. The wrapping choice is resolved here,
/// once, when the source is appended, not on every stream call.
pub enum StackSource {
    /// A component stream, used as-is.
    Stream(Box<dyn Stream>),
    /// Raw bytes, wrapped into a lazily materialized in-memory stream.
    Content(Vec<u8>),
}

impl StackSource {
    /// Resolve the source into a pushable component stream.
    pub(crate) fn into_stream(self) -> Box<dyn Stream> {
        match self {
            StackSource::Stream(stream) => stream,
            StackSource::Content(content) => {
                Box::new(LazyStream::with_content(content))
            }
        }
    }
}

impl From<&str> for StackSource {
    fn from(content: &str) -> Self {
        StackSource::Content(content.as_bytes().to_vec())
    }
}

impl From<String> for StackSource {
    fn from(content: String) -> Self {
        StackSource::Content(content.into_bytes())
    }
}

impl From<Vec<u8>> for StackSource {
    fn from(content: Vec<u8>) -> Self {
        StackSource::Content(content)
    }
}

impl From<&[u8]> for StackSource {
    fn from(content: &[u8]) -> Self {
        StackSource::Content(content.to_vec())
    }
}

impl From<Box<dyn Stream>> for StackSource {
    fn from(stream: Box<dyn Stream>) -> Self {
        StackSource::Stream(stream)
    }
}

impl From<MemoryStream> for StackSource {
    fn from(stream: MemoryStream) -> Self {
        StackSource::Stream(Box::new(stream))
    }
}

impl From<FileStream> for StackSource {
    fn from(stream: FileStream) -> Self {
        StackSource::Stream(Box::new(stream))
    }
}

impl From<LazyStream> for StackSource {
    fn from(stream: LazyStream) -> Self {
        StackSource::Stream(Box::new(stream))
    }
}
