use crate::{Metadata, MetadataValue, Resource, Stream, StreamError, StreamResult};
use std::io::SeekFrom;

/// A [`Stream`] implementation in a `Vec<u8>`.
///
/// The stream is readable, writable and seekable. Writes overwrite the
/// buffer at the current position and grow it when they run past the
/// end. Seeks are clamped to the buffer bounds.
///
/// End-of-data is detected lazily, the way an operating system stream
/// reports it: `eof()` turns true once a read could not be fully
/// satisfied, not as soon as the position reaches the end of the buffer.
///
/// ## Examples
///
/// ```
/// use bytestack::{MemoryStream, Stream};
///
/// let mut stream = MemoryStream::with_content("stacked");
/// assert_eq!(stream.read(7).unwrap(), b"stacked");
/// assert_eq!(stream.tell().unwrap(), 7);
/// ```
pub struct MemoryStream {
    buf: Option<Vec<u8>>,
    pos: usize,
    eof: bool,
}

impl MemoryStream {
    /// Empty read/write stream.
    pub fn new() -> Self {
        Self::with_content(Vec::new())
    }

    /// Stream over owned bytes, positioned at the start.
    pub fn with_content<T: Into<Vec<u8>>>(content: T) -> Self {
        MemoryStream {
            buf: Some(content.into()),
            pos: 0,
            eof: false,
        }
    }

    fn buffer(&self) -> StreamResult<&Vec<u8>> {
        self.buf.as_ref().ok_or(StreamError::Detached)
    }

    fn buffer_mut(&mut self) -> StreamResult<&mut Vec<u8>> {
        self.buf.as_mut().ok_or(StreamError::Detached)
    }
}

impl Default for MemoryStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream for MemoryStream {
    fn is_readable(&mut self) -> bool {
        self.buf.is_some()
    }

    fn is_writable(&mut self) -> bool {
        self.buf.is_some()
    }

    fn is_seekable(&mut self) -> bool {
        self.buf.is_some()
    }

    fn size(&mut self) -> Option<u64> {
        self.buf.as_ref().map(|buf| buf.len() as u64)
    }

    fn eof(&mut self) -> bool {
        self.buf.is_none() || self.eof
    }

    fn tell(&mut self) -> StreamResult<u64> {
        self.buffer()?;
        Ok(self.pos as u64)
    }

    fn read(&mut self, length: usize) -> StreamResult<Vec<u8>> {
        let pos = self.pos;
        let buf = self.buffer()?;
        if length == 0 {
            return Ok(Vec::new());
        }
        let end = buf.len().min(pos.saturating_add(length));
        let chunk = buf[pos.min(end)..end].to_vec();
        self.pos = end;
        if chunk.len() < length {
            self.eof = true;
        }
        Ok(chunk)
    }

    fn write(&mut self, data: &[u8]) -> StreamResult<usize> {
        let pos = self.pos;
        let buf = self.buffer_mut()?;
        let end = pos + data.len();
        if buf.len() < end {
            buf.resize(end, 0u8);
        }
        buf[pos..end].copy_from_slice(data);
        self.pos = end;
        Ok(data.len())
    }

    fn seek(&mut self, pos: SeekFrom) -> StreamResult<u64> {
        let max = self.buffer()?.len() as i64;
        let target = match pos {
            SeekFrom::Start(offset) => offset as i64,
            SeekFrom::End(offset) => max + offset,
            SeekFrom::Current(offset) => self.pos as i64 + offset,
        };
        let target = target.clamp(0, max) as usize;
        self.pos = target;
        self.eof = false;
        Ok(target as u64)
    }

    fn metadata(&mut self) -> Metadata {
        let mut meta = Metadata::new();
        meta.insert("type".to_string(), MetadataValue::Text("memory".to_string()));
        meta.insert("readable".to_string(), MetadataValue::Bool(self.buf.is_some()));
        meta.insert("writable".to_string(), MetadataValue::Bool(self.buf.is_some()));
        meta.insert("seekable".to_string(), MetadataValue::Bool(self.buf.is_some()));
        meta
    }

    fn close(&mut self) {
        self.buf = None;
        self.pos = 0;
    }

    fn detach(&mut self) -> Option<Resource> {
        self.pos = 0;
        self.buf.take().map(Resource::Buffer)
    }
}
