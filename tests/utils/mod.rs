#![allow(dead_code)]

use bytestack::{MemoryStream, Resource, Stream, StreamError, StreamResult};
use std::io::SeekFrom;

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Readable stream over fixed content that refuses to seek.
///
/// `rewind()` silently resets the position, the way a forward-only
/// source with a replayable buffer would, while `seek()` fails. Unlike
/// the streams of the crate, end-of-data is reported eagerly.
pub struct NotSeekableStream {
    content: Vec<u8>,
    pos: usize,
}

impl NotSeekableStream {
    pub fn new<T: Into<Vec<u8>>>(content: T) -> Self {
        NotSeekableStream {
            content: content.into(),
            pos: 0,
        }
    }
}

impl Stream for NotSeekableStream {
    fn is_readable(&mut self) -> bool {
        true
    }

    fn is_writable(&mut self) -> bool {
        false
    }

    fn is_seekable(&mut self) -> bool {
        false
    }

    fn size(&mut self) -> Option<u64> {
        Some(self.content.len() as u64)
    }

    fn eof(&mut self) -> bool {
        self.pos == self.content.len()
    }

    fn tell(&mut self) -> StreamResult<u64> {
        Ok(self.pos as u64)
    }

    fn read(&mut self, length: usize) -> StreamResult<Vec<u8>> {
        let end = self.content.len().min(self.pos + length);
        let chunk = self.content[self.pos..end].to_vec();
        self.pos = end;
        Ok(chunk)
    }

    fn write(&mut self, _data: &[u8]) -> StreamResult<usize> {
        Err(StreamError::NotWritable)
    }

    fn seek(&mut self, _pos: SeekFrom) -> StreamResult<u64> {
        Err(StreamError::NotSeekable(
            "fixed content stream".to_string(),
        ))
    }

    fn rewind(&mut self) -> StreamResult<()> {
        self.pos = 0;
        Ok(())
    }

    fn close(&mut self) {
        self.pos = 0;
    }

    fn detach(&mut self) -> Option<Resource> {
        self.pos = 0;
        None
    }
}

/// Stream that delegates to a memory stream but hides its size.
pub struct UnknownSizeStream {
    inner: MemoryStream,
}

impl UnknownSizeStream {
    pub fn new<T: Into<Vec<u8>>>(content: T) -> Self {
        UnknownSizeStream {
            inner: MemoryStream::with_content(content),
        }
    }
}

impl Stream for UnknownSizeStream {
    fn is_readable(&mut self) -> bool {
        self.inner.is_readable()
    }

    fn is_writable(&mut self) -> bool {
        false
    }

    fn is_seekable(&mut self) -> bool {
        self.inner.is_seekable()
    }

    fn size(&mut self) -> Option<u64> {
        None
    }

    fn eof(&mut self) -> bool {
        self.inner.eof()
    }

    fn tell(&mut self) -> StreamResult<u64> {
        self.inner.tell()
    }

    fn read(&mut self, length: usize) -> StreamResult<Vec<u8>> {
        self.inner.read(length)
    }

    fn write(&mut self, data: &[u8]) -> StreamResult<usize> {
        self.inner.write(data)
    }

    fn seek(&mut self, pos: SeekFrom) -> StreamResult<u64> {
        self.inner.seek(pos)
    }

    fn close(&mut self) {
        self.inner.close()
    }

    fn detach(&mut self) -> Option<Resource> {
        self.inner.detach()
    }
}

/// Write-only stream, used to exercise push validation.
pub struct UnreadableStream;

impl Stream for UnreadableStream {
    fn is_readable(&mut self) -> bool {
        false
    }

    fn is_writable(&mut self) -> bool {
        true
    }

    fn is_seekable(&mut self) -> bool {
        false
    }

    fn size(&mut self) -> Option<u64> {
        None
    }

    fn eof(&mut self) -> bool {
        true
    }

    fn tell(&mut self) -> StreamResult<u64> {
        Ok(0)
    }

    fn read(&mut self, _length: usize) -> StreamResult<Vec<u8>> {
        Err(StreamError::NotReadable)
    }

    fn write(&mut self, data: &[u8]) -> StreamResult<usize> {
        Ok(data.len())
    }

    fn seek(&mut self, _pos: SeekFrom) -> StreamResult<u64> {
        Err(StreamError::NotSeekable("write-only sink".to_string()))
    }

    fn close(&mut self) {}

    fn detach(&mut self) -> Option<Resource> {
        None
    }
}

/// Stream yielding one byte per read, with end-of-data only detected by
/// a failed read. Exercises the exhausted-pending-advance transition of
/// the stacked read loop.
pub struct TrickleStream {
    content: Vec<u8>,
    pos: usize,
    done: bool,
}

impl TrickleStream {
    pub fn new<T: Into<Vec<u8>>>(content: T) -> Self {
        TrickleStream {
            content: content.into(),
            pos: 0,
            done: false,
        }
    }
}

impl Stream for TrickleStream {
    fn is_readable(&mut self) -> bool {
        true
    }

    fn is_writable(&mut self) -> bool {
        false
    }

    fn is_seekable(&mut self) -> bool {
        false
    }

    fn size(&mut self) -> Option<u64> {
        Some(self.content.len() as u64)
    }

    fn eof(&mut self) -> bool {
        self.done
    }

    fn tell(&mut self) -> StreamResult<u64> {
        Ok(self.pos as u64)
    }

    fn read(&mut self, length: usize) -> StreamResult<Vec<u8>> {
        if length == 0 {
            return Ok(Vec::new());
        }
        if self.pos == self.content.len() {
            self.done = true;
            return Ok(Vec::new());
        }
        let chunk = self.content[self.pos..self.pos + 1].to_vec();
        self.pos += 1;
        Ok(chunk)
    }

    fn write(&mut self, _data: &[u8]) -> StreamResult<usize> {
        Err(StreamError::NotWritable)
    }

    fn seek(&mut self, _pos: SeekFrom) -> StreamResult<u64> {
        Err(StreamError::NotSeekable("forward-only stream".to_string()))
    }

    fn rewind(&mut self) -> StreamResult<()> {
        self.pos = 0;
        self.done = false;
        Ok(())
    }

    fn close(&mut self) {
        self.pos = 0;
        self.done = true;
    }

    fn detach(&mut self) -> Option<Resource> {
        None
    }
}
