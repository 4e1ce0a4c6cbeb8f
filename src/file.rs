use crate::{Metadata, MetadataValue, Resource, Stream, StreamError, StreamResult};
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A [`Stream`] implementation based on a file.
///
/// Read and write access are fixed when the stream is opened and
/// reported by the capability accessors; there is no mode string to
/// parse back. The position is tracked by the stream itself so that
/// `tell()` does not reach for the descriptor.
///
/// Like [`MemoryStream`](crate::MemoryStream), end-of-data is detected
/// lazily: `eof()` turns true once a read comes back empty, and any seek
/// clears it.
pub struct FileStream {
    file: Option<File>,
    path: Option<PathBuf>,
    readable: bool,
    writable: bool,
    pos: u64,
    eof: bool,
}

impl FileStream {
    /// Open the file pointed by `path` for reading.
    /// The file must exist.
    pub fn open<P: AsRef<Path>>(path: P) -> StreamResult<Self> {
        let file = OpenOptions::new().read(true).open(path.as_ref())?;
        debug!("opened {} read-only", path.as_ref().display());
        Ok(Self::with_file(
            file,
            Some(path.as_ref().to_path_buf()),
            true,
            false,
        ))
    }

    /// Open or create the file pointed by `path` for reading and
    /// writing. Existing content is kept.
    pub fn create<P: AsRef<Path>>(path: P) -> StreamResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path.as_ref())?;
        debug!("opened {} read-write", path.as_ref().display());
        Ok(Self::with_file(
            file,
            Some(path.as_ref().to_path_buf()),
            true,
            true,
        ))
    }

    /// Read/write stream over an anonymous temporary file, removed by
    /// the operating system when the stream is dropped.
    #[cfg(feature = "tempfile")]
    pub fn temporary() -> StreamResult<Self> {
        Ok(Self::with_file(tempfile::tempfile()?, None, true, true))
    }

    fn with_file(
        file: File,
        path: Option<PathBuf>,
        readable: bool,
        writable: bool,
    ) -> Self {
        FileStream {
            file: Some(file),
            path,
            readable,
            writable,
            pos: 0,
            eof: false,
        }
    }

    fn file_mut(&mut self) -> StreamResult<&mut File> {
        self.file.as_mut().ok_or(StreamError::Detached)
    }
}

impl Stream for FileStream {
    fn is_readable(&mut self) -> bool {
        self.file.is_some() && self.readable
    }

    fn is_writable(&mut self) -> bool {
        self.file.is_some() && self.writable
    }

    fn is_seekable(&mut self) -> bool {
        self.file.is_some()
    }

    fn size(&mut self) -> Option<u64> {
        self.file
            .as_ref()
            .and_then(|file| file.metadata().ok())
            .map(|meta| meta.len())
    }

    fn eof(&mut self) -> bool {
        self.file.is_none() || self.eof
    }

    fn tell(&mut self) -> StreamResult<u64> {
        self.file_mut()?;
        Ok(self.pos)
    }

    fn read(&mut self, length: usize) -> StreamResult<Vec<u8>> {
        if self.file.is_none() {
            return Err(StreamError::Detached);
        }
        if !self.readable {
            return Err(StreamError::NotReadable);
        }
        if length == 0 {
            return Ok(Vec::new());
        }
        let mut buf = vec![0u8; length];
        let read = self.file_mut()?.read(buf.as_mut_slice())?;
        buf.truncate(read);
        self.pos += read as u64;
        if read == 0 {
            self.eof = true;
        }
        Ok(buf)
    }

    fn write(&mut self, data: &[u8]) -> StreamResult<usize> {
        if self.file.is_none() {
            return Err(StreamError::Detached);
        }
        if !self.writable {
            return Err(StreamError::NotWritable);
        }
        let written = self.file_mut()?.write(data)?;
        self.pos += written as u64;
        Ok(written)
    }

    fn seek(&mut self, pos: SeekFrom) -> StreamResult<u64> {
        let position = self.file_mut()?.seek(pos)?;
        self.pos = position;
        self.eof = false;
        Ok(position)
    }

    fn metadata(&mut self) -> Metadata {
        let mut meta = Metadata::new();
        meta.insert("type".to_string(), MetadataValue::Text("file".to_string()));
        meta.insert(
            "readable".to_string(),
            MetadataValue::Bool(self.file.is_some() && self.readable),
        );
        meta.insert(
            "writable".to_string(),
            MetadataValue::Bool(self.file.is_some() && self.writable),
        );
        meta.insert(
            "seekable".to_string(),
            MetadataValue::Bool(self.file.is_some()),
        );
        if let Some(path) = &self.path {
            meta.insert(
                "uri".to_string(),
                MetadataValue::Text(path.display().to_string()),
            );
        }
        meta
    }

    fn close(&mut self) {
        if self.file.take().is_some() {
            debug!("closed file stream");
        }
        self.pos = 0;
    }

    fn detach(&mut self) -> Option<Resource> {
        self.pos = 0;
        self.file.take().map(Resource::File)
    }
}
