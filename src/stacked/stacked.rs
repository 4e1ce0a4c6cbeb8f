use super::StackSource;
use crate::{Resource, Stream, StreamError, StreamResult};
use log::{debug, trace};
use std::io::SeekFrom;

/// Upper bound on a single discarded read while a seek is replayed.
const REPLAY_CHUNK_SIZE: u64 = 8096;

/// Drain state of the active component inside the read loop.
///
/// A component that returns an empty read without reporting end-of-data
/// is exhausted for composition purposes: it is flagged here and skipped
/// on the next pass instead of being read again forever.
enum DrainState {
    Active,
    ExhaustedPendingAdvance,
}

/// Concatenation of owned component streams presented as one [`Stream`].
///
/// A `StackedStream` owns an ordered sequence of components and reads
/// them back to back: its byte content is the concatenation of the
/// component contents in append order. Components are appended with
/// [`push()`](StackedStream::push) and removed from the back with
/// [`pop()`](StackedStream::pop). Once pushed, a component belongs to
/// the stack, which becomes its only legitimate closer.
///
/// The stack itself is read-only: `write()` fails and `is_writable()`
/// is false, while every component is required to be readable. It is
/// seekable from the start only, and only while every component is
/// itself seekable.
///
/// Seeking is replay based: every component is rewound and the stack
/// re-reads forward, discarding bytes until the target offset. This
/// runs in O(offset), unlike the O(1) a seekable stream usually
/// suggests.
///
/// ## Examples
///
/// ```
/// use bytestack::{StackedStream, Stream};
///
/// let mut stream = StackedStream::from_sources([
///     "Hello, ".into(),
///     "Besame Mucho".into(),
/// ])
/// .unwrap();
///
/// stream.rewind().unwrap();
/// assert_eq!(stream.read(8).unwrap(), b"Hello, B");
/// ```
pub struct StackedStream {
    streams: Vec<Box<dyn Stream>>,
    seekable: bool,
    current: usize,
    pos: u64,
}

impl StackedStream {
    /// Empty stack. An empty stack is seekable and at end-of-data.
    pub fn new() -> Self {
        StackedStream {
            streams: Vec::new(),
            seekable: true,
            current: 0,
            pos: 0,
        }
    }

    /// Stack over `sources`, pushed in order.
    ///
    /// Raw content sources are wrapped through the lazy path (see
    /// [`StackSource`]). Fails with
    /// [`StreamError::InvalidInput`] if a source resolves to a
    /// non-readable stream.
    pub fn from_sources<I>(sources: I) -> StreamResult<Self>
    where
        I: IntoIterator<Item = StackSource>,
    {
        let mut stack = Self::new();
        for source in sources {
            stack.push(source.into_stream())?;
        }
        Ok(stack)
    }

    /// Append a component stream.
    ///
    /// Every component must be independently readable, whether or not
    /// the stack is ever read. The aggregate seekability is updated in
    /// the same call: one non-seekable component makes the whole stack
    /// non-seekable.
    pub fn push(&mut self, mut stream: Box<dyn Stream>) -> StreamResult<()> {
        if !stream.is_readable() {
            return Err(StreamError::InvalidInput(
                "every stacked stream must be readable".to_string(),
            ));
        }
        self.seekable = self.seekable && stream.is_seekable();
        self.streams.push(stream);
        trace!(
            "pushed component {}, stack seekable: {}",
            self.streams.len() - 1,
            self.seekable
        );
        Ok(())
    }

    /// Remove and return the last component, or `None` if the stack is
    /// empty.
    ///
    /// The aggregate seekability is recomputed over the remaining
    /// components (vacuously true when none remain). Removing a
    /// component invalidates any in-progress read position, so the
    /// stack is fully rewound afterward; if the remaining components
    /// cannot seek, the rewind fails with
    /// [`StreamError::NotSeekable`].
    pub fn pop(&mut self) -> StreamResult<Option<Box<dyn Stream>>> {
        let stream = match self.streams.pop() {
            None => return Ok(None),
            Some(stream) => stream,
        };
        self.seekable = self.streams.iter_mut().all(|s| s.is_seekable());
        trace!(
            "popped component {}, stack seekable: {}",
            self.streams.len(),
            self.seekable
        );
        self.rewind()?;
        Ok(Some(stream))
    }

    /// Number of components currently stacked.
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

impl Default for StackedStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream for StackedStream {
    fn is_readable(&mut self) -> bool {
        true
    }

    fn is_writable(&mut self) -> bool {
        false
    }

    fn is_seekable(&mut self) -> bool {
        self.seekable
    }

    /// Sum of the component sizes, or `None` as soon as one component
    /// size is unknown.
    fn size(&mut self) -> Option<u64> {
        let mut total = 0u64;
        for stream in self.streams.iter_mut() {
            total += stream.size()?;
        }
        Some(total)
    }

    /// True when there is no component, or when the active component is
    /// the last one and is itself at end-of-data. A stack with
    /// components left after the active one is never at end-of-data.
    fn eof(&mut self) -> bool {
        if self.streams.is_empty() {
            return true;
        }
        if self.current + 1 < self.streams.len() {
            return false;
        }
        match self.streams.get_mut(self.current) {
            Some(stream) => stream.eof(),
            None => false,
        }
    }

    fn tell(&mut self) -> StreamResult<u64> {
        Ok(self.pos)
    }

    fn read(&mut self, length: usize) -> StreamResult<Vec<u8>> {
        if self.streams.is_empty() || length == 0 {
            return Ok(Vec::new());
        }
        let last = self.streams.len() - 1;
        let mut buffer: Vec<u8> = Vec::new();
        let mut remaining = length;
        let mut state = DrainState::Active;

        while remaining > 0 {
            let exhausted = matches!(state, DrainState::ExhaustedPendingAdvance)
                || self.streams[self.current].eof();
            if exhausted {
                state = DrainState::Active;
                if self.current == last {
                    break;
                }
                self.current += 1;
                continue;
            }
            let chunk = self.streams[self.current].read(remaining)?;
            if chunk.is_empty() {
                // Empty read without end-of-data: exhausted for
                // composition purposes, advance on the next pass.
                state = DrainState::ExhaustedPendingAdvance;
                continue;
            }
            remaining = remaining.saturating_sub(chunk.len());
            buffer.extend_from_slice(&chunk);
        }
        self.pos += buffer.len() as u64;
        Ok(buffer)
    }

    fn write(&mut self, _data: &[u8]) -> StreamResult<usize> {
        Err(StreamError::NotWritable)
    }

    /// Seek from the start of the stacked content.
    ///
    /// Only [`SeekFrom::Start`] is supported. The seek is replayed:
    /// every component is rewound, then the stack reads forward in
    /// requests of at most 8096 bytes, discarding them, until the
    /// target offset or end-of-data. Seeking past the end is not an
    /// error, it lands at end-of-data. The cost is linear in the
    /// target offset.
    fn seek(&mut self, pos: SeekFrom) -> StreamResult<u64> {
        if !self.seekable {
            return Err(StreamError::NotSeekable(
                "not every stacked component is seekable".to_string(),
            ));
        }
        let offset = match pos {
            SeekFrom::Start(offset) => offset,
            SeekFrom::Current(_) | SeekFrom::End(_) => {
                return Err(StreamError::NotSeekable(
                    "a stacked stream only seeks from the start".to_string(),
                ))
            }
        };
        self.pos = 0;
        self.current = 0;
        for stream in self.streams.iter_mut() {
            if let Err(e) = stream.rewind() {
                return Err(StreamError::Seek {
                    position: 0,
                    source: Box::new(e),
                });
            }
        }
        while self.pos < offset && !self.eof() {
            let want = u64::min(REPLAY_CHUNK_SIZE, offset - self.pos) as usize;
            let chunk = self.read(want)?;
            if chunk.is_empty() {
                break;
            }
        }
        if self.pos != offset {
            debug!("seek replay ended at {} short of {}", self.pos, offset);
        }
        Ok(self.pos)
    }

    fn close(&mut self) {
        debug!("closing {} stacked components", self.streams.len());
        self.pos = 0;
        self.current = 0;
        self.seekable = true;
        for stream in self.streams.iter_mut() {
            stream.close();
        }
        self.streams.clear();
    }

    /// Detach every component and discard them. There is no single
    /// underlying resource to hand back.
    fn detach(&mut self) -> Option<Resource> {
        self.pos = 0;
        self.current = 0;
        self.seekable = true;
        for stream in self.streams.iter_mut() {
            stream.detach();
        }
        self.streams.clear();
        None
    }
}

#[cfg(test)]
mod tests {
    use super::StackedStream;
    use crate::{MemoryStream, Stream};

    #[test]
    fn empty_stack_defaults_to_seekable() {
        // Possibly surprising but intended: with no component, the
        // aggregate holds vacuously.
        let mut stack = StackedStream::new();
        assert!(stack.is_seekable());
        assert!(stack.eof());
    }

    #[test]
    fn read_advances_the_active_component() {
        let mut stack = StackedStream::new();
        stack.push(Box::new(MemoryStream::with_content("ab"))).unwrap();
        stack.push(Box::new(MemoryStream::with_content("cd"))).unwrap();
        assert_eq!(stack.read(3).unwrap(), b"abc");
        assert_eq!(stack.read(3).unwrap(), b"d");
        assert_eq!(stack.read(3).unwrap(), b"");
        assert!(stack.eof());
    }

    #[test]
    fn read_zero_is_empty_and_keeps_position() {
        let mut stack = StackedStream::new();
        stack.push(Box::new(MemoryStream::with_content("ab"))).unwrap();
        assert_eq!(stack.read(0).unwrap(), b"");
        assert_eq!(stack.tell().unwrap(), 0);
    }

    #[test]
    fn close_resets_to_an_empty_stack() {
        let mut stack = StackedStream::new();
        stack.push(Box::new(MemoryStream::with_content("ab"))).unwrap();
        stack.read(1).unwrap();
        stack.close();
        assert!(stack.is_empty());
        assert_eq!(stack.tell().unwrap(), 0);
        assert_eq!(stack.size(), Some(0));
        assert!(stack.is_seekable());
        // A second close is a no-op.
        stack.close();
    }
}
