use bytestack::{LazyStream, MemoryStream, Stream, StreamError};
use std::cell::Cell;
use std::rc::Rc;

mod utils;
use utils::NotSeekableStream;

fn counting_factory(
    counter: Rc<Cell<usize>>,
    content: &'static str,
) -> impl FnMut() -> bytestack::StreamResult<Box<dyn Stream>> {
    move || {
        counter.set(counter.get() + 1);
        Ok(Box::new(MemoryStream::with_content(content)) as Box<dyn Stream>)
    }
}

#[test]
fn the_factory_runs_once() {
    let counter = Rc::new(Cell::new(0));
    let mut stream =
        LazyStream::with_factory(counting_factory(counter.clone(), ""));
    assert_eq!(counter.get(), 0);

    stream.stream().unwrap();
    assert_eq!(counter.get(), 1);

    // Further calls reuse the memoized stream.
    stream.stream().unwrap();
    assert_eq!(counter.get(), 1);
    stream.contents().unwrap();
    assert_eq!(counter.get(), 1);
}

#[test]
fn size_delegates_to_the_materialized_stream() {
    let mut stream = LazyStream::with_content("");
    assert_eq!(stream.size(), Some(0));

    let mut stream = LazyStream::with_content("Hello");
    assert_eq!(stream.size(), Some(5));
}

#[test]
fn contents_delegates_to_the_materialized_stream() {
    let counter = Rc::new(Cell::new(0));
    let mut stream = LazyStream::with_factory(counting_factory(
        counter,
        "Hello World!",
    ));
    assert_eq!(stream.contents().unwrap(), b"Hello World!");
}

#[test]
fn eof_after_reading_everything() {
    let mut stream = LazyStream::with_content("I am a lazy stream");
    stream.rewind().unwrap();
    stream.contents().unwrap();
    assert!(stream.eof());
}

#[test]
fn seekability_reflects_the_underlying_stream() {
    let mut stream = LazyStream::with_factory(|| {
        Ok(Box::new(NotSeekableStream::new("Not seekable stream"))
            as Box<dyn Stream>)
    });
    assert!(!stream.is_seekable());
    assert!(stream.is_readable());
}

#[test]
fn read_materializes_on_demand() {
    let mut stream = LazyStream::with_factory(|| {
        Ok(Box::new(NotSeekableStream::new("Hello, Besame Mucho"))
            as Box<dyn Stream>)
    });
    assert_eq!(stream.read(8).unwrap(), b"Hello, B");
}

#[test]
fn content_sources_materialize_as_memory_streams() {
    let mut stream = LazyStream::with_content("bytes");
    let meta = stream.metadata();
    assert_eq!(
        meta.get("type"),
        Some(&bytestack::MetadataValue::Text("memory".to_string()))
    );
}

#[test]
fn close_reaches_the_underlying_stream() {
    let mut stream = LazyStream::with_content("bytes");
    stream.close();
    assert!(matches!(stream.read(1), Err(StreamError::Detached)));
    assert!(stream.eof());
}

#[test]
fn a_failing_factory_surfaces_its_error_and_may_retry() {
    let attempts = Rc::new(Cell::new(0));
    let counter = attempts.clone();
    let mut stream = LazyStream::with_factory(move || {
        counter.set(counter.get() + 1);
        if counter.get() == 1 {
            Err(StreamError::InvalidInput("flaky source".to_string()))
        } else {
            Ok(Box::new(MemoryStream::with_content("recovered"))
                as Box<dyn Stream>)
        }
    });

    assert!(matches!(stream.read(4), Err(StreamError::InvalidInput(_))));
    // The source is kept: the next call tries the factory again.
    assert_eq!(stream.read(9).unwrap(), b"recovered");
    assert_eq!(attempts.get(), 2);
}
