//! Concatenation of independent byte streams behind a single
//! [`Stream`](crate::Stream).
//!
//! [`StackedStream`] owns an ordered sequence of component streams and
//! reads them back to back. [`StackSource`] is the set of values a stack
//! accepts: ready-made streams pass through, raw content is wrapped
//! once, when appended.

mod source;
pub use source::StackSource;

mod stacked;
pub use stacked::StackedStream;
