//! Threads: summary text to a published reply chain.

pub mod publisher;
pub mod segmenter;

pub use publisher::{PublishError, ThreadPublisher};
pub use segmenter::{segment, try_segment, SegmentationError, ThreadChunk, CHUNK_BUDGET};
