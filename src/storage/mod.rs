//! Storage layer: the key-value abstraction and its backends, plus the
//! bucket repository built on top of it.

pub mod buckets;
pub mod file;
pub mod memory;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use buckets::BucketRepository;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
