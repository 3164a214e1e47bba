//! Struct `InstanceSet` represents a batch of weighted instances.

// Provides `Instance` and `Label`.
pub(crate) mod instance;
// Provides `InstanceSet`.
pub(crate) mod instance_set;
// Provides `SourcePool`.
pub(crate) mod source_pool;

// Provides a struct that reads a file.
pub(crate) mod reader;
mod arff;


pub use instance::{Instance, Label};
pub use instance_set::InstanceSet;
pub use source_pool::SourcePool;
pub use reader::{SampleReader, read_pool};
