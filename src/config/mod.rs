//! Loading the set of copy operations to track.

mod task_file;

pub use task_file::TaskFile;
