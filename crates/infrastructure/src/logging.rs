pub mod archive;
pub mod sink;

pub use archive::{archive_path_for, TarGzLogArchiver};
pub use sink::LogSink;
