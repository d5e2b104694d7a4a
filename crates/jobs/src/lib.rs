pub mod log_rotation;
pub mod runner;

pub use log_rotation::LogRotationJob;
pub use runner::JobRunner;
