mod rotate_log;

pub use rotate_log::RotateLogUseCase;
