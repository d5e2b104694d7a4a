pub mod dns;
pub mod logs;

pub use dns::ForwardDnsQueryUseCase;
pub use logs::RotateLogUseCase;
