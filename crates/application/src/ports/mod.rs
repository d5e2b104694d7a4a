mod dns_forwarder;
mod log_rotation_port;

pub use dns_forwarder::DnsForwarder;
pub use log_rotation_port::LogRotationPort;
