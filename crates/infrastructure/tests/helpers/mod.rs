mod doh_server_mock;
mod stub_forwarder;

pub use doh_server_mock::*;
pub use stub_forwarder::*;
