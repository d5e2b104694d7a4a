pub mod inflight_limit;

pub use inflight_limit::InflightLimitForwarder;
