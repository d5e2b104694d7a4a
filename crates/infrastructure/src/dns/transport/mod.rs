pub mod framing;
pub mod https;

pub use framing::{decode_frame, encode_frame, read_frame, write_frame, MAX_TCP_MESSAGE_SIZE};
pub use https::{pinned_client, DohForwarder, DNS_MESSAGE_CONTENT_TYPE};
