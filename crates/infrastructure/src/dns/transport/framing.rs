//! DNS over TCP message framing (RFC 1035 §4.2.2)
//!
//! Every message is preceded by a 2-byte big-endian length field.

use ferrous_doh_domain::DomainError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const MAX_TCP_MESSAGE_SIZE: usize = u16::MAX as usize;
const LENGTH_PREFIX_SIZE: usize = 2;

/// Length prefix followed by the payload, in one buffer.
pub fn encode_frame(message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
    let length = u16::try_from(message_bytes.len())
        .map_err(|_| DomainError::FrameTooLarge(message_bytes.len()))?;

    let mut frame = Vec::with_capacity(LENGTH_PREFIX_SIZE + message_bytes.len());
    frame.extend_from_slice(&length.to_be_bytes());
    frame.extend_from_slice(message_bytes);
    Ok(frame)
}

/// Splits one complete frame off the front of `buf`.
///
/// Returns the payload and the total number of bytes consumed, or `None`
/// when `buf` does not yet hold a whole frame.
pub fn decode_frame(buf: &[u8]) -> Option<(&[u8], usize)> {
    let prefix: [u8; LENGTH_PREFIX_SIZE] = buf.get(..LENGTH_PREFIX_SIZE)?.try_into().ok()?;
    let length = u16::from_be_bytes(prefix) as usize;
    let end = LENGTH_PREFIX_SIZE + length;
    let payload = buf.get(LENGTH_PREFIX_SIZE..end)?;
    Some((payload, end))
}

/// Reads exactly one framed message. A short read at either step is an error.
pub async fn read_frame<S>(stream: &mut S) -> Result<Vec<u8>, DomainError>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; LENGTH_PREFIX_SIZE];
    stream.read_exact(&mut len_buf).await.map_err(|e| {
        DomainError::FrameRead(format!("Failed to read message length: {}", e))
    })?;

    let message_len = u16::from_be_bytes(len_buf) as usize;

    let mut message = vec![0u8; message_len];
    stream.read_exact(&mut message).await.map_err(|e| {
        DomainError::FrameRead(format!(
            "Failed to read {} byte message body: {}",
            message_len, e
        ))
    })?;

    Ok(message)
}

/// Writes `message_bytes` as a single framed write.
pub async fn write_frame<S>(stream: &mut S, message_bytes: &[u8]) -> Result<(), DomainError>
where
    S: AsyncWriteExt + Unpin,
{
    let frame = encode_frame(message_bytes)?;

    stream.write_all(&frame).await.map_err(|e| {
        DomainError::IoError(format!("Failed to write DNS message: {}", e))
    })?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to flush stream: {}", e)))?;

    Ok(())
}
