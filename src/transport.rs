//! Length-prefixed JSON framing for the browser native-messaging pipe.
//!
//! Every message is a 4-byte unsigned length in native byte order followed by that
//! many bytes of UTF-8 JSON.

use crate::error::TransportError;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// Response message for a request without an `nbib_data` field.
pub const INVALID_MESSAGE: &str = "Invalid message format.";

/// Response message for a request whose conversion or delivery failed.
pub const PROCESSING_FAILED: &str = "Processing failed. See log.";

/// An incoming request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Request {
    /// Text of one `.nbib` record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbib_data: Option<String>,
}

impl Request {
    pub fn new(nbib_data: impl Into<String>) -> Self {
        Self {
            nbib_data: Some(nbib_data.into()),
        }
    }
}

/// An outgoing status response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Success,
    Error { message: String },
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success)
    }
}

/// Read one framed message body.
///
/// Returns `Ok(None)` when the stream is closed before a length prefix arrives.
pub fn read_frame<R: Read>(
    reader: &mut R,
    max_size: u32,
) -> Result<Option<Vec<u8>>, TransportError> {
    let mut prefix = [0u8; 4];
    let read = read_full(reader, &mut prefix)?;
    if read == 0 {
        return Ok(None);
    }
    if read < prefix.len() {
        return Err(TransportError::Truncated {
            read,
            expected: prefix.len(),
        });
    }

    let size = u32::from_ne_bytes(prefix);
    if size > max_size {
        return Err(TransportError::MessageTooLarge {
            size,
            max: max_size,
        });
    }

    let expected = size as usize;
    let mut body = vec![0u8; expected];
    let read = read_full(reader, &mut body)?;
    if read < expected {
        return Err(TransportError::Truncated { read, expected });
    }
    Ok(Some(body))
}

/// Write one framed message body and flush.
pub fn write_frame<W: Write>(writer: &mut W, body: &[u8]) -> Result<(), TransportError> {
    let size = u32::try_from(body.len()).map_err(|_| TransportError::MessageTooLarge {
        size: u32::MAX,
        max: u32::MAX,
    })?;
    writer.write_all(&size.to_ne_bytes())?;
    writer.write_all(body)?;
    writer.flush()?;
    Ok(())
}

/// Read and decode one [Request]; `Ok(None)` means the pipe was closed.
pub fn read_request<R: Read>(
    reader: &mut R,
    max_size: u32,
) -> Result<Option<Request>, TransportError> {
    match read_frame(reader, max_size)? {
        Some(body) => Ok(Some(serde_json::from_slice(&body)?)),
        None => Ok(None),
    }
}

/// Encode and write one [Response].
pub fn write_response<W: Write>(
    writer: &mut W,
    response: &Response,
) -> Result<(), TransportError> {
    let body = serde_json::to_vec(response)?;
    write_frame(writer, &body)
}

/// Like [Read::read_exact], but reports how much was read before end of stream.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
