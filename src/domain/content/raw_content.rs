//! Immutable subtitle byte payload

use std::fmt;
use std::io::{Cursor, Read};

use bytes::{BufMut, Bytes, BytesMut};

use crate::domain::DomainError;

/// Validated, read-only byte payload.
///
/// Always non-empty. The wrapped buffer is a `Bytes`, so no writer handle to it
/// survives construction; every reader starts at position zero.
#[derive(Clone, PartialEq, Eq)]
pub struct RawContent {
    bytes: Bytes,
}

impl RawContent {
    /// Wrap an immutable buffer, rejecting empty input
    pub fn new(bytes: impl Into<Bytes>) -> Result<Self, DomainError> {
        let bytes = bytes.into();

        if bytes.is_empty() {
            return Err(DomainError::validation("Content cannot be empty"));
        }

        Ok(Self { bytes })
    }

    /// Freeze a writable buffer and wrap it.
    ///
    /// The buffer is consumed, so nothing can write to it after wrapping.
    pub fn from_buffer(buffer: BytesMut) -> Result<Self, DomainError> {
        Self::new(buffer.freeze())
    }

    /// Read a source to the end and wrap what was read
    pub fn read_from(mut reader: impl Read) -> Result<Self, DomainError> {
        let mut writer = BytesMut::new().writer();

        std::io::copy(&mut reader, &mut writer)
            .map_err(|e| DomainError::validation(format!("Failed to read content: {}", e)))?;

        Self::from_buffer(writer.into_inner())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Never true for a constructed value; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Cheap clone of the underlying buffer
    pub fn bytes(&self) -> Bytes {
        self.bytes.clone()
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// A fresh reader positioned at the start of the content
    pub fn reader(&self) -> Cursor<Bytes> {
        Cursor::new(self.bytes.clone())
    }
}

impl AsRef<[u8]> for RawContent {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<Vec<u8>> for RawContent {
    type Error = DomainError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&'static str> for RawContent {
    type Error = DomainError;

    fn try_from(value: &'static str) -> Result<Self, Self::Error> {
        Self::new(Bytes::from_static(value.as_bytes()))
    }
}

impl fmt::Debug for RawContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawContent")
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_bytes_untouched() {
        let source = vec![0u8, 1, 2, 255, 128];
        let content = RawContent::new(source.clone()).unwrap();

        assert_eq!(content.as_bytes(), source.as_slice());
        assert_eq!(content.len(), 5);
        assert!(!content.is_empty());
    }

    #[test]
    fn test_empty_content_rejected() {
        let result = RawContent::new(Vec::new());
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_from_buffer_freezes() {
        let mut buffer = BytesMut::new();
        buffer.extend_from_slice(b"Hello");

        let content = RawContent::from_buffer(buffer).unwrap();
        assert_eq!(content.as_bytes(), b"Hello");

        assert!(RawContent::from_buffer(BytesMut::new()).is_err());
    }

    #[test]
    fn test_reader_starts_at_zero_every_time() {
        let content = RawContent::try_from("abc").unwrap();

        let mut first = String::new();
        content.reader().read_to_string(&mut first).unwrap();

        let mut second = String::new();
        content.reader().read_to_string(&mut second).unwrap();

        assert_eq!(first, "abc");
        assert_eq!(second, "abc");
    }

    #[test]
    fn test_read_from() {
        let content = RawContent::read_from(&b"1\n00:00:01,000 --> 00:00:02,000\nHi"[..]).unwrap();
        assert!(content.as_bytes().ends_with(b"Hi"));

        assert!(RawContent::read_from(&b""[..]).is_err());
    }

    #[test]
    fn test_debug_hides_payload() {
        let content = RawContent::try_from("secret dialogue").unwrap();
        assert_eq!(format!("{:?}", content), "RawContent { len: 15 }");
    }
}
