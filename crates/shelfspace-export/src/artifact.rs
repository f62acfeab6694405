//! Rendered export payloads
//!
//! An [`Artifact`] is what gets handed to a save target: bytes, a MIME type
//! and a suggested filename.

use crate::hash::ContentHash;

/// A rendered file ready to be saved
///
/// # Invariants
/// - `digest` is always `ContentHash::compute(&payload)`
/// - Immutable after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    filename: String,
    mime_type: &'static str,
    payload: Vec<u8>,
    digest: ContentHash,
}

impl Artifact {
    /// Create new artifact (computes digest)
    ///
    /// # Performance
    /// O(n) where n = payload size
    #[must_use]
    pub fn new(filename: impl Into<String>, mime_type: &'static str, payload: Vec<u8>) -> Self {
        let digest = ContentHash::compute(&payload);
        Self {
            filename: filename.into(),
            mime_type,
            payload,
            digest,
        }
    }

    /// Create from text
    #[must_use]
    pub fn from_text(filename: impl Into<String>, mime_type: &'static str, text: String) -> Self {
        Self::new(filename, mime_type, text.into_bytes())
    }

    /// Suggested filename, extension included
    #[inline]
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// MIME type advertised to the host
    #[inline]
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// Payload bytes
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload as text, if valid UTF-8
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }

    /// Payload digest
    #[inline]
    #[must_use]
    pub fn digest(&self) -> &ContentHash {
        &self.digest
    }

    /// Payload size in bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Check if payload is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Consume into payload bytes
    #[inline]
    #[must_use]
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Verify digest against payload
    #[inline]
    #[must_use]
    pub fn verify(&self) -> bool {
        self.digest == ContentHash::compute(&self.payload)
    }
}
