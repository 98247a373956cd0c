//! # Embedded Assets
//!
//! An [`AssetRef`] is a processed image payload carried inline in the page
//! model. On the wire it is a self-describing `data:<mime>;base64,<payload>`
//! string; in memory it is the MIME type plus the raw bytes.
//!
//! Identity is by content: two refs with the same MIME type and bytes are
//! equal regardless of which upload produced them.

use crate::error::AssetRefError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

pub const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AssetRef {
    mime: String,
    bytes: Arc<[u8]>,
}

impl AssetRef {
    pub fn new(mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Rebuild a ref from archived bytes using the file extension's MIME type
    pub fn from_extension(extension: &str, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new(mime_for_extension(extension), bytes)
    }

    pub fn from_data_uri(uri: &str) -> Result<Self, AssetRefError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or(AssetRefError::NotADataUri)?;
        let (header, payload) = rest.split_once(',').ok_or(AssetRefError::NotADataUri)?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or(AssetRefError::NotBase64)?;

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| AssetRefError::InvalidBase64(e.to_string()))?;

        let mime = if mime.is_empty() { FALLBACK_MIME } else { mime };
        Ok(Self::new(mime, bytes))
    }

    /// Lenient decode for untrusted input: `null` and anything that is not a
    /// valid base64 data URI yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => match Self::from_data_uri(s) {
                Ok(asset) => Some(asset),
                Err(e) => {
                    tracing::warn!("ignoring invalid asset value: {}", e);
                    None
                }
            },
            serde_json::Value::Null => None,
            other => {
                tracing::warn!("ignoring non-string asset value: {}", other);
                None
            }
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension used when the asset is written out as a file
    pub fn extension(&self) -> &'static str {
        extension_for_mime(&self.mime)
    }
}

impl fmt::Debug for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetRef")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Serialize for AssetRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_uri())
    }
}

impl<'de> Deserialize<'de> for AssetRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        AssetRef::from_data_uri(&uri).map_err(serde::de::Error::custom)
    }
}

/// `deserialize_with` helper: any value that is not a valid data URI is "no asset"
pub(crate) fn lenient_asset<'de, D>(deserializer: D) -> Result<Option<AssetRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(AssetRef::from_json(&value))
}

pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/bmp" => "bmp",
        "image/x-icon" | "image/vnd.microsoft.icon" => "ico",
        _ => "bin",
    }
}

pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => FALLBACK_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_round_trip() {
        let asset = AssetRef::new("image/png", vec![1u8, 2, 3, 4]);
        let uri = asset.to_data_uri();

        assert_eq!(uri, "data:image/png;base64,AQIDBA==");
        assert_eq!(AssetRef::from_data_uri(&uri).unwrap(), asset);
    }

    #[test]
    fn test_rejects_non_data_uri() {
        assert_eq!(
            AssetRef::from_data_uri("https://example.com/a.png"),
            Err(AssetRefError::NotADataUri)
        );
        assert_eq!(
            AssetRef::from_data_uri("data:image/svg+xml,<svg/>"),
            Err(AssetRefError::NotBase64)
        );
        assert!(matches!(
            AssetRef::from_data_uri("data:image/png;base64,@@@"),
            Err(AssetRefError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_equality_is_by_content() {
        let a = AssetRef::new("image/jpeg", vec![9u8; 16]);
        let b = AssetRef::new("image/jpeg", vec![9u8; 16]);
        assert_eq!(a, b);
        assert_ne!(a, AssetRef::new("image/png", vec![9u8; 16]));
    }

    #[test]
    fn test_extension_mapping_is_reversible_for_images() {
        for mime in ["image/jpeg", "image/png", "image/gif", "image/webp", "image/svg+xml"] {
            assert_eq!(mime_for_extension(extension_for_mime(mime)), mime);
        }
    }

    #[test]
    fn test_lenient_json_decode() {
        assert!(AssetRef::from_json(&serde_json::Value::Null).is_none());
        assert!(AssetRef::from_json(&serde_json::json!({"src": "x"})).is_none());
        assert!(AssetRef::from_json(&serde_json::json!("data:image/png;base64,AQID")).is_some());
    }
}
