//! Uploaded map background, held as an embeddable data URI.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Errors raised while importing a map image.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("unrecognized image type: {0}")]
    UnknownFormat(String),
    #[error("empty image file")]
    Empty,
}

/// An uploaded map background.
///
/// The image bytes are kept base64-encoded inside a `data:` URI so the
/// presentation layer can hand the string straight to an image element,
/// and so the whole board state stays plain values.
#[derive(Debug, Clone, PartialEq)]
pub struct MapImage {
    /// Source file name as given by the uploader.
    pub name: String,
    /// Mime type inferred from the file extension.
    pub mime: &'static str,
    /// `data:<mime>;base64,<payload>` form of the image bytes.
    pub data_uri: String,
}

impl MapImage {
    /// Build a map image from an uploaded file.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnknownFormat`] when the file extension is not a
    /// recognized image type, and [`MapError::Empty`] for a zero-byte file.
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, MapError> {
        if bytes.is_empty() {
            return Err(MapError::Empty);
        }
        let mime = mime_for(name).ok_or_else(|| MapError::UnknownFormat(name.to_owned()))?;
        let payload = STANDARD.encode(bytes);
        Ok(Self {
            name: name.to_owned(),
            mime,
            data_uri: format!("data:{mime};base64,{payload}"),
        })
    }
}

/// Map a file extension to its image mime type.
fn mime_for(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
