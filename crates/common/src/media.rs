// ================
// common/src/media.rs
// ================
//! Media-object contract and capability markers.
use serde::{Deserialize, Serialize};

/// Broad classification of a media object
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Video,
    File,
}

impl MediaKind {
    /// Classify by the top-level type of a MIME string (`image/png` -> `Image`)
    pub fn from_mime(mime: &str) -> Self {
        let top = mime.split('/').next().unwrap_or_default().trim();
        if top.eq_ignore_ascii_case("image") {
            MediaKind::Image
        } else if top.eq_ignore_ascii_case("audio") {
            MediaKind::Audio
        } else if top.eq_ignore_ascii_case("video") {
            MediaKind::Video
        } else {
            MediaKind::File
        }
    }
}

/// General media-object contract.
pub trait MediaObject: Send + Sync {
    /// File name of the underlying asset
    fn filename(&self) -> &str;
    /// MIME type, e.g. `image/jpeg`
    fn mime(&self) -> &str;
    /// Size in bytes
    fn size(&self) -> u64;

    fn kind(&self) -> MediaKind {
        MediaKind::from_mime(self.mime())
    }

    /// Image capability view. Types implementing [`ImageMedia`] return `Some(self)`.
    fn as_image(&self) -> Option<&dyn ImageMedia> {
        None
    }
}

/// Marks a media object as an image. Carries no members of its own.
pub trait ImageMedia: MediaObject {}

/// Capability check used by consumers that only care whether an object is an image.
pub fn is_image(obj: &dyn MediaObject) -> bool {
    obj.as_image().is_some()
}

/// A plain media object with no extra capabilities
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Medium {
    pub filename: String,
    pub mime: String,
    pub size: u64,
}

impl MediaObject for Medium {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn mime(&self) -> &str {
        &self.mime
    }

    fn size(&self) -> u64 {
        self.size
    }
}

/// An image media object
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageMedium {
    pub filename: String,
    pub mime: String,
    pub size: u64,
    /// Pixel width, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl MediaObject for ImageMedium {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn mime(&self) -> &str {
        &self.mime
    }

    fn size(&self) -> u64 {
        self.size
    }

    // An image stays an image even with a sloppy MIME string.
    fn kind(&self) -> MediaKind {
        MediaKind::Image
    }

    fn as_image(&self) -> Option<&dyn ImageMedia> {
        Some(self)
    }
}

impl ImageMedia for ImageMedium {}
