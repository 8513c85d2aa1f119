// =========================
// tests/unit/media_tests.rs
// =========================
//! Unit tests for the media capability markers
use cms_common::{is_image, ImageMedia, ImageMedium, MediaKind, MediaObject, Medium};

struct Thumbnail {
    source: ImageMedium,
}

impl MediaObject for Thumbnail {
    fn filename(&self) -> &str {
        &self.source.filename
    }

    fn mime(&self) -> &str {
        &self.source.mime
    }

    fn size(&self) -> u64 {
        self.source.size / 4
    }

    fn as_image(&self) -> Option<&dyn ImageMedia> {
        Some(self)
    }
}

impl ImageMedia for Thumbnail {}

fn total_image_bytes(items: &[&dyn MediaObject]) -> u64 {
    items
        .iter()
        .filter_map(|m| m.as_image())
        .map(|img| img.size())
        .sum()
}

#[test]
fn test_downstream_type_can_carry_image_capability() {
    let thumb = Thumbnail {
        source: ImageMedium {
            filename: "hero.webp".to_string(),
            mime: "image/webp".to_string(),
            size: 4000,
            width: Some(1600),
            height: Some(900),
        },
    };
    let doc = Medium {
        filename: "terms.pdf".to_string(),
        mime: "application/pdf".to_string(),
        size: 5000,
    };

    assert!(is_image(&thumb));
    assert!(!is_image(&doc));
    assert_eq!(thumb.kind(), MediaKind::Image);
    assert_eq!(doc.kind(), MediaKind::File);
    let items: [&dyn MediaObject; 2] = [&thumb, &doc];
    assert_eq!(total_image_bytes(&items), 1000);
}
