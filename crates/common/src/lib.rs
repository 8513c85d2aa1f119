// ================
// common/src/lib.rs
// ================
//! Common types shared between the credential backend and the media layer.
//! This crate defines the media-object contract and its capability markers.

pub mod media;

pub use media::{is_image, ImageMedia, ImageMedium, MediaKind, MediaObject, Medium};
