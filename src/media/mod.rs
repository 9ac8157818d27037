// SPDX-License-Identifier: MPL-2.0
//! Image-specific helpers shared by the listing pipeline and the viewer.
//!
//! Object keys are not filesystem paths, but their extension is the only
//! type hint a bucket listing carries, so detection works on the key text.

pub mod metadata_cache;

// Re-export commonly used types
pub use extensions::IMAGE_EXTENSIONS;
pub use metadata_cache::{MetadataCache, MetadataCacheStats};

/// Supported media extensions
pub mod extensions {
    /// Image file extensions shown in the gallery.
    pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
}

/// Returns `true` if `key` names an image the gallery can display.
///
/// Matching is case-insensitive on the extension; keys ending in `/`
/// (directory placeholders) never match.
#[must_use]
pub fn is_image_key(key: &str) -> bool {
    if key.ends_with('/') {
        return false;
    }
    // Keys are not paths: `photos/.jpg` still ends in `.jpg`.
    let file_name = key.rsplit('/').next().unwrap_or(key);
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Format file size in human-readable format.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
