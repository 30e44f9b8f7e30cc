//! Image URL resolution.
//!
//! Product images arrive in several shapes: Cloudinary URLs, foreign
//! absolute URLs, local upload paths (with or without their leading
//! slash), and plain relative paths. [`resolve_image_url`] maps each of
//! them to a displayable URL, applying size-specific CDN transformation
//! parameters where the CDN supports them.
//!
//! Resolution is deterministic and side-effect-free; it performs no
//! network I/O.
//!
//! # Example
//!
//! ```rust
//! use grandson_api::images::{resolve_image_url, ImageSize};
//!
//! let url = resolve_image_url(
//!     "http://localhost:3001",
//!     "https://res.cloudinary.com/grandson/image/upload/v12/products/maillot.jpg",
//!     ImageSize::Card,
//! );
//! assert_eq!(
//!     url,
//!     "https://res.cloudinary.com/grandson/image/upload/w_400,h_400,q_70,f_auto,c_fill/v12/products/maillot.jpg"
//! );
//! ```

use std::fmt;

/// Placeholder asset returned for empty image paths.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Host marker identifying the image CDN.
pub const CDN_HOST: &str = "res.cloudinary.com";

/// The path segment transformation parameters are inserted after.
pub const UPLOAD_MARKER: &str = "/upload/";

/// Prefix of uploads served directly by the frontend static layer.
pub const LOCAL_UPLOAD_PREFIX: &str = "/uploads/";

/// Legacy upload prefix missing its leading slash.
const LEGACY_UPLOAD_PREFIX: &str = "uploads/";

/// CDN crop modes used by the size presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropMode {
    /// Fill the exact box, cropping as needed.
    Fill,
    /// Fit inside the box, preserving aspect ratio.
    Fit,
    /// Like fit, but never upscale.
    Limit,
    /// Fit and pad to the exact box.
    Pad,
}

impl CropMode {
    /// Returns the CDN parameter value for this mode.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Fit => "fit",
            Self::Limit => "limit",
            Self::Pad => "pad",
        }
    }
}

/// The fixed transformation tuple behind a size tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageTransformation {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// JPEG/WebP quality (1-100).
    pub quality: u8,
    /// Crop mode.
    pub crop: CropMode,
}

impl fmt::Display for ImageTransformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "w_{},h_{},q_{},f_auto,c_{}",
            self.width,
            self.height,
            self.quality,
            self.crop.as_param()
        )
    }
}

/// Where an image is about to be displayed.
///
/// Each size maps to a fixed transformation tuple; the mapping is part of
/// the CDN URL contract and must not drift per call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageSize {
    /// Small list thumbnails.
    Thumbnail,
    /// Product cards on category pages.
    Card,
    /// The product detail view.
    Detail,
    /// Full-width gallery images.
    Gallery,
    /// Cart line thumbnails.
    Cart,
    /// The shop logo.
    Logo,
}

impl ImageSize {
    /// Returns the fixed transformation tuple for this size.
    #[must_use]
    pub const fn transformation(self) -> ImageTransformation {
        match self {
            Self::Thumbnail => ImageTransformation {
                width: 150,
                height: 150,
                quality: 60,
                crop: CropMode::Fill,
            },
            Self::Card => ImageTransformation {
                width: 400,
                height: 400,
                quality: 70,
                crop: CropMode::Fill,
            },
            Self::Detail => ImageTransformation {
                width: 800,
                height: 800,
                quality: 80,
                crop: CropMode::Limit,
            },
            Self::Gallery => ImageTransformation {
                width: 1200,
                height: 1200,
                quality: 85,
                crop: CropMode::Limit,
            },
            Self::Cart => ImageTransformation {
                width: 100,
                height: 100,
                quality: 60,
                crop: CropMode::Fill,
            },
            Self::Logo => ImageTransformation {
                width: 300,
                height: 120,
                quality: 90,
                crop: CropMode::Fit,
            },
        }
    }
}

/// Resolves an image path to a displayable URL.
///
/// Decision order:
///
/// 1. Empty input → the placeholder asset.
/// 2. Already the placeholder, or an `.svg` → unchanged.
/// 3. Absolute URL on the CDN → transformation segment inserted after
///    `/upload/`; a CDN URL without that marker is returned unchanged
///    rather than guessing an insertion point.
/// 4. Absolute URL on any other host → unchanged (foreign storage is
///    opaque).
/// 5. A local upload path (`/uploads/...`) → unchanged.
/// 6. A legacy upload path missing its leading slash → slash restored.
/// 7. Anything else → prefixed with `api_base`, normalizing slashes.
#[must_use]
pub fn resolve_image_url(api_base: &str, path: &str, size: ImageSize) -> String {
    if path.is_empty() {
        return PLACEHOLDER_IMAGE.to_string();
    }

    if path == PLACEHOLDER_IMAGE || path.ends_with(".svg") {
        return path.to_string();
    }

    if path.starts_with("http://") || path.starts_with("https://") {
        if path.contains(CDN_HOST) {
            return path.find(UPLOAD_MARKER).map_or_else(
                || path.to_string(),
                |index| {
                    let (head, tail) = path.split_at(index + UPLOAD_MARKER.len());
                    format!("{head}{}/{tail}", size.transformation())
                },
            );
        }
        return path.to_string();
    }

    if path.starts_with(LOCAL_UPLOAD_PREFIX) {
        return path.to_string();
    }

    if path.starts_with(LEGACY_UPLOAD_PREFIX) {
        return format!("/{path}");
    }

    format!(
        "{}/{}",
        api_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
