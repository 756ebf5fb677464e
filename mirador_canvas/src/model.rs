// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only canvas and content-resource records.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Rect, Size};

use crate::modes::PaginationHint;

/// Kind of a painted content resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// A still image (`Image` / `dctypes:Image`).
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "Image", alias = "dctypes:Image"))]
    Image,
    /// Anything else (text, audio, video, ...).
    #[cfg_attr(feature = "serde", serde(other))]
    Other,
}

/// One image painted onto a canvas.
///
/// Resources that carry an image service id are deep-zoom (tiled) sources;
/// the rest are placed as static images.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageResource {
    /// Resource identifier (the image URL for static images).
    #[cfg_attr(feature = "serde", serde(alias = "@id"))]
    pub id: String,
    /// Identifier of the image service, when the image is tiled.
    #[cfg_attr(feature = "serde", serde(default))]
    pub service_id: Option<String>,
    /// Resource kind.
    #[cfg_attr(feature = "serde", serde(default, rename = "type"))]
    pub kind: ResourceKind,
    /// Media type, e.g. `image/jpeg`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub format: Option<String>,
    /// Intrinsic width in pixels, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: Option<u32>,
    /// Intrinsic height in pixels, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: Option<u32>,
    /// Target region on the canvas (`#xywh=` fragment), in canvas pixels.
    ///
    /// `None` paints the whole canvas.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fragment: Option<Rect>,
}

impl ImageResource {
    /// Creates a tiled image backed by the image service `service_id`.
    #[must_use]
    pub fn tiled(id: impl Into<String>, service_id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            service_id: Some(service_id.into()),
            kind: ResourceKind::Image,
            format: None,
            width: Some(width),
            height: Some(height),
            fragment: None,
        }
    }

    /// Creates a static (non-tiled) image.
    #[must_use]
    pub fn static_image(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            service_id: None,
            kind: ResourceKind::Image,
            format: None,
            width: Some(width),
            height: Some(height),
            fragment: None,
        }
    }

    /// Sets the media type.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the resource kind.
    #[must_use]
    pub fn with_kind(mut self, kind: ResourceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Targets a region of the canvas instead of the whole canvas.
    #[must_use]
    pub fn with_fragment(mut self, fragment: Rect) -> Self {
        self.fragment = Some(fragment);
        self
    }

    /// Returns `true` if the resource is served through a deep-zoom image service.
    #[must_use]
    pub fn is_tiled(&self) -> bool {
        self.service_id.is_some()
    }

    /// Returns `true` if a viewer can draw this resource as an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.kind == ResourceKind::Image
            || self
                .format
                .as_deref()
                .is_some_and(|format| format.starts_with("image/"))
    }
}

/// One page or image unit of a IIIF document.
///
/// Canvases come from parsed manifest data and are never mutated by the
/// grouping or layout code.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Canvas {
    /// Stable canvas identifier.
    #[cfg_attr(feature = "serde", serde(alias = "@id"))]
    pub id: String,
    /// Display label.
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
    /// Intrinsic width in canvas pixels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: u32,
    /// Intrinsic height in canvas pixels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: u32,
    /// Painted images in manifest order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub images: Vec<ImageResource>,
    /// Pagination hint (`behavior` or `viewingHint`).
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            alias = "behavior",
            alias = "viewingHint",
            deserialize_with = "lenient_hint"
        )
    )]
    pub hint: Option<PaginationHint>,
}

impl Canvas {
    /// Creates a canvas with no painted images and no hint.
    #[must_use]
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            label: None,
            width,
            height,
            images: Vec::new(),
            hint: None,
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the pagination hint.
    #[must_use]
    pub fn with_hint(mut self, hint: PaginationHint) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Appends a painted image.
    #[must_use]
    pub fn with_image(mut self, image: ImageResource) -> Self {
        self.images.push(image);
        self
    }

    /// Intrinsic size in canvas pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Returns `false` when either intrinsic dimension is missing.
    #[must_use]
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width divided by height, or `None` for a canvas without dimensions.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f64> {
        self.has_dimensions()
            .then(|| f64::from(self.width) / f64::from(self.height))
    }

    /// Images served through an image service, in manifest order.
    pub fn tiled_images(&self) -> impl Iterator<Item = &ImageResource> + '_ {
        self.images.iter().filter(|image| image.is_tiled())
    }

    /// Images placed without deep-zoom tiling, in manifest order.
    pub fn non_tiled_images(&self) -> impl Iterator<Item = &ImageResource> + '_ {
        self.images.iter().filter(|image| !image.is_tiled())
    }

    /// Image services referenced by this canvas.
    pub fn image_service_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.images.iter().filter_map(|image| image.service_id.as_deref())
    }
}

#[cfg(feature = "serde")]
fn lenient_hint<'de, D>(deserializer: D) -> Result<Option<PaginationHint>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    // Presentation 2 uses a single string, Presentation 3 an array.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum HintValue {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<HintValue>::deserialize(deserializer)? {
        Some(HintValue::One(value)) => PaginationHint::parse(&value),
        Some(HintValue::Many(values)) => values
            .iter()
            .find_map(|value| PaginationHint::parse(value)),
        None => None,
    })
}
