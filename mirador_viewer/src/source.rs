// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image sources fed to the viewer and the set comparisons that decide
//! whether they must be reloaded.

use hashbrown::HashSet;
use mirador_canvas::ImageResource;
use serde::{Deserialize, Serialize};

/// Body of a IIIF image-information document (`info.json`).
///
/// Only the fields the coordinator reads are typed; everything else is kept
/// so the viewer can build its tile source from the full document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Image-service id (`@id` in Image API 2, `id` in Image API 3).
    #[serde(rename = "@id", alias = "id")]
    pub id: String,
    /// Full-resolution width in pixels.
    #[serde(default)]
    pub width: u32,
    /// Full-resolution height in pixels.
    #[serde(default)]
    pub height: u32,
    /// Remaining fields of the document (profile, tiles, sizes, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ImageInfo {
    /// Creates an info document with no extra fields.
    #[must_use]
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            extra: serde_json::Map::new(),
        }
    }
}

/// A fetched image-information response, one per tiled image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InfoResponse {
    /// Identifier the response was requested under.
    pub id: String,
    /// Parsed response body.
    pub json: ImageInfo,
}

impl InfoResponse {
    /// Creates a response whose request id is the service id.
    #[must_use]
    pub fn new(json: ImageInfo) -> Self {
        Self {
            id: json.id.clone(),
            json,
        }
    }
}

/// Returns `true` when both slices name the same image services.
///
/// Comparison is by `@id`, ignores order, and requires equal lengths; two
/// empty slices match.
#[must_use]
pub fn info_responses_match(current: &[InfoResponse], candidate: &[InfoResponse]) -> bool {
    same_id_set(
        current.iter().map(|response| response.json.id.as_str()),
        candidate.iter().map(|response| response.json.id.as_str()),
        current.len(),
        candidate.len(),
    )
}

/// Returns `true` when both slices name the same static images.
///
/// Comparison is by resource `id`, with the same rules as
/// [`info_responses_match`].
#[must_use]
pub fn non_tiled_images_match(current: &[ImageResource], candidate: &[ImageResource]) -> bool {
    same_id_set(
        current.iter().map(|image| image.id.as_str()),
        candidate.iter().map(|image| image.id.as_str()),
        current.len(),
        candidate.len(),
    )
}

fn same_id_set<'a>(
    current: impl Iterator<Item = &'a str>,
    candidate: impl Iterator<Item = &'a str>,
    current_len: usize,
    candidate_len: usize,
) -> bool {
    if current_len != candidate_len {
        return false;
    }
    let current: HashSet<&str> = current.collect();
    let candidate: HashSet<&str> = candidate.collect();
    current == candidate
}
