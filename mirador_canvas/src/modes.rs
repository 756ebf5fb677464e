// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How a window presents the canvases of a manifest.
///
/// This enum drives [`crate::CanvasGroupings`]: it decides whether canvases
/// are shown one at a time, as facing pairs, or as one continuous strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ViewType {
    /// One canvas per group.
    #[default]
    Single,
    /// Facing pages: canvases are paired, broken at explicit pagination hints.
    Book,
    /// Continuous scroll: every canvas in a single group.
    ///
    /// Stacking the canvases is left to the world layout.
    Scroll,
    /// Thumbnail gallery; groups like [`ViewType::Single`].
    Gallery,
}

impl ViewType {
    /// Parses a view type name, degrading unknown names to [`ViewType::Single`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "book" => Self::Book,
            "scroll" => Self::Scroll,
            "gallery" => Self::Gallery,
            _ => Self::Single,
        }
    }

    /// Returns the canonical name of this view type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Book => "book",
            Self::Scroll => "scroll",
            Self::Gallery => "gallery",
        }
    }
}

impl From<&str> for ViewType {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

/// Pagination hint carried by a canvas (IIIF `behavior` / `viewingHint`).
///
/// In book mode both hints force the canvas into a group of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum PaginationHint {
    /// The canvas already shows both pages of an opening.
    FacingPages,
    /// The canvas is not part of the paged sequence (fold-outs, inserts).
    NonPaged,
}

impl PaginationHint {
    /// Parses a hint value; anything other than `facing-pages` / `non-paged`
    /// is not a pagination hint.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "facing-pages" => Some(Self::FacingPages),
            "non-paged" => Some(Self::NonPaged),
            _ => None,
        }
    }

    /// Returns the IIIF spelling of this hint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FacingPages => "facing-pages",
            Self::NonPaged => "non-paged",
        }
    }
}
