// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mirador Canvas: the IIIF canvas model and view-type grouping.
//!
//! A IIIF manifest is an ordered sequence of canvases (pages or images). A
//! viewer window shows those canvases according to its [`ViewType`]:
//! - [`ViewType::Single`] / [`ViewType::Gallery`]: one canvas at a time.
//! - [`ViewType::Book`]: facing pairs, broken wherever a canvas carries a
//!   [`PaginationHint`].
//! - [`ViewType::Scroll`]: all canvases in one continuous group.
//!
//! [`CanvasGroupings`] computes that partition once and answers "which
//! canvases are visible if the user asks for canvas N" queries.
//!
//! It does **not** parse manifests or lay canvases out in space; canvases
//! are supplied already parsed (optionally through the `serde` feature) and
//! placement is left to `mirador_world`.
//!
//! ## Minimal example
//!
//! ```rust
//! use mirador_canvas::{Canvas, CanvasGroupings, PaginationHint, ViewType};
//!
//! let canvases = [
//!     Canvas::new("a", 1000, 1500),
//!     Canvas::new("b", 1000, 1500),
//!     Canvas::new("c", 2000, 1500).with_hint(PaginationHint::FacingPages),
//!     Canvas::new("d", 1000, 1500),
//!     Canvas::new("e", 1000, 1500),
//! ];
//!
//! let groupings = CanvasGroupings::new(&canvases, ViewType::Book);
//! assert_eq!(groupings.len(), 3);
//!
//! // Asking for canvas #2 in book mode yields its enclosing group.
//! let group = groupings.get_canvases(2).unwrap();
//! assert_eq!(group.len(), 1);
//! assert_eq!(group[0].id, "c");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod groupings;
mod model;
mod modes;

pub use groupings::{CanvasGroup, CanvasGroupings};
pub use model::{Canvas, ImageResource, ResourceKind};
pub use modes::{PaginationHint, ViewType};
