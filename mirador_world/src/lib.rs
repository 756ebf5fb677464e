// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mirador World: one coordinate space for the visible canvases.
//!
//! A window shows one group of canvases at a time (see `mirador_canvas`).
//! [`CanvasWorld`] places that group side by side (or stacked, depending on
//! the [`ViewingDirection`]) and answers the questions a deep-zoom viewer
//! needs while loading and re-ordering its images:
//! - The world bounds to fit the viewport to.
//! - The world rectangle of each content resource.
//! - The draw order and opacity of each resource, honouring [`Layers`].
//!
//! It does **not** talk to a viewer; `mirador_viewer` drives one from these
//! answers.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use mirador_canvas::{Canvas, ImageResource};
//! use mirador_world::{CanvasWorld, LayerSettings, Layers, ViewingDirection};
//!
//! let left = Canvas::new("left", 1000, 1500)
//!     .with_image(ImageResource::tiled("left/img", "https://iiif.example/left", 1000, 1500));
//! let right = Canvas::new("right", 500, 750)
//!     .with_image(ImageResource::tiled("right/img", "https://iiif.example/right", 500, 750));
//!
//! let mut layers = Layers::new();
//! layers.insert("right/img", LayerSettings::default().with_opacity(0.5));
//!
//! let world = CanvasWorld::new([left, right], layers, ViewingDirection::LeftToRight);
//! assert_eq!(world.bounds(), Rect::new(0.0, 0.0, 2000.0, 1500.0));
//!
//! // Info responses carry the service id; it resolves to the painted resource.
//! let resource = world.content_resource("https://iiif.example/right/info.json").unwrap();
//! assert_eq!(world.layer_opacity_of_image_resource(&resource.id), 0.5);
//! ```

mod direction;
mod layers;
mod world;

pub use direction::ViewingDirection;
pub use layers::{LayerSettings, Layers};
pub use world::{CanvasWorld, ResourcePlacement};
