// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mirador Viewer: keeps a deep-zoom viewer in step with a window's state.
//!
//! The viewer itself (tile fetching, rendering, animation) is abstracted as
//! [`DeepZoomViewer`] and created through a [`ViewerBackend`]. A
//! [`ViewerCoordinator`] owns one viewer per window and:
//! - Loads every tiled and static image of the visible [`CanvasWorld`] as one
//!   batch, then fits the world once.
//! - Decides between reloading images (the image id sets changed) and only
//!   refreshing draw order and opacity (layers changed).
//! - Pushes the persisted [`ViewportState`] down to the viewer, and pushes the
//!   settled viewport up to a [`ViewportSink`] at the end of each animation.
//!
//! Everything runs on one thread. Image additions are futures
//! ([`ItemAddition`]) the viewer completes through an [`ItemCompletion`];
//! the host polls the coordinator with [`ViewerCoordinator::poll_pending`].
//!
//! ## Configuration
//!
//! ```rust
//! use mirador_viewer::{ViewerOptions, ViewportSink, ViewportState, ViewportStore};
//!
//! let options = ViewerOptions::from_json(r#"{ "constrainDuringPan": true }"#).unwrap();
//! assert!(options.constrain_during_pan);
//! assert!(options.preserve_viewport);
//!
//! let mut store = ViewportStore::new();
//! store.update_viewport("window-1", ViewportState::new(1.0, 0.0, 0.5));
//! assert_eq!(store.get("window-1").map(|v| v.zoom), Some(0.5));
//! ```
//!
//! [`CanvasWorld`]: mirador_world::CanvasWorld

mod addition;
mod config;
mod coordinator;
mod error;
mod source;
mod viewer;
mod viewport;

pub use addition::{ItemAddition, ItemCompletion};
pub use config::ViewerOptions;
pub use coordinator::{Lifecycle, ViewerCoordinator, ViewerProps};
pub use error::{AddItemError, ConfigError, ViewerError};
pub use source::{ImageInfo, InfoResponse, info_responses_match, non_tiled_images_match};
pub use viewer::{
    DeepZoomViewer, ItemAdded, ItemId, SimpleImageOptions, TiledImageOptions, ViewerBackend,
    ViewerEvent,
};
pub use viewport::{ViewportSink, ViewportState, ViewportStore};
