// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The deep-zoom viewer capability the coordinator drives.

use kurbo::{Point, Rect};

use crate::addition::ItemCompletion;
use crate::config::ViewerOptions;
use crate::error::ViewerError;
use crate::source::ImageInfo;

/// Opaque handle of an item (a tiled or static image) in a viewer's world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    /// Wraps a viewer-chosen identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the viewer-chosen identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Event payload of a successful item addition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemAdded {
    /// The item now present in the viewer's world.
    pub item: ItemId,
}

/// Viewer events the coordinator subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewerEvent {
    /// A viewport animation began.
    AnimationStart,
    /// A viewport animation settled.
    AnimationFinish,
}

/// Request to add a deep-zoom tile source.
#[derive(Clone, Debug, PartialEq)]
pub struct TiledImageOptions {
    /// Image-information document the tile source is built from.
    pub tile_source: ImageInfo,
    /// World rectangle the image is fitted into.
    pub fit_bounds: Rect,
    /// Draw index to insert at; viewers clamp it to their item count.
    pub index: Option<usize>,
    /// Initial opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Request to add a static image.
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleImageOptions {
    /// Image URL; also the item's source id.
    pub url: String,
    /// World rectangle the image is fitted into.
    pub fit_bounds: Rect,
    /// Draw index to insert at; viewers clamp it to their item count.
    pub index: Option<usize>,
    /// Initial opacity in `[0, 1]`.
    pub opacity: f64,
}

/// A deep-zoom rendering engine.
///
/// Implementations own rendering, tile fetching and animation. The
/// coordinator only tells them what to load, where to put it, and where to
/// look, and reads back the live viewport.
///
/// Item additions complete asynchronously: the viewer keeps the
/// [`ItemCompletion`] and reports through it once the item is in its world
/// (or failed to load). Events subscribed through
/// [`DeepZoomViewer::add_handler`] are delivered by the host to
/// [`ViewerCoordinator::handle_event`](crate::ViewerCoordinator::handle_event).
pub trait DeepZoomViewer {
    /// Starts emitting `event` to the host.
    fn add_handler(&mut self, event: ViewerEvent);

    /// Adds a tiled image source.
    fn add_tiled_image(&mut self, options: TiledImageOptions, completion: ItemCompletion);

    /// Adds a static image.
    fn add_simple_image(&mut self, options: SimpleImageOptions, completion: ItemCompletion);

    /// Number of items in the world.
    fn item_count(&self) -> usize;

    /// Item at draw position `index`.
    fn item_at(&self, index: usize) -> Option<ItemId>;

    /// Source id of `item`: the info `@id` for tiled images, the URL for static ones.
    fn item_source_id(&self, item: ItemId) -> Option<&str>;

    /// Moves `item` to draw position `index`.
    ///
    /// Callers keep `index` below [`DeepZoomViewer::item_count`].
    fn set_item_index(&mut self, item: ItemId, index: usize);

    /// Sets the opacity of `item`.
    fn set_item_opacity(&mut self, item: ItemId, opacity: f64);

    /// Pans the viewport so `center` is in the middle.
    fn pan_to(&mut self, center: Point, immediately: bool);

    /// Zooms to `zoom`, keeping `reference` fixed.
    fn zoom_to(&mut self, zoom: f64, reference: Point, immediately: bool);

    /// Fits `bounds` into the viewport.
    fn fit_bounds(&mut self, bounds: Rect, immediately: bool);

    /// Center the viewport is animating towards.
    fn center_target(&self) -> Point;

    /// Zoom the viewport is animating towards.
    fn zoom_target(&self) -> f64;

    /// Redraws immediately, e.g. after the host container was resized.
    fn force_redraw(&mut self);

    /// Removes every item and handler; the viewer is not used afterwards.
    fn close(&mut self);
}

/// Creates viewers bound to a host region.
pub trait ViewerBackend {
    /// Viewer type produced by this backend.
    type Viewer: DeepZoomViewer;

    /// Creates a fresh viewer.
    fn create(&mut self, options: &ViewerOptions) -> Result<Self::Viewer, ViewerError>;
}
