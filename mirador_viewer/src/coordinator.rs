// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coordinator owning one viewer for one window.

use core::fmt;

use futures::FutureExt;
use kurbo::{Point, Rect};
use log::{debug, trace, warn};
use mirador_canvas::ImageResource;
use mirador_world::CanvasWorld;

use crate::addition::ItemAddition;
use crate::config::ViewerOptions;
use crate::error::{AddItemError, ViewerError};
use crate::source::{InfoResponse, info_responses_match, non_tiled_images_match};
use crate::viewer::{
    DeepZoomViewer, ItemId, SimpleImageOptions, TiledImageOptions, ViewerBackend, ViewerEvent,
};
use crate::viewport::{ViewportSink, ViewportState};

/// Where a coordinator is in its viewer's lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// No viewer exists.
    #[default]
    Unmounted,
    /// A viewer was created and its first batch of images is loading.
    Mounting,
    /// The viewer shows the current props.
    Ready,
    /// New props changed the image sets and the reload batch is loading.
    ///
    /// Layer and viewport changes are applied synchronously inside
    /// [`ViewerCoordinator::update`] and never leave [`Lifecycle::Ready`].
    Updating,
}

/// Everything the coordinator renders, supplied by the application.
#[derive(Clone, Debug)]
pub struct ViewerProps {
    /// Layout of the visible canvases.
    pub world: CanvasWorld,
    /// Image-information responses, one per tiled image.
    pub info_responses: Vec<InfoResponse>,
    /// Static images placed without tiling.
    pub non_tiled_images: Vec<ImageResource>,
    /// Persisted viewport; `None` fits the whole world instead.
    pub viewer_config: Option<ViewportState>,
}

impl ViewerProps {
    /// Props for `world` with its static images and no tiled images yet.
    ///
    /// Non-image bodies (text, audio) are left out.
    #[must_use]
    pub fn new(world: CanvasWorld) -> Self {
        let non_tiled_images = world
            .canvases()
            .iter()
            .flat_map(|canvas| canvas.non_tiled_images())
            .filter(|image| image.is_image())
            .cloned()
            .collect();
        Self {
            world,
            info_responses: Vec::new(),
            non_tiled_images,
            viewer_config: None,
        }
    }

    /// Sets the image-information responses.
    #[must_use]
    pub fn with_info_responses(mut self, info_responses: impl IntoIterator<Item = InfoResponse>) -> Self {
        self.info_responses = info_responses.into_iter().collect();
        self
    }

    /// Sets the persisted viewport.
    #[must_use]
    pub fn with_viewer_config(mut self, viewer_config: ViewportState) -> Self {
        self.viewer_config = Some(viewer_config);
        self
    }
}

/// Image additions of one load batch that have not settled yet.
#[derive(Debug)]
struct PendingBatch {
    additions: Vec<ItemAddition>,
    zoom_after: bool,
}

/// Keeps a deep-zoom viewer in step with application state.
///
/// Two one-directional flows connect the viewer and the application:
/// - Push-down: [`ViewerCoordinator::open`] and [`ViewerCoordinator::update`]
///   reconcile the viewer with new props. Changed image sets reload every
///   source in a fresh viewer; changed layers only reorder and re-fade the
///   existing items; a changed viewport pans and zooms.
/// - Push-up: at every animation finish the viewer's settled viewport is sent
///   to the [`ViewportSink`], and nowhere else.
///
/// Image additions complete asynchronously. The host calls
/// [`ViewerCoordinator::poll_pending`] whenever the viewer may have completed
/// some; once a batch has settled the coordinator fits the world when the
/// selection changed, and becomes [`Lifecycle::Ready`].
///
/// Dropping the coordinator closes its viewer.
pub struct ViewerCoordinator<B, S>
where
    B: ViewerBackend,
    S: ViewportSink,
{
    window_id: String,
    backend: B,
    sink: S,
    options: ViewerOptions,
    props: ViewerProps,
    viewer: Option<B::Viewer>,
    lifecycle: Lifecycle,
    animating: bool,
    refresh_deferred: bool,
    pending: Option<PendingBatch>,
}

impl<B, S> ViewerCoordinator<B, S>
where
    B: ViewerBackend,
    S: ViewportSink,
{
    /// Creates an unmounted coordinator for `window_id`.
    pub fn new(
        window_id: impl Into<String>,
        backend: B,
        sink: S,
        options: ViewerOptions,
        props: ViewerProps,
    ) -> Self {
        Self {
            window_id: window_id.into(),
            backend,
            sink,
            options,
            props,
            viewer: None,
            lifecycle: Lifecycle::Unmounted,
            animating: false,
            refresh_deferred: false,
            pending: None,
        }
    }

    /// Creates the viewer and loads the current props into it.
    ///
    /// The persisted viewport is applied without animation before any image
    /// is requested. Opening an open coordinator does nothing.
    pub fn open(&mut self) -> Result<(), ViewerError> {
        if self.viewer.is_some() {
            return Ok(());
        }
        debug!("opening viewer for window `{}`", self.window_id);
        self.mount()?;
        self.lifecycle = Lifecycle::Mounting;
        self.add_all_image_sources(self.props.viewer_config.is_none());
        Ok(())
    }

    /// Reconciles the viewer with new props.
    ///
    /// When the image-information or static-image id sets changed, the viewer
    /// is recreated and every image reloaded. Otherwise a changed world only
    /// refreshes item order and opacity, and a changed viewport pans and
    /// zooms with animation. Without an open viewer the props are stored for
    /// the next [`ViewerCoordinator::open`].
    ///
    /// A failure to recreate the viewer leaves the coordinator unmounted.
    pub fn update(&mut self, props: ViewerProps) -> Result<(), ViewerError> {
        let previous = core::mem::replace(&mut self.props, props);
        if self.viewer.is_none() {
            return Ok(());
        }

        let sources_match = self.info_responses_match(&previous.info_responses)
            && self.non_tiled_images_match(&previous.non_tiled_images);
        if !sources_match {
            let canvases_changed = !previous
                .world
                .canvas_ids()
                .eq(self.props.world.canvas_ids());
            debug!(
                "image sources of window `{}` changed, reloading viewer",
                self.window_id
            );
            self.close();
            self.mount()?;
            self.lifecycle = Lifecycle::Updating;
            self.add_all_image_sources(canvases_changed || self.props.viewer_config.is_none());
            return Ok(());
        }

        if previous.viewer_config != self.props.viewer_config {
            self.push_viewport();
        }
        if previous.world != self.props.world {
            self.refresh_tile_properties();
        }
        Ok(())
    }

    /// Closes the viewer, discarding any loading batch.
    pub fn close(&mut self) {
        if let Some(mut viewer) = self.viewer.take() {
            debug!("closing viewer for window `{}`", self.window_id);
            viewer.close();
        }
        self.pending = None;
        self.animating = false;
        self.refresh_deferred = false;
        self.lifecycle = Lifecycle::Unmounted;
    }

    /// Redraws the viewer now, e.g. after its container was resized.
    pub fn request_redraw(&mut self) {
        if let Some(viewer) = &mut self.viewer {
            viewer.force_redraw();
        }
    }

    /// Handles an event the viewer emitted.
    pub fn handle_event(&mut self, event: ViewerEvent) {
        match event {
            ViewerEvent::AnimationStart => self.animating = true,
            ViewerEvent::AnimationFinish => {
                self.animating = false;
                if self.refresh_deferred {
                    self.refresh_deferred = false;
                    self.refresh_tile_properties();
                }
                self.on_viewport_change();
            }
        }
    }

    /// Sends the viewer's settled viewport to the sink.
    ///
    /// The center is rounded to whole world units, matching how pushed-down
    /// viewports are compared with the live one.
    pub fn on_viewport_change(&mut self) {
        let Some(viewer) = &self.viewer else {
            return;
        };
        let center = viewer.center_target();
        let viewport = ViewportState::new(center.x.round(), center.y.round(), viewer.zoom_target());
        trace!("window `{}` viewport settled at {viewport:?}", self.window_id);
        self.sink.update_viewport(&self.window_id, viewport);
    }

    /// Fits the whole world into the viewport without animation.
    pub fn zoom_to_world(&mut self) {
        let bounds = self.props.world.bounds();
        self.fit_bounds(bounds.x0, bounds.y0, bounds.width(), bounds.height());
    }

    /// Fits a world rectangle into the viewport without animation.
    pub fn fit_bounds(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if let Some(viewer) = &mut self.viewer {
            viewer.fit_bounds(Rect::new(x, y, x + width, y + height), true);
        }
    }

    /// Brings item draw order and opacity in line with the world.
    ///
    /// Items whose source the world does not know keep their order and
    /// opacity. While an animation runs the refresh is deferred to its end.
    pub fn refresh_tile_properties(&mut self) {
        if self.animating {
            trace!("deferring tile refresh until the animation finishes");
            self.refresh_deferred = true;
            return;
        }
        let Some(viewer) = &mut self.viewer else {
            return;
        };
        let world = &self.props.world;

        let items: Vec<(ItemId, Option<String>)> = (0..viewer.item_count())
            .filter_map(|index| viewer.item_at(index))
            .map(|item| {
                let resource = viewer
                    .item_source_id(item)
                    .and_then(|source| world.content_resource(source))
                    .map(|resource| resource.id.clone());
                (item, resource)
            })
            .collect();

        // Target positions are ranks among the loaded items; world draw
        // indices also count images the viewer never received.
        let mut ranked: Vec<(usize, ItemId)> = items
            .iter()
            .filter_map(|(item, resource)| {
                let index = world.layer_index_of_image_resource(resource.as_deref()?)?;
                Some((index, *item))
            })
            .collect();
        ranked.sort_by_key(|(index, _)| *index);

        for (position, (item, resource)) in items.into_iter().enumerate() {
            let Some(resource) = resource else {
                trace!("item {} has no content resource, leaving it", item.get());
                continue;
            };
            let target = ranked.iter().position(|(_, ranked_item)| *ranked_item == item);
            if let Some(target) = target {
                if target != position {
                    viewer.set_item_index(item, target);
                }
            }
            viewer.set_item_opacity(item, world.layer_opacity_of_image_resource(&resource));
        }
    }

    /// Requests a tiled image for an image-information response.
    ///
    /// The response is matched to its content resource by request id, then by
    /// service `@id`. Without a viewer the addition never settles.
    pub fn add_tile_source(&mut self, info: &InfoResponse) -> ItemAddition {
        let Some(viewer) = &mut self.viewer else {
            return ItemAddition::detached();
        };
        let world = &self.props.world;
        let Some(resource) = world
            .content_resource(&info.id)
            .or_else(|| world.content_resource(&info.json.id))
        else {
            return ItemAddition::ready(Err(AddItemError::UnknownResource(info.json.id.clone())));
        };
        let Some(fit_bounds) = world.content_resource_to_world_coordinates(&resource.id) else {
            return ItemAddition::ready(Err(AddItemError::UnknownResource(resource.id.clone())));
        };

        let (completion, addition) = ItemAddition::channel();
        viewer.add_tiled_image(
            TiledImageOptions {
                tile_source: info.json.clone(),
                fit_bounds,
                index: world.layer_index_of_image_resource(&resource.id),
                opacity: world.layer_opacity_of_image_resource(&resource.id),
            },
            completion,
        );
        addition
    }

    /// Requests a static image.
    ///
    /// Resources that are not images settle at once with
    /// [`AddItemError::NotAnImage`]. Without a viewer the addition never
    /// settles.
    pub fn add_non_tiled_image(&mut self, image: &ImageResource) -> ItemAddition {
        let Some(viewer) = &mut self.viewer else {
            return ItemAddition::detached();
        };
        if !image.is_image() {
            return ItemAddition::ready(Err(AddItemError::NotAnImage(image.id.clone())));
        }
        let world = &self.props.world;
        let Some(fit_bounds) = world.content_resource_to_world_coordinates(&image.id) else {
            return ItemAddition::ready(Err(AddItemError::UnknownResource(image.id.clone())));
        };

        let (completion, addition) = ItemAddition::channel();
        viewer.add_simple_image(
            SimpleImageOptions {
                url: image.id.clone(),
                fit_bounds,
                index: world.layer_index_of_image_resource(&image.id),
                opacity: world.layer_opacity_of_image_resource(&image.id),
            },
            completion,
        );
        addition
    }

    /// Requests every tiled and static image of the current props as one
    /// batch, replacing any batch still loading.
    ///
    /// With `zoom_after` the world is fitted once the whole batch settled.
    pub fn add_all_image_sources(&mut self, zoom_after: bool) {
        if self.viewer.is_none() {
            return;
        }
        let info_responses = core::mem::take(&mut self.props.info_responses);
        let non_tiled_images = core::mem::take(&mut self.props.non_tiled_images);

        let mut additions = Vec::with_capacity(info_responses.len() + non_tiled_images.len());
        for info in &info_responses {
            additions.push(self.add_tile_source(info));
        }
        for image in &non_tiled_images {
            additions.push(self.add_non_tiled_image(image));
        }

        self.props.info_responses = info_responses;
        self.props.non_tiled_images = non_tiled_images;
        trace!(
            "window `{}` requested {} image sources",
            self.window_id,
            additions.len()
        );
        self.pending = Some(PendingBatch {
            additions,
            zoom_after,
        });
        self.poll_pending();
    }

    /// Settles whatever additions of the loading batch have completed.
    ///
    /// Failed additions are logged and count as settled. Returns `true` once
    /// no batch is loading.
    pub fn poll_pending(&mut self) -> bool {
        let Some(batch) = &mut self.pending else {
            return true;
        };
        batch
            .additions
            .retain_mut(|addition| match addition.now_or_never() {
                Some(Ok(added)) => {
                    trace!("item {} added", added.item.get());
                    false
                }
                Some(Err(err @ AddItemError::NotAnImage(_))) => {
                    trace!("skipped: {err}");
                    false
                }
                Some(Err(err)) => {
                    warn!("image source not added: {err}");
                    false
                }
                None => true,
            });
        if !batch.additions.is_empty() {
            return false;
        }

        let zoom_after = batch.zoom_after;
        self.pending = None;
        if zoom_after {
            self.zoom_to_world();
        }
        if matches!(self.lifecycle, Lifecycle::Mounting | Lifecycle::Updating) {
            self.lifecycle = Lifecycle::Ready;
        }
        true
    }

    /// Whether `candidate` names the same image services as the loaded props.
    #[must_use]
    pub fn info_responses_match(&self, candidate: &[InfoResponse]) -> bool {
        info_responses_match(&self.props.info_responses, candidate)
    }

    /// Whether `candidate` names the same static images as the loaded props.
    #[must_use]
    pub fn non_tiled_images_match(&self, candidate: &[ImageResource]) -> bool {
        non_tiled_images_match(&self.props.non_tiled_images, candidate)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// The open viewer, if any.
    #[must_use]
    pub fn viewer(&self) -> Option<&B::Viewer> {
        self.viewer.as_ref()
    }

    /// The viewport sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The viewport sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The props the viewer reflects.
    #[must_use]
    pub fn props(&self) -> &ViewerProps {
        &self.props
    }

    /// Window this coordinator belongs to.
    #[must_use]
    pub fn window_id(&self) -> &str {
        &self.window_id
    }

    /// Options viewers are created with.
    #[must_use]
    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Whether a viewport animation is in progress.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Whether an image batch is still loading.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Creates a viewer, subscribes to its events and applies the persisted
    /// viewport without animation.
    fn mount(&mut self) -> Result<(), ViewerError> {
        let mut viewer = self.backend.create(&self.options).inspect_err(|err| {
            warn!("viewer for window `{}` not created: {err}", self.window_id);
        })?;
        viewer.add_handler(ViewerEvent::AnimationStart);
        viewer.add_handler(ViewerEvent::AnimationFinish);
        if let Some(config) = self.props.viewer_config {
            let center = config.center();
            viewer.pan_to(center, true);
            viewer.zoom_to(config.zoom, center, true);
        }
        self.viewer = Some(viewer);
        Ok(())
    }

    /// Moves the live viewport to the persisted one with animation.
    ///
    /// The live center is rounded before comparing so sub-unit drift never
    /// causes a pan; zoom compares exactly.
    fn push_viewport(&mut self) {
        let (Some(viewer), Some(config)) = (&mut self.viewer, self.props.viewer_config) else {
            return;
        };
        let center: Point = config.center();
        let live = viewer.center_target();
        if config.x != live.x.round() || config.y != live.y.round() {
            trace!("panning window `{}` to {center:?}", self.window_id);
            viewer.pan_to(center, false);
        }
        if config.zoom != viewer.zoom_target() {
            trace!("zooming window `{}` to {}", self.window_id, config.zoom);
            viewer.zoom_to(config.zoom, center, false);
        }
    }
}

impl<B, S> fmt::Debug for ViewerCoordinator<B, S>
where
    B: ViewerBackend,
    S: ViewportSink,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewerCoordinator")
            .field("window_id", &self.window_id)
            .field("options", &self.options)
            .field("lifecycle", &self.lifecycle)
            .field("animating", &self.animating)
            .field("refresh_deferred", &self.refresh_deferred)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<B, S> Drop for ViewerCoordinator<B, S>
where
    B: ViewerBackend,
    S: ViewportSink,
{
    fn drop(&mut self) {
        self.close();
    }
}
