// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording viewer double and fixtures for coordinator integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use mirador_canvas::{Canvas, ImageResource};
use mirador_viewer::{
    DeepZoomViewer, ImageInfo, InfoResponse, ItemCompletion, ItemId, SimpleImageOptions,
    TiledImageOptions, ViewerBackend, ViewerCoordinator, ViewerError, ViewerEvent, ViewerOptions,
    ViewerProps, ViewportSink, ViewportState,
};
use mirador_world::{CanvasWorld, Layers, ViewingDirection};

pub(crate) const WINDOW: &str = "window-1";

/// A viewer call as the coordinator issued it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Create,
    AddHandler(ViewerEvent),
    AddTiledImage {
        id: String,
        fit_bounds: Rect,
        index: Option<usize>,
        opacity: f64,
    },
    AddSimpleImage {
        url: String,
        fit_bounds: Rect,
        index: Option<usize>,
        opacity: f64,
    },
    SetItemIndex(ItemId, usize),
    SetItemOpacity(ItemId, f64),
    PanTo(Point, bool),
    ZoomTo(f64, Point, bool),
    FitBounds(Rect, bool),
    ForceRedraw,
    Close,
}

/// State shared by the backend, every viewer it created, and the test.
#[derive(Debug)]
pub(crate) struct Harness {
    pub(crate) calls: Vec<Call>,
    pub(crate) created: usize,
    pub(crate) fail_create: bool,
    /// Keep completions in `deferred` instead of succeeding right away.
    pub(crate) defer_completions: bool,
    pub(crate) deferred: Vec<(ItemId, ItemCompletion)>,
    pub(crate) next_item: u64,
    pub(crate) center: Point,
    pub(crate) zoom: f64,
}

impl Harness {
    pub(crate) fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            calls: Vec::new(),
            created: 0,
            fail_create: false,
            defer_completions: false,
            deferred: Vec::new(),
            next_item: 0,
            center: Point::ZERO,
            zoom: 1.0,
        }))
    }

    pub(crate) fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| matches(call)).count()
    }

    /// Succeeds every deferred completion.
    pub(crate) fn complete_all(&mut self) {
        for (item, completion) in self.deferred.drain(..) {
            completion.succeed(item);
        }
    }
}

#[derive(Debug)]
pub(crate) struct RecordingBackend {
    pub(crate) harness: Rc<RefCell<Harness>>,
}

impl ViewerBackend for RecordingBackend {
    type Viewer = RecordingViewer;

    fn create(&mut self, _options: &ViewerOptions) -> Result<RecordingViewer, ViewerError> {
        let mut harness = self.harness.borrow_mut();
        if harness.fail_create {
            return Err(ViewerError::Create {
                reason: "no host element".into(),
            });
        }
        harness.created += 1;
        harness.calls.push(Call::Create);
        Ok(RecordingViewer {
            harness: Rc::clone(&self.harness),
            items: Vec::new(),
        })
    }
}

#[derive(Debug)]
pub(crate) struct RecordingViewer {
    harness: Rc<RefCell<Harness>>,
    items: Vec<(ItemId, String)>,
}

impl RecordingViewer {
    pub(crate) fn sources(&self) -> Vec<&str> {
        self.items.iter().map(|(_, source)| source.as_str()).collect()
    }

    pub(crate) fn item_for(&self, source: &str) -> Option<ItemId> {
        self.items
            .iter()
            .find(|(_, candidate)| candidate == source)
            .map(|(item, _)| *item)
    }

    fn insert(&mut self, source: String, index: Option<usize>, completion: ItemCompletion) {
        let mut harness = self.harness.borrow_mut();
        let item = ItemId::new(harness.next_item);
        harness.next_item += 1;
        let index = index.unwrap_or(self.items.len()).min(self.items.len());
        self.items.insert(index, (item, source));
        if harness.defer_completions {
            harness.deferred.push((item, completion));
        } else {
            completion.succeed(item);
        }
    }

    fn record(&self, call: Call) {
        self.harness.borrow_mut().calls.push(call);
    }
}

impl DeepZoomViewer for RecordingViewer {
    fn add_handler(&mut self, event: ViewerEvent) {
        self.record(Call::AddHandler(event));
    }

    fn add_tiled_image(&mut self, options: TiledImageOptions, completion: ItemCompletion) {
        self.record(Call::AddTiledImage {
            id: options.tile_source.id.clone(),
            fit_bounds: options.fit_bounds,
            index: options.index,
            opacity: options.opacity,
        });
        self.insert(options.tile_source.id, options.index, completion);
    }

    fn add_simple_image(&mut self, options: SimpleImageOptions, completion: ItemCompletion) {
        self.record(Call::AddSimpleImage {
            url: options.url.clone(),
            fit_bounds: options.fit_bounds,
            index: options.index,
            opacity: options.opacity,
        });
        self.insert(options.url, options.index, completion);
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, index: usize) -> Option<ItemId> {
        self.items.get(index).map(|(item, _)| *item)
    }

    fn item_source_id(&self, item: ItemId) -> Option<&str> {
        self.items
            .iter()
            .find(|(candidate, _)| *candidate == item)
            .map(|(_, source)| source.as_str())
    }

    fn set_item_index(&mut self, item: ItemId, index: usize) {
        self.record(Call::SetItemIndex(item, index));
        assert!(
            index < self.items.len(),
            "index {index} bigger than number of items {}",
            self.items.len()
        );
        if let Some(from) = self.items.iter().position(|(candidate, _)| *candidate == item) {
            let entry = self.items.remove(from);
            self.items.insert(index, entry);
        }
    }

    fn set_item_opacity(&mut self, item: ItemId, opacity: f64) {
        self.record(Call::SetItemOpacity(item, opacity));
    }

    fn pan_to(&mut self, center: Point, immediately: bool) {
        self.record(Call::PanTo(center, immediately));
        self.harness.borrow_mut().center = center;
    }

    fn zoom_to(&mut self, zoom: f64, reference: Point, immediately: bool) {
        self.record(Call::ZoomTo(zoom, reference, immediately));
        self.harness.borrow_mut().zoom = zoom;
    }

    fn fit_bounds(&mut self, bounds: Rect, immediately: bool) {
        self.record(Call::FitBounds(bounds, immediately));
    }

    fn center_target(&self) -> Point {
        self.harness.borrow().center
    }

    fn zoom_target(&self) -> f64 {
        self.harness.borrow().zoom
    }

    fn force_redraw(&mut self) {
        self.record(Call::ForceRedraw);
    }

    fn close(&mut self) {
        self.record(Call::Close);
        self.items.clear();
    }
}

/// Sink recording every viewport update, duplicates included.
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub(crate) updates: Vec<(String, ViewportState)>,
}

impl ViewportSink for RecordingSink {
    fn update_viewport(&mut self, window_id: &str, viewport: ViewportState) {
        self.updates.push((window_id.to_owned(), viewport));
    }
}

pub(crate) type Coordinator = ViewerCoordinator<RecordingBackend, RecordingSink>;

pub(crate) const SERVICE_1: &str = "https://iiif.example/c1-1";
pub(crate) const SERVICE_2: &str = "https://iiif.example/c1-2";
pub(crate) const PHOTO: &str = "https://static.example/c2.jpg";

/// Two canvases: `c1` with two tiled layers, `c2` with one static image.
///
/// Draw indices: `c1/img2` 0, `c1/img1` 1, the photo 2.
pub(crate) fn canvases() -> Vec<Canvas> {
    vec![
        Canvas::new("c1", 1000, 2000)
            .with_image(ImageResource::tiled("c1/img1", SERVICE_1, 1000, 2000))
            .with_image(ImageResource::tiled("c1/img2", SERVICE_2, 1000, 2000)),
        Canvas::new("c2", 500, 1000)
            .with_image(ImageResource::static_image(PHOTO, 500, 1000).with_format("image/jpeg")),
    ]
}

pub(crate) fn world(layers: Layers) -> CanvasWorld {
    CanvasWorld::new(canvases(), layers, ViewingDirection::LeftToRight)
}

pub(crate) fn info_responses() -> Vec<InfoResponse> {
    vec![
        InfoResponse::new(ImageInfo::new(SERVICE_1, 1000, 2000)),
        InfoResponse::new(ImageInfo::new(SERVICE_2, 1000, 2000)),
    ]
}

pub(crate) fn props(layers: Layers) -> ViewerProps {
    ViewerProps::new(world(layers)).with_info_responses(info_responses())
}

pub(crate) fn coordinator(harness: &Rc<RefCell<Harness>>, props: ViewerProps) -> Coordinator {
    ViewerCoordinator::new(
        WINDOW,
        RecordingBackend {
            harness: Rc::clone(harness),
        },
        RecordingSink::default(),
        ViewerOptions::default(),
        props,
    )
}
