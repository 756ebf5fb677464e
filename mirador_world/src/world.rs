// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;
use kurbo::{Point, Rect, Vec2};
use mirador_canvas::{Canvas, ImageResource};

use crate::direction::ViewingDirection;
use crate::layers::Layers;

/// Where and how one content resource is drawn in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResourcePlacement {
    /// Index of the owning canvas in [`CanvasWorld::canvases`].
    pub canvas_index: usize,
    /// World-space rectangle covered by the resource.
    pub rect: Rect,
    /// World units per canvas pixel.
    pub scale: f64,
    /// Draw order; higher indices are drawn on top. Unique across the world.
    pub layer_index: usize,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Whether the resource is a deep-zoom (tiled) source.
    pub tiled: bool,
}

/// Shared coordinate space for the currently visible canvases.
///
/// The world is built once from its inputs (visible canvases, layer
/// overrides, viewing direction) and then answers placement queries:
/// - [`CanvasWorld::bounds`]: the union of all placed canvases.
/// - [`CanvasWorld::placement`] and friends: offset, scale, draw order and
///   opacity per content resource.
///
/// Layout rules:
/// - Horizontal directions scale every canvas to the tallest canvas' height;
///   vertical directions scale to the widest canvas' width.
/// - Extents along the layout axis are floored to whole world units.
/// - Reversed directions mirror positions, so the first canvas is at the
///   right (or bottom) edge.
/// - Canvases without dimensions take no space.
/// - A content resource id is placed once, on the first canvas painting it;
///   later repeats are ignored.
///
/// Two worlds compare equal when their inputs do (canvas id list, layers and
/// direction). A coordinator uses that to tell a layer/opacity refresh from a
/// full tile reload.
#[derive(Clone, Debug)]
pub struct CanvasWorld {
    canvases: Vec<Canvas>,
    layers: Layers,
    direction: ViewingDirection,
    canvas_rects: Vec<Rect>,
    placements: HashMap<String, ResourcePlacement>,
    /// Normalized image-service id to resource id.
    services: HashMap<String, String>,
    bounds: Rect,
}

impl CanvasWorld {
    /// Lays out `canvases` with the given layer overrides and direction.
    #[must_use]
    pub fn new(
        canvases: impl IntoIterator<Item = Canvas>,
        layers: Layers,
        direction: ViewingDirection,
    ) -> Self {
        let mut world = Self {
            canvases: canvases.into_iter().collect(),
            layers,
            direction,
            canvas_rects: Vec::new(),
            placements: HashMap::new(),
            services: HashMap::new(),
            bounds: Rect::ZERO,
        };
        world.rebuild();
        world
    }

    /// Replaces the inputs, recomputing geometry only when they changed.
    ///
    /// Returns `true` if the world was rebuilt.
    pub fn update(
        &mut self,
        canvases: impl IntoIterator<Item = Canvas>,
        layers: Layers,
        direction: ViewingDirection,
    ) -> bool {
        let canvases: Vec<Canvas> = canvases.into_iter().collect();
        let same_canvases = canvases.len() == self.canvases.len()
            && canvases
                .iter()
                .zip(&self.canvases)
                .all(|(new, old)| new.id == old.id);
        if same_canvases && layers == self.layers && direction == self.direction {
            return false;
        }
        self.canvases = canvases;
        self.layers = layers;
        self.direction = direction;
        self.rebuild();
        true
    }

    /// Returns `true` if both worlds were built from the same inputs.
    #[must_use]
    pub fn same_inputs(&self, other: &Self) -> bool {
        self.direction == other.direction
            && self.layers == other.layers
            && self.canvas_ids().eq(other.canvas_ids())
    }

    /// The visible canvases, in sequence order.
    #[must_use]
    pub fn canvases(&self) -> &[Canvas] {
        &self.canvases
    }

    /// Identifiers of the visible canvases, in sequence order.
    pub fn canvas_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.canvases.iter().map(|canvas| canvas.id.as_str())
    }

    /// Layer overrides the world was built with.
    #[must_use]
    pub fn layers(&self) -> &Layers {
        &self.layers
    }

    /// Viewing direction the world was built with.
    #[must_use]
    pub fn viewing_direction(&self) -> ViewingDirection {
        self.direction
    }

    /// Bounds of the whole world.
    ///
    /// The origin is always `(0, 0)`; an empty world has zero size.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// World rectangle of the canvas `canvas_id`.
    #[must_use]
    pub fn canvas_to_world_coordinates(&self, canvas_id: &str) -> Option<Rect> {
        let index = self.canvas_index(canvas_id)?;
        self.canvas_rects.get(index).copied()
    }

    /// World offset of the canvas `canvas_id` (its top-left corner).
    #[must_use]
    pub fn offset_by_canvas(&self, canvas_id: &str) -> Option<Vec2> {
        self.canvas_to_world_coordinates(canvas_id)
            .map(|rect| rect.origin().to_vec2())
    }

    /// First canvas whose world rectangle contains `point`.
    #[must_use]
    pub fn canvas_at_point(&self, point: Point) -> Option<&Canvas> {
        self.canvas_rects
            .iter()
            .position(|rect| rect.contains(point))
            .map(|index| &self.canvases[index])
    }

    /// Looks up a content resource by resource id or image-service id.
    ///
    /// Service ids are matched after stripping a trailing `/info.json` and
    /// `/`, so an info-response `@id` finds its resource.
    #[must_use]
    pub fn content_resource(&self, id: &str) -> Option<&ImageResource> {
        let resource_id = self.resolve(id)?;
        let placement = self.placements.get(resource_id)?;
        self.canvases[placement.canvas_index]
            .images
            .iter()
            .find(|image| image.id == resource_id)
    }

    /// Placement of a content resource, by resource id or image-service id.
    #[must_use]
    pub fn placement(&self, id: &str) -> Option<&ResourcePlacement> {
        self.placements.get(self.resolve(id)?)
    }

    /// World rectangle of a content resource.
    #[must_use]
    pub fn content_resource_to_world_coordinates(&self, id: &str) -> Option<Rect> {
        self.placement(id).map(|placement| placement.rect)
    }

    /// Draw index of a content resource; `None` for unknown resources.
    #[must_use]
    pub fn layer_index_of_image_resource(&self, id: &str) -> Option<usize> {
        self.placement(id).map(|placement| placement.layer_index)
    }

    /// Opacity of a content resource; `1.0` for unknown resources.
    #[must_use]
    pub fn layer_opacity_of_image_resource(&self, id: &str) -> f64 {
        self.placement(id).map_or(1.0, |placement| placement.opacity)
    }

    fn canvas_index(&self, canvas_id: &str) -> Option<usize> {
        self.canvases.iter().position(|canvas| canvas.id == canvas_id)
    }

    fn resolve<'a>(&'a self, id: &'a str) -> Option<&'a str> {
        if self.placements.contains_key(id) {
            return Some(id);
        }
        self.services
            .get(normalize_service_id(id))
            .map(String::as_str)
    }

    fn rebuild(&mut self) {
        let (canvas_rects, bounds) = layout(&self.canvases, self.direction);
        self.canvas_rects = canvas_rects;
        self.bounds = bounds;
        self.placements.clear();
        self.services.clear();

        let mut base_index = 0;
        for (canvas_index, canvas) in self.canvases.iter().enumerate() {
            let canvas_rect = self.canvas_rects[canvas_index];
            let scale = if canvas.has_dimensions() {
                canvas_rect.width() / f64::from(canvas.width)
            } else {
                0.0
            };

            // Rank images by layer position (override, else manifest order);
            // rank 0 is the front-most layer and gets the highest draw index.
            // A resource id is placed once, where it first appears.
            let mut ranked: Vec<(usize, &ImageResource)> = canvas
                .images
                .iter()
                .enumerate()
                .filter(|&(at, image)| {
                    image.is_image()
                        && !self.placements.contains_key(&image.id)
                        && canvas.images[..at].iter().all(|earlier| earlier.id != image.id)
                })
                .map(|(_, image)| image)
                .enumerate()
                .map(|(order, image)| {
                    let position = self
                        .layers
                        .get(&image.id)
                        .and_then(|settings| settings.index)
                        .unwrap_or(order);
                    (position, image)
                })
                .collect();
            ranked.sort_by_key(|(position, _)| *position);

            let total = ranked.len();
            for (rank, (_, image)) in ranked.into_iter().enumerate() {
                let rect = image.fragment.map_or(canvas_rect, |fragment| {
                    Rect::new(
                        canvas_rect.x0 + fragment.x0 * scale,
                        canvas_rect.y0 + fragment.y0 * scale,
                        canvas_rect.x0 + fragment.x1 * scale,
                        canvas_rect.y0 + fragment.y1 * scale,
                    )
                });
                let opacity = self
                    .layers
                    .get(&image.id)
                    .map_or(1.0, |settings| settings.effective_opacity());
                self.placements.insert(
                    image.id.clone(),
                    ResourcePlacement {
                        canvas_index,
                        rect,
                        scale,
                        layer_index: base_index + total - rank - 1,
                        opacity,
                        tiled: image.is_tiled(),
                    },
                );
                if let Some(service_id) = &image.service_id {
                    self.services
                        .insert(normalize_service_id(service_id).to_owned(), image.id.clone());
                }
            }
            base_index += total;
        }
    }
}

impl PartialEq for CanvasWorld {
    fn eq(&self, other: &Self) -> bool {
        self.same_inputs(other)
    }
}

fn normalize_service_id(id: &str) -> &str {
    id.trim_end_matches("/info.json").trim_end_matches('/')
}

/// Places every canvas and returns the per-canvas rects plus the world bounds.
fn layout(canvases: &[Canvas], direction: ViewingDirection) -> (Vec<Rect>, Rect) {
    let horizontal = direction.is_horizontal();
    let common_height = canvases
        .iter()
        .filter(|canvas| canvas.has_dimensions())
        .map(|canvas| f64::from(canvas.height))
        .fold(0.0, f64::max);
    let common_width = canvases
        .iter()
        .filter(|canvas| canvas.has_dimensions())
        .map(|canvas| f64::from(canvas.width))
        .fold(0.0, f64::max);

    let extents: Vec<(f64, f64)> = canvases
        .iter()
        .map(|canvas| {
            if !canvas.has_dimensions() {
                return (0.0, 0.0);
            }
            let size = canvas.size();
            if horizontal {
                ((common_height * size.width / size.height).floor(), common_height)
            } else {
                (common_width, (common_width * size.height / size.width).floor())
            }
        })
        .collect();

    let (world_width, world_height) = if horizontal {
        (extents.iter().map(|(w, _)| w).sum(), common_height)
    } else {
        (common_width, extents.iter().map(|(_, h)| h).sum())
    };

    let mut offset = 0.0;
    let rects = extents
        .into_iter()
        .map(|(width, height)| {
            let rect = match (horizontal, direction.is_reversed()) {
                (true, false) => Rect::new(offset, 0.0, offset + width, height),
                (true, true) => {
                    let x = world_width - offset - width;
                    Rect::new(x, 0.0, x + width, height)
                }
                (false, false) => Rect::new(0.0, offset, width, offset + height),
                (false, true) => {
                    let y = world_height - offset - height;
                    Rect::new(0.0, y, width, y + height)
                }
            };
            offset += if horizontal { width } else { height };
            rect
        })
        .collect();

    (rects, Rect::new(0.0, 0.0, world_width, world_height))
}
