// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport state shared between the application and the viewer.

use hashbrown::HashMap;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Camera of a deep-zoom viewer: world-space center and zoom level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Center x in world units.
    pub x: f64,
    /// Center y in world units.
    pub y: f64,
    /// Viewer zoom level.
    pub zoom: f64,
}

impl ViewportState {
    /// Creates a viewport state.
    #[must_use]
    pub const fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    /// Center as a point.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Receiver of viewer-to-application viewport updates.
///
/// The coordinator only calls this at animation-finish checkpoints.
pub trait ViewportSink {
    /// Records the settled viewport of `window_id`.
    fn update_viewport(&mut self, window_id: &str, viewport: ViewportState);
}

impl<F> ViewportSink for F
where
    F: FnMut(&str, ViewportState),
{
    fn update_viewport(&mut self, window_id: &str, viewport: ViewportState) {
        self(window_id, viewport);
    }
}

/// In-memory viewport state keyed by window id.
///
/// The revision only advances when a stored value actually changes, so
/// observers can skip re-rendering on repeated identical updates.
#[derive(Clone, Debug, Default)]
pub struct ViewportStore {
    viewports: HashMap<String, ViewportState>,
    revision: u64,
}

impl ViewportStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last viewport recorded for `window_id`.
    #[must_use]
    pub fn get(&self, window_id: &str) -> Option<ViewportState> {
        self.viewports.get(window_id).copied()
    }

    /// Number of changes applied so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Forgets the viewport of a closed window.
    pub fn remove(&mut self, window_id: &str) -> Option<ViewportState> {
        let removed = self.viewports.remove(window_id);
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }
}

impl ViewportSink for ViewportStore {
    fn update_viewport(&mut self, window_id: &str, viewport: ViewportState) {
        if self.viewports.get(window_id) == Some(&viewport) {
            return;
        }
        self.viewports.insert(window_id.to_owned(), viewport);
        self.revision += 1;
    }
}
