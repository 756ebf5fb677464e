// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-resource layer overrides.

use hashbrown::HashMap;

/// User-controlled layer state for one content resource.
///
/// Unset fields fall back to the defaults: manifest order for `index`,
/// `1.0` for `opacity`, visible.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerSettings {
    /// Position in the canvas' layer list; `0` is the front-most layer.
    pub index: Option<usize>,
    /// Opacity in `[0, 1]`.
    pub opacity: Option<f64>,
    /// Hidden layers are drawn with zero opacity.
    pub visible: Option<bool>,
}

impl LayerSettings {
    /// Sets the layer position.
    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Sets the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Sets visibility.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Effective opacity after applying visibility and clamping.
    #[must_use]
    pub fn effective_opacity(&self) -> f64 {
        if self.visible == Some(false) {
            return 0.0;
        }
        self.opacity.map_or(1.0, |opacity| opacity.clamp(0.0, 1.0))
    }
}

/// Layer overrides for the visible canvases, keyed by content-resource id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layers {
    settings: HashMap<String, LayerSettings>,
}

impl Layers {
    /// Creates an empty set of overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overrides for `resource_id`, returning the previous ones.
    pub fn insert(
        &mut self,
        resource_id: impl Into<String>,
        settings: LayerSettings,
    ) -> Option<LayerSettings> {
        self.settings.insert(resource_id.into(), settings)
    }

    /// Overrides for `resource_id`, if any.
    #[must_use]
    pub fn get(&self, resource_id: &str) -> Option<&LayerSettings> {
        self.settings.get(resource_id)
    }

    /// Number of overridden resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// Returns `true` when nothing is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, LayerSettings)> for Layers {
    fn from_iter<I: IntoIterator<Item = (K, LayerSettings)>>(iter: I) -> Self {
        Self {
            settings: iter
                .into_iter()
                .map(|(id, settings)| (id.into(), settings))
                .collect(),
        }
    }
}
