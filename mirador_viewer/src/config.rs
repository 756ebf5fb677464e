// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewer construction options.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Options handed to the viewer backend when a viewer is created.
///
/// Field names follow the camel-case spelling of a Mirador `osdConfig`
/// object; every field is optional in configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerOptions {
    /// Blend every tile, not only newly loaded ones.
    pub always_blend: bool,
    /// Seconds a new tile takes to fade in.
    pub blend_time: f64,
    /// Keep image scale (rather than viewport fit) when the container resizes.
    pub preserve_image_size_on_resize: bool,
    /// Keep the viewport when the set of images changes.
    pub preserve_viewport: bool,
    /// Show the viewer's built-in navigation buttons.
    pub show_navigation_control: bool,
    /// Constrain the viewport to the world bounds while panning, not only at
    /// the end of a gesture.
    pub constrain_during_pan: bool,
    /// Fraction of the world that must stay visible, in `(0, 1]`.
    pub visibility_ratio: f64,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            always_blend: false,
            blend_time: 0.1,
            preserve_image_size_on_resize: true,
            preserve_viewport: true,
            show_navigation_control: false,
            constrain_during_pan: false,
            visibility_ratio: 0.5,
        }
    }
}

impl ViewerOptions {
    /// Parses options from a JSON object, filling gaps with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks numeric options against their allowed ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blend_time.is_nan() || self.blend_time < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "blendTime",
                value: self.blend_time,
            });
        }
        if !(self.visibility_ratio > 0.0 && self.visibility_ratio <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "visibilityRatio",
                value: self.visibility_ratio,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ViewerOptions;
    use crate::ConfigError;

    #[test]
    fn partial_json_keeps_defaults() {
        let options =
            ViewerOptions::from_json(r#"{ "constrainDuringPan": true, "blendTime": 0 }"#).unwrap();
        assert!(options.constrain_during_pan);
        assert_eq!(options.blend_time, 0.0);
        assert!(options.preserve_viewport);
        assert_eq!(options.visibility_ratio, 0.5);
    }

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(
            ViewerOptions::from_json("{}").unwrap(),
            ViewerOptions::default()
        );
    }

    #[test]
    fn rejects_out_of_range_and_malformed_input() {
        assert!(matches!(
            ViewerOptions::from_json(r#"{ "visibilityRatio": 0 }"#),
            Err(ConfigError::OutOfRange {
                field: "visibilityRatio",
                ..
            })
        ));
        assert!(matches!(
            ViewerOptions::from_json(r#"{ "blendTime": -1 }"#),
            Err(ConfigError::OutOfRange {
                field: "blendTime",
                ..
            })
        ));
        assert!(matches!(
            ViewerOptions::from_json("[1, 2]"),
            Err(ConfigError::Json(_))
        ));
    }
}
