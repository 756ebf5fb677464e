// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors of viewer creation, image additions and configuration.

use thiserror::Error;

/// Failure to bring up a deep-zoom viewer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ViewerError {
    /// The backend could not create a viewer instance.
    #[error("viewer backend could not create a viewer: {reason}")]
    Create {
        /// Backend-provided description.
        reason: String,
    },
}

/// Outcome of a tile-source or static-image addition that did not produce an item.
///
/// None of these are fatal: the coordinator logs them and carries on, and the
/// affected image stays missing until the next reload.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AddItemError {
    /// The canvas world has no content resource for this id.
    #[error("no content resource for `{0}` in the canvas world")]
    UnknownResource(String),
    /// The resource is not an image and is never sent to the viewer.
    #[error("`{0}` is not an image")]
    NotAnImage(String),
    /// The viewer reported a load failure.
    #[error("viewer failed to load `{id}`: {reason}")]
    Failed {
        /// Tile-source or image id.
        id: String,
        /// Viewer-provided description.
        reason: String,
    },
    /// The viewer dropped the request without completing it.
    #[error("viewer dropped the request before completing it")]
    Abandoned,
}

/// Invalid viewer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON for [`ViewerOptions`](crate::ViewerOptions).
    #[error("invalid viewer options: {0}")]
    Json(#[from] serde_json::Error),
    /// A numeric option is outside its allowed range.
    #[error("viewer option `{field}` out of range: {value}")]
    OutOfRange {
        /// Option name as spelled in configuration.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}
