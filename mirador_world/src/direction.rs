// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Order in which the canvases of a sequence are laid out.
///
/// Horizontal directions place canvases side by side at a common height;
/// vertical directions stack them at a common width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ViewingDirection {
    /// First canvas on the left.
    #[default]
    LeftToRight,
    /// First canvas on the right.
    RightToLeft,
    /// First canvas at the top.
    TopToBottom,
    /// First canvas at the bottom.
    BottomToTop,
}

impl ViewingDirection {
    /// Parses a IIIF `viewingDirection`, degrading unknown values to
    /// [`ViewingDirection::LeftToRight`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "right-to-left" => Self::RightToLeft,
            "top-to-bottom" => Self::TopToBottom,
            "bottom-to-top" => Self::BottomToTop,
            _ => Self::LeftToRight,
        }
    }

    /// Returns `true` for left-to-right and right-to-left.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::LeftToRight | Self::RightToLeft)
    }

    /// Returns `true` when the first canvas sits at the far (right/bottom) end.
    #[must_use]
    pub const fn is_reversed(self) -> bool {
        matches!(self, Self::RightToLeft | Self::BottomToTop)
    }
}

impl From<&str> for ViewingDirection {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::ViewingDirection;

    #[test]
    fn parses_iiif_values_with_left_to_right_fallback() {
        assert_eq!(
            ViewingDirection::parse("right-to-left"),
            ViewingDirection::RightToLeft
        );
        assert_eq!(
            ViewingDirection::parse("bottom-to-top"),
            ViewingDirection::BottomToTop
        );
        assert_eq!(
            ViewingDirection::parse("diagonal"),
            ViewingDirection::LeftToRight
        );
        assert!(!ViewingDirection::TopToBottom.is_reversed());
        assert!(ViewingDirection::BottomToTop.is_reversed());
        assert!(!ViewingDirection::TopToBottom.is_horizontal());
    }
}
