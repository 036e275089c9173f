// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectangle type and aspect-preserving containment.

use serde::Serialize;

/// Axis-aligned rectangle in page points, origin top-left, y growing down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// Whether `other` lies inside `self`, allowing `epsilon` of float slack.
    pub fn contains(&self, other: &Rect, epsilon: f32) -> bool {
        other.left >= self.left - epsilon
            && other.top >= self.top - epsilon
            && other.right <= self.right + epsilon
            && other.bottom <= self.bottom + epsilon
    }
}

/// Place a `box_width` x `box_height` box inside `container` without
/// distortion, as large as possible and centred on both axes.
///
/// Fits the width first, then shrinks again if the result is too tall.
/// Both box dimensions and the container size must be positive.
pub fn fit_within_bounds(box_width: f32, box_height: f32, container: &Rect) -> Rect {
    let container_width = container.width();
    let container_height = container.height();

    let width_ratio = container_width / box_width;
    let mut fitted_width = box_width * width_ratio;
    let mut fitted_height = box_height * width_ratio;

    // Portrait content overflows the region vertically.
    if fitted_height > container_height {
        let height_ratio = container_height / fitted_height;
        fitted_width *= height_ratio;
        fitted_height *= height_ratio;
    }

    // Float rounding can leave the product a hair over the limit.
    let fitted_width = fitted_width.min(container_width);
    let fitted_height = fitted_height.min(container_height);

    let left = container.center_x() - fitted_width / 2.0;
    let top = container.center_y() - fitted_height / 2.0;
    Rect::new(left, top, left + fitted_width, top + fitted_height)
}
