// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render surface seam and a recording implementation.
//!
//! [`SceneGraph::render`](crate::SceneGraph::render) only needs four primitives, so any
//! backend (a canvas, a CPU rasterizer, a terminal) can sit behind [`Surface`].
//! [`RecordingSurface`] keeps the calls as [`DrawOp`]s, which is what tests and the
//! demos use.

use alloc::vec::Vec;
use kurbo::{Rect, Size};
use peniko::Color;

/// A 2D drawing target in surface coordinates (origin top-left, no scaling).
pub trait Surface {
    /// Extent of the surface.
    ///
    /// [`SceneGraph::render`](crate::SceneGraph::render) never reads this and does not
    /// clip; it is for hosts that size a viewport or map window coordinates.
    fn size(&self) -> Size;

    /// Paint the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Fill `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline `rect` with `color`.
    fn stroke_rect(&mut self, rect: Rect, color: Color);
}

/// One recorded [`Surface`] call.
#[derive(Clone, Copy, Debug)]
pub enum DrawOp {
    /// [`Surface::clear`].
    Clear(Color),
    /// [`Surface::fill_rect`].
    FillRect(Rect, Color),
    /// [`Surface::stroke_rect`].
    StrokeRect(Rect, Color),
}

impl DrawOp {
    /// The rectangle this op touches, or `None` for [`DrawOp::Clear`].
    pub fn rect(&self) -> Option<Rect> {
        match self {
            Self::Clear(_) => None,
            Self::FillRect(r, _) | Self::StrokeRect(r, _) => Some(*r),
        }
    }
}

/// A [`Surface`] that records every call.
///
/// ```
/// use kurbo::{Rect, Size};
/// use peniko::color::palette;
/// use stagehand_scene::{DrawOp, RecordingSurface, Surface};
///
/// let mut surface = RecordingSurface::new(Size::new(800.0, 600.0));
/// assert_eq!(surface.size(), Size::new(800.0, 600.0));
/// surface.clear(palette::css::BLACK);
/// surface.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), palette::css::WHITE);
/// assert_eq!(surface.ops().len(), 2);
/// assert!(matches!(surface.ops()[1], DrawOp::FillRect(..)));
/// ```
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: Size,
    ops: Vec<DrawOp>,
    frames: usize,
}

impl RecordingSurface {
    /// Create an empty recording of the given extent.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ops: Vec::new(),
            frames: 0,
        }
    }

    /// Ops recorded since the last [`Surface::clear`] (the current frame).
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of [`Surface::clear`] calls seen, i.e. frames started.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Rectangles filled in the current frame, in draw order.
    pub fn filled_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillRect(r, _) => Some(*r),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.ops.clear();
        self.frames += 1;
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::StrokeRect(rect, color));
    }
}
