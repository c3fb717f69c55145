// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, node payloads, and absolute boxes.

use kurbo::{Point, Rect, Size};
use peniko::Color;
use peniko::color::palette;

/// Identifier for a node in a [`SceneGraph`](crate::SceneGraph).
///
/// Ids are opaque and never reused within one scene: a detached id stays
/// retired, and attaching a node that carries it again is rejected with
/// [`SceneError::DuplicateId`](crate::SceneError::DuplicateId).
///
/// Fresh ids come from [`SceneGraph::allocate_id`](crate::SceneGraph::allocate_id).
/// [`NodeId::new`] exists for callers that mint ids from their own identity scheme.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible (drawn by [`SceneGraph::render`](crate::SceneGraph::render)).
        const VISIBLE  = 0b0000_0001;
        /// Node is pickable (can be grabbed by a drag).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// What a node carries besides its position.
#[derive(Clone, Copy, Debug)]
pub enum NodeKind {
    /// A plain positioning node. It has no area: it is never drawn and never hit.
    Group,
    /// A filled rectangle anchored at the node's absolute position (top-left origin).
    Rect {
        /// Width and height. Always non-negative.
        size: Size,
        /// Fill color.
        fill: Color,
        /// Optional outline color.
        stroke: Option<Color>,
    },
}

impl NodeKind {
    /// Extent of the node's box; zero for groups.
    pub fn size(&self) -> Size {
        match self {
            Self::Group => Size::ZERO,
            Self::Rect { size, .. } => *size,
        }
    }

    /// Returns `true` for [`NodeKind::Rect`].
    pub fn is_rect(&self) -> bool {
        matches!(self, Self::Rect { .. })
    }
}

/// A detached node, ready to be attached to a [`SceneGraph`](crate::SceneGraph).
#[derive(Clone, Debug)]
pub struct Node {
    /// Identity, fixed at construction.
    pub id: NodeId,
    /// Offset relative to the parent's absolute position. For a root, the absolute origin.
    pub position: Point,
    /// Group or rectangle payload.
    pub kind: NodeKind,
    /// Visibility and picking flags.
    pub flags: NodeFlags,
}

/// Fill used by [`Node::rect`] until a color is set.
pub const DEFAULT_FILL: Color = palette::css::RED;

impl Node {
    /// A plain positioning node at `position`.
    pub fn group(id: NodeId, position: Point) -> Self {
        Self {
            id,
            position,
            kind: NodeKind::Group,
            flags: NodeFlags::default(),
        }
    }

    /// A rectangle of `size` at local offset zero, filled with [`DEFAULT_FILL`].
    ///
    /// Negative extents are clamped to zero.
    pub fn rect(id: NodeId, size: Size) -> Self {
        Self {
            id,
            position: Point::ZERO,
            kind: NodeKind::Rect {
                size: clamp_size(size),
                fill: DEFAULT_FILL,
                stroke: None,
            },
            flags: NodeFlags::default(),
        }
    }

    /// Set the local offset.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Set the fill color. No effect on groups.
    pub fn with_fill(mut self, color: Color) -> Self {
        if let NodeKind::Rect { fill, .. } = &mut self.kind {
            *fill = color;
        }
        self
    }

    /// Set the outline color. No effect on groups.
    pub fn with_stroke(mut self, color: Color) -> Self {
        if let NodeKind::Rect { stroke, .. } = &mut self.kind {
            *stroke = Some(color);
        }
        self
    }

    /// Replace the flags.
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The node's box in its parent's coordinate space.
    pub fn local_box(&self) -> Rect {
        Rect::from_origin_size(self.position, self.kind.size())
    }
}

pub(crate) fn clamp_size(size: Size) -> Size {
    Size::new(size.width.max(0.0), size.height.max(0.0))
}

/// A node's rectangle resolved to surface coordinates.
///
/// `rect.x0`/`rect.y0` are the absolute top-left corner and `rect.x1`/`rect.y1`
/// the far corner (`x + width`, `y + height`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbsoluteBox {
    /// The node this box belongs to.
    pub id: NodeId,
    /// Absolute bounds.
    pub rect: Rect,
}

impl AbsoluteBox {
    /// Returns whether `point` lies inside the box, edges included.
    pub fn contains(&self, point: Point) -> bool {
        self.rect.x0 <= point.x
            && point.x <= self.rect.x1
            && self.rect.y0 <= point.y
            && point.y <= self.rect.y1
    }

    /// Absolute top-left corner.
    pub fn origin(&self) -> Point {
        self.rect.origin()
    }
}
