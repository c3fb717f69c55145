// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagehand Scene: a Kurbo-native scene graph of positioned rectangles.
//!
//! Stagehand Scene is the geometry half of a small drag-and-drop canvas.
//!
//! - Represents a hierarchy of nodes, each with a local offset relative to its parent.
//! - Flattens the hierarchy into absolute boxes in a fixed pre-order, which is also hit precedence.
//! - Draws the hierarchy onto any [`Surface`] in that same order.
//!
//! ## Positioning model
//!
//! Every node stores a local offset. A root's offset is absolute; anyone else's
//! is relative to its parent's absolute position. Absolute positions are
//! computed on demand by walking up the parent chain, so moving a group moves
//! everything under it.
//!
//! Two operations set positions:
//! - [`SceneGraph::set_local_position`] places a child relative to its parent.
//! - [`SceneGraph::translate_absolute`] places any node at a surface coordinate,
//!   whatever its depth. Drag handlers use this one.
//!
//! ## Hit precedence
//!
//! There is no z-index. [`SceneGraph::flatten_absolute_boxes`] walks roots in
//! attach order, each node before its children, children in attach order, and
//! [`find_first_hit`] picks the first box containing the point. Rendering uses the
//! same walk, so the box that wins a hit is the one painted first.
//!
//! ## API overview
//!
//! - [`SceneGraph`]: arena of nodes, id registry, queries and rendering.
//! - [`Node`] / [`NodeKind`]: a group (no area) or a filled rectangle.
//! - [`NodeId`]: opaque identity, never reused within a scene.
//! - [`NodeFlags`] / [`QueryFilter`]: visibility and picking controls.
//! - [`AbsoluteBox`]: a rectangle in surface coordinates, tagged with its node.
//! - [`find_first_hit`] / [`hits`]: linear point queries over a box list.
//! - [`Surface`] / [`RecordingSurface`]: the drawing seam and a recorder for tests.
//! - [`SceneError`]: failures of scene mutations.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod hit;
mod scene;
mod surface;
mod types;

pub use error::SceneError;
pub use hit::{find_first_hit, hits};
pub use scene::{QueryFilter, SceneGraph};
pub use surface::{DrawOp, RecordingSurface, Surface};
pub use types::{AbsoluteBox, DEFAULT_FILL, Node, NodeFlags, NodeId, NodeKind};
