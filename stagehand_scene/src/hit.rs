// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point-in-box hit testing over a flattened box list.
//!
//! These are plain functions over a slice; they hold no state. Precedence is the
//! order of the input, so callers should pass the output of
//! [`SceneGraph::flatten_absolute_boxes`](crate::SceneGraph::flatten_absolute_boxes)
//! unchanged.

use kurbo::Point;

use crate::types::AbsoluteBox;

/// Return the first box in `boxes` that contains `point`, edges included.
///
/// When boxes overlap, the earliest one wins regardless of area.
///
/// ```
/// use kurbo::{Point, Rect};
/// use stagehand_scene::{AbsoluteBox, NodeId, find_first_hit};
///
/// let boxes = [
///     AbsoluteBox { id: NodeId::new(1), rect: Rect::new(0.0, 0.0, 100.0, 100.0) },
///     AbsoluteBox { id: NodeId::new(2), rect: Rect::new(10.0, 10.0, 20.0, 20.0) },
/// ];
/// let hit = find_first_hit(Point::new(15.0, 15.0), &boxes).unwrap();
/// assert_eq!(hit.id, NodeId::new(1));
/// assert!(find_first_hit(Point::new(150.0, 15.0), &boxes).is_none());
/// ```
pub fn find_first_hit(point: Point, boxes: &[AbsoluteBox]) -> Option<&AbsoluteBox> {
    hits(point, boxes).next()
}

/// Iterate every box in `boxes` that contains `point`, in input order.
pub fn hits(point: Point, boxes: &[AbsoluteBox]) -> impl Iterator<Item = &AbsoluteBox> {
    boxes.iter().filter(move |b| b.contains(point))
}
