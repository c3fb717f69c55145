// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag controller: pick a node on press, move it with the pointer, drop it on release.
//!
//! ## Usage
//!
//! 1) On pointer press, call [`DragController::on_press`]. It flattens the scene, takes the
//!    first box under the pointer as the handle, and subscribes one move and one release
//!    listener on the [`PointerSource`].
//! 2) On each move, call [`DragController::on_move`]. It writes the new absolute position
//!    onto the grabbed node; redraw when it returns [`DragUpdate::Moved`].
//! 3) On release, call [`DragController::on_release`]. It unsubscribes both listeners
//!    and clears the handle.
//!
//! Release is the only way out of a drag unless [`DragOptions::cancel_on_leave`] is set
//! (then [`DragController::on_leave`] ends it too) or [`DragController::cancel`] is called.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Size};
//! use stagehand_event_state::drag::{DragController, ListenerKind, PointerSource, PressOutcome};
//! use stagehand_scene::{DEFAULT_FILL, SceneGraph};
//!
//! #[derive(Default)]
//! struct Count(i32);
//! impl PointerSource for Count {
//!     fn subscribe(&mut self, _: ListenerKind) { self.0 += 1; }
//!     fn unsubscribe(&mut self, _: ListenerKind) { self.0 -= 1; }
//! }
//!
//! let mut scene = SceneGraph::new();
//! let id = scene.insert_rect(None, Size::new(10.0, 10.0), DEFAULT_FILL).unwrap();
//! let mut listeners = Count::default();
//! let mut drag = DragController::new();
//!
//! assert_eq!(
//!     drag.on_press(&scene, &mut listeners, Point::new(5.0, 5.0)),
//!     PressOutcome::Grabbed(id)
//! );
//! assert_eq!(listeners.0, 2);
//! drag.on_move(&mut scene, &mut listeners, Point::new(40.0, 50.0));
//! assert_eq!(scene.absolute_position(id), Some(Point::new(40.0, 50.0)));
//! drag.on_release(&mut listeners, Point::new(40.0, 50.0));
//! assert_eq!(listeners.0, 0);
//! assert!(!drag.is_dragging());
//! ```

use kurbo::{Point, Vec2};
use stagehand_scene::{AbsoluteBox, NodeId, QueryFilter, SceneError, SceneGraph, find_first_hit};

/// The two pointer listeners a drag holds while active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer-move notifications.
    Move,
    /// Pointer-release notifications.
    Release,
}

/// Where pointer events come from.
///
/// The controller subscribes exactly one [`ListenerKind::Move`] and one
/// [`ListenerKind::Release`] when a drag starts and unsubscribes exactly those
/// when it ends. Presses are assumed to be delivered unconditionally.
pub trait PointerSource {
    /// Start delivering events of `kind`.
    fn subscribe(&mut self, kind: ListenerKind);
    /// Stop delivering events of `kind`.
    fn unsubscribe(&mut self, kind: ListenerKind);
}

/// How a dragged node follows the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragAnchor {
    /// The node's top-left corner jumps to the pointer.
    #[default]
    TopLeft,
    /// The node keeps the offset between its corner and the press point.
    Grab,
}

/// Configuration for a [`DragController`].
#[derive(Clone, Copy, Debug)]
pub struct DragOptions {
    /// How the node follows the pointer.
    pub anchor: DragAnchor,
    /// End a drag when the pointer leaves the observed surface.
    pub cancel_on_leave: bool,
    /// Which rectangles can be grabbed. Defaults to visible and pickable, so only
    /// rectangles that [`SceneGraph::render`] draws can take a press.
    pub filter: QueryFilter,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            anchor: DragAnchor::TopLeft,
            cancel_on_leave: false,
            filter: QueryFilter::new().visible().pickable(),
        }
    }
}

impl DragOptions {
    /// Set the anchor.
    pub fn with_anchor(mut self, anchor: DragAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Enable or disable ending drags on pointer leave.
    pub fn cancel_on_leave(mut self, enabled: bool) -> Self {
        self.cancel_on_leave = enabled;
        self
    }

    /// Set the filter applied when picking.
    pub fn with_filter(mut self, filter: QueryFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// The grabbed node while a drag is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragHandle {
    /// Node being dragged.
    pub id: NodeId,
    /// The node's absolute box at press time. Not refreshed while dragging.
    pub bounds: AbsoluteBox,
    /// Press point minus the box's top-left corner.
    pub grab_offset: Vec2,
    /// Pointer position at press.
    pub start_pos: Point,
    /// Last pointer position seen.
    pub last_pos: Point,
}

/// Controller state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragPhase {
    /// No drag in progress.
    #[default]
    Idle,
    /// A node is being dragged.
    Dragging(DragHandle),
}

/// Result of [`DragController::on_press`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// A drag started on this node.
    Grabbed(NodeId),
    /// Nothing under the pointer.
    Missed,
    /// A drag is already active; the press was dropped.
    Ignored,
}

/// Result of [`DragController::on_move`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragUpdate {
    /// The node now sits at `position` (absolute). The scene needs a redraw.
    Moved {
        /// Dragged node.
        id: NodeId,
        /// Its new absolute position.
        position: Point,
    },
    /// The dragged node is gone from the scene; the drag ended.
    Lost(NodeId),
    /// No drag in progress.
    Idle,
}

/// `Idle`/`Dragging` state machine for dragging scene nodes with a single pointer.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragController {
    phase: DragPhase,
    options: DragOptions,
}

impl DragController {
    /// Create an idle controller with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle controller with `options`.
    pub fn with_options(options: DragOptions) -> Self {
        Self {
            phase: DragPhase::Idle,
            options,
        }
    }

    /// Current options.
    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    /// Current state.
    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    /// Returns `true` while a drag is active.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// The active handle, if any.
    pub fn handle(&self) -> Option<&DragHandle> {
        match &self.phase {
            DragPhase::Dragging(handle) => Some(handle),
            DragPhase::Idle => None,
        }
    }

    /// Handle a pointer press at `point`.
    ///
    /// Only acts while idle. Picks the first box under `point` in the scene's
    /// flattening order and, on a hit, subscribes the move/release pair.
    pub fn on_press<P: PointerSource + ?Sized>(
        &mut self,
        scene: &SceneGraph,
        source: &mut P,
        point: Point,
    ) -> PressOutcome {
        if self.is_dragging() {
            return PressOutcome::Ignored;
        }
        let boxes = scene.flatten_filtered(self.options.filter);
        let Some(&bounds) = find_first_hit(point, &boxes) else {
            log::trace!("press at ({}, {}) hit nothing", point.x, point.y);
            return PressOutcome::Missed;
        };

        self.phase = DragPhase::Dragging(DragHandle {
            id: bounds.id,
            bounds,
            grab_offset: point - bounds.origin(),
            start_pos: point,
            last_pos: point,
        });
        source.subscribe(ListenerKind::Move);
        source.subscribe(ListenerKind::Release);
        log::debug!("drag started on node {}", bounds.id.get());
        PressOutcome::Grabbed(bounds.id)
    }

    /// Handle a pointer move to `point`.
    ///
    /// Moves the grabbed node and reports where it went. If the node has been
    /// removed from the scene, ends the drag and returns [`DragUpdate::Lost`].
    pub fn on_move<P: PointerSource + ?Sized>(
        &mut self,
        scene: &mut SceneGraph,
        source: &mut P,
        point: Point,
    ) -> DragUpdate {
        let DragPhase::Dragging(handle) = &mut self.phase else {
            return DragUpdate::Idle;
        };
        handle.last_pos = point;
        let id = handle.id;
        let target = match self.options.anchor {
            DragAnchor::TopLeft => point,
            DragAnchor::Grab => point - handle.grab_offset,
        };

        match scene.translate_absolute(id, target) {
            Ok(()) => {
                log::trace!("node {} moved to ({}, {})", id.get(), target.x, target.y);
                DragUpdate::Moved {
                    id,
                    position: target,
                }
            }
            Err(err) => {
                debug_assert!(
                    matches!(err, SceneError::UnknownId(_)),
                    "translate_absolute only fails for unknown ids"
                );
                log::warn!("ending drag: {err}");
                self.end(source);
                DragUpdate::Lost(id)
            }
        }
    }

    /// Handle a pointer release. Returns the node that was dropped, if a drag was active.
    pub fn on_release<P: PointerSource + ?Sized>(
        &mut self,
        source: &mut P,
        point: Point,
    ) -> Option<NodeId> {
        if let DragPhase::Dragging(handle) = &mut self.phase {
            handle.last_pos = point;
        }
        self.end(source)
    }

    /// Handle the pointer leaving the observed surface.
    ///
    /// Ends the drag only when [`DragOptions::cancel_on_leave`] is set.
    pub fn on_leave<P: PointerSource + ?Sized>(&mut self, source: &mut P) -> Option<NodeId> {
        if self.options.cancel_on_leave {
            self.end(source)
        } else {
            None
        }
    }

    /// End any active drag, leaving the node where it is.
    pub fn cancel<P: PointerSource + ?Sized>(&mut self, source: &mut P) -> Option<NodeId> {
        self.end(source)
    }

    /// Pointer offset from the press position, while dragging.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.handle().map(|handle| current_pos - handle.start_pos)
    }

    fn end<P: PointerSource + ?Sized>(&mut self, source: &mut P) -> Option<NodeId> {
        let DragPhase::Dragging(handle) = core::mem::take(&mut self.phase) else {
            return None;
        };
        source.unsubscribe(ListenerKind::Move);
        source.unsubscribe(ListenerKind::Release);
        log::debug!("drag ended on node {}", handle.id.get());
        Some(handle.id)
    }
}
