// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A stage: one scene, one surface, one drag controller, driven by pointer events.

use kurbo::Point;
use stagehand_scene::{NodeId, SceneGraph, Surface};

use crate::drag::{
    DragController, DragOptions, DragUpdate, ListenerKind, PointerSource, PressOutcome,
};

/// A pointer event in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Button pressed.
    Press(Point),
    /// Pointer moved.
    Move(Point),
    /// Button released.
    Release(Point),
    /// Pointer left the surface.
    Leave,
}

/// Which listeners are currently subscribed.
///
/// Presses are always heard. Moves and releases are only heard while the
/// matching listener is subscribed, the way DOM listeners on a body behave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Listeners {
    on_move: bool,
    on_release: bool,
    subscriptions: usize,
}

impl Listeners {
    /// Returns whether `kind` is subscribed.
    pub fn is_subscribed(&self, kind: ListenerKind) -> bool {
        match kind {
            ListenerKind::Move => self.on_move,
            ListenerKind::Release => self.on_release,
        }
    }

    /// How many subscriptions were ever made.
    pub fn subscriptions(&self) -> usize {
        self.subscriptions
    }

    fn slot(&mut self, kind: ListenerKind) -> &mut bool {
        match kind {
            ListenerKind::Move => &mut self.on_move,
            ListenerKind::Release => &mut self.on_release,
        }
    }
}

impl PointerSource for Listeners {
    fn subscribe(&mut self, kind: ListenerKind) {
        let slot = self.slot(kind);
        debug_assert!(!*slot, "{kind:?} listener subscribed twice");
        *slot = true;
        self.subscriptions += 1;
    }

    fn unsubscribe(&mut self, kind: ListenerKind) {
        let slot = self.slot(kind);
        debug_assert!(*slot, "{kind:?} listener unsubscribed while not subscribed");
        *slot = false;
    }
}

/// What [`Stage::dispatch`] did with an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dispatched {
    /// A drag started on this node.
    Grabbed(NodeId),
    /// A press hit nothing.
    Missed,
    /// A press arrived during a drag and was dropped.
    Ignored,
    /// The dragged node moved to `position` and the surface was redrawn.
    Moved {
        /// Dragged node.
        id: NodeId,
        /// Its new absolute position.
        position: Point,
    },
    /// The drag on this node ended.
    Released(NodeId),
    /// The dragged node was removed from the scene; the drag ended.
    Lost(NodeId),
    /// No listener was subscribed for this event.
    Unheard,
}

/// Owns a [`SceneGraph`], a [`Surface`], and a [`DragController`], and routes pointer
/// events between them.
///
/// ```
/// use kurbo::{Point, Size};
/// use stagehand_event_state::stage::{Dispatched, PointerEvent, Stage};
/// use stagehand_scene::{DEFAULT_FILL, RecordingSurface, SceneGraph};
///
/// let mut scene = SceneGraph::new();
/// let id = scene.insert_rect(None, Size::new(10.0, 10.0), DEFAULT_FILL).unwrap();
/// let mut stage = Stage::new(scene, RecordingSurface::new(Size::new(100.0, 100.0)));
///
/// let unheard = stage.dispatch(PointerEvent::Move(Point::new(1.0, 1.0)));
/// assert_eq!(unheard, Dispatched::Unheard);
/// let grabbed = stage.dispatch(PointerEvent::Press(Point::new(1.0, 1.0)));
/// assert_eq!(grabbed, Dispatched::Grabbed(id));
/// stage.dispatch(PointerEvent::Move(Point::new(60.0, 60.0)));
/// assert_eq!(stage.surface().frames(), 1);
/// let released = stage.dispatch(PointerEvent::Release(Point::new(60.0, 60.0)));
/// assert_eq!(released, Dispatched::Released(id));
/// ```
#[derive(Debug)]
pub struct Stage<S> {
    scene: SceneGraph,
    surface: S,
    drag: DragController,
    listeners: Listeners,
}

impl<S: Surface> Stage<S> {
    /// Create a stage with default drag options. Nothing is drawn until [`Stage::draw`]
    /// or the first drag move.
    pub fn new(scene: SceneGraph, surface: S) -> Self {
        Self::with_options(scene, surface, DragOptions::default())
    }

    /// Create a stage with the given drag options.
    pub fn with_options(scene: SceneGraph, surface: S, options: DragOptions) -> Self {
        Self {
            scene,
            surface,
            drag: DragController::with_options(options),
            listeners: Listeners::default(),
        }
    }

    /// The scene.
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// The scene, for edits between events. Call [`Stage::draw`] afterwards to show them.
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    /// The surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The drag controller.
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Current listener subscriptions.
    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Render the scene onto the surface.
    pub fn draw(&mut self) {
        self.scene.render(&mut self.surface);
    }

    /// Route one pointer event.
    pub fn dispatch(&mut self, event: PointerEvent) -> Dispatched {
        match event {
            PointerEvent::Press(point) => {
                let outcome = self.drag.on_press(&self.scene, &mut self.listeners, point);
                match outcome {
                    PressOutcome::Grabbed(id) => Dispatched::Grabbed(id),
                    PressOutcome::Missed => Dispatched::Missed,
                    PressOutcome::Ignored => Dispatched::Ignored,
                }
            }
            PointerEvent::Move(point) => {
                if !self.listeners.is_subscribed(ListenerKind::Move) {
                    return Dispatched::Unheard;
                }
                let update = self.drag.on_move(&mut self.scene, &mut self.listeners, point);
                match update {
                    DragUpdate::Moved { id, position } => {
                        self.draw();
                        Dispatched::Moved { id, position }
                    }
                    DragUpdate::Lost(id) => Dispatched::Lost(id),
                    DragUpdate::Idle => Dispatched::Unheard,
                }
            }
            PointerEvent::Release(point) => {
                if !self.listeners.is_subscribed(ListenerKind::Release) {
                    return Dispatched::Unheard;
                }
                self.drag
                    .on_release(&mut self.listeners, point)
                    .map_or(Dispatched::Unheard, Dispatched::Released)
            }
            PointerEvent::Leave => self
                .drag
                .on_leave(&mut self.listeners)
                .map_or(Dispatched::Unheard, Dispatched::Released),
        }
    }

    /// Take the scene and surface back.
    pub fn into_parts(self) -> (SceneGraph, S) {
        (self.scene, self.surface)
    }
}
