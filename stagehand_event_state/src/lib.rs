// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagehand Event State: pointer drag handling for the Stagehand scene graph.
//!
//! This crate turns a stream of pointer events into edits on a
//! [`SceneGraph`](stagehand_scene::SceneGraph):
//!
//! - [`drag`]: the `Idle`/`Dragging` state machine that picks a node on press,
//!   moves it on every pointer move, and drops it on release.
//! - [`stage`]: a small owner that holds a scene, a surface and a controller,
//!   keeps track of which pointer listeners are live, and redraws after moves.
//!
//! ## Listener lifecycle
//!
//! Presses are always delivered. A press that grabs a node subscribes exactly
//! one move listener and one release listener through
//! [`PointerSource`](drag::PointerSource); the release that ends the drag
//! unsubscribes exactly those two. A press during a drag is dropped, so a
//! second pair can never be attached.
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use peniko::color::palette;
//! use stagehand_event_state::stage::{Dispatched, PointerEvent, Stage};
//! use stagehand_scene::{RecordingSurface, SceneGraph};
//!
//! let mut scene = SceneGraph::new();
//! let root = scene.insert_group(None, Point::new(20.0, 100.0)).unwrap();
//! let a = scene
//!     .insert_rect(Some(root), Size::new(200.0, 200.0), palette::css::BLUE)
//!     .unwrap();
//!
//! let mut stage = Stage::new(scene, RecordingSurface::new(Size::new(800.0, 600.0)));
//! stage.draw();
//!
//! let pressed = stage.dispatch(PointerEvent::Press(Point::new(45.0, 125.0)));
//! assert_eq!(pressed, Dispatched::Grabbed(a));
//! stage.dispatch(PointerEvent::Move(Point::new(300.0, 200.0)));
//! stage.dispatch(PointerEvent::Release(Point::new(300.0, 200.0)));
//! assert_eq!(stage.scene().absolute_position(a), Some(Point::new(300.0, 200.0)));
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

#[cfg(test)]
extern crate alloc;

pub mod drag;
pub mod stage;
