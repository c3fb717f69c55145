// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag the three-box scene around with a scripted pointer session.
//!
//! This example shows how to combine:
//! - `stagehand_scene` for the node tree and rendering,
//! - `stagehand_event_state` for routing pointer events into drags,
//! - a `RecordingSurface` standing in for a real canvas.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p stagehand_demos --example drag_boxes`

use kurbo::{Point, Rect, Size};
use stagehand_demos::three_boxes;
use stagehand_event_state::drag::{DragAnchor, DragOptions};
use stagehand_event_state::stage::{PointerEvent, Stage};
use stagehand_scene::{DrawOp, RecordingSurface, SceneError, SceneGraph, Surface};

fn main() -> Result<(), SceneError> {
    env_logger::init();

    let mut scene = SceneGraph::new();
    let ids = three_boxes(&mut scene)?;
    log::info!("scene ready: {ids:?}");

    let options = DragOptions::default()
        .with_anchor(DragAnchor::Grab)
        .cancel_on_leave(true);
    let mut stage = Stage::with_options(
        scene,
        RecordingSurface::new(Size::new(800.0, 600.0)),
        options,
    );
    stage.draw();

    let session = [
        // Miss: nothing at the top-left corner.
        PointerEvent::Press(Point::new(5.0, 5.0)),
        PointerEvent::Move(Point::new(15.0, 15.0)),
        PointerEvent::Release(Point::new(15.0, 15.0)),
        // Grab where all three overlap; the blue box was attached first.
        PointerEvent::Press(Point::new(80.0, 160.0)),
        PointerEvent::Move(Point::new(300.0, 200.0)),
        PointerEvent::Move(Point::new(500.0, 260.0)),
        PointerEvent::Release(Point::new(500.0, 260.0)),
        // With blue out of the way, the same point now picks white.
        PointerEvent::Press(Point::new(80.0, 160.0)),
        PointerEvent::Move(Point::new(120.0, 40.0)),
        PointerEvent::Leave,
    ];

    for event in session {
        let outcome = stage.dispatch(event);
        println!("{event:?} -> {outcome:?}");
    }

    let size = stage.surface().size();
    println!(
        "\n== Final frame ({} drawn, {}x{}) ==",
        stage.surface().frames(),
        size.width,
        size.height
    );
    for op in stage.surface().ops() {
        match op {
            DrawOp::Clear(_) => println!("  clear"),
            DrawOp::FillRect(r, color) => {
                let rgba = color.to_rgba8();
                println!("  fill   {} {rgba:?}", corners(r));
            }
            DrawOp::StrokeRect(r, _) => println!("  stroke {}", corners(r)),
        }
    }
    Ok(())
}

fn corners(r: &Rect) -> String {
    format!("({:.0}, {:.0})-({:.0}, {:.0})", r.x0, r.y0, r.x1, r.y1)
}
