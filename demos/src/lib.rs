// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scenes for the Stagehand demos.
//!
//! Run:
//! - `cargo run -p stagehand_demos --example drag_boxes`

use kurbo::{Point, Size};
use peniko::color::palette;
use stagehand_scene::{NodeId, SceneError, SceneGraph};

/// Ids of the nodes in [`three_boxes`].
#[derive(Clone, Copy, Debug)]
pub struct ThreeBoxes {
    /// The positioning group at (20, 100).
    pub root: NodeId,
    /// Blue, 200x200 at local (0, 0).
    pub blue: NodeId,
    /// White, 50x50 at local (20, 20).
    pub white: NodeId,
    /// Green, 75x75 at local (50, 50).
    pub green: NodeId,
}

/// A group at (20, 100) with three overlapping rectangles, attached blue, white, green.
pub fn three_boxes(scene: &mut SceneGraph) -> Result<ThreeBoxes, SceneError> {
    let root = scene.insert_group(None, Point::new(20.0, 100.0))?;
    let blue = scene.insert_rect(Some(root), Size::new(200.0, 200.0), palette::css::BLUE)?;
    let white = scene.insert_rect(Some(root), Size::new(50.0, 50.0), palette::css::WHITE)?;
    scene.set_local_position(white, Point::new(20.0, 20.0))?;
    let green = scene.insert_rect(Some(root), Size::new(75.0, 75.0), palette::css::GREEN)?;
    scene.set_local_position(green, Point::new(50.0, 50.0))?;
    Ok(ThreeBoxes {
        root,
        blue,
        white,
        green,
    })
}
