// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, positioning, flattening, rendering.

use alloc::{vec, vec::Vec};
use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;
use smallvec::SmallVec;

use crate::error::SceneError;
use crate::surface::Surface;
use crate::types::{AbsoluteBox, Node, NodeFlags, NodeId, NodeKind, clamp_size};

/// Background used by [`SceneGraph::new`].
const DEFAULT_BACKGROUND: [u8; 3] = [0x45, 0x45, 0x45];

/// A tree of positioned nodes, addressed by [`NodeId`].
///
/// The scene is an arena: every node lives in one registry keyed by id, and
/// parent/child links are ids, not references. Positions are local offsets;
/// a node's absolute position is its own offset plus the offsets of all its
/// ancestors.
///
/// Traversal is depth-first pre-order over the roots in attach order, children
/// in attach order. The same order is used for [`SceneGraph::flatten_absolute_boxes`]
/// (and therefore hit precedence) and for [`SceneGraph::render`].
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect, Size};
/// use peniko::color::palette;
/// use stagehand_scene::SceneGraph;
///
/// let mut scene = SceneGraph::new();
/// let root = scene.insert_group(None, Point::new(20.0, 100.0)).unwrap();
/// let a = scene
///     .insert_rect(Some(root), Size::new(200.0, 200.0), palette::css::BLUE)
///     .unwrap();
/// let b = scene
///     .insert_rect(Some(root), Size::new(50.0, 50.0), palette::css::WHITE)
///     .unwrap();
/// scene.set_local_position(b, Point::new(20.0, 20.0)).unwrap();
///
/// let boxes = scene.flatten_absolute_boxes();
/// assert_eq!(boxes[0].id, a);
/// assert_eq!(boxes[0].rect, Rect::new(20.0, 100.0, 220.0, 300.0));
/// assert_eq!(boxes[1].rect, Rect::new(40.0, 120.0, 90.0, 170.0));
/// ```
pub struct SceneGraph {
    slots: HashMap<NodeId, Slot>,
    roots: Vec<NodeId>,
    /// ids detached earlier; never handed out or accepted again
    retired: HashSet<NodeId>,
    next_id: u64,
    background: Color,
}

impl core::fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SceneGraph")
            .field("nodes_alive", &self.slots.len())
            .field("roots", &self.roots)
            .field("retired", &self.retired.len())
            .field("next_id", &self.next_id)
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Filters applied when flattening the scene into boxes.
///
/// Used by [`SceneGraph::flatten_filtered`] to restrict which rectangles are
/// emitted. The empty filter keeps every rectangle.
#[derive(Clone, Copy, Debug)]
pub struct QueryFilter {
    /// Bitfield of required node flags. Only nodes containing all these flags will be included.
    pub required_flags: NodeFlags,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            required_flags: NodeFlags::empty(),
        }
    }
}

impl QueryFilter {
    /// Create a new empty filter (includes all nodes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter to only visible nodes.
    pub fn visible(mut self) -> Self {
        self.required_flags |= NodeFlags::VISIBLE;
        self
    }

    /// Filter to only pickable nodes.
    pub fn pickable(mut self) -> Self {
        self.required_flags |= NodeFlags::PICKABLE;
        self
    }

    /// Check if a node's flags satisfy this filter.
    pub fn matches(&self, node_flags: NodeFlags) -> bool {
        node_flags.contains(self.required_flags)
    }
}

#[derive(Clone, Debug)]
struct Slot {
    node: Node,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl SceneGraph {
    /// Create an empty scene with the default background (`#454545`).
    pub fn new() -> Self {
        let [r, g, b] = DEFAULT_BACKGROUND;
        Self::with_background(Color::from_rgb8(r, g, b))
    }

    /// Create an empty scene that clears to `background` on render.
    pub fn with_background(background: Color) -> Self {
        Self {
            slots: HashMap::new(),
            roots: Vec::new(),
            retired: HashSet::new(),
            next_id: 1,
            background,
        }
    }

    /// The color [`SceneGraph::render`] clears to.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Change the clear color.
    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    /// Hand out an id that is neither registered nor retired in this scene.
    pub fn allocate_id(&mut self) -> NodeId {
        loop {
            let id = NodeId::new(self.next_id);
            self.next_id += 1;
            if !self.slots.contains_key(&id) && !self.retired.contains(&id) {
                return id;
            }
        }
    }

    /// Attach `node` under `parent`, or as a new root if `parent` is `None`.
    ///
    /// The node is appended after its existing siblings, so it is drawn after
    /// and hit-tested after them.
    ///
    /// # Errors
    ///
    /// - [`SceneError::DuplicateId`] if `node.id` is registered or was detached earlier.
    /// - [`SceneError::UnknownId`] if `parent` is not registered.
    pub fn attach(&mut self, node: Node, parent: Option<NodeId>) -> Result<NodeId, SceneError> {
        let id = node.id;
        if self.slots.contains_key(&id) || self.retired.contains(&id) {
            return Err(SceneError::DuplicateId(id));
        }
        if let Some(p) = parent
            && !self.slots.contains_key(&p)
        {
            return Err(SceneError::UnknownId(p));
        }
        self.slots.insert(
            id,
            Slot {
                node,
                parent: None,
                children: SmallVec::new(),
            },
        );
        match parent {
            Some(p) => self.link_parent(id, p),
            None => self.roots.push(id),
        }
        log::trace!("attached node {} under {:?}", id.0, parent.map(NodeId::get));
        Ok(id)
    }

    /// Allocate an id and attach a group at `position`.
    pub fn insert_group(
        &mut self,
        parent: Option<NodeId>,
        position: Point,
    ) -> Result<NodeId, SceneError> {
        let id = self.allocate_id();
        self.attach(Node::group(id, position), parent)
    }

    /// Allocate an id and attach a rectangle at local offset zero.
    pub fn insert_rect(
        &mut self,
        parent: Option<NodeId>,
        size: Size,
        fill: Color,
    ) -> Result<NodeId, SceneError> {
        let id = self.allocate_id();
        self.attach(Node::rect(id, size).with_fill(fill), parent)
    }

    /// Remove a node and its whole subtree from the scene.
    ///
    /// Returns how many nodes were removed. Detaching an id that is not
    /// registered does nothing and returns `0`. Removed ids are retired.
    pub fn detach(&mut self, id: NodeId) -> usize {
        let Some(parent) = self.slots.get(&id).map(|slot| slot.parent) else {
            return 0;
        };
        match parent {
            Some(parent) => self.unlink_parent(id, parent),
            None => self.roots.retain(|r| *r != id),
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(slot) = self.slots.remove(&next) {
                stack.extend(slot.children.iter().copied());
                self.retired.insert(next);
                removed += 1;
            }
        }
        log::debug!("detached node {} ({removed} nodes removed)", id.0);
        removed
    }

    /// Returns true if `id` refers to a registered node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(&id).map(|slot| &slot.node)
    }

    /// Top-level nodes in attach order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns the parent of a node, or `None` for roots or unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(&id).and_then(|slot| slot.parent)
    }

    /// Get the children of a node in attach order, or an empty slice if unknown.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.slots
            .get(&id)
            .map(|slot| slot.children.as_slice())
            .unwrap_or(&[])
    }

    /// Absolute position of a node: its local offset plus those of all ancestors.
    ///
    /// O(depth), recomputed on every call.
    pub fn absolute_position(&self, id: NodeId) -> Option<Point> {
        let mut slot = self.slots.get(&id)?;
        let mut acc = slot.node.position.to_vec2();
        while let Some(parent) = slot.parent {
            slot = self.slots.get(&parent)?;
            acc += slot.node.position.to_vec2();
        }
        Some(acc.to_point())
    }

    /// Place a node at `offset` from its parent's absolute position.
    ///
    /// # Errors
    ///
    /// - [`SceneError::UnknownId`] if `id` is not registered.
    /// - [`SceneError::Precursor`] if the node is a root.
    pub fn set_local_position(&mut self, id: NodeId, offset: Point) -> Result<(), SceneError> {
        let slot = self.slot_mut(id)?;
        if slot.parent.is_none() {
            return Err(SceneError::Precursor(id));
        }
        slot.node.position = offset;
        Ok(())
    }

    /// Move a node so that its absolute position becomes `target`, whatever its depth.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownId`] if `id` is not registered.
    pub fn translate_absolute(&mut self, id: NodeId, target: Point) -> Result<(), SceneError> {
        let parent = self.slot(id)?.parent;
        let base = match parent {
            Some(p) => self.absolute_position(p).ok_or(SceneError::UnknownId(p))?,
            None => Point::ZERO,
        };
        self.slot_mut(id)?.node.position = target - base.to_vec2();
        Ok(())
    }

    /// The node's box in its parent's coordinate space.
    ///
    /// Groups yield a zero-size box at their offset.
    pub fn local_bounding_box(&self, id: NodeId) -> Option<Rect> {
        self.node(id).map(Node::local_box)
    }

    /// The node's box in surface coordinates.
    ///
    /// Groups yield a zero-size box at their absolute position.
    pub fn absolute_bounding_box(&self, id: NodeId) -> Option<AbsoluteBox> {
        let origin = self.absolute_position(id)?;
        let size = self.node(id)?.kind.size();
        Some(AbsoluteBox {
            id,
            rect: Rect::from_origin_size(origin, size),
        })
    }

    /// Change a rectangle's fill color.
    pub fn set_fill(&mut self, id: NodeId, color: Color) -> Result<(), SceneError> {
        match &mut self.slot_mut(id)?.node.kind {
            NodeKind::Rect { fill, .. } => {
                *fill = color;
                Ok(())
            }
            NodeKind::Group => Err(SceneError::NotARect(id)),
        }
    }

    /// Change or remove a rectangle's outline color.
    pub fn set_stroke(&mut self, id: NodeId, color: Option<Color>) -> Result<(), SceneError> {
        match &mut self.slot_mut(id)?.node.kind {
            NodeKind::Rect { stroke, .. } => {
                *stroke = color;
                Ok(())
            }
            NodeKind::Group => Err(SceneError::NotARect(id)),
        }
    }

    /// Resize a rectangle. Negative extents are clamped to zero.
    pub fn set_size(&mut self, id: NodeId, new_size: Size) -> Result<(), SceneError> {
        match &mut self.slot_mut(id)?.node.kind {
            NodeKind::Rect { size, .. } => {
                *size = clamp_size(new_size);
                Ok(())
            }
            NodeKind::Group => Err(SceneError::NotARect(id)),
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) -> Result<(), SceneError> {
        self.slot_mut(id)?.node.flags = flags;
        Ok(())
    }

    /// One absolute box per rectangle, in pre-order.
    ///
    /// Groups contribute nothing. The order is deterministic for a given
    /// sequence of attaches and is the hit-test precedence order: pass the
    /// result straight to [`find_first_hit`](crate::find_first_hit).
    pub fn flatten_absolute_boxes(&self) -> Vec<AbsoluteBox> {
        self.flatten_filtered(QueryFilter::new())
    }

    /// Like [`SceneGraph::flatten_absolute_boxes`], keeping only rectangles whose
    /// flags satisfy `filter`.
    pub fn flatten_filtered(&self, filter: QueryFilter) -> Vec<AbsoluteBox> {
        let mut boxes = Vec::new();
        self.walk_preorder(|id, node, origin| {
            if let NodeKind::Rect { size, .. } = node.kind
                && filter.matches(node.flags)
            {
                boxes.push(AbsoluteBox {
                    id,
                    rect: Rect::from_origin_size(origin, size),
                });
            }
        });
        boxes
    }

    /// Clear `surface` to the background, then draw every visible rectangle in pre-order.
    ///
    /// Hidden rectangles are skipped, but their descendants are still visited.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.background);
        self.walk_preorder(|_, node, origin| {
            if let NodeKind::Rect { size, fill, stroke } = node.kind
                && node.flags.contains(NodeFlags::VISIBLE)
            {
                let rect = Rect::from_origin_size(origin, size);
                surface.fill_rect(rect, fill);
                if let Some(stroke) = stroke {
                    surface.stroke_rect(rect, stroke);
                }
            }
        });
    }
}

impl SceneGraph {
    // --- internals ---

    fn slot(&self, id: NodeId) -> Result<&Slot, SceneError> {
        self.slots.get(&id).ok_or(SceneError::UnknownId(id))
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot, SceneError> {
        self.slots.get_mut(&id).ok_or(SceneError::UnknownId(id))
    }

    /// Both ids must be registered.
    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.slots.get_mut(&parent) {
            p.children.push(id);
        }
        if let Some(n) = self.slots.get_mut(&id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.slots.get_mut(&parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.slots.get_mut(&id) {
            n.parent = None;
        }
    }

    /// Visit every node reachable from the roots, depth-first pre-order, with
    /// its absolute origin.
    fn walk_preorder(&self, mut visit: impl FnMut(NodeId, &Node, Point)) {
        // Offsets are accumulated on the way down, so each node costs O(1).
        let mut stack: Vec<(NodeId, Vec2)> =
            self.roots.iter().rev().map(|&id| (id, Vec2::ZERO)).collect();

        while let Some((id, base)) = stack.pop() {
            let Some(slot) = self.slots.get(&id) else {
                unreachable!("linked ids always refer to registered slots");
            };
            let origin = slot.node.position + base;
            visit(id, &slot.node, origin);

            // Push in reverse so children are visited in attach order.
            for &child in slot.children.iter().rev() {
                stack.push((child, origin.to_vec2()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::find_first_hit;
    use crate::surface::{DrawOp, RecordingSurface};
    use peniko::color::palette;

    /// Root at (20, 100) with rect `a` (200x200) and rect `b` (50x50 at local (20, 20)), `a` first.
    fn two_box_scene() -> (SceneGraph, NodeId, NodeId, NodeId) {
        let mut scene = SceneGraph::new();
        let root = scene.insert_group(None, Point::new(20.0, 100.0)).unwrap();
        let a = scene
            .insert_rect(Some(root), Size::new(200.0, 200.0), palette::css::BLUE)
            .unwrap();
        let b = scene
            .insert_rect(Some(root), Size::new(50.0, 50.0), palette::css::WHITE)
            .unwrap();
        scene.set_local_position(b, Point::new(20.0, 20.0)).unwrap();
        (scene, root, a, b)
    }

    #[test]
    fn nested_boxes_compose_offsets() {
        let (scene, _root, a, b) = two_box_scene();
        assert_eq!(
            scene.absolute_bounding_box(a).unwrap().rect,
            Rect::new(20.0, 100.0, 220.0, 300.0)
        );
        assert_eq!(
            scene.absolute_bounding_box(b).unwrap().rect,
            Rect::new(40.0, 120.0, 90.0, 170.0)
        );
        assert_eq!(
            scene.local_bounding_box(b),
            Some(Rect::new(20.0, 20.0, 70.0, 70.0))
        );
    }

    #[test]
    fn first_attached_box_wins_overlapping_press() {
        let (scene, _root, a, _b) = two_box_scene();
        let boxes = scene.flatten_absolute_boxes();
        let hit = find_first_hit(Point::new(45.0, 125.0), &boxes).unwrap();
        assert_eq!(hit.id, a, "`a` was attached before `b`, so it precedes it");
    }

    #[test]
    fn absolute_position_sums_chain() {
        let mut scene = SceneGraph::new();
        let root = scene.insert_group(None, Point::new(5.0, 7.0)).unwrap();
        let mid_id = scene.allocate_id();
        let mid = scene
            .attach(Node::group(mid_id, Point::new(10.0, -2.0)), Some(root))
            .unwrap();
        let leaf_id = scene.allocate_id();
        let leaf = scene
            .attach(
                Node::rect(leaf_id, Size::new(1.0, 1.0)).with_position(Point::new(0.5, 0.25)),
                Some(mid),
            )
            .unwrap();
        assert_eq!(scene.absolute_position(root), Some(Point::new(5.0, 7.0)));
        assert_eq!(scene.absolute_position(mid), Some(Point::new(15.0, 5.0)));
        assert_eq!(scene.absolute_position(leaf), Some(Point::new(15.5, 5.25)));
    }

    #[test]
    fn group_box_is_degenerate_but_composed() {
        let mut scene = SceneGraph::new();
        let root = scene.insert_group(None, Point::new(3.0, 4.0)).unwrap();
        let inner = scene.insert_group(Some(root), Point::new(1.0, 1.0)).unwrap();
        let b = scene.absolute_bounding_box(inner).unwrap();
        assert_eq!(b.rect, Rect::new(4.0, 5.0, 4.0, 5.0));
        assert!(
            scene.flatten_absolute_boxes().is_empty(),
            "groups never produce hit boxes"
        );
    }

    #[test]
    fn flatten_is_preorder_by_attach_order() {
        let mut scene = SceneGraph::new();
        let r1 = scene
            .insert_rect(None, Size::new(10.0, 10.0), palette::css::RED)
            .unwrap();
        let c1 = scene
            .insert_rect(Some(r1), Size::new(5.0, 5.0), palette::css::RED)
            .unwrap();
        let g = scene.insert_group(None, Point::new(100.0, 0.0)).unwrap();
        let c2 = scene
            .insert_rect(Some(g), Size::new(5.0, 5.0), palette::css::RED)
            .unwrap();
        let c1a = scene
            .insert_rect(Some(c1), Size::new(1.0, 1.0), palette::css::RED)
            .unwrap();
        let c3 = scene
            .insert_rect(Some(r1), Size::new(2.0, 2.0), palette::css::RED)
            .unwrap();

        let order: Vec<NodeId> = scene.flatten_absolute_boxes().iter().map(|b| b.id).collect();
        assert_eq!(order, vec![r1, c1, c1a, c3, c2]);
        assert_eq!(
            scene.flatten_absolute_boxes(),
            scene.flatten_absolute_boxes(),
            "flattening without mutation is stable"
        );
    }

    #[test]
    fn set_local_position_requires_parent() {
        let mut scene = SceneGraph::new();
        let root = scene.insert_group(None, Point::new(1.0, 1.0)).unwrap();
        assert_eq!(
            scene.set_local_position(root, Point::new(2.0, 2.0)),
            Err(SceneError::Precursor(root))
        );
        assert_eq!(scene.absolute_position(root), Some(Point::new(1.0, 1.0)));

        let ghost = NodeId::new(999);
        assert_eq!(
            scene.set_local_position(ghost, Point::ZERO),
            Err(SceneError::UnknownId(ghost))
        );
    }

    #[test]
    fn translate_absolute_ignores_depth() {
        let mut scene = SceneGraph::new();
        let root = scene.insert_group(None, Point::new(20.0, 100.0)).unwrap();
        let mid = scene.insert_group(Some(root), Point::new(30.0, 30.0)).unwrap();
        let leaf = scene
            .insert_rect(Some(mid), Size::new(10.0, 10.0), palette::css::GREEN)
            .unwrap();

        scene.translate_absolute(leaf, Point::new(300.0, 400.0)).unwrap();
        assert_eq!(scene.absolute_position(leaf), Some(Point::new(300.0, 400.0)));
        assert_eq!(
            scene.node(leaf).unwrap().position,
            Point::new(250.0, 270.0),
            "local offset absorbs the ancestor chain"
        );

        scene.translate_absolute(root, Point::new(0.0, 0.0)).unwrap();
        assert_eq!(scene.absolute_position(root), Some(Point::ZERO));
        assert_eq!(scene.absolute_position(leaf), Some(Point::new(280.0, 300.0)));
    }

    #[test]
    fn attach_rejects_duplicate_and_retired_ids() {
        let mut scene = SceneGraph::new();
        let id = NodeId::new(42);
        scene.attach(Node::group(id, Point::ZERO), None).unwrap();
        assert_eq!(
            scene.attach(Node::rect(id, Size::new(1.0, 1.0)), None),
            Err(SceneError::DuplicateId(id))
        );
        assert_eq!(scene.len(), 1, "a rejected attach must not overwrite");
        assert!(scene.node(id).unwrap().kind.size().is_zero_area());

        assert_eq!(scene.detach(id), 1);
        assert_eq!(
            scene.attach(Node::group(id, Point::ZERO), None),
            Err(SceneError::DuplicateId(id)),
            "detached ids stay retired"
        );
    }

    #[test]
    fn attach_to_unknown_parent_changes_nothing() {
        let mut scene = SceneGraph::new();
        let ghost = NodeId::new(77);
        let id = scene.allocate_id();
        assert_eq!(
            scene.attach(Node::group(id, Point::ZERO), Some(ghost)),
            Err(SceneError::UnknownId(ghost))
        );
        assert!(scene.is_empty());
        assert!(scene.roots().is_empty());
        // The id was never registered, so it can still be used.
        assert!(scene.attach(Node::group(id, Point::ZERO), None).is_ok());
    }

    #[test]
    fn allocate_id_skips_taken_ids() {
        let mut scene = SceneGraph::new();
        scene
            .attach(Node::group(NodeId::new(1), Point::ZERO), None)
            .unwrap();
        scene
            .attach(Node::group(NodeId::new(2), Point::ZERO), None)
            .unwrap();
        scene.detach(NodeId::new(2));
        assert_eq!(scene.allocate_id(), NodeId::new(3));
    }

    #[test]
    fn detach_cascades_and_is_idempotent() {
        let (mut scene, root, a, b) = two_box_scene();
        let grandchild = scene
            .insert_rect(Some(a), Size::new(1.0, 1.0), palette::css::RED)
            .unwrap();

        assert_eq!(scene.detach(a), 2);
        assert!(scene.node(a).is_none());
        assert!(scene.node(grandchild).is_none());
        assert_eq!(scene.children_of(root), &[b]);
        assert_eq!(scene.detach(a), 0, "second detach is a no-op");

        assert_eq!(scene.detach(root), 2);
        assert!(scene.is_empty());
        assert!(scene.roots().is_empty());
        assert!(scene.flatten_absolute_boxes().is_empty());
    }

    #[test]
    fn parent_and_children_accessors() {
        let (scene, root, a, b) = two_box_scene();
        assert_eq!(scene.parent_of(a), Some(root));
        assert_eq!(scene.parent_of(root), None);
        assert_eq!(scene.children_of(root), &[a, b]);
        assert_eq!(scene.children_of(NodeId::new(1234)), &[] as &[NodeId]);
        assert_eq!(scene.roots(), &[root]);
    }

    #[test]
    fn display_setters_reject_groups() {
        let (mut scene, root, a, _b) = two_box_scene();
        assert_eq!(
            scene.set_fill(root, palette::css::GREEN),
            Err(SceneError::NotARect(root))
        );
        assert_eq!(
            scene.set_size(root, Size::new(1.0, 1.0)),
            Err(SceneError::NotARect(root))
        );
        assert_eq!(
            scene.set_stroke(root, Some(palette::css::BLACK)),
            Err(SceneError::NotARect(root))
        );
        scene.set_size(a, Size::new(-5.0, 10.0)).unwrap();
        assert_eq!(scene.node(a).unwrap().kind.size(), Size::new(0.0, 10.0));
    }

    #[test]
    fn render_clears_then_draws_in_preorder() {
        let (mut scene, _root, a, b) = two_box_scene();
        scene.set_stroke(b, Some(palette::css::BLACK)).unwrap();
        let mut surface = RecordingSurface::new(Size::new(800.0, 600.0));
        scene.render(&mut surface);

        let ops = surface.ops();
        assert_eq!(ops.len(), 4);
        assert!(matches!(ops[0], DrawOp::Clear(_)));
        let a_rect = scene.absolute_bounding_box(a).unwrap().rect;
        assert!(matches!(ops[1], DrawOp::FillRect(r, _) if r == a_rect));
        let b_rect = Rect::new(40.0, 120.0, 90.0, 170.0);
        assert!(matches!(ops[2], DrawOp::FillRect(r, _) if r == b_rect));
        assert!(matches!(ops[3], DrawOp::StrokeRect(r, _) if r == b_rect));
    }

    fn cleared_to(surface: &RecordingSurface) -> Option<[u8; 4]> {
        match surface.ops().first() {
            Some(DrawOp::Clear(color)) => Some(color.to_rgba8().to_u8_array()),
            _ => None,
        }
    }

    #[test]
    fn render_clears_to_background() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));

        let mut scene = SceneGraph::new();
        scene.render(&mut surface);
        assert_eq!(cleared_to(&surface), Some([0x45, 0x45, 0x45, 0xff]));

        scene.set_background(palette::css::WHITE);
        assert_eq!(
            scene.background().to_rgba8().to_u8_array(),
            [0xff, 0xff, 0xff, 0xff]
        );
        scene.render(&mut surface);
        assert_eq!(cleared_to(&surface), Some([0xff, 0xff, 0xff, 0xff]));

        SceneGraph::with_background(palette::css::BLACK).render(&mut surface);
        assert_eq!(cleared_to(&surface), Some([0, 0, 0, 0xff]));
        assert_eq!(surface.frames(), 3);
    }

    #[test]
    fn hidden_rect_is_skipped_but_children_drawn() {
        let (mut scene, _root, a, _b) = two_box_scene();
        let inner = scene
            .insert_rect(Some(a), Size::new(5.0, 5.0), palette::css::RED)
            .unwrap();
        scene.set_flags(a, NodeFlags::PICKABLE).unwrap();

        let mut surface = RecordingSurface::new(Size::new(800.0, 600.0));
        scene.render(&mut surface);
        let drawn: Vec<Rect> = surface.filled_rects().collect();
        assert_eq!(drawn.len(), 2);
        assert_eq!(drawn[0], scene.absolute_bounding_box(inner).unwrap().rect);
    }

    #[test]
    fn filtered_flatten_respects_flags() {
        let (mut scene, _root, a, b) = two_box_scene();
        scene.set_flags(a, NodeFlags::VISIBLE).unwrap();
        let pickable: Vec<NodeId> = scene
            .flatten_filtered(QueryFilter::new().pickable())
            .iter()
            .map(|bx| bx.id)
            .collect();
        assert_eq!(pickable, vec![b]);
        assert_eq!(scene.flatten_absolute_boxes().len(), 2);
    }
}
