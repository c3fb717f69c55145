// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by scene mutations.

use core::fmt;

use crate::types::NodeId;

/// Error returned by fallible [`SceneGraph`](crate::SceneGraph) operations.
///
/// A failed operation leaves the scene unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SceneError {
    /// The id is already registered, or was registered earlier and has since been detached.
    DuplicateId(NodeId),
    /// The operation positions a node relative to a parent, but the node is a root.
    Precursor(NodeId),
    /// No node with this id is registered.
    UnknownId(NodeId),
    /// The operation needs a rectangle, but the node is a group.
    NotARect(NodeId),
}

impl SceneError {
    /// The id the error is about.
    pub fn id(&self) -> NodeId {
        match *self {
            Self::DuplicateId(id)
            | Self::Precursor(id)
            | Self::UnknownId(id)
            | Self::NotARect(id) => id,
        }
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "node id {} is already in use", id.0),
            Self::Precursor(id) => write!(f, "node {} has no parent to position against", id.0),
            Self::UnknownId(id) => write!(f, "no node with id {} in the scene", id.0),
            Self::NotARect(id) => write!(f, "node {} is a group, not a rectangle", id.0),
        }
    }
}

impl core::error::Error for SceneError {}
