//! Chainable node operation wrapper.
//!
//! [`SceneNode`] borrows a [`Scene`] mutably and provides a fluent API for
//! editing nodes without `get_node_mut().unwrap()` at every call site.
//!
//! All methods silently no-op when the handle is stale, so users never
//! encounter panics from dangling handles.
//!
//! # Example
//!
//! ```rust,ignore
//! scene.node(handle)
//!     .set_name("Ground")
//!     .set_position(0.0, 0.0, 0.0)
//!     .set_pickable(false)
//!     .set_cast_shadows(false);
//! ```
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::must_use_candidate)]

use glam::{Quat, Vec3};

use crate::scene::NodeHandle;
use crate::scene::node::NodeFlags;
use crate::scene::scene::Scene;

/// Temporary mutable borrow of a scene node for chainable operations.
pub struct SceneNode<'a> {
    scene: &'a mut Scene,
    handle: NodeHandle,
}

impl<'a> SceneNode<'a> {
    #[inline]
    pub fn new(scene: &'a mut Scene, handle: NodeHandle) -> Self {
        Self { scene, handle }
    }

    /// Returns the underlying handle.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    // -- Identity --

    #[inline]
    pub fn set_name(self, name: &str) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.name = name.to_string();
        }
        self
    }

    // -- Transform setters (chainable) --

    /// Sets the node's local position.
    #[inline]
    pub fn set_position(self, x: f32, y: f32, z: f32) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.transform.position = Vec3::new(x, y, z);
        }
        self
    }

    /// Sets the node's local position from a Vec3.
    #[inline]
    pub fn set_position_vec(self, pos: Vec3) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.transform.position = pos;
        }
        self
    }

    /// Sets uniform scale.
    #[inline]
    pub fn set_scale(self, s: f32) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.transform.scale = Vec3::splat(s);
        }
        self
    }

    /// Sets rotation from a quaternion.
    #[inline]
    pub fn set_rotation(self, quat: Quat) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.transform.rotation = quat;
        }
        self
    }

    /// Sets rotation from Euler angles (XYZ intrinsic order, radians).
    #[inline]
    pub fn set_rotation_euler(self, x: f32, y: f32, z: f32) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.transform.set_rotation_euler(x, y, z);
        }
        self
    }

    /// Orients the node to face `target` (in parent-local space).
    #[inline]
    pub fn look_at(self, target: Vec3) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.transform.look_at(target, Vec3::Y);
        }
        self
    }

    // -- Editor state --

    #[inline]
    pub fn set_visible(self, visible: bool) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.visible = visible;
        }
        self
    }

    #[inline]
    pub fn set_pickable(self, pickable: bool) -> Self {
        self.set_flag(NodeFlags::PICKABLE, pickable)
    }

    #[inline]
    pub fn set_cast_shadows(self, cast: bool) -> Self {
        self.set_flag(NodeFlags::CAST_SHADOWS, cast)
    }

    #[inline]
    pub fn set_duplicable(self, duplicable: bool) -> Self {
        self.set_flag(NodeFlags::DUPLICABLE, duplicable)
    }

    fn set_flag(self, flag: NodeFlags, value: bool) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.flags.set(flag, value);
        }
        self
    }
}
