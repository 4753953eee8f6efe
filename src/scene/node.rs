use bitflags::bitflags;
use uuid::Uuid;

use crate::scene::animation::TransformAnimation;
use crate::scene::transform::Transform;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeHandle, ParticleKey, ViewerKey};

bitflags! {
    /// Per-node editor flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        /// The node can be selected by picking in the viewport.
        const PICKABLE   = 1 << 0;
        /// The node contributes to the shadow render list.
        const CAST_SHADOWS = 1 << 1;
        /// The node may be deep-cloned by `Scene::duplicate`.
        const DUPLICABLE = 1 << 2;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::PICKABLE | Self::CAST_SHADOWS | Self::DUPLICABLE
    }
}

/// The structural kind of a node, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Empty,
    Mesh,
    Light,
    Camera,
    Viewer,
    ParticleSystem,
}

/// Kind payload: a typed key into the owning scene's component pools.
///
/// This is the tagged variant behind every node. "Casting" a node to a
/// kind is a checked pool lookup (`Scene::get_mesh` and friends), never an
/// unchecked downcast. The variant itself never changes after creation;
/// only the component it points to is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeContent {
    Empty,
    Mesh(MeshKey),
    Light(LightKey),
    Camera(CameraKey),
    Viewer(ViewerKey),
    ParticleSystem(ParticleKey),
}

impl NodeContent {
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Empty => NodeKind::Empty,
            Self::Mesh(_) => NodeKind::Mesh,
            Self::Light(_) => NodeKind::Light,
            Self::Camera(_) => NodeKind::Camera,
            Self::Viewer(_) => NodeKind::Viewer,
            Self::ParticleSystem(_) => NodeKind::ParticleSystem,
        }
    }
}

/// One entry in the scene hierarchy.
///
/// Nodes keep only the data touched every frame — hierarchy links and the
/// transform — plus identity and editor state. Kind-specific data lives in
/// the scene's component pools, referenced through [`NodeContent`].
#[derive(Debug, Clone)]
pub struct Node {
    /// Stable identity, survives renames; duplication mints a new one.
    pub(crate) uuid: Uuid,
    /// Display name. Not guaranteed unique — collisions are the UI's concern.
    pub name: String,

    // === Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Spatial ===
    pub transform: Transform,

    // === Editor state ===
    pub visible: bool,
    pub flags: NodeFlags,

    // === Kind ===
    pub(crate) content: NodeContent,

    /// Optional keyframe animation sampled by `Scene::update_animation`.
    pub animation: Option<TransformAnimation>,
}

impl Node {
    /// Creates an empty node. Kind-specific nodes are built through the
    /// scene's factories, which also insert the component payload.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_content(name, NodeContent::Empty)
    }

    #[must_use]
    pub(crate) fn with_content(name: &str, content: NodeContent) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            flags: NodeFlags::default(),
            content,
            animation: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.content.kind()
    }

    #[inline]
    #[must_use]
    pub fn content(&self) -> NodeContent {
        self.content
    }

    /// Parent handle (None for the root and for detached subtree roots).
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Read-only view of the child handles, in insertion order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn is_pickable(&self) -> bool {
        self.flags.contains(NodeFlags::PICKABLE)
    }

    #[inline]
    #[must_use]
    pub fn casts_shadows(&self) -> bool {
        self.flags.contains(NodeFlags::CAST_SHADOWS)
    }

    #[inline]
    #[must_use]
    pub fn is_duplicable(&self) -> bool {
        self.flags.contains(NodeFlags::DUPLICABLE)
    }
}
