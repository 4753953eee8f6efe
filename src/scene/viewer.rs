use uuid::Uuid;

/// VR viewer component: a head-mounted viewpoint placed in the scene.
///
/// The scene tracks at most one viewer node as "the" viewer (first one
/// added wins); additional viewer nodes stay ordinary tree members.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub uuid: Uuid,
    /// World-scale multiplier applied to the tracked head pose.
    pub view_scale: f32,
}

impl Viewer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            view_scale: 1.0,
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}
