use uuid::Uuid;

/// Metadata record for a 2D texture asset.
///
/// The scene core never decodes pixels — loading belongs to the asset
/// import layer. What the graph holds is identity (uuid), a display name
/// and the source path the importer resolved, enough for persistence to
/// re-reference the file and for property widgets to label the binding.
#[derive(Debug, Clone)]
pub struct Texture {
    pub uuid: Uuid,
    pub name: String,
    /// Path or URI the importer loaded this texture from.
    pub source: String,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    #[must_use]
    pub fn new(name: &str, source: &str, width: u32, height: u32) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            source: source.to_string(),
            width,
            height,
        }
    }
}
