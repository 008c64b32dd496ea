use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::prompt;
use super::selection::SceneSelection;

/// Image payload returned for one render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderImage {
    /// Base64 encoded image data (before saving)
    pub data: Option<String>,
    /// Local file path (after saving)
    pub path: Option<String>,
    /// Mime type
    pub mime_type: String,
}

impl RenderImage {
    pub fn new(data: String, mime_type: String) -> Self {
        Self {
            data: Some(data),
            path: None,
            mime_type,
        }
    }

    /// File extension for the payload's mime type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

/// Whether a render is the primary result or one of a variation batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum RenderKind {
    Primary,
    Variation {
        /// Position within the batch (1-based, used in filenames)
        slot: usize,
    },
}

/// One completed or in-flight scene render. Lives in memory for the
/// session only; the image file on disk is the only durable artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Render {
    /// Short id (e.g., "ps_ab12cd34")
    pub id: String,

    pub kind: RenderKind,

    /// The selection this render was produced from
    pub selection: SceneSelection,

    /// Composed instruction sent to the API
    pub instruction: String,

    /// Image payload, present once the API call succeeded
    pub image: Option<RenderImage>,

    pub created_at: DateTime<Utc>,
}

impl Render {
    pub fn new_primary(selection: SceneSelection) -> Self {
        Self::new(selection, RenderKind::Primary)
    }

    pub fn new_variation(selection: SceneSelection, slot: usize) -> Self {
        Self::new(selection, RenderKind::Variation { slot })
    }

    fn new(selection: SceneSelection, kind: RenderKind) -> Self {
        let uuid = Uuid::new_v4();
        Self {
            id: format!("ps_{}", &uuid.to_string()[..8]),
            kind,
            instruction: prompt::compose(&selection),
            selection,
            image: None,
            created_at: Utc::now(),
        }
    }

    /// File name for saving: the user keyword (or the render id when no
    /// keyword was given), the creation timestamp, a variation suffix for
    /// batch members, and the extension matching the payload.
    pub fn file_name(&self, keyword: Option<&str>) -> String {
        let stem = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(&self.id);
        let timestamp = self.created_at.format("%Y%m%d-%H%M%S");
        let ext = self.image.as_ref().map(RenderImage::extension).unwrap_or("png");
        match self.kind {
            RenderKind::Primary => format!("{}_{}.{}", stem, timestamp, ext),
            RenderKind::Variation { slot } => {
                format!("{}_{}_v{}.{}", stem, timestamp, slot, ext)
            }
        }
    }

    /// Instruction truncated for list displays.
    pub fn instruction_preview(&self, max_len: usize) -> String {
        if self.instruction.len() <= max_len {
            self.instruction.clone()
        } else {
            format!("{}...", &self.instruction[..max_len.saturating_sub(3)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_composed_on_construction() {
        let render = Render::new_primary(SceneSelection::default());
        assert!(render.instruction.starts_with("daytime summer"));
        assert!(render.image.is_none());
    }

    #[test]
    fn test_file_name_uses_keyword_and_timestamp() {
        let mut render = Render::new_primary(SceneSelection::default());
        render.image = Some(RenderImage::new("aGk=".to_string(), "image/jpeg".to_string()));
        let name = render.file_name(Some("travel-blog-header"));
        assert!(name.starts_with("travel-blog-header_"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn test_file_name_falls_back_to_id() {
        let render = Render::new_primary(SceneSelection::default());
        let name = render.file_name(Some("   "));
        assert!(name.starts_with(&render.id));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn test_variation_file_name_carries_slot() {
        let render = Render::new_variation(SceneSelection::default(), 2);
        assert!(render.file_name(None).ends_with("_v2.png"));
    }

    #[test]
    fn test_extension_for_unknown_mime_defaults_to_png() {
        let image = RenderImage::new(String::new(), "image/tiff".to_string());
        assert_eq!(image.extension(), "png");
    }

    #[test]
    fn test_instruction_preview_truncates() {
        let render = Render::new_primary(SceneSelection::default());
        let preview = render.instruction_preview(10);
        assert_eq!(preview.len(), 10);
        assert!(preview.ends_with("..."));
    }
}
