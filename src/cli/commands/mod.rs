pub mod config;
pub mod options;
pub mod transform;
pub mod variations;

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::core::catalog::{self, Dimension};
use crate::core::{SceneError, SceneSelection};

/// Scene option flags shared by `transform` and `variations`. Each flag
/// takes a stable option id from the catalog (see `photoscene options`).
#[derive(Args)]
pub struct SceneArgs {
    /// Time of day (day, night, sunrise, sunset, golden-hour)
    #[arg(long = "time", value_name = "ID")]
    pub time_of_day: Option<String>,

    /// Season (summer, winter, spring, autumn)
    #[arg(long, value_name = "ID")]
    pub season: Option<String>,

    /// Tourist handling (keep, add, remove)
    #[arg(long, value_name = "ID")]
    pub tourists: Option<String>,

    /// Aspect ratio (original, horizontal, vertical, square)
    #[arg(long, alias = "ar", value_name = "ID")]
    pub aspect: Option<String>,

    /// Camera perspective (original, eye-level, low-angle, high-angle, left, right)
    #[arg(long, value_name = "ID")]
    pub perspective: Option<String>,

    /// Remove text, logos, and watermarks from the scene
    #[arg(long)]
    pub remove_text: bool,

    /// Extra free-text details for the instruction
    #[arg(long, alias = "extra")]
    pub prompt: Option<String>,
}

impl SceneArgs {
    /// Resolve flag ids against the catalog into a complete selection.
    pub fn to_selection(&self) -> Result<SceneSelection, SceneError> {
        let mut selection = SceneSelection::default();

        let flags = [
            (Dimension::TimeOfDay, &self.time_of_day),
            (Dimension::Season, &self.season),
            (Dimension::Tourists, &self.tourists),
            (Dimension::Aspect, &self.aspect),
            (Dimension::Perspective, &self.perspective),
        ];

        for (dim, id) in flags {
            if let Some(id) = id {
                let option = catalog::find(dim.options(), id).ok_or_else(|| {
                    SceneError::InvalidOption(format!(
                        "unknown {} id '{}'. Valid ids: {}",
                        dim.key(),
                        id,
                        catalog::ids(dim.options()).join(", ")
                    ))
                })?;
                selection.set(dim.key(), option.fragment)?;
            }
        }

        selection.remove_text = self.remove_text;
        if let Some(prompt) = &self.prompt {
            selection.custom_prompt = prompt.clone();
        }

        Ok(selection)
    }
}

/// Output flags shared by `transform` and `variations`.
#[derive(Args)]
pub struct OutputArgs {
    /// Optional keyword used in saved file names
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Output directory for saved images
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Don't save images automatically
    #[arg(long)]
    pub no_download: bool,

    /// Output format (text, json, quiet)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

impl OutputArgs {
    pub fn output_dir(&self, config: &crate::config::Config) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.directory))
    }
}

/// Display an image in the terminal using viuer
pub fn display_image_terminal(path: &str) {
    let conf = viuer::Config {
        width: Some(80),
        height: Some(30),
        absolute_offset: false,
        ..Default::default()
    };

    if let Err(e) = viuer::print_from_file(path, &conf) {
        tracing::debug!("Failed to display image in terminal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_args() -> SceneArgs {
        SceneArgs {
            time_of_day: None,
            season: None,
            tourists: None,
            aspect: None,
            perspective: None,
            remove_text: false,
            prompt: None,
        }
    }

    #[test]
    fn test_no_flags_yields_default_selection() {
        let selection = scene_args().to_selection().unwrap();
        assert_eq!(selection, SceneSelection::default());
    }

    #[test]
    fn test_ids_resolve_to_fragments() {
        let mut args = scene_args();
        args.time_of_day = Some("golden-hour".to_string());
        args.perspective = Some("high-angle".to_string());
        let selection = args.to_selection().unwrap();
        assert_eq!(selection.time_of_day, "golden hour");
        assert_eq!(
            selection.perspective,
            "from a high angle, looking down (drone shot)"
        );
    }

    #[test]
    fn test_unknown_id_lists_valid_ids() {
        let mut args = scene_args();
        args.season = Some("monsoon".to_string());
        let err = args.to_selection().unwrap_err();
        assert!(err.to_string().contains("summer, winter, spring, autumn"));
    }

    #[test]
    fn test_flags_carry_over_to_selection() {
        let mut args = scene_args();
        args.remove_text = true;
        args.prompt = Some("add a red car".to_string());
        let selection = args.to_selection().unwrap();
        assert!(selection.remove_text);
        assert_eq!(selection.custom_prompt, "add a red car");
    }
}
