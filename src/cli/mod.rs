pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "photoscene",
    author = "Christian Weinmayr",
    version,
    about = "Photo Scene Changer - Restyle travel photos with Google Gemini",
    long_about = r#"Photo Scene Changer - Restyle travel photos with Google Gemini

Upload a photo, pick scene options (time of day, season, tourists, aspect,
camera perspective), and let Gemini rework the scene. Run without arguments
to launch the interactive TUI form.

SETUP:
  Set your API key via environment variable or config:
    export GEMINI_API_KEY=your-key-here
    photoscene config set api.key your-key-here

EXAMPLES:
  Restyle a photo:
    photoscene transform beach.jpg --time sunset --season winter
    photoscene t plaza.png --tourists remove --perspective high-angle
    photoscene transform street.jpg --remove-text --prompt "add a red car"

  Render a randomized variation batch:
    photoscene variations beach.jpg --time sunset
    photoscene v plaza.png --count 2

  Discover option ids:
    photoscene options
    photoscene options perspective

  Manage configuration:
    photoscene config show
    photoscene config set render.variations 4

  Launch interactive TUI:
    photoscene

OUTPUT FORMATS:
  --format text   Human-readable output (default)
  --format json   Machine-readable JSON for AI agents
  --format quiet  Minimal output, just file paths"#,
    after_help = r#"CONFIGURATION:
  Config file: ~/.config/photoscene/config.toml (macOS/Linux)

  Available models:
    - gemini-2.5-flash-image (default)
    - gemini-3-pro-image-preview

SCENE DIMENSIONS:
  time_of_day: day, night, sunrise, sunset, golden-hour
  season: summer, winter, spring, autumn
  tourists: keep, add, remove
  aspect: original, horizontal, vertical, square
  perspective: original, eye-level, low-angle, high-angle, left, right"#
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Restyle a photo with the selected scene options
    ///
    /// Composes an instruction from your scene choices and submits it with
    /// the photo. The reworked image is saved to the output directory.
    #[command(
        alias = "t",
        after_help = r#"EXAMPLES:
  Change the time of day:
    photoscene transform beach.jpg --time sunset

  Full scene rework:
    photoscene transform plaza.png --time night --season winter --tourists remove

  Clean up signage and add extra details:
    photoscene transform street.jpg --remove-text --prompt "make it cinematic"

  Name the output file:
    photoscene transform beach.jpg --keyword travel-blog-header"#
    )]
    Transform(commands::transform::TransformArgs),

    /// Render a small randomized batch of alternate scenes
    ///
    /// Substitutes the camera perspective (plus time of day or season) with
    /// randomly chosen alternatives and renders all alternates concurrently.
    /// The batch is all-or-nothing: one failed render fails the batch.
    #[command(
        alias = "v",
        after_help = r#"EXAMPLES:
  Three alternates around the defaults:
    photoscene variations beach.jpg

  Alternates around a chosen scene:
    photoscene variations plaza.png --time sunset --tourists remove

  Smaller batch:
    photoscene variations beach.jpg --count 2"#
    )]
    Variations(commands::variations::VariationsArgs),

    /// List the scene option catalog
    ///
    /// Shows the stable ids accepted by the transform/variations flags,
    /// with the display label and the instruction text each id stands for.
    #[command(alias = "o")]
    Options(commands::options::OptionsArgs),

    /// View or modify configuration
    ///
    /// Manage API keys, the model, variation batch size, and output
    /// settings. Changes are saved to the config file immediately.
    #[command(
        alias = "c",
        after_help = r#"EXAMPLES:
  Show all settings:
    photoscene config show

  Set values:
    photoscene config set api.key YOUR_API_KEY
    photoscene config set render.variations 4
    photoscene config set output.directory ~/Pictures/photoscene

  Reset to defaults:
    photoscene config reset --force

AVAILABLE SETTINGS:
  api.key              - Gemini API key
  api.model            - Model used for renders
  api.base_url         - API base URL
  render.variations    - Variation batch size (1-6)
  output.directory     - Where to save images
  output.auto_download - Auto-save images (true/false)
  output.display       - Display mode (terminal/viewer/none)
  tui.show_images      - Show images in TUI (true/false)
  tui.theme            - TUI theme (dark/light)"#
    )]
    Config(commands::config::ConfigArgs),
}
