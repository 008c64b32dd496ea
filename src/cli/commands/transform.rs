use anyhow::Result;
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use super::{display_image_terminal, OutputArgs, SceneArgs};
use crate::api::{self, GeminiClient, SourcePhoto};
use crate::config::Config;

#[derive(Args)]
pub struct TransformArgs {
    /// Path to the photo to restyle
    #[arg(required = true)]
    pub image: PathBuf,

    #[command(flatten)]
    pub scene: SceneArgs,

    #[command(flatten)]
    pub out: OutputArgs,
}

pub async fn run(args: TransformArgs, config: &Config) -> Result<()> {
    let selection = args.scene.to_selection()?;
    let photo = SourcePhoto::load(&args.image).await?;
    let client = GeminiClient::from_config(config)?;

    // Show progress
    let pb = if args.out.format == "text" {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("Restyling {}...", args.image.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let mut render = match client.render_scene(&photo, &selection).await {
        Ok(render) => render,
        Err(e) => {
            if let Some(pb) = pb {
                pb.finish_with_message(format!("{} Render failed", "✗".red()));
            }
            if args.out.format != "quiet" {
                eprintln!("{}: {}", "Error".red().bold(), e);
            }
            return Err(e.into());
        }
    };

    if !args.out.no_download && config.output.auto_download {
        let output_dir = args.out.output_dir(config);
        let path = api::save_render(&mut render, &output_dir, args.out.keyword.as_deref()).await?;

        if let Some(pb) = &pb {
            pb.finish_with_message(format!("{} Scene restyled", "✓".green()));
        }

        match args.out.format.as_str() {
            "json" => {
                println!("{}", serde_json::to_string_pretty(&render)?);
            }
            "quiet" => {
                println!("{}", path.display());
            }
            _ => {
                println!();
                println!("{}: {}", "Render ID".cyan().bold(), render.id);
                println!("{}: {}", "Source".cyan().bold(), photo.path.display());
                println!("{}: {}", "Instruction".cyan().bold(), render.instruction);
                println!("{}: {}", "Saved".cyan().bold(), path.display());

                if config.output.display == crate::config::DisplayMode::Terminal {
                    println!();
                    display_image_terminal(&path.to_string_lossy());
                }
            }
        }
    } else {
        if let Some(pb) = &pb {
            pb.finish_with_message(format!("{} Scene restyled (not saved)", "✓".green()));
        }

        if args.out.format == "json" {
            println!("{}", serde_json::to_string_pretty(&render)?);
        }
    }

    Ok(())
}
