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
pub struct VariationsArgs {
    /// Path to the photo to restyle
    #[arg(required = true)]
    pub image: PathBuf,

    /// How many alternates to render (defaults to render.variations)
    #[arg(short, long)]
    pub count: Option<usize>,

    #[command(flatten)]
    pub scene: SceneArgs,

    #[command(flatten)]
    pub out: OutputArgs,
}

pub async fn run(args: VariationsArgs, config: &Config) -> Result<()> {
    let selection = args.scene.to_selection()?;
    let count = args.count.unwrap_or(config.render.variations);
    let photo = SourcePhoto::load(&args.image).await?;
    let client = GeminiClient::from_config(config)?;

    let pb = if args.out.format == "text" {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("Rendering {} variation(s)...", count));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let mut renders = match client.render_variations(&photo, &selection, count).await {
        Ok(renders) => renders,
        Err(e) => {
            if let Some(pb) = pb {
                pb.finish_with_message(format!("{} Variation batch failed", "✗".red()));
            }
            if args.out.format != "quiet" {
                eprintln!("{}: {}", "Error".red().bold(), e);
            }
            return Err(e.into());
        }
    };

    if renders.is_empty() {
        if let Some(pb) = pb {
            pb.finish_with_message(format!("{} No variations possible", "✗".yellow()));
        }
        if args.out.format != "quiet" {
            eprintln!(
                "{}: no alternate perspectives available for this selection",
                "Warning".yellow().bold()
            );
        }
        return Ok(());
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    if !args.out.no_download && config.output.auto_download {
        let output_dir = args.out.output_dir(config);
        for render in &mut renders {
            paths.push(
                api::save_render(render, &output_dir, args.out.keyword.as_deref()).await?,
            );
        }
    }

    if let Some(pb) = &pb {
        pb.finish_with_message(format!(
            "{} Rendered {} variation(s)",
            "✓".green(),
            renders.len()
        ));
    }

    match args.out.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&renders)?);
        }
        "quiet" => {
            for path in &paths {
                println!("{}", path.display());
            }
        }
        _ => {
            println!();
            println!("{}: {}", "Source".cyan().bold(), photo.path.display());
            for render in &renders {
                println!();
                println!("{}: {}", "Render ID".cyan().bold(), render.id);
                println!("{}: {}", "Instruction".cyan().bold(), render.instruction);
                if let Some(path) = render.image.as_ref().and_then(|i| i.path.as_deref()) {
                    println!("{}: {}", "Saved".cyan().bold(), path);
                }
            }

            if config.output.display == crate::config::DisplayMode::Terminal {
                if let Some(first) = paths.first() {
                    println!();
                    display_image_terminal(&first.to_string_lossy());
                }
            }
        }
    }

    Ok(())
}
