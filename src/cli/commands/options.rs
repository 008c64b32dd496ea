use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::core::catalog::Dimension;

#[derive(Args)]
pub struct OptionsArgs {
    /// Show a single dimension (time_of_day, season, tourists, aspect, perspective)
    pub dimension: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn run(args: OptionsArgs) -> Result<()> {
    let dimensions: Vec<Dimension> = match args.dimension.as_deref() {
        Some(key) => match Dimension::from_key(key) {
            Some(dim) => vec![dim],
            None => {
                eprintln!("{}: Unknown dimension '{}'", "Error".red().bold(), key);
                eprintln!();
                eprintln!("Available dimensions:");
                for dim in Dimension::all() {
                    eprintln!("  {}", dim.key());
                }
                return Ok(());
            }
        },
        None => Dimension::all().to_vec(),
    };

    if args.format == "json" {
        let value: Vec<_> = dimensions
            .iter()
            .map(|dim| {
                serde_json::json!({
                    "dimension": dim.key(),
                    "options": dim.options().iter().map(|o| {
                        serde_json::json!({
                            "id": o.id,
                            "label": o.label,
                            "fragment": o.fragment,
                        })
                    }).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for dim in dimensions {
        println!("{} ({})", dim.label().cyan().bold(), dim.key().dimmed());
        for (i, option) in dim.options().iter().enumerate() {
            let default_marker = if i == 0 { " (default)".dimmed().to_string() } else { String::new() };
            println!(
                "  {:<12} {:<18} {}{}",
                option.id.bold(),
                option.label,
                option.fragment.dimmed(),
                default_marker
            );
        }
        println!();
    }

    Ok(())
}
