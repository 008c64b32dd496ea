use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;

use super::app::{App, AppMode, FormField};
use crate::api::{self, GeminiClient, SourcePhoto};
use crate::core::SceneError;

/// Handle input in form mode
pub async fn handle_form_input(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Home => app.form_selected = 0,
        KeyCode::End => app.form_selected = FormField::all().len() - 1,

        // Cycle option rows, toggle the switch
        KeyCode::Left => app.cycle_field(app.selected_field(), -1),
        KeyCode::Right | KeyCode::Char(' ') => app.cycle_field(app.selected_field(), 1),

        // Edit text rows, cycle the rest
        KeyCode::Enter => {
            let field = app.selected_field();
            if field.is_text() {
                app.edit_buffer = match field {
                    FormField::ImagePath => app
                        .image_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                    _ => app.field_value(field),
                };
                app.cursor_pos = app.edit_buffer.len();
                app.mode = AppMode::Input;
                app.clear_messages();
            } else {
                app.cycle_field(field, 1);
            }
        }

        // Render
        KeyCode::Char('g') => generate(app).await?,
        KeyCode::Char('v') => generate_variations(app).await?,

        // View results
        KeyCode::Char('r') => {
            if app.has_results() {
                app.mode = AppMode::Results;
            }
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }

        _ => {}
    }
    Ok(())
}

/// Handle input while editing a text field
pub fn handle_input_mode(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.mode = AppMode::Form;
            app.edit_buffer.clear();
            app.cursor_pos = 0;
        }

        KeyCode::Enter => {
            let field = app.selected_field();
            let value = std::mem::take(&mut app.edit_buffer);
            app.cursor_pos = 0;
            app.mode = AppMode::Form;
            app.commit_edit(field, value);
        }

        KeyCode::Char(c) => {
            app.edit_buffer.insert(app.cursor_pos, c);
            app.cursor_pos += 1;
        }

        KeyCode::Backspace => {
            if app.cursor_pos > 0 {
                app.cursor_pos -= 1;
                app.edit_buffer.remove(app.cursor_pos);
            }
        }

        KeyCode::Delete => {
            if app.cursor_pos < app.edit_buffer.len() {
                app.edit_buffer.remove(app.cursor_pos);
            }
        }

        KeyCode::Left => {
            if app.cursor_pos > 0 {
                app.cursor_pos -= 1;
            }
        }

        KeyCode::Right => {
            if app.cursor_pos < app.edit_buffer.len() {
                app.cursor_pos += 1;
            }
        }

        KeyCode::Home => {
            app.cursor_pos = 0;
        }

        KeyCode::End => {
            app.cursor_pos = app.edit_buffer.len();
        }

        _ => {}
    }
    Ok(())
}

/// Handle input in results mode
pub fn handle_results_input(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => {
            app.mode = AppMode::Form;
        }
        _ => {}
    }
    Ok(())
}

/// Produce the primary render for the current form state
async fn generate(app: &mut App) -> Result<()> {
    let Some(image_path) = app.image_path.clone() else {
        app.set_error(SceneError::MissingImage.to_string());
        return Ok(());
    };

    app.generating = true;
    app.primary = None;
    app.variations.clear();
    app.variation_error = None;
    app.set_status("Rendering scene...");

    if let Err(e) = run_primary(app, &image_path).await {
        app.set_error(e.to_string());
    }

    app.generating = false;
    Ok(())
}

async fn run_primary(app: &mut App, image_path: &PathBuf) -> Result<(), SceneError> {
    let photo = SourcePhoto::load(image_path).await?;
    let client = GeminiClient::from_config(&app.config)?;

    let mut render = client.render_scene(&photo, &app.selection).await?;

    if app.config.output.auto_download {
        let output_dir = PathBuf::from(&app.config.output.directory);
        let keyword = (!app.keyword.trim().is_empty()).then(|| app.keyword.clone());
        let path = api::save_render(&mut render, &output_dir, keyword.as_deref()).await?;
        app.set_status(format!("Scene restyled: {}", path.display()));
    } else {
        app.set_status("Scene restyled");
    }

    app.primary = Some(render);
    Ok(())
}

/// Produce a variation batch around the current form state
async fn generate_variations(app: &mut App) -> Result<()> {
    if app.image_path.is_none() || app.primary.is_none() {
        app.set_error("Render the primary scene first (g)");
        return Ok(());
    }
    let image_path = app.image_path.clone().unwrap();

    app.generating_variations = true;
    app.variations.clear();
    app.variation_error = None;
    app.set_status("Rendering variations...");

    match run_variations(app, &image_path).await {
        Ok(count) => {
            app.set_status(format!("Rendered {} variation(s)", count));
        }
        Err(e) => {
            app.variation_error = Some(e.to_string());
            app.status_message = None;
        }
    }

    app.generating_variations = false;
    Ok(())
}

async fn run_variations(app: &mut App, image_path: &PathBuf) -> Result<usize, SceneError> {
    let photo = SourcePhoto::load(image_path).await?;
    let client = GeminiClient::from_config(&app.config)?;

    let mut renders = client
        .render_variations(&photo, &app.selection, app.config.render.variations)
        .await?;

    if app.config.output.auto_download {
        let output_dir = PathBuf::from(&app.config.output.directory);
        let keyword = (!app.keyword.trim().is_empty()).then(|| app.keyword.clone());
        for render in &mut renders {
            api::save_render(render, &output_dir, keyword.as_deref()).await?;
        }
    }

    let count = renders.len();
    app.variations = renders;
    Ok(count)
}
