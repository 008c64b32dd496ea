use std::path::PathBuf;

use crate::config::Config;
use crate::core::catalog::Dimension;
use crate::core::{Render, SceneSelection};

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// The scene form
    Form,
    /// Editing a text field
    Input,
    /// Viewing render results
    Results,
}

/// One row of the scene form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ImagePath,
    TimeOfDay,
    Season,
    Tourists,
    Aspect,
    Perspective,
    RemoveText,
    CustomPrompt,
    Keyword,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::ImagePath,
            FormField::TimeOfDay,
            FormField::Season,
            FormField::Tourists,
            FormField::Aspect,
            FormField::Perspective,
            FormField::RemoveText,
            FormField::CustomPrompt,
            FormField::Keyword,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::ImagePath => "Photo",
            FormField::TimeOfDay => "Time of Day",
            FormField::Season => "Season",
            FormField::Tourists => "Tourists",
            FormField::Aspect => "Aspect",
            FormField::Perspective => "Perspective",
            FormField::RemoveText => "Remove Text & Watermarks",
            FormField::CustomPrompt => "Extra Details",
            FormField::Keyword => "Filename Keyword",
        }
    }

    /// The catalog dimension behind this row, if it is an option selector.
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            FormField::TimeOfDay => Some(Dimension::TimeOfDay),
            FormField::Season => Some(Dimension::Season),
            FormField::Tourists => Some(Dimension::Tourists),
            FormField::Aspect => Some(Dimension::Aspect),
            FormField::Perspective => Some(Dimension::Perspective),
            _ => None,
        }
    }

    /// Rows edited as free text rather than cycled.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::ImagePath | FormField::CustomPrompt | FormField::Keyword
        )
    }
}

/// TUI application state
pub struct App {
    /// Current mode
    pub mode: AppMode,

    /// Configuration
    pub config: Config,

    /// Current scene choices
    pub selection: SceneSelection,

    /// The uploaded photo, if any
    pub image_path: Option<PathBuf>,

    /// Keyword used in saved file names
    pub keyword: String,

    /// Primary render result
    pub primary: Option<Render>,

    /// Variation batch results
    pub variations: Vec<Render>,

    /// Selected form row
    pub form_selected: usize,

    /// Edit buffer for text fields
    pub edit_buffer: String,

    /// Cursor position in the edit buffer
    pub cursor_pos: usize,

    /// Status message
    pub status_message: Option<String>,

    /// Error message for the primary flow
    pub error_message: Option<String>,

    /// Error message for the variation batch
    pub variation_error: Option<String>,

    /// Primary render in progress
    pub generating: bool,

    /// Variation batch in progress
    pub generating_variations: bool,

    /// Whether to quit
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            mode: AppMode::Form,
            config,
            selection: SceneSelection::default(),
            image_path: None,
            keyword: String::new(),
            primary: None,
            variations: Vec::new(),
            form_selected: 0,
            edit_buffer: String::new(),
            cursor_pos: 0,
            status_message: None,
            error_message: None,
            variation_error: None,
            generating: false,
            generating_variations: false,
            should_quit: false,
        }
    }

    /// Point the session at a new photo. Results and errors are cleared,
    /// scene choices are kept.
    pub fn set_image(&mut self, path: PathBuf) {
        self.image_path = Some(path);
        self.primary = None;
        self.variations.clear();
        self.error_message = None;
        self.variation_error = None;
        self.status_message = Some("Photo selected".to_string());
    }

    /// Display value for a form row.
    pub fn field_value(&self, field: FormField) -> String {
        if let Some(dim) = field.dimension() {
            let fragment = self.selection.fragment(dim);
            return dim
                .options()
                .iter()
                .find(|o| o.fragment == fragment)
                .map(|o| o.label.to_string())
                .unwrap_or_else(|| fragment.to_string());
        }
        match field {
            FormField::ImagePath => self
                .image_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string()),
            FormField::RemoveText => if self.selection.remove_text { "on" } else { "off" }.to_string(),
            FormField::CustomPrompt => self.selection.custom_prompt.clone(),
            FormField::Keyword => self.keyword.clone(),
            _ => String::new(),
        }
    }

    /// Cycle an option row forward or backward through its catalog, or
    /// toggle the remove-text row.
    pub fn cycle_field(&mut self, field: FormField, step: isize) {
        if field == FormField::RemoveText {
            self.selection.remove_text = !self.selection.remove_text;
            return;
        }
        let Some(dim) = field.dimension() else {
            return;
        };
        let options = dim.options();
        let current = self.selection.fragment(dim);
        let index = options
            .iter()
            .position(|o| o.fragment == current)
            .unwrap_or(0) as isize;
        let next = (index + step).rem_euclid(options.len() as isize) as usize;
        // set() only fails for unknown fields; dimension keys are known
        let _ = self.selection.set(dim.key(), options[next].fragment);
    }

    /// Apply a committed edit buffer to a text field.
    pub fn commit_edit(&mut self, field: FormField, value: String) {
        match field {
            FormField::ImagePath => {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    self.set_image(PathBuf::from(trimmed));
                }
            }
            FormField::CustomPrompt => self.selection.custom_prompt = value,
            FormField::Keyword => self.keyword = value,
            _ => {}
        }
    }

    pub fn selected_field(&self) -> FormField {
        FormField::all()[self.form_selected]
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
        self.status_message = None;
    }

    /// Clear messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        if self.form_selected > 0 {
            self.form_selected -= 1;
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.form_selected < FormField::all().len() - 1 {
            self.form_selected += 1;
        }
    }

    pub fn has_results(&self) -> bool {
        self.primary.is_some() || !self.variations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog;

    fn app() -> App {
        App::new(Config::default())
    }

    #[test]
    fn test_set_image_clears_results_but_keeps_selection() {
        let mut app = app();
        app.selection.set("perspective", catalog::PERSPECTIVE[2].fragment).unwrap();
        app.primary = Some(Render::new_primary(app.selection.clone()));
        app.error_message = Some("old error".to_string());

        app.set_image(PathBuf::from("beach.jpg"));

        assert!(app.primary.is_none());
        assert!(app.variations.is_empty());
        assert!(app.error_message.is_none());
        assert_eq!(app.selection.perspective, catalog::PERSPECTIVE[2].fragment);
    }

    #[test]
    fn test_cycle_wraps_both_directions() {
        let mut app = app();
        app.cycle_field(FormField::Season, -1);
        assert_eq!(app.selection.season, "autumn");
        app.cycle_field(FormField::Season, 1);
        assert_eq!(app.selection.season, "summer");
    }

    #[test]
    fn test_cycle_toggles_remove_text() {
        let mut app = app();
        app.cycle_field(FormField::RemoveText, 1);
        assert!(app.selection.remove_text);
        app.cycle_field(FormField::RemoveText, 1);
        assert!(!app.selection.remove_text);
    }

    #[test]
    fn test_field_value_shows_option_label() {
        let app = app();
        assert_eq!(app.field_value(FormField::TimeOfDay), "Daytime");
        assert_eq!(app.field_value(FormField::ImagePath), "(none)");
    }

    #[test]
    fn test_commit_edit_ignores_blank_image_path() {
        let mut app = app();
        app.commit_edit(FormField::ImagePath, "   ".to_string());
        assert!(app.image_path.is_none());
    }
}
