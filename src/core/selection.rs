use serde::{Deserialize, Serialize};

use super::catalog::Dimension;
use super::error::SceneError;

/// The full set of scene choices for one render.
///
/// Dimension fields hold instruction fragments, not option ids. Every
/// dimension always has a value; defaults come from the first catalog entry
/// of each dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSelection {
    pub time_of_day: String,
    pub season: String,
    pub tourists: String,
    pub aspect: String,
    pub perspective: String,
    pub remove_text: bool,
    pub custom_prompt: String,
}

impl Default for SceneSelection {
    fn default() -> Self {
        Self {
            time_of_day: Dimension::TimeOfDay.default_fragment().to_string(),
            season: Dimension::Season.default_fragment().to_string(),
            tourists: Dimension::Tourists.default_fragment().to_string(),
            aspect: Dimension::Aspect.default_fragment().to_string(),
            perspective: Dimension::Perspective.default_fragment().to_string(),
            remove_text: false,
            custom_prompt: String::new(),
        }
    }
}

impl SceneSelection {
    /// Set a field by key. Dimension fields and `custom_prompt` accept any
    /// string; `remove_text` must parse as a bool.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), SceneError> {
        match field {
            "time_of_day" => self.time_of_day = value.to_string(),
            "season" => self.season = value.to_string(),
            "tourists" => self.tourists = value.to_string(),
            "aspect" => self.aspect = value.to_string(),
            "perspective" => self.perspective = value.to_string(),
            "remove_text" => {
                self.remove_text = value.parse().map_err(|_| {
                    SceneError::InvalidOption(format!(
                        "remove_text must be true or false, got '{}'",
                        value
                    ))
                })?;
            }
            "custom_prompt" => self.custom_prompt = value.to_string(),
            _ => {
                return Err(SceneError::InvalidOption(format!(
                    "unknown selection field: {}",
                    field
                )))
            }
        }
        Ok(())
    }

    /// Current fragment for a dimension.
    pub fn fragment(&self, dim: Dimension) -> &str {
        match dim {
            Dimension::TimeOfDay => &self.time_of_day,
            Dimension::Season => &self.season,
            Dimension::Tourists => &self.tourists,
            Dimension::Aspect => &self.aspect,
            Dimension::Perspective => &self.perspective,
        }
    }

    pub fn with_time_of_day(mut self, fragment: impl Into<String>) -> Self {
        self.time_of_day = fragment.into();
        self
    }

    pub fn with_season(mut self, fragment: impl Into<String>) -> Self {
        self.season = fragment.into();
        self
    }

    pub fn with_perspective(mut self, fragment: impl Into<String>) -> Self {
        self.perspective = fragment.into();
        self
    }

    pub fn with_custom_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.custom_prompt = prompt.into();
        self
    }

    pub fn fields() -> &'static [&'static str] {
        &[
            "time_of_day",
            "season",
            "tourists",
            "aspect",
            "perspective",
            "remove_text",
            "custom_prompt",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selects_first_option_of_every_dimension() {
        let sel = SceneSelection::default();
        for dim in Dimension::all() {
            assert_eq!(sel.fragment(*dim), dim.default_fragment());
            assert!(!sel.fragment(*dim).is_empty());
        }
        assert!(!sel.remove_text);
        assert!(sel.custom_prompt.is_empty());
    }

    #[test]
    fn test_set_dimension_accepts_arbitrary_string() {
        let mut sel = SceneSelection::default();
        sel.set("perspective", "from underneath a glass floor").unwrap();
        assert_eq!(sel.perspective, "from underneath a glass floor");
    }

    #[test]
    fn test_set_remove_text_parses_bool() {
        let mut sel = SceneSelection::default();
        sel.set("remove_text", "true").unwrap();
        assert!(sel.remove_text);
        assert!(sel.set("remove_text", "yes").is_err());
    }

    #[test]
    fn test_set_unknown_field_fails() {
        let mut sel = SceneSelection::default();
        let err = sel.set("weather", "rainy").unwrap_err();
        assert!(err.to_string().contains("unknown selection field"));
    }

    #[test]
    fn test_set_covers_all_listed_fields() {
        let mut sel = SceneSelection::default();
        for field in SceneSelection::fields() {
            let value = if *field == "remove_text" { "true" } else { "x" };
            sel.set(field, value).unwrap();
        }
    }
}
