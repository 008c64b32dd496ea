/// A single selectable value for one scene dimension.
///
/// `fragment` is the instruction text sent to the model; `label` is what the
/// TUI and `options` command show; `id` is the stable identifier accepted by
/// CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneOption {
    pub id: &'static str,
    pub label: &'static str,
    pub fragment: &'static str,
}

/// The five scene dimensions, in the order they appear in the composed
/// instruction and in the TUI form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    TimeOfDay,
    Season,
    Tourists,
    Aspect,
    Perspective,
}

pub const TIME_OF_DAY: &[SceneOption] = &[
    SceneOption { id: "day", label: "Daytime", fragment: "daytime" },
    SceneOption { id: "night", label: "Night", fragment: "night" },
    SceneOption { id: "sunrise", label: "Sunrise", fragment: "sunrise" },
    SceneOption { id: "sunset", label: "Sunset", fragment: "sunset" },
    SceneOption { id: "golden-hour", label: "Golden Hour", fragment: "golden hour" },
];

pub const SEASON: &[SceneOption] = &[
    SceneOption { id: "summer", label: "Summer", fragment: "summer" },
    SceneOption { id: "winter", label: "Winter", fragment: "winter" },
    SceneOption { id: "spring", label: "Spring", fragment: "spring" },
    SceneOption { id: "autumn", label: "Autumn", fragment: "autumn" },
];

pub const TOURISTS: &[SceneOption] = &[
    SceneOption { id: "keep", label: "Keep as is", fragment: "keep tourists as is" },
    SceneOption {
        id: "add",
        label: "Add Tourists",
        fragment: "add some tourists to the scene",
    },
    SceneOption {
        id: "remove",
        label: "Remove Tourists",
        fragment: "remove all tourists from the scene",
    },
];

pub const ASPECT: &[SceneOption] = &[
    SceneOption {
        id: "original",
        label: "Original",
        fragment: "keep the original aspect ratio",
    },
    SceneOption {
        id: "horizontal",
        label: "Horizontal (16:9)",
        fragment: "in a horizontal 16:9 aspect ratio",
    },
    SceneOption {
        id: "vertical",
        label: "Vertical (9:16)",
        fragment: "in a vertical 9:16 aspect ratio",
    },
    SceneOption {
        id: "square",
        label: "Square (1:1)",
        fragment: "in a square 1:1 aspect ratio",
    },
];

pub const PERSPECTIVE: &[SceneOption] = &[
    SceneOption {
        id: "original",
        label: "Original",
        fragment: "keep the original perspective",
    },
    SceneOption {
        id: "eye-level",
        label: "Eye-level",
        fragment: "from an eye-level perspective",
    },
    SceneOption {
        id: "low-angle",
        label: "Low Angle",
        fragment: "from a low angle, looking up",
    },
    SceneOption {
        id: "high-angle",
        label: "High Angle",
        fragment: "from a high angle, looking down (drone shot)",
    },
    SceneOption { id: "left", label: "From Left", fragment: "from the left side" },
    SceneOption { id: "right", label: "From Right", fragment: "from the right side" },
];

/// Perspective value that means "leave the camera where it is". The
/// variation planner must never pick this one.
pub fn neutral_perspective() -> &'static str {
    PERSPECTIVE[0].fragment
}

impl Dimension {
    pub fn all() -> &'static [Dimension] {
        &[
            Dimension::TimeOfDay,
            Dimension::Season,
            Dimension::Tourists,
            Dimension::Aspect,
            Dimension::Perspective,
        ]
    }

    pub fn options(&self) -> &'static [SceneOption] {
        match self {
            Dimension::TimeOfDay => TIME_OF_DAY,
            Dimension::Season => SEASON,
            Dimension::Tourists => TOURISTS,
            Dimension::Aspect => ASPECT,
            Dimension::Perspective => PERSPECTIVE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::TimeOfDay => "Time of Day",
            Dimension::Season => "Season",
            Dimension::Tourists => "Tourists",
            Dimension::Aspect => "Aspect",
            Dimension::Perspective => "Perspective",
        }
    }

    /// Key used by `SceneSelection::set` and the `options` command.
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::TimeOfDay => "time_of_day",
            Dimension::Season => "season",
            Dimension::Tourists => "tourists",
            Dimension::Aspect => "aspect",
            Dimension::Perspective => "perspective",
        }
    }

    pub fn from_key(key: &str) -> Option<Dimension> {
        Dimension::all().iter().copied().find(|d| d.key() == key)
    }

    /// Default value is always the first catalog entry.
    pub fn default_fragment(&self) -> &'static str {
        self.options()[0].fragment
    }
}

/// Look up an option by its stable id within one dimension.
pub fn find(options: &'static [SceneOption], id: &str) -> Option<&'static SceneOption> {
    options.iter().find(|o| o.id == id)
}

/// Valid ids for a dimension, for error messages and help text.
pub fn ids(options: &'static [SceneOption]) -> Vec<&'static str> {
    options.iter().map(|o| o.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_dimension_has_options() {
        for dim in Dimension::all() {
            assert!(!dim.options().is_empty(), "{} is empty", dim.label());
        }
    }

    #[test]
    fn test_ids_are_unique_within_dimension() {
        for dim in Dimension::all() {
            let ids = ids(dim.options());
            let mut deduped = ids.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(ids.len(), deduped.len(), "{} has duplicate ids", dim.label());
        }
    }

    #[test]
    fn test_defaults_are_first_entries() {
        assert_eq!(Dimension::TimeOfDay.default_fragment(), "daytime");
        assert_eq!(Dimension::Season.default_fragment(), "summer");
        assert_eq!(Dimension::Tourists.default_fragment(), "keep tourists as is");
        assert_eq!(Dimension::Aspect.default_fragment(), "keep the original aspect ratio");
        assert_eq!(
            Dimension::Perspective.default_fragment(),
            "keep the original perspective"
        );
    }

    #[test]
    fn test_neutral_perspective_is_first_entry() {
        assert_eq!(neutral_perspective(), PERSPECTIVE[0].fragment);
    }

    #[test]
    fn test_find_by_id() {
        let opt = find(PERSPECTIVE, "high-angle").unwrap();
        assert_eq!(opt.fragment, "from a high angle, looking down (drone shot)");
        assert!(find(PERSPECTIVE, "sideways").is_none());
    }

    #[test]
    fn test_dimension_key_round_trip() {
        for dim in Dimension::all() {
            assert_eq!(Dimension::from_key(dim.key()), Some(*dim));
        }
        assert_eq!(Dimension::from_key("weather"), None);
    }
}
