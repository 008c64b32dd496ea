use super::selection::SceneSelection;

/// Fragment appended when the remove-text toggle is on.
pub const CLEANUP_FRAGMENT: &str = "remove all text, logos, and watermarks";

/// Compose the instruction string for one render.
///
/// Pure and deterministic: the five dimension fragments in fixed order,
/// then the cleanup fragment when `remove_text` is set, then the trimmed
/// custom prompt when non-empty. Fragments are trimmed, empty ones
/// dropped, and the rest joined by single spaces.
pub fn compose(selection: &SceneSelection) -> String {
    let mut parts: Vec<&str> = vec![
        &selection.time_of_day,
        &selection.season,
        &selection.tourists,
        &selection.aspect,
        &selection.perspective,
    ];

    if selection.remove_text {
        parts.push(CLEANUP_FRAGMENT);
    }

    let custom = selection.custom_prompt.trim();
    if !custom.is_empty() {
        parts.push(custom);
    }

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_defaults() {
        let sel = SceneSelection::default();
        assert_eq!(
            compose(&sel),
            "daytime summer keep tourists as is keep the original aspect ratio \
             keep the original perspective"
        );
    }

    #[test]
    fn test_compose_is_deterministic() {
        let sel = SceneSelection::default()
            .with_perspective("from the left side")
            .with_custom_prompt("make it cinematic");
        assert_eq!(compose(&sel), compose(&sel.clone()));
    }

    #[test]
    fn test_compose_cleanup_and_custom_prompt_ordering() {
        let mut sel = SceneSelection::default();
        sel.remove_text = true;
        sel.custom_prompt = "add a red car".to_string();
        let prompt = compose(&sel);
        assert!(prompt.ends_with(
            "keep the original perspective remove all text, logos, and watermarks add a red car"
        ));
    }

    #[test]
    fn test_compose_omits_cleanup_when_off() {
        let sel = SceneSelection::default();
        assert!(!compose(&sel).contains(CLEANUP_FRAGMENT));

        let mut on = SceneSelection::default();
        on.remove_text = true;
        assert!(compose(&on).ends_with(CLEANUP_FRAGMENT));
    }

    #[test]
    fn test_compose_trims_custom_prompt() {
        let mut sel = SceneSelection::default();
        sel.custom_prompt = "   ".to_string();
        assert!(compose(&sel).ends_with("keep the original perspective"));

        sel.custom_prompt = "  add fog  ".to_string();
        assert!(compose(&sel).ends_with("keep the original perspective add fog"));
    }

    #[test]
    fn test_compose_drops_emptied_dimension() {
        let mut sel = SceneSelection::default();
        sel.time_of_day = String::new();
        let prompt = compose(&sel);
        assert!(prompt.starts_with("summer "));
        assert!(!prompt.contains("  "));
    }
}
