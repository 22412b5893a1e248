use crate::models::Concept;

pub const CONCEPTS: &str = include_str!("../data/prompts/concepts.txt");
pub const THUMBNAIL: &str = include_str!("../data/prompts/thumbnail.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Render the concept-generation prompt for a video title.
pub fn concepts_prompt(title: &str) -> String {
    render(CONCEPTS, &[("title", title)])
}

/// Render the image prompt for a single concept.
///
/// An empty pose falls back to "simple pose" so the image model always
/// gets something to work with.
pub fn thumbnail_prompt(concept: &Concept) -> String {
    let pose = if concept.pose.trim().is_empty() {
        "simple pose"
    } else {
        concept.pose.as_str()
    };

    render(
        THUMBNAIL,
        &[
            ("expression", &concept.expression),
            ("pose", pose),
            ("scene", &concept.scene),
            ("background", &concept.background),
            ("emotion", &concept.emotion),
            ("arabic_text", &concept.arabic_text),
            ("text_position", &concept.text_position),
            ("text_style", &concept.text_style),
        ],
    )
}
