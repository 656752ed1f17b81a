//! Model name resolution.

/// Model requested when the config names none.
pub const DEFAULT_MODEL: &str = "gpt-image-1";

/// Short name aliases for image models.
const ALIASES: &[(&str, &str)] = &[
    ("gpt-1", "gpt-image-1"),
    ("gpt-1-mini", "gpt-image-1-mini"),
    ("gpt-1.5", "gpt-image-1.5"),
    ("dalle-3", "dall-e-3"),
];

/// Resolve a model name (alias or exact) to the full model identifier.
///
/// Blank names resolve to [`DEFAULT_MODEL`].
#[must_use]
pub fn resolve_model(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return DEFAULT_MODEL.to_string();
    }
    ALIASES
        .iter()
        .find(|&&(alias, _)| alias == name)
        .map_or(name, |&(_, full)| full)
        .to_string()
}
