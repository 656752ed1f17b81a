//! Aspect-ratio tags and their translation into provider pixel sizes.

/// Size used when neither a recognized ratio nor a pixel size is given.
pub const DEFAULT_SIZE: &str = "1024x1024";

/// The aspect ratios offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    /// `1:1`
    Square,
    /// `16:9`
    Horizontal,
    /// `9:16`
    Vertical,
    /// `4:3`
    Landscape,
    /// `3:4`
    Portrait,
}

impl AspectRatio {
    /// Every supported ratio, in menu order.
    pub const ALL: [Self; 5] =
        [Self::Square, Self::Horizontal, Self::Vertical, Self::Landscape, Self::Portrait];

    /// Parse a ratio tag such as `"16:9"`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.tag() == tag)
    }

    /// The symbolic tag for this ratio.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Horizontal => "16:9",
            Self::Vertical => "9:16",
            Self::Landscape => "4:3",
            Self::Portrait => "3:4",
        }
    }

    /// Pixel dimensions requested from the provider.
    #[must_use]
    pub fn size(self) -> &'static str {
        match self {
            Self::Square => "1024x1024",
            Self::Horizontal => "1792x1024",
            Self::Vertical => "1024x1792",
            Self::Landscape => "1024x768",
            Self::Portrait => "768x1024",
        }
    }

    /// Human-readable label shown next to generated images.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Square => "Square (1:1)",
            Self::Horizontal => "Horizontal (16:9)",
            Self::Vertical => "Vertical (9:16)",
            // Both 4:3 and 3:4 were introduced for Facebook placements.
            Self::Landscape => "Facebook (4:3)",
            Self::Portrait => "Facebook (3:4)",
        }
    }
}

/// Resolve the pixel size to request.
///
/// A well-formed `explicit_size` (`WIDTHxHEIGHT`) always wins and is not
/// checked against the sizes the provider supports. Otherwise the ratio tag is
/// looked up, and anything unrecognized falls back to [`DEFAULT_SIZE`].
#[must_use]
pub fn resolve_size(ratio: Option<&str>, explicit_size: Option<&str>) -> String {
    if let Some(size) = explicit_size.filter(|s| is_pixel_size(s)) {
        return size.to_string();
    }
    ratio.and_then(AspectRatio::from_tag).map_or(DEFAULT_SIZE, AspectRatio::size).to_string()
}

/// Label for a ratio tag: the known label, the raw tag, or `"custom"`.
#[must_use]
pub fn ratio_label(ratio: Option<&str>) -> String {
    match ratio.filter(|r| !r.is_empty()) {
        Some(tag) => AspectRatio::from_tag(tag).map_or_else(|| tag.to_string(), |r| r.label().into()),
        None => "custom".to_string(),
    }
}

/// Whether `s` is one or more digits, a literal `x`, then one or more digits.
#[must_use]
pub fn is_pixel_size(s: &str) -> bool {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    s.split_once('x').is_some_and(|(w, h)| all_digits(w) && all_digits(h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ratios_resolve_to_table_sizes() {
        assert_eq!(resolve_size(Some("1:1"), None), "1024x1024");
        assert_eq!(resolve_size(Some("16:9"), None), "1792x1024");
        assert_eq!(resolve_size(Some("9:16"), None), "1024x1792");
        assert_eq!(resolve_size(Some("4:3"), None), "1024x768");
        assert_eq!(resolve_size(Some("3:4"), None), "768x1024");
    }

    #[test]
    fn unknown_or_absent_ratio_defaults_to_square() {
        assert_eq!(resolve_size(Some("7:3"), None), "1024x1024");
        assert_eq!(resolve_size(Some(""), None), "1024x1024");
        assert_eq!(resolve_size(None, None), "1024x1024");
    }

    #[test]
    fn explicit_size_overrides_ratio() {
        assert_eq!(resolve_size(Some("16:9"), Some("512x512")), "512x512");
        assert_eq!(resolve_size(None, Some("4096x16")), "4096x16");
    }

    #[test]
    fn malformed_explicit_size_is_ignored() {
        for bad in ["abc", "1024", "1024x", "x1024", "1024X1024", "10 24x1024", "1024x1024x2"] {
            assert_eq!(resolve_size(Some("9:16"), Some(bad)), "1024x1792", "input {bad:?}");
        }
        assert_eq!(resolve_size(None, Some("big")), DEFAULT_SIZE);
    }

    #[test]
    fn labels() {
        assert_eq!(ratio_label(Some("1:1")), "Square (1:1)");
        assert_eq!(ratio_label(Some("16:9")), "Horizontal (16:9)");
        assert_eq!(ratio_label(Some("9:16")), "Vertical (9:16)");
        assert_eq!(ratio_label(Some("4:3")), "Facebook (4:3)");
        assert_eq!(ratio_label(Some("3:4")), "Facebook (3:4)");
    }

    #[test]
    fn label_falls_back_to_raw_tag_then_custom() {
        assert_eq!(ratio_label(Some("21:9")), "21:9");
        assert_eq!(ratio_label(Some("")), "custom");
        assert_eq!(ratio_label(None), "custom");
    }

    #[test]
    fn tags_round_trip() {
        for ratio in AspectRatio::ALL {
            assert_eq!(AspectRatio::from_tag(ratio.tag()), Some(ratio));
        }
        assert_eq!(AspectRatio::from_tag("2:3"), None);
    }
}
