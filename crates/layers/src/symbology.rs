use foundation::Feature;

/// Closed set of boundary categories. Unknown or missing values fall back
/// to [`Category::Default`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    A,
    B,
    C,
    Default,
}

impl Category {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("A") => Category::A,
            Some("B") => Category::B,
            Some("C") => Category::C,
            _ => Category::Default,
        }
    }

    /// Category of `feature` read from property `key`.
    pub fn of(feature: &Feature, key: &str) -> Self {
        Self::parse(feature.properties.get(key))
    }

    const fn index(self) -> usize {
        match self {
            Category::A => 0,
            Category::B => 1,
            Category::C => 2,
            Category::Default => 3,
        }
    }
}

/// Text styling handed to the label renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: &'static str,
    pub font_weight: &'static str,
    pub size_px: f32,
    pub color: [u8; 4],
}

/// Fill, outline and label styling of one category.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundaryStyle {
    pub fill_color: [u8; 4],
    pub line_color: [u8; 4],
    pub line_width_min_px: f32,
    pub text: TextStyle,
}

impl BoundaryStyle {
    pub const fn new(fill_color: [u8; 4], line_color: [u8; 4]) -> Self {
        Self {
            fill_color,
            line_color,
            line_width_min_px: 1.0,
            text: DEFAULT_TEXT,
        }
    }
}

impl Default for BoundaryStyle {
    fn default() -> Self {
        *style_for(Category::Default)
    }
}

pub const DEFAULT_TEXT: TextStyle = TextStyle {
    font_family: "Monaco, monospace",
    font_weight: "normal",
    size_px: 12.0,
    color: [0, 0, 0, 255],
};

// Indexed by `Category::index`.
const STYLES: [BoundaryStyle; 4] = [
    BoundaryStyle::new([102, 194, 165, 255], [27, 120, 94, 255]),
    BoundaryStyle::new([252, 141, 98, 255], [179, 72, 31, 255]),
    BoundaryStyle::new([141, 160, 203, 255], [58, 80, 140, 255]),
    BoundaryStyle::new([241, 109, 122, 255], [255, 0, 0, 255]),
];

pub fn style_for(category: Category) -> &'static BoundaryStyle {
    &STYLES[category.index()]
}

#[cfg(test)]
mod tests {
    use super::{BoundaryStyle, Category, style_for};
    use foundation::{Feature, Properties};

    #[test]
    fn parses_known_categories_and_falls_back() {
        assert_eq!(Category::parse(Some("A")), Category::A);
        assert_eq!(Category::parse(Some(" C ")), Category::C);
        assert_eq!(Category::parse(Some("Z")), Category::Default);
        assert_eq!(Category::parse(None), Category::Default);
    }

    #[test]
    fn default_style_matches_boundary_colors() {
        let style = BoundaryStyle::default();
        assert_eq!(style.fill_color, [241, 109, 122, 255]);
        assert_eq!(style.line_color, [255, 0, 0, 255]);
        assert_eq!(style.line_width_min_px, 1.0);
        assert_eq!(style.text.size_px, 12.0);
    }

    #[test]
    fn every_category_has_a_distinct_fill() {
        let all = [Category::A, Category::B, Category::C, Category::Default];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(style_for(*a).fill_color, style_for(*b).fill_color);
            }
        }
    }

    #[test]
    fn reads_category_from_feature() {
        let f = Feature::new(
            Vec::new(),
            Properties::new(vec![("category".into(), "B".into())]),
        );
        assert_eq!(Category::of(&f, "category"), Category::B);
        assert_eq!(Category::of(&f, "kind"), Category::Default);
    }
}
