//! Filename-based font classification.
//!
//! Vendor filenames are the only metadata consulted: the font tables are never
//! opened, so classification is cheap and works on fonts the encoders reject.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    config::DEFAULT_WEIGHT,
    naming::{NamingOptions, output_name, strip_extension},
};

/// ASCII word boundary. `_` and digits are word characters, letters outside
/// ASCII are not.
const WB: &str = r"(?-u:\b)";

/// Case-insensitive whole-word pattern over `alternatives`.
fn word(alternatives: &str) -> Regex {
    Regex::new(&format!("(?i){WB}(?:{alternatives}){WB}")).unwrap()
}

/// Patterns that mark a variable font, tested against the lowercased file stem.
static VARIABLE_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(&format!(r"\[.*{WB}wght{WB}.*\]")).unwrap(),
        Regex::new(r"variablefont(?:[_-]|$)").unwrap(),
        Regex::new(r"variable(?:[_-]|$)").unwrap(),
        Regex::new(&format!(r"{WB}vf(?:[_-]|$)")).unwrap(),
    ]
});

static ITALIC: LazyLock<Regex> = LazyLock::new(|| word("italic"));

/// Weight names in priority order. The first matching pattern wins.
static WEIGHT_TABLE: LazyLock<Vec<(Regex, u16)>> = LazyLock::new(|| {
    [
        ("thin", 100),
        ("extralight|ultralight", 200),
        ("light", 300),
        ("book", 350),
        ("regular|normal", 400),
        ("medium", 500),
        ("semibold|demibold", 600),
        ("bold", 700),
        ("(?:extra|ultra)bold", 800),
        ("black|heavy", 900),
    ]
    .into_iter()
    .map(|(names, weight)| (word(names), weight))
    .collect()
});

/// Metadata derived from a source filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontClassification {
    pub is_variable: bool,
    pub is_italic: bool,
    /// CSS weight for static fonts (100-900).
    pub weight: u16,
    /// Output base name, without extension.
    pub canonical_name: String,
}

impl FontClassification {
    pub fn of(file_name: &str, naming: &NamingOptions) -> Self {
        let is_variable = is_variable(file_name);
        Self {
            is_variable,
            is_italic: is_italic(file_name),
            weight: guess_weight(file_name),
            canonical_name: output_name(file_name, is_variable, naming),
        }
    }

    pub fn style(&self) -> FontStyle {
        if self.is_italic { FontStyle::Italic } else { FontStyle::Normal }
    }
}

/// CSS `font-style` of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Normal,
    Italic,
}

impl FontStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }

    pub const fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic)
    }
}

pub fn is_variable(file_name: &str) -> bool {
    let lower = strip_extension(file_name).to_lowercase();
    VARIABLE_PATTERNS.iter().any(|re| re.is_match(&lower))
}

pub fn is_italic(file_name: &str) -> bool {
    ITALIC.is_match(file_name)
}

/// Weight from the first matching weight name, or 400.
pub fn guess_weight(file_name: &str) -> u16 {
    WEIGHT_TABLE
        .iter()
        .find(|(re, _)| re.is_match(file_name))
        .map_or(DEFAULT_WEIGHT, |(_, weight)| *weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_names() {
        let cases = [
            ("Inter-Thin.ttf", 100),
            ("Inter-ExtraLight.ttf", 200),
            ("Inter UltraLight.ttf", 200),
            ("Inter-Light.ttf", 300),
            ("Futura-Book.otf", 350),
            ("Inter-Regular.ttf", 400),
            ("Inter-Normal.ttf", 400),
            ("Inter-Medium.ttf", 500),
            ("Inter-SemiBold.ttf", 600),
            ("Inter-DemiBold.ttf", 600),
            ("Inter-Bold.ttf", 700),
            ("Inter-ExtraBold.ttf", 800),
            ("Inter-UltraBold.ttf", 800),
            ("Inter-Black.ttf", 900),
            ("Inter-Heavy.ttf", 900),
        ];
        for (name, weight) in cases {
            assert_eq!(guess_weight(name), weight, "{name}");
        }
    }

    #[test]
    fn test_weight_default() {
        assert_eq!(guess_weight("Inter.ttf"), 400);
        assert_eq!(guess_weight("Inter-Italic.ttf"), 400);
    }

    #[test]
    fn test_weight_first_match_wins() {
        // "light" is tested before "bold".
        assert_eq!(guess_weight("Mixed-Bold Light.ttf"), 300);
        assert_eq!(guess_weight("Mixed-Light Bold.ttf"), 300);
    }

    #[test]
    fn test_weight_requires_word_boundary() {
        // Underscore is a word character, so "Bold_Italic" is one word.
        assert_eq!(guess_weight("Roboto-Bold_Italic.ttf"), 400);
        assert_eq!(guess_weight("Roboto-BoldItalic.ttf"), 400);
        assert_eq!(guess_weight("Roboto-Bold Italic.ttf"), 700);
    }

    #[test]
    fn test_word_boundaries_are_ascii() {
        // Non-ASCII letters do not extend a word.
        assert_eq!(guess_weight("éBold.ttf"), 700);
        assert_eq!(guess_weight("Noto-Lightü.ttf"), 300);
        assert!(is_italic("Caféitalic.ttf"));
        assert!(is_variable("Façade[wght].ttf"));
    }

    #[test]
    fn test_variable_patterns() {
        assert!(is_variable("Inter-VariableFont_wght[wght].ttf"));
        assert!(is_variable("Inter[slnt,wght].ttf"));
        assert!(is_variable("Inter-VariableFont_opsz.ttf"));
        assert!(is_variable("Recursive-Variable_1.085.ttf"));
        assert!(is_variable("NotoSansMonoCJKjp-VF.ttf"));
        assert!(is_variable("Foo VF_2.ttf"));
        assert!(is_variable("Inter-Variable.otf"));
        assert!(!is_variable("Roboto-Bold.ttf"));
        assert!(!is_variable("Inter[opsz].ttf"));
    }

    #[test]
    fn test_italic() {
        assert!(is_italic("Roboto-Bold Italic.ttf"));
        assert!(is_italic("Inter-Italic.ttf"));
        assert!(is_italic("inter-ITALIC-VariableFont_wght.ttf"));
        assert!(!is_italic("Roboto-BoldItalic.ttf"));
        assert!(!is_italic("Roboto-Bold.ttf"));
    }

    #[test]
    fn test_classify_variable() {
        let c = FontClassification::of("Inter-VariableFont_wght[wght].ttf", &NamingOptions::default());
        assert!(c.is_variable);
        assert!(!c.is_italic);
        assert_eq!(c.canonical_name, "Inter-Var");
        assert_eq!(c.style(), FontStyle::Normal);
    }

    #[test]
    fn test_classify_static_italic() {
        let c = FontClassification::of("Roboto-Bold Italic.ttf", &NamingOptions::default());
        assert!(!c.is_variable);
        assert!(c.is_italic);
        assert_eq!(c.weight, 700);
        assert_eq!(c.canonical_name, "Roboto-Bold-Italic");
        assert_eq!(c.style(), FontStyle::Italic);
    }
}
