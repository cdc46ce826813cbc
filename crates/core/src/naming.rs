//! Canonical output names for source fonts.
//!
//! Vendor filenames carry axis annotations, point sizes, punctuation and mixed
//! separators. Output names drop all of that and use hyphens only, then tag
//! variable builds with a suffix marker so they never collide with a static
//! cut of the same family.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::VAR_SUFFIX;

static EXTENSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\.(ttf|otf)$").unwrap());
static BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]").unwrap());

/// Variable-font tails, each stripped at most once, in this order.
static VARIABLE_TAILS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)[-_ ]?VariableFont[_-].*$").unwrap(),
        Regex::new(r"(?i)[-_ ]?Variable[_-]?.*$").unwrap(),
        Regex::new(r"(?i)[-_ ]?VF[_-]?.*$").unwrap(),
    ]
});

static POINT_SIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)[_-][0-9]+pt(?-u:\b)").unwrap());
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[_ ]+").unwrap());
static HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());
static ITALIC_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)-Italic$").unwrap());

/// Knobs for canonical naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingOptions {
    /// Drop `-12pt`/`_12pt` optical-size tokens.
    pub strip_pt_size: bool,
    /// Marker appended to variable font names.
    pub var_suffix: String,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self { strip_pt_size: true, var_suffix: VAR_SUFFIX.to_string() }
    }
}

/// Remove a trailing `.ttf`/`.otf` (any case).
pub fn strip_extension(file_name: &str) -> &str {
    match EXTENSION.find(file_name) {
        Some(m) => &file_name[..m.start()],
        None => file_name,
    }
}

/// Normalize a source filename into a hyphenated base name.
pub fn normalize_base_name(file_name: &str, strip_pt_size: bool) -> String {
    let mut name = BRACKETS.replace_all(strip_extension(file_name), "").into_owned();

    for tail in VARIABLE_TAILS.iter() {
        name = tail.replace(&name, "").into_owned();
    }

    if strip_pt_size {
        name = POINT_SIZE.replace_all(&name, "").into_owned();
    }

    let name = name.replace(',', "");
    let name = MULTI_SPACE.replace_all(&name, " ");
    let name = SEPARATORS.replace_all(name.trim(), "-");
    HYPHENS.replace_all(&name, "-").into_owned()
}

/// Canonical output name: the normalized name plus the variable marker.
///
/// The marker goes before a trailing `-Italic` (`Name-Var-Italic`) and is
/// appended otherwise (`Name-Var`).
pub fn output_name(file_name: &str, is_variable: bool, options: &NamingOptions) -> String {
    let name = normalize_base_name(file_name, options.strip_pt_size);
    if !is_variable {
        return name;
    }

    let suffix = &options.var_suffix;
    match ITALIC_TAIL.find(&name) {
        Some(m) => format!("{}-{suffix}-Italic", &name[..m.start()]),
        None => format!("{name}-{suffix}"),
    }
}
