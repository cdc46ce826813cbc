//! `@font-face` records and the generated stylesheet.

use std::path::Path;

use anyhow::Result;
use indexmap::IndexSet;

use crate::{classify::FontStyle, io::write_output};

const TAB: &str = "\t";
const NL: &str = "\n";

/// A static face with a fixed weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StaticFace {
    pub family: String,
    pub woff2_url: String,
    pub woff_url: Option<String>,
    pub style: FontStyle,
    pub weight: u16,
}

/// A variable face covering a weight range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableFace {
    pub family: String,
    pub woff2_url: String,
    pub style: FontStyle,
    /// CSS weight range, e.g. `300 700`.
    pub weight_range: String,
}

/// One `@font-face` rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontFace {
    Static(StaticFace),
    Variable(VariableFace),
}

/// Output mode of a build, named in the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// WOFF2 only.
    Modern,
    /// WOFF2 plus WOFF for static faces.
    Legacy,
}

impl Mode {
    pub const fn from_legacy(legacy: bool) -> Self {
        if legacy { Mode::Legacy } else { Mode::Modern }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Mode::Modern => "modern (woff2 only)",
            Mode::Legacy => "legacy (woff + woff2 for static)",
        }
    }
}

/// Drop structurally identical faces, keeping first-seen order.
pub fn dedupe(faces: impl IntoIterator<Item = FontFace>) -> Vec<FontFace> {
    faces.into_iter().collect::<IndexSet<_>>().into_iter().collect()
}

/// Renders deduplicated faces into stylesheet text.
#[derive(Debug, Clone)]
pub struct Stylesheet<'a> {
    /// Source directory named in the banner.
    pub source_label: &'a str,
    pub mode: Mode,
    /// `font-display` applied to every face.
    pub display: &'a str,
}

impl Stylesheet<'_> {
    /// Render faces in the order given. Callers pass them through [`dedupe`]
    /// first; duplicates here are emitted as-is.
    pub fn render(&self, faces: &[FontFace]) -> String {
        let mut css = format!(
            "/* ⚠️ AUTOGENERATED. Do not edit.{NL}        Update sources in {} and rerun the script.{NL}        Mode: {} */{NL}{NL}",
            self.source_label,
            self.mode.description()
        );

        let statics: Vec<String> = faces
            .iter()
            .filter_map(|f| match f {
                FontFace::Static(face) => Some(self.static_block(face, "")),
                FontFace::Variable(_) => None,
            })
            .collect();
        if !statics.is_empty() {
            css.push_str(&statics.join(&format!("{NL}{NL}")));
            css.push_str(NL);
            css.push_str(NL);
        }

        let variables: Vec<String> = faces
            .iter()
            .filter_map(|f| match f {
                FontFace::Variable(face) => Some(self.variable_block(face, TAB)),
                FontFace::Static(_) => None,
            })
            .collect();
        if !variables.is_empty() {
            css.push_str("@supports (font-variation-settings: normal) {");
            css.push_str(NL);
            css.push_str(&variables.join(&format!("{NL}{NL}")));
            css.push_str(NL);
            css.push('}');
            css.push_str(NL);
        }

        css.truncate(css.trim_end().len());
        css
    }

    fn static_block(&self, face: &StaticFace, pad: &str) -> String {
        let woff2 = format!(r#"url("{}") format("woff2")"#, face.woff2_url);
        let src = match &face.woff_url {
            Some(woff) => {
                format!(r#"{woff2},{NL}{pad}{TAB}     url("{woff}") format("woff");"#)
            }
            None => format!("{woff2};"),
        };

        [
            format!("{pad}@font-face {{"),
            format!(r#"{pad}{TAB}font-family: "{}";"#, face.family),
            format!("{pad}{TAB}src: {src}"),
            format!("{pad}{TAB}font-weight: {};", face.weight),
            format!("{pad}{TAB}font-style: {};", face.style.as_str()),
            format!("{pad}{TAB}font-display: {};", self.display),
            format!("{pad}}}"),
        ]
        .join(NL)
    }

    fn variable_block(&self, face: &VariableFace, pad: &str) -> String {
        [
            format!("{pad}@font-face {{"),
            format!(r#"{pad}{TAB}font-family: "{}";"#, face.family),
            format!(r#"{pad}{TAB}src: url("{}") format("woff2-variations");"#, face.woff2_url),
            format!("{pad}{TAB}font-weight: {};", face.weight_range),
            format!("{pad}{TAB}font-style: {};", face.style.as_str()),
            format!("{pad}{TAB}font-display: {};", self.display),
            format!("{pad}}}"),
        ]
        .join(NL)
    }
}

/// Placeholder stylesheet for builds without any source fonts.
pub fn render_stub(reason: &str, source_label: &str) -> String {
    format!(
        "/* ⚠️ AUTOGENERATED (stub): {reason}.{NL}        Update fonts in {source_label} and re-run the script. */{NL}{NL}"
    )
}

/// Replace the stylesheet at `path` with `css`.
pub fn write_stylesheet(path: &Path, css: &str) -> Result<()> {
    write_output(path, css)
}
