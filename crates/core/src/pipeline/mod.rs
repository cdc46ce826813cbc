//! Font build pipeline: discover, classify, convert, emit.

mod options;

pub use options::{BuildOptions, normalize_base_path};

use std::path::PathBuf;

use anyhow::Result;
use indexmap::IndexMap;
use rayon::prelude::*;

use crate::{
    classify::FontClassification,
    convert::{
        ConversionSummary, ConvertedFont, Converter, FileOutcome, FontEncoder, WebFontEncoder,
        WebFormat,
    },
    discover::{FontSource, discover_fonts},
    families::FamilyConfig,
    io::display_path,
    naming::normalize_base_name,
    stylesheet::{
        FontFace, Mode, StaticFace, Stylesheet, VariableFace, dedupe, render_stub, write_stylesheet,
    },
};

/// Reason written into the stub stylesheet.
const NO_SOURCES_REASON: &str = "No font sources found";

/// What a build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub summary: ConversionSummary,
    /// `@font-face` rules in the stylesheet after deduplication.
    pub faces: usize,
    pub stylesheet: PathBuf,
    pub out_dir: PathBuf,
    /// True when no sources were found and a stub was written.
    pub stub: bool,
}

/// A discovered source and what its filename says about it.
#[derive(Debug, Clone)]
pub struct PlannedFont {
    pub source: FontSource,
    pub classification: FontClassification,
}

impl PlannedFont {
    /// Config lookup key: the top-level source folder, or for fonts at the
    /// root, the first hyphen-separated part of the normalized name.
    pub fn folder(&self, options: &BuildOptions) -> String {
        self.source.top_folder().unwrap_or_else(|| {
            let name = normalize_base_name(self.source.file_name(), options.strip_pt_size);
            name.split('-').next().unwrap_or_default().to_string()
        })
    }

    fn face(&self, font: &ConvertedFont, config: &FamilyConfig, options: &BuildOptions) -> FontFace {
        let folder = self.folder(options);
        let family = config.css_family(&folder).to_string();
        let web_dir = self.source.web_dir();
        let url = |path: &PathBuf| {
            let file_name = path.file_name().unwrap_or_default().to_string_lossy();
            options.public_url(&web_dir, &file_name)
        };
        let style = self.classification.style();

        if self.classification.is_variable {
            FontFace::Variable(VariableFace {
                family,
                woff2_url: url(&font.woff2),
                style,
                weight_range: config.var_wght(&folder, style.is_italic()).to_string(),
            })
        } else {
            FontFace::Static(StaticFace {
                family,
                woff2_url: url(&font.woff2),
                woff_url: font.woff.as_ref().map(url),
                style,
                weight: self.classification.weight,
            })
        }
    }
}

/// Run a build with the bundled WOFF2/WOFF encoders.
pub fn build_fonts(options: &BuildOptions) -> Result<BuildReport> {
    build_fonts_with(options, &WebFontEncoder)
}

/// Run a build with a custom encoder.
pub fn build_fonts_with<E: FontEncoder>(options: &BuildOptions, encoder: &E) -> Result<BuildReport> {
    let source_label = display_path(&options.src_dir).display().to_string();

    let sources = discover_fonts(&options.src_dir)?;
    if sources.is_empty() {
        log::info!("No fonts under {source_label}, writing stub stylesheet");
        write_stylesheet(&options.styles_out, &render_stub(NO_SOURCES_REASON, &source_label))?;
        return Ok(BuildReport {
            summary: ConversionSummary::default(),
            faces: 0,
            stylesheet: options.styles_out.clone(),
            out_dir: options.out_dir.clone(),
            stub: true,
        });
    }

    let config = FamilyConfig::load(&options.config_path);
    let plans = plan(sources, options);
    let converter = Converter::new(&options.out_dir, options.legacy_woff, encoder);
    let outcomes = convert_all(&plans, &converter)?;

    let mut summary = ConversionSummary::default();
    let mut faces = Vec::new();
    for (plan, outcome) in plans.iter().zip(outcomes) {
        summary += outcome.summary;
        if let Some(font) = outcome.font {
            faces.push(plan.face(&font, &config, options));
        }
    }

    let faces = dedupe(faces);
    let sheet = Stylesheet {
        source_label: &source_label,
        mode: Mode::from_legacy(options.legacy_woff),
        display: &config.display,
    };
    let css = sheet.render(&faces);
    write_stylesheet(&options.styles_out, &css)?;

    Ok(BuildReport {
        summary,
        faces: faces.len(),
        stylesheet: options.styles_out.clone(),
        out_dir: options.out_dir.clone(),
        stub: false,
    })
}

/// Classify every source.
pub fn plan(sources: Vec<FontSource>, options: &BuildOptions) -> Vec<PlannedFont> {
    let naming = options.naming();
    sources
        .into_iter()
        .map(|source| {
            let classification = FontClassification::of(source.file_name(), &naming);
            log::debug!(
                "{}: variable={} italic={} weight={} -> {}",
                source.relative_path().display(),
                classification.is_variable,
                classification.is_italic,
                classification.weight,
                classification.canonical_name
            );
            PlannedFont { source, classification }
        })
        .collect()
}

/// Convert all planned fonts in parallel, returning outcomes in plan order.
///
/// Sources that map to the same output path are converted sequentially
/// within one task, so no two tasks write the same file.
fn convert_all<E: FontEncoder>(
    plans: &[PlannedFont],
    converter: &Converter<'_, E>,
) -> Result<Vec<FileOutcome>> {
    let mut groups: IndexMap<PathBuf, Vec<usize>> = IndexMap::new();
    for (i, plan) in plans.iter().enumerate() {
        let target = converter.target_path(&plan.source, &plan.classification, WebFormat::Woff2);
        groups.entry(target).or_default().push(i);
    }

    for (target, indices) in &groups {
        if indices.len() > 1 {
            log::warn!("{} sources share the output {}", indices.len(), target.display());
        }
    }

    let groups: Vec<Vec<usize>> = groups.into_values().collect();
    let converted: Vec<Vec<(usize, FileOutcome)>> = groups
        .into_par_iter()
        .map(|indices| {
            indices
                .into_iter()
                .map(|i| {
                    let plan = &plans[i];
                    converter.convert(&plan.source, &plan.classification).map(|o| (i, o))
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    let mut outcomes: Vec<(usize, FileOutcome)> = converted.into_iter().flatten().collect();
    outcomes.sort_by_key(|(i, _)| *i);
    Ok(outcomes.into_iter().map(|(_, o)| o).collect())
}
