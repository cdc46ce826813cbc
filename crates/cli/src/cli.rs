//! CLI definitions and the build entry point.

use std::{path::PathBuf, time::Instant};

use anyhow::Result;
use clap::{ArgAction, Parser, builder::FalseyValueParser};
use fontbake_core::{
    BuildOptions, BuildReport, build_fonts,
    config::{
        DEFAULT_BASE_PATH, DEFAULT_CONFIG_PATH, DEFAULT_OUT_DIR, DEFAULT_SRC_DIR,
        DEFAULT_STYLES_OUT,
    },
    io::display_path,
};

#[derive(Debug, Parser)]
#[command(name = "fontbake")]
#[command(about = "Convert TTF/OTF sources to web fonts and generate the @font-face stylesheet")]
pub struct Cli {
    /// Directory scanned recursively for .ttf/.otf sources
    #[arg(long, default_value = DEFAULT_SRC_DIR)]
    pub src: PathBuf,
    /// Output directory for generated web fonts
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    pub out: PathBuf,
    /// Generated stylesheet path
    #[arg(long, default_value = DEFAULT_STYLES_OUT)]
    pub styles_out: PathBuf,
    /// Family config (JSON), optional
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// Also emit WOFF for static fonts
    #[arg(long, env = "LEGACY", action = ArgAction::SetTrue, value_parser = FalseyValueParser::new())]
    pub legacy: bool,
    /// Public base path prefixed to font URLs
    #[arg(long, env = "BASE", default_value = DEFAULT_BASE_PATH)]
    pub base: String,
    /// Keep point-size tokens such as `_12pt` in output names
    #[arg(long)]
    pub keep_pt_size: bool,
}

impl Cli {
    pub fn options(&self) -> BuildOptions {
        BuildOptions {
            src_dir: self.src.clone(),
            out_dir: self.out.clone(),
            styles_out: self.styles_out.clone(),
            config_path: self.config.clone(),
            legacy_woff: self.legacy,
            strip_pt_size: !self.keep_pt_size,
            ..BuildOptions::default()
        }
        .with_base_path(&self.base)
    }

    pub fn run(self) -> Result<()> {
        let start = Instant::now();
        let report = build_fonts(&self.options())?;
        for line in summary_lines(&report) {
            println!("{line}");
        }
        log::info!("Finished in {:.2?}", start.elapsed());
        Ok(())
    }
}

/// Console summary of a build.
pub fn summary_lines(report: &BuildReport) -> Vec<String> {
    let stylesheet = display_path(&report.stylesheet);
    if report.stub {
        return vec![format!("Stub CSS → {}", stylesheet.display())];
    }

    let summary = report.summary;
    let mut fonts = format!(
        "Fonts: {} built, {} up-to-date",
        summary.converted, summary.skipped
    );
    if summary.failed > 0 {
        fonts.push_str(&format!(", {} failed", summary.failed));
    }
    fonts.push_str(&format!(" → {}", display_path(&report.out_dir).display()));

    vec![format!("Fonts CSS → {}", stylesheet.display()), fonts]
}
