use std::path::PathBuf;

use crate::{
    config::{
        DEFAULT_BASE_PATH, DEFAULT_CONFIG_PATH, DEFAULT_OUT_DIR, DEFAULT_SRC_DIR,
        DEFAULT_STYLES_OUT, PUBLIC_FONTS_SEGMENT, VAR_SUFFIX,
    },
    naming::NamingOptions,
};

/// Inputs of a font build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Root scanned recursively for `.ttf`/`.otf` sources.
    pub src_dir: PathBuf,
    /// Root for generated web fonts, mirroring `src_dir`.
    pub out_dir: PathBuf,
    /// Generated stylesheet, replaced on every run.
    pub styles_out: PathBuf,
    /// Optional family config (JSON).
    pub config_path: PathBuf,
    /// Also emit WOFF for static fonts.
    pub legacy_woff: bool,
    /// Public URL prefix, always starting and ending with `/`.
    pub base_path: String,
    pub strip_pt_size: bool,
    pub var_suffix: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from(DEFAULT_SRC_DIR),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            styles_out: PathBuf::from(DEFAULT_STYLES_OUT),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            legacy_woff: false,
            base_path: DEFAULT_BASE_PATH.to_string(),
            strip_pt_size: true,
            var_suffix: VAR_SUFFIX.to_string(),
        }
    }
}

impl BuildOptions {
    /// Set the public base path, normalizing its slashes.
    pub fn with_base_path(mut self, base: &str) -> Self {
        self.base_path = normalize_base_path(base);
        self
    }

    pub fn naming(&self) -> NamingOptions {
        NamingOptions { strip_pt_size: self.strip_pt_size, var_suffix: self.var_suffix.clone() }
    }

    /// Public URL of an output file, e.g. `/site/fonts/Inter/Inter-Var.woff2`.
    pub fn public_url(&self, web_dir: &str, file_name: &str) -> String {
        let base = normalize_base_path(&self.base_path);
        if web_dir.is_empty() {
            format!("{base}{PUBLIC_FONTS_SEGMENT}/{file_name}")
        } else {
            format!("{base}{PUBLIC_FONTS_SEGMENT}/{web_dir}/{file_name}")
        }
    }
}

/// Ensure a base path starts and ends with `/`. Empty means `/`.
pub fn normalize_base_path(base: &str) -> String {
    if base.is_empty() {
        return "/".to_string();
    }
    let mut out = String::with_capacity(base.len() + 2);
    if !base.starts_with('/') {
        out.push('/');
    }
    out.push_str(base);
    if !out.ends_with('/') {
        out.push('/');
    }
    out
}
