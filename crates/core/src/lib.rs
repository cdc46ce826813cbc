//! fontbake core - turns a tree of TTF/OTF sources into web fonts and a
//! generated `@font-face` stylesheet.

pub mod classify;
pub mod config;
pub mod convert;
pub mod discover;
pub mod families;
pub mod io;
pub mod naming;
pub mod pipeline;
pub mod stylesheet;

pub use classify::{FontClassification, FontStyle};
pub use convert::{ConversionSummary, FontEncoder, WebFontEncoder, WebFormat};
pub use discover::{FontSource, discover_fonts};
pub use families::FamilyConfig;
pub use naming::NamingOptions;
pub use pipeline::{BuildOptions, BuildReport, build_fonts, build_fonts_with};
pub use stylesheet::{FontFace, Mode};
