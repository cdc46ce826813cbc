//! Configuration constants for web font builds.

/// Directory scanned for `.ttf`/`.otf` sources.
pub const DEFAULT_SRC_DIR: &str = "app/assets/fonts";

/// Directory that receives `.woff2`/`.woff` output, mirroring the source tree.
pub const DEFAULT_OUT_DIR: &str = "public/fonts";

/// Generated stylesheet path.
pub const DEFAULT_STYLES_OUT: &str = "app/assets/styles/base/_fonts.generated.scss";

/// Optional family configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "fonts.config.json";

/// Public base path when none is given.
pub const DEFAULT_BASE_PATH: &str = "/";

/// URL segment under the base path where fonts are served.
pub const PUBLIC_FONTS_SEGMENT: &str = "fonts";

/// Marker appended to canonical names of variable fonts.
pub const VAR_SUFFIX: &str = "Var";

/// Source font extensions, matched case-insensitively.
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];

/// `font-display` value when the config does not set one.
pub const DEFAULT_DISPLAY: &str = "swap";

/// Weight range for variable fonts when the config does not set one.
pub const DEFAULT_VAR_WGHT: &str = "300 700";

/// Weight assigned to static fonts whose name carries no weight token.
pub const DEFAULT_WEIGHT: u16 = 400;
