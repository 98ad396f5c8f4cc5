// src/constants.rs

//! Names and defaults shared across the crate.

/// The name of the directory holding user settings (inside the system config dir).
pub const SETTINGS_DIR: &str = "nightingale";

/// The name of the user settings file (inside [`SETTINGS_DIR`]).
pub const SETTINGS_FILENAME: &str = "nightingale.toml";

/// The file written when `--log` is given.
pub const LOG_FILENAME: &str = "nightingale.log";

/// The copyright year printed by `--version`.
pub const COPYRIGHT_YEAR: &str = "2026";

/// The application tag that follows the comment prefix of every directive.
pub const DEFAULT_APPLICATION_PATTERN: &str = r"arara:\s";

/// A continuation line: `--> ` followed by the rest of the directive.
pub const DEFAULT_LINEBREAK_PATTERN: &str = r"^\s*-->\s(.*)$";

/// The directive grammar. Groups: 1 identifier, 3 parameter block,
/// 5 conditional keyword, 6 condition expression.
pub const DEFAULT_DIRECTIVE_PATTERN: &str =
    r"^\s*(\w+)\s*(:\s*(\{.*\})\s*)?((if|while|until|unless)\s+(\S.*))?$";

/// Comment prefix shared by the TeX family of file types.
pub const TEX_COMMENT_PATTERN: &str = r"^\s*%\s+";

/// Default upper bound on loop iterations for `while`/`until` directives.
pub const DEFAULT_MAX_LOOPS: u64 = 10;

/// The reserved parameter holding the file a directive applies to.
pub const FILE_KEY: &str = "file";

/// The parameter that fans a directive out over several files.
pub const FILES_KEY: &str = "files";
