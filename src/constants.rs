//! Common constants used throughout the Scaffolder application.

/// Name of the directory that holds a project's templates.
pub const TEMPLATES_DIR: &str = "scaffolder";

/// Supported configuration file names, looked up next to the templates
pub const CONFIG_FILES: [&str; 3] = ["scaffolder.json", "scaffolder.yml", "scaffolder.yaml"];

/// Scaffolder's ignore file name
pub const IGNORE_FILE: &str = ".scaffolderignore";

/// Patterns that are always excluded from template trees.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 2] = ["**/.DS_Store", "**/.git"];
