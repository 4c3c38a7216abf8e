// src/constants.rs

/// Largest file (in bytes) the walker will decode. Anything larger is
/// skipped with a warning.
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Ceiling on successfully decoded files across one whole walk. Reaching it
/// stops the walk early.
pub const MAX_TOTAL_FILES: usize = 200;

/// Group key for Java files without a `package` declaration.
pub const DEFAULT_PACKAGE: &str = "(Default Package)";

/// Group key for files that belong to no package or directory group.
pub const OTHER_FILES: &str = "(Other Project Files)";

/// Display name used when cleaning a root name leaves nothing.
pub const UNTITLED_PROJECT: &str = "UntitledProject";

/// Base name of the suggested output file when several projects contribute.
pub const MULTI_PROJECT_NAME: &str = "Unified_Projects";

/// Suffix appended to suggested output file names (before the extension).
pub const UNIFIED_SUFFIX: &str = "_unified";

/// Extension of the generated document.
pub const OUTPUT_EXTENSION: &str = ".txt";

/// Maximum number of entries kept in the recent-projects store.
pub const MAX_RECENT_ENTRIES: usize = 3;
