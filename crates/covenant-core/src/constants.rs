/// Covenant version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process name recorded on every run trace.
pub const PROCESS_NAME: &str = "contract_review";

/// Clause marker for findings that come from keyword matching rather than
/// a located clause.
pub const UNLOCATED_CLAUSE: &str = "unlocated";

/// Metadata key holding a knowledge entry's [`crate::KnowledgeCategory`].
pub const META_CATEGORY: &str = "category";

/// Metadata key holding a knowledge entry's kind (statute, checklist, advisory, ...).
pub const META_TYPE: &str = "type";

/// Metadata key holding a knowledge entry's human-readable topic.
pub const META_TOPIC: &str = "topic";

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "COVENANT_";

/// Project-level configuration file name.
pub const CONFIG_FILENAME: &str = "covenant.toml";

/// Conventional API key variable, read when no `COVENANT_*_API_KEY` is set.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
