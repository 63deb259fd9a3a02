// Single source of truth for all default values.

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 256;
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_COMPLIANCE_THRESHOLD: f32 = 0.7;
pub const DEFAULT_RISK_THRESHOLD: f32 = 0.6;
pub const DEFAULT_GUIDANCE_PREFIX: &str = "Reference: ";
pub const DEFAULT_KNOWLEDGE_CHUNK_SIZE: usize = 500;
pub const DEFAULT_KNOWLEDGE_CHUNK_OVERLAP: usize = 50;

// --- Pipeline ---
pub const DEFAULT_SUMMARY_INPUT_CHARS: usize = 2_000;
pub const DEFAULT_PARSE_CHUNK_SIZE: usize = 1_000;
pub const DEFAULT_PARSE_CHUNK_OVERLAP: usize = 200;

// --- Scoring ---
pub const DEFAULT_BASE_SCORE: u32 = 10;
pub const DEFAULT_MIN_SCORE: u32 = 1;
pub const DEFAULT_HIGH_WEIGHT: u32 = 3;
pub const DEFAULT_MEDIUM_WEIGHT: u32 = 2;
pub const DEFAULT_LOW_WEIGHT: u32 = 0;
pub const DEFAULT_GAP_WEIGHT: u32 = 2;
pub const DEFAULT_MAX_PENALTY: u32 = 8;

// --- Completion ---
pub const DEFAULT_COMPLETION_MODEL: &str = "llama2";
pub const DEFAULT_SUMMARY_SENTENCES: usize = 3;
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 60;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
pub const DEFAULT_RUN_LOG_CAPACITY: usize = 10_000;
