use std::collections::HashMap;

use covenant_core::config::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = CovenantConfig::from_toml("").unwrap();

    // Embedding defaults
    assert_eq!(config.embedding.provider, EmbeddingProviderKind::Hashing);
    assert_eq!(config.embedding.dimensions, 256);
    assert_eq!(config.embedding.cache_size, 10_000);

    // Retrieval defaults
    assert_eq!(config.retrieval.top_k, 3);
    assert_eq!(config.retrieval.compliance_threshold, 0.7);
    assert_eq!(config.retrieval.risk_threshold, 0.6);
    assert_eq!(config.retrieval.guidance_prefix, "Reference: ");
    assert_eq!(config.retrieval.chunk_size, 500);
    assert_eq!(config.retrieval.chunk_overlap, 50);

    // Pipeline defaults
    assert_eq!(config.pipeline.summary_input_chars, 2_000);
    assert!(config.pipeline.stage_deadline_ms.is_none());
    assert!(config.pipeline.disabled_stages.is_empty());

    // Scoring defaults
    assert_eq!(config.scoring, ScoringConfig::default());
    assert_eq!(config.scoring.max_penalty, 8);

    // Completion defaults
    assert_eq!(config.completion.provider, CompletionProviderKind::Extractive);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(config.rules.path.is_none());
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[retrieval]
top_k = 5
risk_threshold = 0.5

[pipeline]
stage_deadline_ms = 250
disabled_stages = ["generate_summary"]

[completion]
provider = "ollama"
"#;
    let config = CovenantConfig::from_toml(toml).unwrap();
    assert_eq!(config.retrieval.top_k, 5);
    assert_eq!(config.retrieval.risk_threshold, 0.5);
    // Non-overridden fields keep defaults
    assert_eq!(config.retrieval.compliance_threshold, 0.7);
    assert_eq!(config.pipeline.stage_deadline_ms, Some(250));
    assert_eq!(config.pipeline.disabled_stages, vec!["generate_summary"]);
    assert_eq!(config.completion.provider, CompletionProviderKind::Ollama);
}

#[test]
fn config_rejects_invalid_toml() {
    let err = CovenantConfig::from_toml("[retrieval\ntop_k = 3").unwrap_err();
    assert!(matches!(
        err,
        covenant_core::errors::ConfigError::ParseError { .. }
    ));
}

#[test]
fn config_rejects_zero_top_k() {
    let err = CovenantConfig::from_toml("[retrieval]\ntop_k = 0").unwrap_err();
    assert!(err.to_string().contains("retrieval.top_k"));
}

#[test]
fn config_rejects_overlap_not_smaller_than_chunk() {
    let err = CovenantConfig::from_toml("[retrieval]\nchunk_size = 50\nchunk_overlap = 50")
        .unwrap_err();
    assert!(err.to_string().contains("retrieval.chunk_overlap"));
}

#[test]
fn config_rejects_penalty_above_base_score() {
    let err = CovenantConfig::from_toml("[scoring]\nmax_penalty = 11").unwrap_err();
    assert!(err.to_string().contains("scoring.max_penalty"));
}

#[test]
fn load_without_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = CovenantConfig::load_with_env(dir.path(), env(&[])).unwrap();
    assert_eq!(config.retrieval.top_k, 3);
}

#[test]
fn load_reads_project_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("covenant.toml"),
        "[retrieval]\ntop_k = 7\n[observability]\nlog_level = \"debug\"\n",
    )
    .unwrap();

    let config = CovenantConfig::load_with_env(dir.path(), env(&[])).unwrap();
    assert_eq!(config.retrieval.top_k, 7);
    assert_eq!(config.observability.log_level, "debug");
}

#[test]
fn env_overrides_beat_project_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("covenant.toml"), "[retrieval]\ntop_k = 7\n").unwrap();

    let config = CovenantConfig::load_with_env(
        dir.path(),
        env(&[
            ("COVENANT_RETRIEVAL_TOP_K", "2"),
            ("COVENANT_RETRIEVAL_RISK_THRESHOLD", "0.25"),
            ("COVENANT_EMBEDDING_PROVIDER", "ollama"),
            ("COVENANT_RULES_PATH", "/etc/covenant/rules.toml"),
        ]),
    )
    .unwrap();
    assert_eq!(config.retrieval.top_k, 2);
    assert_eq!(config.retrieval.risk_threshold, 0.25);
    assert_eq!(config.embedding.provider, EmbeddingProviderKind::Ollama);
    assert_eq!(
        config.rules.path.as_deref(),
        Some("/etc/covenant/rules.toml")
    );
}

#[test]
fn unparseable_env_value_is_a_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CovenantConfig::load_with_env(
        dir.path(),
        env(&[("COVENANT_RETRIEVAL_TOP_K", "three")]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("COVENANT_RETRIEVAL_TOP_K"));
}

#[test]
fn env_values_are_validated_after_override() {
    let dir = tempfile::tempdir().unwrap();
    let err = CovenantConfig::load_with_env(
        dir.path(),
        env(&[("COVENANT_PIPELINE_STAGE_DEADLINE_MS", "0")]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("pipeline.stage_deadline_ms"));
}

#[test]
fn config_round_trips_through_toml() {
    let original = CovenantConfig::default();
    let text = toml::to_string(&original).unwrap();
    let parsed = CovenantConfig::from_toml(&text).unwrap();
    assert_eq!(parsed.retrieval.top_k, original.retrieval.top_k);
    assert_eq!(parsed.scoring, original.scoring);
}

#[test]
fn openai_provider_and_keys_come_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let config = CovenantConfig::load_with_env(
        dir.path(),
        env(&[
            ("COVENANT_COMPLETION_PROVIDER", "openai"),
            ("COVENANT_COMPLETION_API_KEY", "sk-completion"),
            ("COVENANT_EMBEDDING_PROVIDER", "OpenAI"),
            ("OPENAI_API_KEY", "sk-shared"),
        ]),
    )
    .unwrap();
    assert_eq!(config.completion.provider, CompletionProviderKind::OpenAi);
    assert_eq!(config.completion.api_key.as_deref(), Some("sk-completion"));
    assert_eq!(config.embedding.provider, EmbeddingProviderKind::OpenAi);
    assert_eq!(config.embedding.api_key.as_deref(), Some("sk-shared"));
}

#[test]
fn api_keys_are_never_written_back_to_toml() {
    let mut config = CovenantConfig::from_toml("[completion]\nprovider = \"openai\"\n").unwrap();
    assert_eq!(config.completion.provider, CompletionProviderKind::OpenAi);
    config.completion.api_key = Some("sk-secret".to_string());
    let text = toml::to_string(&config).unwrap();
    assert!(!text.contains("sk-secret"));
    assert!(text.contains("provider = \"openai\""));
}
