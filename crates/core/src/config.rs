//! Configuration management for the kbbot assistant.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Config files (.kbbot/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! Configuration is read once at startup and never re-read per request.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Accepted range for `max_tokens`.
pub const MAX_TOKENS_RANGE: RangeInclusive<u32> = 100..=2000;

/// Accepted range for `temperature` and `top_p`.
pub const UNIT_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Environment variable holding the optional Bedrock bearer credential.
pub const DEFAULT_API_KEY_ENV: &str = "AWS_BEARER_TOKEN_BEDROCK";

/// Prompt template used for retrieval-augmented requests unless overridden.
pub const DEFAULT_PROMPT_ID: &str = "retrieval.answer";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .kbbot/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// AWS region hosting the model and knowledge base
    pub region: String,

    /// Knowledge base used for retrieval-augmented answers
    pub knowledge_base_id: Option<String>,

    /// Data source synced by the ingestion trigger
    pub data_source_id: Option<String>,

    /// Default model identifier
    pub model: String,

    /// Models the user may select
    pub allowed_models: Vec<String>,

    /// Default generation parameters
    pub generation: GenerationDefaults,

    /// Endpoint overrides (mostly for testing against a local stub)
    pub endpoints: EndpointOverrides,

    /// Environment variable the bearer credential is read from
    pub api_key_env: String,

    /// Bearer credential passed through to the provider
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Prompt template id for retrieval-augmented requests
    pub prompt_id: String,

    /// Persist archived conversations to .kbbot/history.jsonl
    pub history_enabled: bool,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Optional JSON log file
    pub log_file: Option<PathBuf>,
}

/// Default generation sub-parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationDefaults {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            max_tokens: 2000,
            temperature: 0.2,
            top_p: 0.2,
        }
    }
}

/// Optional endpoint overrides; unset entries derive from the region.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointOverrides {
    pub runtime: Option<String>,
    pub agent_runtime: Option<String>,
    pub agent: Option<String>,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    workspace: Option<WorkspaceSection>,
    bedrock: Option<BedrockSection>,
    knowledge_base: Option<KnowledgeBaseSection>,
    models: Option<ModelsSection>,
    generation: Option<GenerationSection>,
    prompt: Option<PromptSection>,
    history: Option<HistorySection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceSection {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BedrockSection {
    region: Option<String>,
    runtime_endpoint: Option<String>,
    agent_runtime_endpoint: Option<String>,
    agent_endpoint: Option<String>,
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KnowledgeBaseSection {
    id: Option<String>,
    data_source_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelsSection {
    default: Option<String>,
    allowed: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationSection {
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    top_p: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PromptSection {
    id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HistorySection {
    enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
    file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            region: "us-east-1".to_string(),
            knowledge_base_id: None,
            data_source_id: None,
            model: "amazon.nova-pro-v1:0".to_string(),
            allowed_models: vec![
                "amazon.nova-pro-v1:0".to_string(),
                "amazon.nova-lite-v1:0".to_string(),
            ],
            generation: GenerationDefaults::default(),
            endpoints: EndpointOverrides::default(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            prompt_id: DEFAULT_PROMPT_ID.to_string(),
            history_enabled: true,
            log_level: None,
            verbose: false,
            no_color: false,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file, environment variables and defaults.
    ///
    /// Environment variables:
    /// - `KBBOT_WORKSPACE`: Override workspace path
    /// - `KBBOT_CONFIG`: Path to config file
    /// - `KNOWLEDGE_BASE_ID`: Knowledge base for retrieval-augmented answers
    /// - `DATA_SOURCE_ID`: Data source synced by `kbbot sync`
    /// - `KBBOT_REGION` / `AWS_REGION`: Region
    /// - `KBBOT_MODEL`: Default model identifier
    /// - `AWS_BEARER_TOKEN_BEDROCK`: Bearer credential (name configurable)
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    /// - `KBBOT_LOG_FILE`: JSON log file
    ///
    /// # Example
    /// ```no_run
    /// use kbbot_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Region: {}", config.region);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_with_env(|key| std::env::var(key).ok())
    }

    /// Load configuration from an explicit workspace and/or config file.
    ///
    /// Paths given here take precedence over `KBBOT_WORKSPACE` and
    /// `KBBOT_CONFIG` and decide which YAML file is read.
    pub fn load_with_paths(
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
    ) -> AppResult<Self> {
        Self::load_from(workspace, config_file, |key| std::env::var(key).ok())
    }

    /// Load configuration using a custom environment lookup.
    pub fn load_with_env<F>(env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load_from(None, None, env)
    }

    /// Load configuration from explicit paths and a custom environment lookup.
    pub fn load_from<F>(
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        env: F,
    ) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(workspace) = workspace.or_else(|| env("KBBOT_WORKSPACE").map(PathBuf::from)) {
            config.workspace = workspace;
        }

        config.config_file = config_file.or_else(|| env("KBBOT_CONFIG").map(PathBuf::from));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.kbbot_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Some(kb) = env("KNOWLEDGE_BASE_ID") {
            config.knowledge_base_id = non_empty(kb);
        }

        if let Some(ds) = env("DATA_SOURCE_ID") {
            config.data_source_id = non_empty(ds);
        }

        if let Some(region) = env("KBBOT_REGION").or_else(|| env("AWS_REGION")) {
            config.region = region;
        }

        if let Some(model) = env("KBBOT_MODEL") {
            config.model = model;
        }

        config.api_key = env(&config.api_key_env);

        if let Some(level) = env("RUST_LOG") {
            config.log_level = Some(level);
        }

        if env("NO_COLOR").is_some() {
            config.no_color = true;
        }

        if let Some(file) = env("KBBOT_LOG_FILE") {
            config.log_file = Some(PathBuf::from(file));
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(path) = config_file.workspace.and_then(|ws| ws.path) {
            result.workspace = PathBuf::from(path);
        }

        if let Some(bedrock) = config_file.bedrock {
            if let Some(region) = bedrock.region {
                result.region = region;
            }
            result.endpoints.runtime = bedrock.runtime_endpoint.or(result.endpoints.runtime);
            result.endpoints.agent_runtime = bedrock
                .agent_runtime_endpoint
                .or(result.endpoints.agent_runtime);
            result.endpoints.agent = bedrock.agent_endpoint.or(result.endpoints.agent);
            if let Some(api_key_env) = bedrock.api_key_env {
                result.api_key_env = api_key_env;
            }
        }

        if let Some(kb) = config_file.knowledge_base {
            if let Some(id) = kb.id {
                result.knowledge_base_id = non_empty(id);
            }
            if let Some(ds) = kb.data_source_id {
                result.data_source_id = non_empty(ds);
            }
        }

        if let Some(models) = config_file.models {
            if let Some(default) = models.default {
                result.model = default;
            }
            if let Some(allowed) = models.allowed {
                result.allowed_models = allowed;
            }
        }

        if let Some(generation) = config_file.generation {
            if let Some(max_tokens) = generation.max_tokens {
                result.generation.max_tokens = max_tokens;
            }
            if let Some(temperature) = generation.temperature {
                result.generation.temperature = temperature;
            }
            if let Some(top_p) = generation.top_p {
                result.generation.top_p = top_p;
            }
        }

        if let Some(id) = config_file.prompt.and_then(|p| p.id) {
            result.prompt_id = id;
        }

        if let Some(enabled) = config_file.history.and_then(|h| h.enabled) {
            result.history_enabled = enabled;
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
            if let Some(file) = logging.file {
                result.log_file = Some(PathBuf::from(file));
            }
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// `workspace` and `config_file` are only recorded here; pass them to
    /// [`AppConfig::load_with_paths`] so the matching YAML file is read.
    ///
    /// Command-line flags take precedence over environment variables and
    /// the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        region: Option<String>,
        model: Option<String>,
        knowledge_base_id: Option<String>,
        log_level: Option<String>,
        log_file: Option<PathBuf>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(region) = region {
            self.region = region;
        }

        if let Some(model) = model {
            self.model = model;
        }

        // An explicit empty id disables retrieval
        if let Some(kb) = knowledge_base_id {
            self.knowledge_base_id = non_empty(kb);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if let Some(log_file) = log_file {
            self.log_file = Some(log_file);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .kbbot directory.
    pub fn kbbot_dir(&self) -> PathBuf {
        self.workspace.join(".kbbot")
    }

    /// Ensure the .kbbot directory exists.
    pub fn ensure_kbbot_dir(&self) -> AppResult<()> {
        let kbbot_dir = self.kbbot_dir();
        if !kbbot_dir.exists() {
            std::fs::create_dir_all(&kbbot_dir).map_err(|e| {
                AppError::Config(format!("Failed to create .kbbot directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Path of the archived-conversation log.
    pub fn history_path(&self) -> PathBuf {
        self.kbbot_dir().join("history.jsonl")
    }

    /// Endpoint for direct model invocation.
    pub fn runtime_endpoint(&self) -> String {
        self.endpoints
            .runtime
            .clone()
            .unwrap_or_else(|| format!("https://bedrock-runtime.{}.amazonaws.com", self.region))
    }

    /// Endpoint for retrieval-augmented generation.
    pub fn agent_runtime_endpoint(&self) -> String {
        self.endpoints.agent_runtime.clone().unwrap_or_else(|| {
            format!("https://bedrock-agent-runtime.{}.amazonaws.com", self.region)
        })
    }

    /// Endpoint for knowledge base management (ingestion jobs).
    pub fn agent_endpoint(&self) -> String {
        self.endpoints
            .agent
            .clone()
            .unwrap_or_else(|| format!("https://bedrock-agent.{}.amazonaws.com", self.region))
    }

    /// Whether a model id is on the allow-list.
    pub fn is_model_allowed(&self, model: &str) -> bool {
        self.allowed_models.iter().any(|m| m == model)
    }

    /// Validate the loaded configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.region.trim().is_empty() {
            return Err(AppError::Config("Region cannot be empty".to_string()));
        }

        if self.allowed_models.is_empty() {
            return Err(AppError::Config(
                "Model allow-list cannot be empty".to_string(),
            ));
        }

        if !self.is_model_allowed(&self.model) {
            return Err(AppError::Config(format!(
                "Model {} is not in the allow-list. Allowed: {}",
                self.model,
                self.allowed_models.join(", ")
            )));
        }

        let gen = &self.generation;
        if !MAX_TOKENS_RANGE.contains(&gen.max_tokens) {
            return Err(AppError::Config(format!(
                "maxTokens must be between {} and {}, got {}",
                MAX_TOKENS_RANGE.start(),
                MAX_TOKENS_RANGE.end(),
                gen.max_tokens
            )));
        }

        if !UNIT_RANGE.contains(&gen.temperature) {
            return Err(AppError::Config(format!(
                "temperature must be between 0.0 and 1.0, got {}",
                gen.temperature
            )));
        }

        if !UNIT_RANGE.contains(&gen.top_p) {
            return Err(AppError::Config(format!(
                "topP must be between 0.0 and 1.0, got {}",
                gen.top_p
            )));
        }

        Ok(())
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(
        pairs: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.model, "amazon.nova-pro-v1:0");
        assert_eq!(config.allowed_models.len(), 2);
        assert_eq!(config.generation, GenerationDefaults::default());
        assert!(config.knowledge_base_id.is_none());
        assert!(config.history_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_env() {
        let temp = TempDir::new().unwrap();
        let ws = temp.path().to_string_lossy().to_string();
        let config = AppConfig::load_with_env(env_from(&[
            ("KBBOT_WORKSPACE", &ws),
            ("KNOWLEDGE_BASE_ID", "KB123"),
            ("DATA_SOURCE_ID", "DS456"),
            ("AWS_REGION", "eu-west-1"),
            ("AWS_BEARER_TOKEN_BEDROCK", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.knowledge_base_id.as_deref(), Some("KB123"));
        assert_eq!(config.data_source_id.as_deref(), Some("DS456"));
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(
            config.runtime_endpoint(),
            "https://bedrock-runtime.eu-west-1.amazonaws.com"
        );
    }

    #[test]
    fn test_empty_knowledge_base_env_is_absent() {
        let temp = TempDir::new().unwrap();
        let ws = temp.path().to_string_lossy().to_string();
        let config = AppConfig::load_with_env(env_from(&[
            ("KBBOT_WORKSPACE", &ws),
            ("KNOWLEDGE_BASE_ID", "  "),
        ]))
        .unwrap();
        assert!(config.knowledge_base_id.is_none());
    }

    #[test]
    fn test_missing_workspace() {
        let result = AppConfig::load_with_env(env_from(&[(
            "KBBOT_WORKSPACE",
            "/definitely/not/a/real/kbbot/workspace",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_yaml() {
        let temp = TempDir::new().unwrap();
        let kbbot_dir = temp.path().join(".kbbot");
        std::fs::create_dir_all(&kbbot_dir).unwrap();
        std::fs::write(
            kbbot_dir.join("config.yaml"),
            r#"
bedrock:
  region: us-west-2
  agentRuntimeEndpoint: http://localhost:9000
knowledgeBase:
  id: KBYAML
models:
  default: amazon.nova-lite-v1:0
  allowed:
    - amazon.nova-lite-v1:0
generation:
  maxTokens: 500
  temperature: 0.7
history:
  enabled: false
logging:
  level: debug
  color: false
"#,
        )
        .unwrap();

        let ws = temp.path().to_string_lossy().to_string();
        let config = AppConfig::load_with_env(env_from(&[("KBBOT_WORKSPACE", &ws)])).unwrap();

        assert_eq!(config.region, "us-west-2");
        assert_eq!(config.agent_runtime_endpoint(), "http://localhost:9000");
        assert_eq!(
            config.agent_endpoint(),
            "https://bedrock-agent.us-west-2.amazonaws.com"
        );
        assert_eq!(config.knowledge_base_id.as_deref(), Some("KBYAML"));
        assert_eq!(config.model, "amazon.nova-lite-v1:0");
        assert_eq!(config.generation.max_tokens, 500);
        assert_eq!(config.generation.temperature, 0.7);
        assert_eq!(config.generation.top_p, 0.2);
        assert!(!config.history_enabled);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.no_color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_yaml() {
        let temp = TempDir::new().unwrap();
        let kbbot_dir = temp.path().join(".kbbot");
        std::fs::create_dir_all(&kbbot_dir).unwrap();
        std::fs::write(kbbot_dir.join("config.yaml"), "knowledgeBase:\n  id: KBYAML\n").unwrap();

        let ws = temp.path().to_string_lossy().to_string();
        let config = AppConfig::load_with_env(env_from(&[
            ("KBBOT_WORKSPACE", &ws),
            ("KNOWLEDGE_BASE_ID", "KBENV"),
        ]))
        .unwrap();
        assert_eq!(config.knowledge_base_id.as_deref(), Some("KBENV"));
    }

    #[test]
    fn test_explicit_missing_config_file() {
        let temp = TempDir::new().unwrap();
        let ws = temp.path().to_string_lossy().to_string();
        let missing = temp.path().join("nope.yaml").to_string_lossy().to_string();
        let result = AppConfig::load_with_env(env_from(&[
            ("KBBOT_WORKSPACE", &ws),
            ("KBBOT_CONFIG", &missing),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_config_file_is_read() {
        let temp = TempDir::new().unwrap();
        let cfg = temp.path().join("kb.yaml");
        std::fs::write(
            &cfg,
            "knowledgeBase:\n  id: KB_FROM_FILE\nbedrock:\n  region: eu-west-1\n",
        )
        .unwrap();

        let ws = temp.path().to_string_lossy().to_string();
        let config = AppConfig::load_from(
            None,
            Some(cfg.clone()),
            env_from(&[("KBBOT_WORKSPACE", &ws)]),
        )
        .unwrap()
        .with_overrides(None, Some(cfg.clone()), None, None, None, None, None, false, false);

        assert_eq!(config.config_file, Some(cfg));
        assert_eq!(config.knowledge_base_id.as_deref(), Some("KB_FROM_FILE"));
        assert_eq!(config.region, "eu-west-1");
    }

    #[test]
    fn test_explicit_workspace_config_is_read() {
        let env_ws = TempDir::new().unwrap();
        let cli_ws = TempDir::new().unwrap();
        let kbbot_dir = cli_ws.path().join(".kbbot");
        std::fs::create_dir_all(&kbbot_dir).unwrap();
        std::fs::write(kbbot_dir.join("config.yaml"), "knowledgeBase:\n  id: KBWS\n").unwrap();

        let env_path = env_ws.path().to_string_lossy().to_string();
        let config = AppConfig::load_from(
            Some(cli_ws.path().to_path_buf()),
            None,
            env_from(&[("KBBOT_WORKSPACE", &env_path)]),
        )
        .unwrap()
        .with_overrides(
            Some(cli_ws.path().to_path_buf()),
            None,
            None,
            None,
            None,
            None,
            None,
            false,
            false,
        );

        assert_eq!(config.workspace, cli_ws.path());
        assert_eq!(config.knowledge_base_id.as_deref(), Some("KBWS"));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default().with_overrides(
            None,
            None,
            Some("ap-southeast-2".to_string()),
            Some("amazon.nova-lite-v1:0".to_string()),
            Some("KBCLI".to_string()),
            None,
            None,
            true,
            false,
        );

        assert_eq!(config.region, "ap-southeast-2");
        assert_eq!(config.model, "amazon.nova-lite-v1:0");
        assert_eq!(config.knowledge_base_id.as_deref(), Some("KBCLI"));
        assert!(config.verbose);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_empty_knowledge_base_override_disables_retrieval() {
        let mut config = AppConfig::default();
        config.knowledge_base_id = Some("KB123".to_string());
        let config = config.with_overrides(
            None,
            None,
            None,
            None,
            Some(String::new()),
            None,
            None,
            false,
            false,
        );
        assert!(config.knowledge_base_id.is_none());
    }

    #[test]
    fn test_validate_model_not_allowed() {
        let mut config = AppConfig::default();
        config.model = "anthropic.claude-v2".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_generation_bounds() {
        let mut config = AppConfig::default();
        config.generation.max_tokens = 50;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.generation.temperature = 1.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.generation.top_p = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_history_path() {
        let config = AppConfig::default();
        assert!(config.history_path().ends_with(".kbbot/history.jsonl"));
    }
}
