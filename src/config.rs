use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the repository is cloned into
    pub clone_dir: PathBuf,
    /// Name of the in-process vector collection
    pub collection_name: String,
    /// Embed files under the `.git` metadata directory as well. On by
    /// default, so every file in the checkout is indexed.
    pub index_git_dir: bool,
    /// Git personal access token for cloning private repos
    pub git_token: Option<String>,
    /// LLM provider configuration
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai" or "ollama"
    pub provider: String,
    /// Base URL for the LLM API
    pub base_url: String,
    /// Model name for chat completions
    pub chat_model: String,
    /// Model name for embeddings
    pub embedding_model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
    /// Sampling temperature for chat completions
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clone_dir: PathBuf::from("repo"),
            collection_name: "repo_files".to_string(),
            index_git_dir: true,
            git_token: None,
            llm: LlmConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            base_url: "https://api.openai.com".to_string(),
            chat_model: "gpt-3.5-turbo".to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
            api_key: None,
            temperature: 0.0,
            timeout_secs: 120,
        }
    }
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("REPO_CHAT_CLONE_DIR") {
            config.clone_dir = PathBuf::from(dir);
        }
        if let Some(name) = lookup("REPO_CHAT_COLLECTION") {
            config.collection_name = name;
        }
        if let Some(val) = lookup("REPO_CHAT_INDEX_GIT_DIR") {
            if let Ok(v) = val.parse() {
                config.index_git_dir = v;
            }
        }
        if let Some(token) = lookup("REPO_CHAT_GIT_TOKEN") {
            config.git_token = Some(token);
        }

        if let Some(provider) = lookup("LLM_PROVIDER") {
            config.llm.provider = provider;
        }
        if let Some(url) = lookup("LLM_BASE_URL") {
            config.llm.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("LLM_CHAT_MODEL") {
            config.llm.chat_model = model;
        }
        if let Some(model) = lookup("LLM_EMBEDDING_MODEL") {
            config.llm.embedding_model = model;
        }
        // LLM_API_KEY takes precedence over the provider-specific variable
        if let Some(key) = lookup("LLM_API_KEY").or_else(|| lookup("OPENAI_API_KEY")) {
            config.llm.api_key = Some(key);
        }
        if let Some(val) = lookup("LLM_TEMPERATURE") {
            if let Ok(v) = val.parse() {
                config.llm.temperature = v;
            }
        }
        if let Some(val) = lookup("LLM_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.llm.timeout_secs = v;
            }
        }

        config
    }
}
