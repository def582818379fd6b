use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use repo_chat::config::Config;
use repo_chat::llm::LlmClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    // Logs go to stderr so the conversation on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = Config::from_env();
    tracing::info!("LLM provider: {} ({})", config.llm.provider, config.llm.base_url);
    if config.llm.api_key.is_none() && config.llm.provider == "openai" {
        tracing::warn!("No API key set (OPENAI_API_KEY or LLM_API_KEY)");
    }

    let llm = LlmClient::new(config.llm.clone())?;

    repo_chat::app::run(
        &config,
        &llm,
        &llm,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}
