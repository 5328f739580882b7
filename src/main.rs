use nutri_chef_agent::commands::{FoodSession, SessionOutcome, TerminalConsole};
use nutri_chef_agent::config::ProviderConfig;
use nutri_chef_agent::food::api::{UsdaClient, YoutubeClient};
use nutri_chef_agent::food::config::timeout_from_secs;
use nutri_chef_agent::food::{FoodConfig, RecipeAdvisor};
use nutri_chef_agent::providers::deepseek::deepseek::DeepSeekProvider;
use nutri_chef_agent::providers::openai::openai::OpenAIProvider;
use nutri_chef_agent::providers::traits::CompletionProvider;
use std::env;
use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use log::{info, warn};
use thiserror::Error;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Find foods and recipes for a nutrient you are low on", long_about = None)]
struct Args {
    /// Completion provider: openai or deepseek
    #[arg(long, default_value = "openai")]
    provider: String,

    /// API key for the completion provider (defaults to <PROVIDER>_API_KEY)
    #[arg(short, long)]
    api_key: Option<String>,

    #[arg(long)]
    model: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Nutrient to look up, skipping the first prompt
    #[arg(long)]
    nutrient: Option<String>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Provider error: {0}")]
    ProviderError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

async fn build_provider(args: &Args, config: ProviderConfig) -> Result<Box<dyn CompletionProvider + Send + Sync>, AppError> {
    let provider_name = args.provider.to_lowercase();
    let key_var = format!("{}_API_KEY", provider_name.to_uppercase());
    let api_key = match &args.api_key {
        Some(key) => key.clone(),
        None => env::var(&key_var)
            .map_err(|_| AppError::ConfigError(format!("API key must be provided via --api-key or {}", key_var)))?,
    };

    let provider: Box<dyn CompletionProvider + Send + Sync> = match provider_name.as_str() {
        "openai" => Box::new(OpenAIProvider::new(api_key, config).await
            .map_err(|e| AppError::ProviderError(format!("Failed to initialize OpenAI provider: {}", e)))?),
        "deepseek" => Box::new(DeepSeekProvider::new(api_key, config).await
            .map_err(|e| AppError::ProviderError(format!("Failed to initialize DeepSeek provider: {}", e)))?),
        _ => return Err(AppError::ConfigError(format!("Unknown provider: {}. Available providers: openai, deepseek", provider_name))),
    };

    if let Ok(model) = provider.get_model_info().await {
        info!("Using {} model {}", provider_name, model);
    }
    Ok(provider)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if args.timeout == Some(0) {
        warn!("Ignoring --timeout 0; falling back to the configured timeout");
    }
    let timeout = args.timeout.and_then(timeout_from_secs);

    let mut food_config = FoodConfig::from_env()?;
    if let Some(timeout) = timeout {
        food_config.request_timeout = timeout;
    }
    let provider_config = ProviderConfig::from_env(&args.provider.to_lowercase())
        .with_model(args.model.clone())
        .with_timeout(timeout);
    let request_timeout = provider_config.request_timeout;

    let provider = build_provider(&args, provider_config).await?;

    let session = FoodSession::new(
        Box::new(UsdaClient::new(&food_config)),
        RecipeAdvisor::new(provider, request_timeout),
        Box::new(YoutubeClient::new(&food_config)),
        food_config.request_timeout,
    );

    println!("{}", "🥗 Nutrient Recipe Finder".bright_green().bold());
    let mut console = TerminalConsole::new()?;
    match session.run(&mut console, args.nutrient.clone()).await {
        SessionOutcome::Completed { recipe } => info!("Session finished with '{}'", recipe),
        outcome => info!("Session ended early: {:?}", outcome),
    }

    Ok(())
}
