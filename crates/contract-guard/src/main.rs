use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use contract_guard::agents::AgentFactory;
use contract_guard::config::{self, GuardConfig};
use contract_guard::extract::source_for_path;
use contract_guard::fixture::write_sample_contract;
use contract_guard::pipeline::ReviewPipeline;
use contract_guard::prompts;
use contract_guard::sink::FileSink;
use tracing::{debug, info, warn};

const DEFAULT_CONTRACT: &str = "vendor_contract.pdf";

/// Review a vendor contract against the house playbook.
#[derive(Debug, Parser)]
#[command(name = "contract-guard", version, about)]
struct Cli {
    /// Contract to review (PDF, or .txt/.md text).
    #[arg(default_value = DEFAULT_CONTRACT)]
    contract: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = match GuardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("ERROR: {e}");
            std::process::exit(1);
        }
    };

    info!(
        model = %config.model,
        presenter = %config.presenter,
        prompt_version = prompts::PROMPT_VERSION,
        "launching contract guard"
    );

    if !config::check_endpoint(&config).await {
        warn!(url = %config.base_url, "Gemini endpoint did not answer the model listing");
    }

    if !cli.contract.exists() && cli.contract == PathBuf::from(DEFAULT_CONTRACT) {
        write_sample_contract(&cli.contract)?;
    }

    let factory = AgentFactory::new(&config)?;
    let mut pipeline = ReviewPipeline::new(
        source_for_path(&cli.contract),
        factory.build_review_agents(prompts::POLICY_PLAYBOOK),
        Box::new(FileSink::new(config.output_path.clone())),
        config.presenter.build(),
    );

    // Violations are a normal outcome; the exit code stays 0 either way.
    let result = pipeline.run(&cli.contract).await;
    info!(violation = result.violation_detected, "review finished");
    debug!(result = %serde_json::to_string(&result)?, "review result");

    Ok(())
}
