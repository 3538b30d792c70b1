//! `castvet` binary: evaluate synthetic influencer profiles from the
//! command line. All output is pretty-printed JSON on stdout.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use castvet_core::profile::NICHES;
use castvet_core::{
    CampaignGenerator, ContentType, EvaluationContext, ProfileGenerator,
};
use castvet_runtime::{Orchestrator, SimulatorBackend};

#[derive(Parser)]
#[command(name = "castvet", version, about = "Deterministic influencer campaign evaluation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the profile for one influencer identifier.
    Profile {
        id: String,
        /// Content context: all, short or long. Unknown values mean all.
        #[arg(long, default_value = "all")]
        content_type: String,
    },
    /// Generate a fresh randomized campaign brief.
    Campaign,
    /// Curated top performers per niche (all niches when none given).
    Top { niches: Vec<String> },
    /// Run the full evaluation pipeline for one influencer.
    Evaluate {
        id: String,
        #[arg(long, default_value = "all")]
        content_type: String,
    },
    /// Evaluate, then answer a question about the result.
    Chat {
        id: String,
        query: String,
        #[arg(long, default_value = "all")]
        content_type: String,
    },
}

fn content_type(raw: &str) -> ContentType {
    // Parsing is total; the Err type is Infallible.
    ContentType::from_str(raw).unwrap_or_default()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn evaluation_context(id: &str, content_type: ContentType) -> EvaluationContext {
    EvaluationContext {
        influencer: ProfileGenerator::new().generate(id, content_type),
        campaign: CampaignGenerator::new().generate_brief(),
        content_type,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let orchestrator = Orchestrator::new(Arc::new(SimulatorBackend::new()));

    match cli.command {
        Command::Profile { id, content_type: ct } => {
            let profile = ProfileGenerator::new().generate(&id, content_type(&ct));
            print_json(&profile)?;
        }
        Command::Campaign => {
            let brief = CampaignGenerator::new().generate_brief();
            print_json(&brief)?;
        }
        Command::Top { niches } => {
            let niches = if niches.is_empty() {
                NICHES.iter().map(|n| n.to_string()).collect()
            } else {
                niches
            };
            let set = CampaignGenerator::new().curated_set(&niches);
            print_json(&set)?;
        }
        Command::Evaluate { id, content_type: ct } => {
            let ctx = evaluation_context(&id, content_type(&ct));
            let result = orchestrator.evaluate_cached(&ctx).await?;
            print_json(&*result)?;
        }
        Command::Chat { id, query, content_type: ct } => {
            let ct = content_type(&ct);
            let ctx = evaluation_context(&id, ct);
            orchestrator.evaluate_cached(&ctx).await?;
            let answer = orchestrator.chat(&id, ct, &query).await?;
            // The answer is already a serialized card.
            println!("{answer}");
        }
    }

    Ok(())
}
