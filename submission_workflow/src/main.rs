use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use submission_workflow::config::{self, SubmissionClientConfig};
use submission_workflow::modules::{
    error::WorkflowError,
    local_store::LocalStore,
    record::{buyer::BuyerOnboarding, project::ProjectApplication, WizardRecord},
    submission_client::SubmissionClient,
    submission_log::SubmissionLog,
    wizard::Wizard,
};

#[derive(Parser)]
#[command(name = "submission_workflow")]
#[command(about = "Onboarding form wizard with a mock submission backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "submission_workflow/Config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Form {
    /// Carbon project application
    Project,
    /// Credit buyer onboarding
    Buyer,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk a JSON draft through its wizard and submit it
    Submit {
        #[arg(long, value_enum)]
        form: Form,
        draft: PathBuf,
    },
    /// Show a stored submission
    Find {
        id: String,
    },
    /// List all stored submissions
    List,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Load the configuration for the client and the log
    let config = match config::load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Error loading configuration {}: {}", cli.config, e);
            std::process::exit(2);
        }
    };

    let store = match LocalStore::open(&config.submission_log.path) {
        Ok(store) => store,
        Err(e) => {
            error!("Error opening local store: {}", e);
            std::process::exit(2);
        }
    };

    // One log shared by everything that reads or writes submissions
    let log = Arc::new(SubmissionLog::new(store, config.submission_log.storage_key.clone()));
    let client = SubmissionClient::new(log.clone(), config.submission_client.clone());

    let outcome = match cli.command {
        Commands::Submit { form: Form::Project, draft } => {
            run_wizard::<ProjectApplication>(client, &draft, &config.submission_client).await
        }
        Commands::Submit { form: Form::Buyer, draft } => {
            run_wizard::<BuyerOnboarding>(client, &draft, &config.submission_client).await
        }
        Commands::Find { id } => find(&log, &id).await,
        Commands::List => list(&log).await,
    };

    if let Err(e) = outcome {
        error!("{}", e);
        std::process::exit(1);
    }
}

// Replay a draft through the wizard step by step. The client itself never
// retries, transient failures are retried here as configured.
async fn run_wizard<R: WizardRecord>(
    client: SubmissionClient,
    draft: &Path,
    config: &SubmissionClientConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(draft)?;
    let record: R = serde_json::from_str(&content)
        .map_err(|e| WorkflowError::JsonDeserializationError(e.to_string()))?;

    let mut wizard = Wizard::with_record(client, record);
    info!("Step 1/{}: {}", R::step_count(), wizard.step_name());

    let result = wizard
        .run_to_submission(config.max_retry_attempts, Duration::from_secs(config.retry_interval))
        .await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn find(log: &SubmissionLog, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let entry = log.find_by_id(id).await?;
    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(())
}

async fn list(log: &SubmissionLog) -> Result<(), Box<dyn std::error::Error>> {
    let entries = log.list().await?;
    if entries.is_empty() {
        println!("No submissions stored");
    }
    for entry in entries {
        println!(
            "{}  {:?}  {}",
            entry.result.id(),
            entry.result.status(),
            entry.result.submitted_at()
        );
    }
    Ok(())
}
