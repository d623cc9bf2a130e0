use std::sync::Arc;

use anyhow::anyhow;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use parameter_store::{
    ClientException, CreateParameterOptions, DataType, KeyType, Parameter, ParameterStoreService,
    ParameterType, ServiceType, TierType,
    configs::{Configs, ParameterStoreConfig},
};
use serde_json::json;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Parameter Store client", long_about = None)]
struct Cli {
    /// Without a subcommand, reads the default parameter
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read one parameter
    Get(ParameterArgs),
    /// Read several parameters of the same scope in one request
    GetMany(ScopeArgs),
    /// Create or overwrite a parameter
    Put(PutArgs),
    /// Delete a parameter
    Delete(TargetArgs),
}

#[derive(Args, Debug, Clone)]
struct ParameterArgs {
    /// Parameter name (last key segment)
    #[arg(long, short = 'n', default_value = "forms_data")]
    name: String,

    #[arg(long, short = 'k', default_value = "configuration")]
    key_type: KeyType,

    #[arg(long, short = 's', default_value = "loan_journey")]
    subtype: String,

    #[arg(long, short = 'S', default_value = "application")]
    service: ServiceType,
}

impl ParameterArgs {
    fn to_parameter(&self) -> Result<Parameter, ClientException> {
        Parameter::with_service(&self.name, self.key_type, &self.subtype, self.service)
    }
}

/// Like [`ParameterArgs`] but name and subtype must be given explicitly
#[derive(Args, Debug, Clone)]
struct TargetArgs {
    /// Parameter name (last key segment)
    #[arg(long, short = 'n')]
    name: String,

    #[arg(long, short = 'k', default_value = "configuration")]
    key_type: KeyType,

    #[arg(long, short = 's')]
    subtype: String,

    #[arg(long, short = 'S', default_value = "application")]
    service: ServiceType,
}

impl TargetArgs {
    fn to_parameter(&self) -> Result<Parameter, ClientException> {
        Parameter::with_service(&self.name, self.key_type, &self.subtype, self.service)
    }
}

impl Default for ParameterArgs {
    fn default() -> Self {
        Self {
            name: "forms_data".to_string(),
            key_type: KeyType::Configuration,
            subtype: "loan_journey".to_string(),
            service: ServiceType::Application,
        }
    }
}

#[derive(Args, Debug)]
struct ScopeArgs {
    /// Parameter names, repeat or separate with spaces
    #[arg(long = "name", short = 'n', required = true, num_args = 1..)]
    names: Vec<String>,

    #[arg(long, short = 'k', default_value = "configuration")]
    key_type: KeyType,

    #[arg(long, short = 's')]
    subtype: String,

    #[arg(long, short = 'S', default_value = "application")]
    service: ServiceType,
}

#[derive(Args, Debug)]
struct PutArgs {
    #[command(flatten)]
    parameter: TargetArgs,

    #[arg(long, short = 'v')]
    value: String,

    #[arg(long = "type", short = 't', default_value = "String")]
    parameter_type: ParameterType,

    #[arg(long, short = 'd', default_value = "")]
    description: String,

    /// Fail instead of replacing an existing value
    #[arg(long)]
    no_overwrite: bool,

    #[arg(long, default_value = "Standard")]
    tier: TierType,

    #[arg(long, default_value = "text")]
    data_type: DataType,
}

fn setup_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()) // reads RUST_LOG
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(command: Command) -> anyhow::Result<()> {
    let config = Arc::new(
        ParameterStoreConfig::load()
            .await
            .map_err(|e| anyhow!("Failed to load configs: {e}"))?,
    );
    debug!("CONFIGS: {:?}", &config);

    let service = ParameterStoreService::from_config(config)
        .await
        .map_err(|e| anyhow!("Failed to create parameter store: {e}"))?;

    let output = match command {
        Command::Get(args) => {
            let details = service.get(&args.to_parameter()?).await?;
            serde_json::to_value(details)?
        }
        Command::GetMany(args) => {
            let parameters = args
                .names
                .iter()
                .map(|name| Parameter::with_service(name, args.key_type, &args.subtype, args.service))
                .collect::<Result<Vec<_>, _>>()?;
            let result = service.get_many_detailed(&parameters).await?;
            serde_json::to_value(result)?
        }
        Command::Put(args) => {
            let parameter = args.parameter.to_parameter()?;
            let options = CreateParameterOptions {
                overwrite: !args.no_overwrite,
                tier: args.tier,
                data_type: args.data_type,
            };
            service
                .create(
                    &parameter,
                    &args.value,
                    args.parameter_type,
                    &args.description,
                    options,
                )
                .await?;
            json!({ "created": service.key_for(&parameter) })
        }
        Command::Delete(args) => {
            let deleted = service.delete(&args.to_parameter()?).await?;
            json!({ "deleted": deleted })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    setup_logging();

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Get(ParameterArgs::default()));

    if let Err(e) = run(command).await {
        error!("Parameter store command failed: {:#}", e);
        std::process::exit(1);
    }
}
