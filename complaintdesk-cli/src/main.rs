use anyhow::{bail, Context, Result};
use clap::Parser;
use complaintdesk_config::{ComplaintDeskConfig, ConfigLoader};
use complaintdesk_logging::{init_logging_from_config, init_simple_tracing};
use complaintdesk_rbac::{AccessEnforcer, RbacConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

mod analytics;
mod cli;
mod commands;
mod output;
mod queries;
mod source;

use cli::{Cli, Commands, ConfigCommands};
use commands::{access, records};
use queries::ComplaintQuery;
use source::RowSource;

/// Load configuration from the given file, or from the environment when none is given
fn load_config(config_path: Option<&PathBuf>) -> Result<ComplaintDeskConfig> {
    let loader = ConfigLoader::new();

    match config_path {
        Some(path) => {
            if !path.exists() {
                bail!("Configuration file not found: {:?}", path);
            }
            info!("Loading configuration from: {:?}", path);
            loader
                .from_file(path)
                .context(format!("Failed to load configuration from {:?}", path))
        }
        None => {
            debug!("No configuration file specified. Loading from environment or defaults.");
            loader
                .from_env()
                .context("Failed to load configuration from environment")
        }
    }
}

fn build_enforcer(config: &ComplaintDeskConfig) -> Result<AccessEnforcer> {
    let rbac = RbacConfig::from_access_config(&config.access).context("Failed to load role table")?;
    AccessEnforcer::from_config(&rbac).context("Invalid role table")
}

/// `Ok(false)` means the command ran but the answer was a denial
async fn run(cli: Cli, config: ComplaintDeskConfig) -> Result<bool> {
    let Some(command) = cli.command else {
        use clap::CommandFactory;
        let mut cmd = Cli::command();
        cmd.print_help().context("Failed to print help")?;
        println!();
        return Ok(true);
    };

    match command {
        Commands::Config { config_cmd } => {
            match config_cmd {
                ConfigCommands::Validate { config_file } => {
                    commands::config::validate_command(&config_file)?
                }
                ConfigCommands::Generate {
                    output,
                    force,
                    roles_output,
                } => {
                    commands::config::generate_command(&output, force, roles_output.as_ref())?
                }
                ConfigCommands::Show { format } => commands::config::show_command(&config, &format)?,
            }
            Ok(true)
        }
        Commands::Roles => {
            access::roles_command(&build_enforcer(&config)?)?;
            Ok(true)
        }
        Commands::Permissions { role } => {
            access::permissions_command(&build_enforcer(&config)?, role)?;
            Ok(true)
        }
        Commands::Check {
            role,
            resource,
            action,
        } => access::check_command(&build_enforcer(&config)?, &role, &resource, &action),
        Commands::Regions { role } => {
            access::regions_command(&build_enforcer(&config)?, &role)?;
            Ok(true)
        }
        Commands::Grant { role, target } => {
            access::grant_command(&build_enforcer(&config)?, role, target)
        }
        Commands::Complaints {
            role,
            input,
            search,
            status,
            priority,
            json,
        } => {
            let enforcer = build_enforcer(&config)?;
            let source = RowSource::new(input.as_ref(), &config)?;
            let query = ComplaintQuery {
                search,
                status,
                priority,
            };
            records::complaints_command(&enforcer, role, &source, &query, json).await?;
            Ok(true)
        }
        Commands::Users { role, input } => {
            let enforcer = build_enforcer(&config)?;
            let source = RowSource::new(input.as_ref(), &config)?;
            records::users_command(&enforcer, role, &source).await?;
            Ok(true)
        }
        Commands::Analytics { role, input } => {
            let enforcer = build_enforcer(&config)?;
            let source = RowSource::new(input.as_ref(), &config)?;
            records::analytics_command(&enforcer, role, &source).await?;
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            init_simple_tracing(cli.log_level.as_deref().unwrap_or("warn"))?;
            return Err(e);
        }
    };
    init_logging_from_config(&config.logging, cli.log_level.as_deref())?;

    info!("ComplaintDesk CLI starting");

    match run(cli, config).await? {
        true => Ok(ExitCode::SUCCESS),
        false => Ok(ExitCode::from(2)),
    }
}
