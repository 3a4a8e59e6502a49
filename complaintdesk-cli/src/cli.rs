//! CLI argument parsing definitions

use clap::{Parser, Subcommand};
use complaintdesk_api_types::{ComplaintPriority, ComplaintStatus, UserRole};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every role with its dashboard and region access
    Roles,

    /// Show the full permission row for a role
    Permissions {
        /// Role name (admin, manager, foreman, call-attendant, technician)
        #[arg(long, value_name = "ROLE")]
        role: UserRole,
    },

    /// Answer a single permission question
    Check {
        #[arg(long, value_name = "ROLE")]
        role: String,

        /// complaints, users, reports or settings
        #[arg(long, value_name = "RESOURCE")]
        resource: String,

        /// create, read, update or delete
        #[arg(long, value_name = "ACTION")]
        action: String,
    },

    /// Show the regions a role may see
    Regions {
        #[arg(long, value_name = "ROLE")]
        role: String,
    },

    /// Check whether one role may give a staff member another role
    Grant {
        /// Role of the staff member making the change
        #[arg(long, value_name = "ROLE")]
        role: UserRole,

        /// Role being handed out
        #[arg(long, value_name = "ROLE")]
        target: UserRole,
    },

    /// List the complaints a role may see
    Complaints {
        #[arg(long, value_name = "ROLE")]
        role: UserRole,

        /// Read rows from a JSON file instead of the backend
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Case-insensitive match on title, customer or id
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,

        #[arg(long, value_name = "STATUS")]
        status: Option<ComplaintStatus>,

        #[arg(long, value_name = "PRIORITY")]
        priority: Option<ComplaintPriority>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the staff a role may see
    Users {
        #[arg(long, value_name = "ROLE")]
        role: UserRole,

        /// Read rows from a JSON file instead of the backend
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Complaint statistics over the regions a role may see
    Analytics {
        #[arg(long, value_name = "ROLE")]
        role: UserRole,

        /// Read rows from a JSON file instead of the backend
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(long, value_name = "PATH")]
        config_file: PathBuf,
    },

    /// Generate a sample configuration file
    Generate {
        /// Output file path
        #[arg(long, value_name = "PATH")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,

        /// Also write the built-in role table next to the configuration
        #[arg(long, value_name = "PATH")]
        roles_output: Option<PathBuf>,
    },

    /// Show the configuration in use
    Show {
        /// Output format: yaml, json
        #[arg(long, value_name = "FORMAT", default_value = "yaml")]
        format: String,
    },
}
