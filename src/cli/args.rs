//! CLI argument definitions using clap
//!
//! Commands:
//! - leadhub login --email <email> --password <password> [--company-id <id>]
//! - leadhub register --company-name <name> --email <email> --password <password>
//! - leadhub logout | whoami | open <path>
//! - leadhub leads list|add|set-status|delete
//! - leadhub admin list|delete

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::leads::LeadStatus;

/// leadhub - command-line client for the multi-tenant lead service
#[derive(Parser, Debug)]
#[command(name = "leadhub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./leadhub.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in as a company user or as the administrator
    Login {
        /// Company ID; defaults to the last one used. Not needed for the administrator.
        #[arg(long)]
        company_id: Option<String>,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Register a new company and log in as its administrator
    Register {
        #[arg(long)]
        company_name: String,

        /// Company administrator email
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// End the current session
    Logout,

    /// Show the current identity and navigation links
    Whoami,

    /// Resolve a route path against the current session
    Open {
        /// Route path, e.g. /dashboard
        path: String,
    },

    /// Manage the current company's leads
    Leads {
        #[command(subcommand)]
        action: LeadsAction,
    },

    /// Cross-company administration
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

/// Search and status filter shared by the list commands
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Substring to search for
    #[arg(long, default_value = "")]
    pub search: String,

    /// Only leads with this status
    #[arg(long)]
    pub status: Option<LeadStatus>,
}

#[derive(Subcommand, Debug)]
pub enum LeadsAction {
    /// List leads
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Create a lead
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone1: String,

        #[arg(long, default_value = "")]
        phone2: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        message: String,

        #[arg(long, default_value = "")]
        source: String,

        #[arg(long, default_value_t = LeadStatus::New)]
        status: LeadStatus,
    },

    /// Move a lead to another status
    SetStatus { id: String, status: LeadStatus },

    /// Delete a lead
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminAction {
    /// List leads across all companies
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Delete any company's lead
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
