//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand};

/// Manage floating IPs: allocate, release, associate with containers, list
#[derive(Parser, Debug)]
#[command(name = "fip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// API endpoint, e.g. tcp://127.0.0.1:2375 (overrides config and FIP_HOST)
    #[arg(short = 'H', long, global = true)]
    pub host: Option<String>,

    /// Debug logging, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Allocate one or more floating IPs
    Allocate {
        /// Number of floating IPs to allocate
        count: String,
    },

    /// Release one or more floating IPs
    Release {
        /// Floating IPs to release
        #[arg(value_name = "FIP", required = true, num_args = 1..)]
        fips: Vec<String>,
    },

    /// Associate a floating IP with a container
    Associate {
        /// Floating IP
        #[arg(value_name = "FIP")]
        fip: String,
        /// Container name or ID
        container: String,
    },

    /// Deassociate the floating IP from a container
    Deassociate {
        /// Container name or ID
        container: String,
    },

    /// List floating IPs
    Ls {
        /// Filter output based on conditions provided (name=value)
        #[arg(short, long = "filter", value_name = "FILTER")]
        filters: Vec<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective config
    Show,

    /// Show global config path
    Path,

    /// Create global config template
    Init,
}
