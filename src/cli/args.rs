use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

/// Search and browse Kingsoft Docs from a launcher query box
#[derive(Parser)]
#[command(name = "kdocs")]
#[command(version, propagate_version = true)]
#[command(about = "Search and browse Kingsoft Docs from a launcher query box")]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    pub output: OutputFormat,

    /// Log cache and network activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Write shell completions to stdout
    pub fn print_completions(shell: Shell) {
        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Launcher script-filter JSON
    #[default]
    Json,
    /// Colored, human-readable output
    Pretty,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Answer a launcher query: recent, search, or browse by path
    #[command(alias = "q")]
    Query(QueryArgs),

    /// Store the session id (wps_sid cookie)
    Login(LoginArgs),

    /// Remove the session id and clear the cache
    Logout,

    /// Inspect or clear the listing cache
    Cache(CacheArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the query command
///
/// The launcher passes navigation state between invocations as environment
/// variables, so every option also reads its variable.
#[derive(Args, Debug, Default)]
pub struct QueryArgs {
    /// Query text: empty for recent documents, `/path` to browse, else a keyword
    #[arg(default_value = "")]
    pub text: String,

    /// Group id of the folder being browsed
    #[arg(long = "groupid", env = "groupid")]
    pub group_id: Option<String>,

    /// Id of the folder being browsed
    #[arg(long = "fileid", env = "fileid")]
    pub file_id: Option<String>,

    /// Id of the folder enclosing the one being browsed
    #[arg(long = "parent-fileid", env = "parentFileid")]
    pub parent_file_id: Option<String>,

    /// Local directory the WPS desktop client syncs documents into
    #[arg(long = "cache-dir", env = "wps_cache_dir", default_value = "")]
    pub cache_dir: String,
}

/// Arguments for the login command
#[derive(Args)]
pub struct LoginArgs {
    /// Session id; prompted for when omitted
    pub sid: Option<String>,
}

/// Arguments for the cache command
#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

/// Cache subcommands
#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show cache entry count, size and age
    Status,
    /// Remove every cached listing
    Clear,
}

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., cache.search_mins)
        key: String,
        /// Value to set
        value: String,
    },
    /// Show configuration file path
    Path,
}

/// Arguments for the completions command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
