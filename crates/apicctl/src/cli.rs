//! Clap derive structures for the `apicctl` CLI.
//!
//! Defines the command tree, global flags, and shared types. Key-parameter
//! requirements per state are enforced here, before any network call:
//! `present`/`absent` demand the full tenant/match-rule/name hierarchy,
//! `query` accepts any subset and broadens scope accordingly.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// apicctl -- declarative CLI for Cisco ACI route-control objects
#[derive(Debug, Parser)]
#[command(
    name = "apicctl",
    version,
    about = "Manage ACI fabric configuration declaratively from the command line",
    long_about = "Declarative configuration of Cisco ACI managed objects.\n\n\
        Each invocation drives one object toward a desired state (present,\n\
        absent) or queries existing state, via the APIC object-tree REST API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "APIC_PROFILE", global = true)]
    pub profile: Option<String>,

    /// APIC base URL (overrides profile)
    #[arg(long, short = 'H', env = "APIC_HOST", global = true)]
    pub host: Option<String>,

    /// APIC username
    #[arg(long, short = 'u', env = "APIC_USERNAME", global = true)]
    pub username: Option<String>,

    /// APIC password
    #[arg(long, env = "APIC_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Path to a custom CA certificate (PEM)
    #[arg(long, env = "APIC_CA_CERT", global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "APIC_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "APIC_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long, env = "APIC_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one DN per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage match AS-path regex terms (rtctrlMatchAsPathRegexTerm)
    #[command(alias = "aspath-term")]
    MatchAsPathTerm(MatchTermArgs),

    /// Manage apicctl configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Match AS-path term ───────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MatchTermArgs {
    #[command(subcommand)]
    pub command: MatchTermCommand,
}

#[derive(Debug, Subcommand)]
pub enum MatchTermCommand {
    /// Ensure the term exists with the given attributes (idempotent)
    Present(TermPresentArgs),

    /// Ensure the term does not exist (idempotent)
    Absent(TermKeyArgs),

    /// List terms at the given scope (all keys optional)
    Query(TermQueryArgs),
}

#[derive(Debug, Args)]
pub struct TermPresentArgs {
    /// Name of the term
    pub name: String,

    /// The owning tenant
    #[arg(long, short = 't')]
    pub tenant: String,

    /// The owning match rule profile
    #[arg(long, short = 'm')]
    pub match_rule: String,

    /// Regular expression matched against the BGP AS-path
    #[arg(long, short = 'r')]
    pub regex: Option<String>,

    /// Description for the term
    #[arg(long, short = 'd', alias = "descr")]
    pub description: Option<String>,

    /// Alias for the object (nameAlias)
    #[arg(long)]
    pub name_alias: Option<String>,

    /// Annotation attached to the object
    #[arg(long, default_value = "orchestrator:apicctl")]
    pub annotation: String,

    /// Owner key attached to the object
    #[arg(long)]
    pub owner_key: Option<String>,

    /// Owner tag attached to the object
    #[arg(long)]
    pub owner_tag: Option<String>,
}

#[derive(Debug, Args)]
pub struct TermKeyArgs {
    /// Name of the term
    pub name: String,

    /// The owning tenant
    #[arg(long, short = 't')]
    pub tenant: String,

    /// The owning match rule profile
    #[arg(long, short = 'm')]
    pub match_rule: String,
}

#[derive(Debug, Args)]
pub struct TermQueryArgs {
    /// Name of the term (omit to list all at the given scope)
    pub name: Option<String>,

    /// Restrict to one tenant
    #[arg(long, short = 't')]
    pub tenant: Option<String>,

    /// Restrict to one match rule profile (requires --tenant to narrow scope)
    #[arg(long, short = 'm')]
    pub match_rule: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile from the given flags
    Init(ConfigInitArgs),

    /// Show the resolved configuration (passwords redacted)
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct ConfigInitArgs {
    /// Profile name to create or update
    #[arg(long, default_value = "default")]
    pub name: String,

    /// APIC base URL
    #[arg(long)]
    pub host: String,

    /// APIC username
    #[arg(long)]
    pub username: String,

    /// Store the password in the system keyring
    #[arg(long)]
    pub keyring: bool,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
