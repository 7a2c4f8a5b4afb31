use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::logging::{parse_log_level, LogFormat};

/// Upload SBOMs to DependencyTrack and wait until the server has processed them
#[derive(Parser, Debug)]
#[command(name = "dtrack-upload")]
#[command(version)]
#[command(
    about = "Upload SBOMs to DependencyTrack and wait until the server has processed them",
    long_about = None
)]
pub struct Args {
    /// Optional config file (default $HOME/.trivy_plugin_dependencytrack.yaml)
    #[arg(
        short = 'c',
        long,
        global = true,
        env = "TRIVY_PLUGIN_DEPENDENCYTRACK_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error [default: info]
    #[arg(
        short = 'l',
        long,
        global = true,
        env = "TRIVY_PLUGIN_DEPENDENCYTRACK_LOG_LEVEL",
        value_parser = parse_log_level
    )]
    pub log_level: Option<String>,

    /// Log format: console, json, dev or none [default: console]
    #[arg(long, global = true, env = "TRIVY_PLUGIN_DEPENDENCYTRACK_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Disable colorized output
    #[arg(
        long,
        global = true,
        env = "TRIVY_PLUGIN_DEPENDENCYTRACK_NO_COLOR",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub no_color: Option<bool>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a BOM and wait for DependencyTrack to finish processing it
    Upload(UploadArgs),

    /// Upload a BOM from a GitLab CI pipeline, deriving the project from CI variables
    #[command(name = "upload-gitlab")]
    UploadGitlab(GitlabUploadArgs),
}

impl Command {
    pub fn server_args(&self) -> &ServerArgs {
        match self {
            Command::Upload(args) => &args.server,
            Command::UploadGitlab(args) => &args.server,
        }
    }
}

/// Options shared by every upload command
#[derive(ClapArgs, Debug, Default)]
pub struct ServerArgs {
    /// DependencyTrack URL [default: http://localhost:8081]
    #[arg(long, env = "TRIVY_PLUGIN_DEPENDENCYTRACK_URL")]
    pub url: Option<String>,

    /// DependencyTrack API key
    #[arg(long, env = "TRIVY_PLUGIN_DEPENDENCYTRACK_APIKEY", hide_env_values = true)]
    pub apikey: Option<String>,

    /// DependencyTrack project name
    #[arg(long, env = "TRIVY_PLUGIN_DEPENDENCYTRACK_PROJECT_NAME")]
    pub project_name: Option<String>,

    /// DependencyTrack project version
    #[arg(long, env = "TRIVY_PLUGIN_DEPENDENCYTRACK_PROJECT_VERSION")]
    pub project_version: Option<String>,

    /// Auto-create the project if it doesn't exist [default: true]
    #[arg(
        long,
        env = "TRIVY_PLUGIN_DEPENDENCYTRACK_AUTOCREATE",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub auto_create: Option<bool>,

    /// Path to the BOM file to upload
    #[arg(long, env = "TRIVY_PLUGIN_DEPENDENCYTRACK_BOM_FILE")]
    pub bom_file: Option<PathBuf>,

    /// Seconds between processing status checks [default: 1]
    #[arg(
        long,
        value_name = "SECONDS",
        env = "TRIVY_PLUGIN_DEPENDENCYTRACK_POLL_INTERVAL",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval: Option<u64>,

    /// Seconds to wait for processing before giving up [default: 30]
    #[arg(
        long,
        value_name = "SECONDS",
        env = "TRIVY_PLUGIN_DEPENDENCYTRACK_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,
}

#[derive(ClapArgs, Debug)]
pub struct UploadArgs {
    #[command(flatten)]
    pub server: ServerArgs,
}

#[derive(ClapArgs, Debug)]
pub struct GitlabUploadArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    /// Upload from branch pipelines
    #[arg(
        long,
        env = "TRIVY_PLUGIN_DEPENDENCYTRACK_GITLAB_BRANCH",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub gitlab_branch: Option<bool>,

    /// Upload from tag pipelines
    #[arg(
        long,
        env = "TRIVY_PLUGIN_DEPENDENCYTRACK_GITLAB_TAG",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub gitlab_tag: Option<bool>,

    /// Upload from merge request pipelines
    #[arg(
        long,
        env = "TRIVY_PLUGIN_DEPENDENCYTRACK_GITLAB_MR",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub gitlab_mr: Option<bool>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
