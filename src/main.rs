use dtrack_upload::adapters::outbound::console::StderrProgressReporter;
use dtrack_upload::adapters::outbound::filesystem::FileSystemReader;
use dtrack_upload::adapters::outbound::network::DependencyTrackClient;
use dtrack_upload::application::dto::{UploadCommand, UploadReport};
use dtrack_upload::application::use_cases::UploadBomUseCase;
use dtrack_upload::bom_upload::services::{
    resolve_gitlab_project, GitlabCiContext, GitlabUploadPolicy, ProjectResolution,
};
use dtrack_upload::cli::{Args, Command, GitlabUploadArgs};
use dtrack_upload::config::{load_config, resolve_log_settings, resolve_upload_command};
use dtrack_upload::logging::{init_tracing, LogFormat};
use dtrack_upload::shared::error::{ExitCode, UploadError};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    // clap exits with status 2 on invalid arguments
    let args = Args::parse_args();
    let exit_code = run(args).await;
    process::exit(exit_code.as_i32());
}

async fn run(args: Args) -> ExitCode {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let config = match load_config(args.config.as_deref(), home.as_deref()) {
        Ok(config) => config,
        Err(e) => return fail(&e, ExitCode::InvalidArguments, args.no_color.unwrap_or(false)),
    };

    let log_settings = resolve_log_settings(&args, &config);
    let no_color = log_settings.no_color;
    if let Err(e) = init_tracing(&log_settings.level, log_settings.format, no_color) {
        return fail(&e, ExitCode::ApplicationError, no_color);
    }

    let mut command = match resolve_upload_command(args.command.server_args(), &config) {
        Ok(command) => command,
        Err(e) => return fail_upload(&e, no_color),
    };

    if let Command::UploadGitlab(gitlab) = &args.command {
        if !apply_gitlab_context(&mut command, gitlab) {
            return ExitCode::Success;
        }
    }

    // Create adapters (Dependency Injection)
    let bom_reader = FileSystemReader::new();
    let server = match DependencyTrackClient::new() {
        Ok(client) => client,
        Err(e) => return fail(&e, ExitCode::ApplicationError, no_color),
    };
    let progress_reporter = if log_settings.format == LogFormat::Json {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    let use_case = UploadBomUseCase::new(bom_reader, server, progress_reporter);

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    match use_case.execute(command, &cancel).await {
        Ok(report) => {
            print_report(&report, no_color);
            ExitCode::Success
        }
        Err(e) => fail_upload(&e, no_color),
    }
}

/// Fills project coordinates from GitLab CI variables.
///
/// Returns `false` when the pipeline type is not enabled for uploads.
fn apply_gitlab_context(command: &mut UploadCommand, gitlab: &GitlabUploadArgs) -> bool {
    let ci = GitlabCiContext::from_lookup(|key| std::env::var(key).ok());
    let policy = GitlabUploadPolicy {
        branch: gitlab.gitlab_branch.unwrap_or(false),
        tag: gitlab.gitlab_tag.unwrap_or(false),
        merge_request: gitlab.gitlab_mr.unwrap_or(false),
    };

    match resolve_gitlab_project(&command.project_name, &command.project_version, &ci, policy) {
        ProjectResolution::Skipped { pipeline } => {
            tracing::info!(
                pipeline = %pipeline,
                "uploads from {} pipelines are disabled, skipping",
                pipeline
            );
            eprintln!(
                "⏭️  Skipping upload: {} pipeline uploads are disabled",
                pipeline
            );
            false
        }
        ProjectResolution::Resolved { name, version } => {
            tracing::debug!(
                project_name = %name,
                project_version = %version,
                "resolved GitLab project"
            );
            command.project_name = name;
            command.project_version = version;
            true
        }
    }
}

fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping upload");
            cancel.cancel();
        }
    });
}

fn print_report(report: &UploadReport, no_color: bool) {
    let headline = "BOM processing completed";
    if no_color {
        println!("✅ {}", headline);
    } else {
        println!("✅ {}", headline.green().bold());
    }
    println!("   Project: {}", report.project);
    println!("   Token:   {}", report.token);
    println!("   BOM:     {} bytes", report.bom_size);
    println!("   Waited:  {:.1}s", report.waited.as_secs_f64());
}

fn fail_upload(error: &UploadError, no_color: bool) -> ExitCode {
    print_error(&error.to_string(), no_color);
    error.exit_code()
}

fn fail(error: &anyhow::Error, exit_code: ExitCode, no_color: bool) -> ExitCode {
    print_error(&error.to_string(), no_color);

    // Display error chain
    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("\nCaused by: {}", err);
        source = err.source();
    }
    eprintln!();
    exit_code
}

fn print_error(message: &str, no_color: bool) {
    if no_color {
        eprintln!("\n❌ An error occurred:\n");
    } else {
        eprintln!("\n❌ {}\n", "An error occurred:".red().bold());
    }
    eprintln!("{}", message);
}
