use crate::api::{self, Components};
use crate::services::{default_data_dir, LocalFsStore, LogFilter};
use crate::tools::avatar::AvatarLookup;
use crate::{runtime, ApiResponse, Comparison};
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "followback",
    version,
    about = "Find who you follow that doesn't follow you back (JSON only)"
)]
pub struct Cli {
    /// Where session files, the avatar cache and the activity log live
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate one export and count its usernames
    Check { input: String },
    /// Compare followers against following and remember the result
    Compare(CompareArgs),
    /// Show the last stored result list
    Results,
    /// Remove a user from the stored result list
    Remove { username: String },
    /// Forget stored inputs and results
    Clear,
    /// Look up one avatar (best-effort)
    Avatar { username: String },
    /// Show the activity log, newest first
    Logs(LogsArgs),
}

#[derive(Args)]
struct CompareArgs {
    /// Followers export: a file path, or `-` for stdin
    #[arg(long)]
    followers: String,
    /// Following export: a file path, or `-` for stdin
    #[arg(long)]
    following: String,
    /// Also look up avatars for every result
    #[arg(long)]
    avatars: bool,
}

#[derive(Args)]
struct LogsArgs {
    #[arg(long = "errors")]
    errors_only: bool,
    /// Only entries about this username or session key
    #[arg(long)]
    subject: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareReport {
    #[serde(flatten)]
    comparison: Comparison,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatars: Option<Vec<AvatarLookup>>,
}

pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let store = LocalFsStore::at(&data_dir)?;
    let components = Components::for_data_dir(&data_dir)?;

    let ok = match cli.cmd {
        Command::Check { input } => {
            let text = read_input(&input)?;
            finish(api::check_input(&text).map(|count| serde_json::json!({ "usernames": count })))
        }
        Command::Compare(args) => compare_cmd(&store, &components, args)?,
        Command::Results => print_json(ApiResponse::ok(api::load_session(&store).results)),
        Command::Remove { username } => {
            print_json(ApiResponse::ok(api::remove_result(&store, &components, &username)))
        }
        Command::Clear => finish(api::clear_session(&store, &components).map(|_| "cleared")),
        Command::Avatar { username } => {
            let avatar = runtime::block_on(api::resolve_avatar(&components, &username));
            print_json(ApiResponse::ok(AvatarLookup { username, avatar }))
        }
        Command::Logs(LogsArgs {
            errors_only,
            subject,
        }) => match &components.logger {
            Some(logger) => finish(
                logger
                    .read_logs(LogFilter {
                        subject: subject.as_deref(),
                        errors_only,
                    })
                    .map(|entries| entries.iter().map(ToString::to_string).collect::<Vec<_>>()),
            ),
            None => print_json(ApiResponse::ok(Vec::<String>::new())),
        },
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn compare_cmd(
    store: &LocalFsStore,
    components: &Components,
    args: CompareArgs,
) -> anyhow::Result<bool> {
    if args.followers == "-" && args.following == "-" {
        bail!("only one of --followers and --following can read stdin");
    }
    let followers = read_input(&args.followers)?;
    let following = read_input(&args.following)?;

    let comparison = match api::compare(store, components, &followers, &following) {
        Ok(comparison) => comparison,
        Err(e) => return Ok(print_json(ApiResponse::<()>::err(e.to_string()))),
    };
    eprintln!("{}", comparison.summary());

    let avatars = if args.avatars {
        Some(runtime::block_on(api::resolve_avatars(
            components,
            &comparison.non_followers,
        )))
    } else {
        None
    };

    Ok(print_json(ApiResponse::ok(CompareReport {
        comparison,
        avatars,
    })))
}

/// Read a file, or stdin for `-`.
fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("error reading file '{input}'"))
    }
}

fn finish<T: Serialize, E: std::fmt::Display>(res: Result<T, E>) -> bool {
    match res {
        Ok(v) => print_json(ApiResponse::ok(v)),
        Err(e) => print_json(ApiResponse::<()>::err(e.to_string())),
    }
}

/// Pretty-print the envelope; true when it reports success.
fn print_json<T: Serialize>(val: ApiResponse<T>) -> bool {
    let ok = val.ok;
    match serde_json::to_string_pretty(&val) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing to JSON: {}", e);
            return false;
        }
    }
    ok
}
