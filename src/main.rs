//! appgit - command-line interface
//!
//! Exports application bundles into Git repositories and imports them back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use appgit::model::{ApplicationBundle, PageDTO};
use appgit::sanitize::sanitise_page;
use appgit::storage::{BranchName, LocalGitStore, StoreConfig};
use appgit::sync::GitFileUtils;

#[derive(Parser, Debug)]
#[command(name = "appgit", version, about = "Store low-code applications in Git")]
struct Cli {
    /// Directory holding the application repositories (defaults to $APPGIT_ROOT, then .appgit)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a repository and write its readme
    Init {
        /// Repository path relative to the root
        repo: PathBuf,
        #[arg(long)]
        view_url: String,
        #[arg(long)]
        edit_url: String,
    },
    /// Write an exported application JSON file to a branch
    Export {
        /// Exported application JSON file
        bundle: PathBuf,
        /// Repository path relative to the root
        #[arg(long)]
        repo: PathBuf,
        #[arg(long, default_value = BranchName::DEFAULT)]
        branch: String,
    },
    /// Rebuild an exported application JSON file from a branch
    Import {
        #[arg(long)]
        org: String,
        #[arg(long)]
        app: String,
        #[arg(long)]
        repo_name: String,
        #[arg(long, default_value = BranchName::DEFAULT)]
        branch: String,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace a page's ids with its default ids
    SanitisePage {
        /// Page JSON file
        page: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.root.clone().map(StoreConfig::new).unwrap_or_else(StoreConfig::from_env);
    let store = LocalGitStore::new(config);
    let utils = GitFileUtils::new(&store, &store);

    match cli.command {
        Command::Init {
            repo,
            view_url,
            edit_url,
        } => {
            let path = utils
                .initialize_git_repo(&repo, &view_url, &edit_url)
                .with_context(|| format!("failed to initialize {}", repo.display()))?;
            println!("{}", path.display());
        }
        Command::Export { bundle, repo, branch } => {
            let bundle: ApplicationBundle = read_json(&bundle)?;
            let path = utils
                .save_application_to_local_repo(&repo, &bundle, &branch)
                .with_context(|| format!("failed to save application to {}", repo.display()))?;
            println!("{}", path.display());
        }
        Command::Import {
            org,
            app,
            repo_name,
            branch,
            output,
        } => {
            let bundle = utils
                .reconstruct_application_from_git_repo(&org, &app, &repo_name, &branch)
                .with_context(|| format!("failed to load {org}/{app}/{repo_name} at {branch}"))?;
            write_json(&bundle, output.as_deref())?;
        }
        Command::SanitisePage { page } => {
            let page: PageDTO = read_json(&page)?;
            let page = sanitise_page(page)?;
            write_json(&page, None)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = format!("appgit={level}");
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("appgit: logging disabled: {err}");
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, text + "\n").with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote application");
        }
        None => println!("{text}"),
    }
    Ok(())
}
