use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use git_semtag::cli::{Outcome, Workflow, WorkflowOptions, WorkflowSettings};
use git_semtag::config;
use git_semtag::domain::BumpStrategy;
use git_semtag::git::Git2TagRepository;
use git_semtag::logging;
use git_semtag::ui::{ConsoleLogger, Logger, TerminalPrompt, Verbosity};

#[derive(clap::Parser)]
#[command(
    name = "git-semtag",
    version,
    about = "Inspect, bump, apply and purge semantic-version git tags"
)]
struct Args {
    #[arg(short, long, global = true, help = "Show debugging messages")]
    debug: bool,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Version this directory
    Apply {
        #[command(flatten)]
        mode: ModeArgs,

        #[arg(long, value_name = "STRATEGY", help = "Field to bump: major, minor or patch")]
        bump: Option<BumpStrategy>,
    },

    /// Purge all versions from this directory
    Purge {
        #[command(flatten)]
        mode: ModeArgs,
    },
}

#[derive(clap::Args)]
struct ModeArgs {
    #[arg(short = 'D', long, help = "Show a plan of changes")]
    dry_run: bool,

    #[arg(short = 'F', long, help = "Run the command without confirmation")]
    force: bool,
}

impl From<ModeArgs> for WorkflowOptions {
    fn from(mode: ModeArgs) -> Self {
        WorkflowOptions {
            dry_run: mode.dry_run,
            force: mode.force,
        }
    }
}

fn main() {
    let args = Args::parse();

    // Verbosity is decided once here and only read afterwards
    let verbosity = Verbosity::from_debug_flag(args.debug);
    logging::init_tracing(verbosity);
    let logger = ConsoleLogger::new(verbosity);

    if let Err(e) = run(args, &logger) {
        logger.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args, logger: &ConsoleLogger) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let cwd = std::env::current_dir().context("Cannot determine the current directory")?;
    let repo = Git2TagRepository::open(&cwd)?;
    let confirm = TerminalPrompt::with_timeout(config.prompt.timeout());
    let mut settings = WorkflowSettings::from_config(&config, cwd.display().to_string());

    let outcome = match args.command {
        Command::Apply { mode, bump } => {
            if let Some(strategy) = bump {
                settings.strategy = strategy;
            }
            Workflow::new(&repo, logger, &confirm, settings).apply(mode.into())?
        }
        Command::Purge { mode } => {
            Workflow::new(&repo, logger, &confirm, settings).purge(mode.into())?
        }
    };

    match outcome {
        Outcome::DryRun(plan) => logger.debug(&format!("dry run, not applied: {}", plan)),
        Outcome::Cancelled(plan) => logger.debug(&format!("cancelled: {}", plan)),
        Outcome::Applied(plan) => logger.debug(&format!("applied: {}", plan)),
        Outcome::NothingToDo => logger.debug("nothing to do"),
    }

    Ok(())
}
