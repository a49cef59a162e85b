use clap::{Parser, Subcommand};
use imgsmoke::cli;
use imgsmoke::runner::RunOptions;
use imgsmoke::theme;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "imgsmoke")]
#[command(about = "Smoke-test container images with colorized pass/fail reporting", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a smoke-test suite against its container image
    Run {
        /// Suite name (built-in or from config)
        suite: String,

        /// Echo runtime commands and dump container logs on failed checks
        #[arg(short = 'i', long)]
        inspect: bool,

        /// Pause for manual browser verification after the automated checks
        #[arg(short = 'p', long)]
        prompt: bool,

        /// Publish on this host port instead of picking a free one
        #[arg(long)]
        port: Option<u16>,

        /// Leave the container running after the checks
        #[arg(long)]
        keep: bool,

        /// Path to a config file
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },

    /// List available suites
    List {
        /// Path to a config file
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            suite,
            inspect,
            prompt,
            port,
            keep,
            config,
        } => {
            let options = RunOptions {
                inspect,
                prompt,
                port,
                keep,
            };
            cli::run::run(suite, options, config)
        }
        Commands::List { config } => cli::list::run(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            theme::failure(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
