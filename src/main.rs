//! Stevedore CLI entrypoint.
//!
//! This binary publishes one crate into a git-backed local registry:
//! package, checksum, index update, artefact copy, commit. Every step is
//! fatal on failure; the process exits non-zero with the failing command's
//! diagnostics.

use clap::Parser;
use std::io::Write;
use stevedore::cli::Cli;
use stevedore::config::RegistryConfig;
use stevedore::error::Result;
use stevedore::executor::SystemCommandExecutor;
use stevedore::output::{completion_message, write_progress_line};
use stevedore::publish::{PublishOptions, Publisher};

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let config = match &cli.upstream {
        Some(upstream) => RegistryConfig::with_upstream(cli.registry_root(), upstream.clone()),
        None => RegistryConfig::new(cli.registry_root()),
    };
    let options = PublishOptions {
        quiet: cli.quiet,
        verbosity: cli.verbosity,
    };

    let executor = SystemCommandExecutor;
    let publisher = Publisher::new(&config, &executor, options);
    let outcome = publisher.publish(&cli.crate_dir, stderr)?;

    if !cli.quiet {
        write_progress_line(
            stderr,
            format!("published {}-{}", outcome.name, outcome.vers),
        );
        write_progress_line(stderr, completion_message());
    }

    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_progress_line(stderr, err);
            1
        }
    }
}
