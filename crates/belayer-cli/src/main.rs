//! Belayer - pull UI components out of a git repository
//!
//! Usage:
//!   belayer              # Interactive setup (writes belayer-config.json)
//!   belayer list         # List components under the remote root
//!   belayer add <name>   # Install one component into the project

mod setup;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use belayer_core::commands::{AddCommand, ListCommand, ListReport};
use belayer_core::context::AppContext;
use belayer_core::error::BelayerError;

use crate::setup::{DialoguerPrompter, SetupFlow};

#[derive(Parser)]
#[command(name = "belayer")]
#[command(version)]
#[command(about = "Install UI components from a git repository", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available components from the remote repository
    List,

    /// Install a component from the remote repository
    Add {
        /// Name of the component directory under the remote root
        component_name: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::current()?;
    tracing::debug!(project_root = %ctx.project_root().display(), "resolved project root");

    match cli.command {
        None => run_setup(&ctx),
        Some(Commands::List) => run_list(&ctx),
        Some(Commands::Add { component_name }) => run_add(&ctx, &component_name),
    }
}

fn run_setup(ctx: &AppContext) -> Result<()> {
    let mut flow = SetupFlow::new(DialoguerPrompter::default());
    flow.run(&ctx.config_store())?;
    Ok(())
}

fn run_list(ctx: &AppContext) -> Result<()> {
    let command = ListCommand::new(ctx.clone());

    let spinner = spinner("Fetching components...");
    let result = command.execute();
    spinner.finish_and_clear();

    let report = result.map_err(|err| explain(err, "Failed to fetch components."))?;
    print_list(&report);
    Ok(())
}

fn run_add(ctx: &AppContext, component_name: &str) -> Result<()> {
    let command = AddCommand::new(ctx.clone());

    let spinner = spinner(&format!("Installing component: {component_name}"));
    let result = command.execute(component_name);
    spinner.finish_and_clear();

    let report = result
        .map_err(|err| explain(err, &format!("Failed to install component: {component_name}")))?;
    println!(
        "{} Component \"{}\" installed successfully at {}.",
        style("✔").green(),
        report.component,
        report.destination.display()
    );
    Ok(())
}

fn print_list(report: &ListReport) {
    if report.is_empty() {
        println!(
            "{} No components found in the repository.",
            style("✖").yellow()
        );
        return;
    }

    println!(
        "{} Available components in {}:",
        style("✔").green(),
        style(&report.alias).bold()
    );
    for component in &report.components {
        println!("- {component}");
    }
}

/// Precondition failures read best on their own; fetch and filesystem
/// failures get the headline of the step that was running.
fn explain(err: BelayerError, headline: &str) -> anyhow::Error {
    match err {
        BelayerError::ConfigurationMissing { .. }
        | BelayerError::ConfigurationInvalid { .. }
        | BelayerError::DestinationConflict { .. }
        | BelayerError::InvalidComponentName { .. } => err.into(),
        other => anyhow::Error::new(other).context(headline.to_string()),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, explain};
    use belayer_core::error::BelayerError;
    use clap::Parser;

    #[test]
    fn no_subcommand_runs_setup() {
        let cli = Cli::try_parse_from(["belayer"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn list_parses_without_panic() {
        let cli = Cli::try_parse_from(["belayer", "list"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn add_takes_component_name() {
        let cli = Cli::try_parse_from(["belayer", "add", "Button"]).unwrap();
        match cli.command {
            Some(Commands::Add { component_name }) => assert_eq!(component_name, "Button"),
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn add_requires_component_name() {
        assert!(Cli::try_parse_from(["belayer", "add"]).is_err());
    }

    #[test]
    fn list_rejects_extra_arguments() {
        assert!(Cli::try_parse_from(["belayer", "list", "Button"]).is_err());
    }

    #[test]
    fn explain_keeps_precondition_messages() {
        let err = explain(
            BelayerError::InvalidComponentName {
                name: "..".to_string(),
                reason: "must not be a relative directory reference",
            },
            "Failed to install component: ..",
        );
        assert!(err.to_string().starts_with("Invalid component name"));
    }

    #[test]
    fn explain_adds_headline_to_fetch_failures() {
        let err = explain(
            BelayerError::FetchFailure {
                step: "git clone".to_string(),
                message: "repository not found".to_string(),
            },
            "Failed to fetch components.",
        );
        assert_eq!(err.to_string(), "Failed to fetch components.");
        assert_eq!(
            err.root_cause().to_string(),
            "git clone failed: repository not found"
        );
    }
}
