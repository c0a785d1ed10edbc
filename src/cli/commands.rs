//! Command dispatch

use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::RuleCommit;
use crate::cli::args::{Cli, Commands, RuleCommitArg};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::Matcher;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Run the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?,
    };
    let settings = Settings::load(Some(config_dir.as_path()))?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Generate {
            file,
            output,
            rule_commit,
        }) => cmd_generate(&container, file, output.as_deref(), *rule_commit),
        Some(Commands::Check { file }) => cmd_check(&container, file),
        Some(Commands::Tree { file }) => cmd_tree(&container, file),
        Some(Commands::Matchers) => cmd_matchers(),
        Some(Commands::Config) => cmd_config(&container),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        )),
    }
}

fn resolve_rule_commit(container: &ServiceContainer, arg: Option<RuleCommitArg>) -> RuleCommit {
    arg.map(RuleCommit::from)
        .unwrap_or(container.settings.rule_commit)
}

#[instrument(level = "debug", skip(container))]
fn cmd_generate(
    container: &ServiceContainer,
    file: &Path,
    destination: Option<&Path>,
    rule_commit: Option<RuleCommitArg>,
) -> CliResult<()> {
    let mode = resolve_rule_commit(container, rule_commit);
    let destination = destination.or(container.settings.output.as_deref());

    match destination {
        Some(out) => {
            let count = container.generate.write(file, out, mode)?;
            output::action("Written", &format!("{} commands to {}", count, out.display()));
        }
        None => {
            let rendered = container.generate.render(file, mode)?;
            io::stdout()
                .lock()
                .write_all(rendered.as_bytes())
                .map_err(|e| InfraError::io("write stdout", e))?;
        }
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_check(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let count = container
        .generate
        .check(file, container.settings.rule_commit)?;
    output::success(&format!("{}: {} commands", file.display(), count));
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let description = container.generate.load(file)?;
    output::info(&description.outline(&file.display().to_string()));
    Ok(())
}

fn cmd_matchers() -> CliResult<()> {
    output::header("Matchers");
    for matcher in Matcher::ALL {
        output::detail(&format!("{:<10} -> {}", matcher.symbol(), matcher.label()));
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer) -> CliResult<()> {
    output::info(&container.settings.to_toml()?);
    Ok(())
}

fn cmd_completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
