//! Command dispatch for the kbase binary

use std::io::{self, BufReader};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, DocumentTreeStore};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::session::Session;
use crate::config::{global_config_path, Settings};
use crate::domain::{forest_to_tree, Direction, DocumentFilter, DocumentType};
use crate::infrastructure::ServiceContainer;

pub fn execute(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `kbase --help`".into(),
        ));
    };

    // completion must work even with a broken config
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Tree { direction } => cmd_tree(&container, *direction),
        Commands::Docs {
            direction,
            section,
            query,
        } => cmd_docs(&container, *direction, *section, query.as_deref()),
        Commands::Show { id, direction } => cmd_show(&container, id, *direction),
        Commands::Session { direction } => cmd_session(&container, *direction),
        Commands::Config { command } => cmd_config(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn direction_or_default(container: &ServiceContainer, direction: Option<Direction>) -> Direction {
    direction.unwrap_or(container.settings.default_direction)
}

#[instrument(level = "debug", skip(container))]
fn cmd_tree(container: &ServiceContainer, direction: Option<Direction>) -> CliResult<()> {
    let direction = direction_or_default(container, direction);
    let store = container.store();
    output::info(&forest_to_tree(direction.label(), store.forest(direction)));
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_docs(
    container: &ServiceContainer,
    direction: Option<Direction>,
    section: Option<DocumentType>,
    query: Option<&str>,
) -> CliResult<()> {
    let direction = direction_or_default(container, direction);
    let store = container.store();
    let mut filter = DocumentFilter::new(query.unwrap_or_default());
    if let Some(section) = section {
        output::header(section.section_title());
        filter = filter.in_section(section);
    }
    let documents = store.search(direction, &filter);
    if documents.is_empty() {
        output::warning("no matching documents");
    }
    for doc in documents {
        output::info(&output::document_line(doc));
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_show(container: &ServiceContainer, id: &str, direction: Option<Direction>) -> CliResult<()> {
    let direction = direction_or_default(container, direction);
    let store = container.store();
    let mut lines = output::node_lines(store.get(direction, id)?).into_iter();
    if let Some(first) = lines.next() {
        output::header(&first);
    }
    for line in lines {
        output::detail(&line);
    }
    Ok(())
}

fn cmd_session(container: &ServiceContainer, direction: Option<Direction>) -> CliResult<()> {
    let store: DocumentTreeStore = container.store();
    let mut state = container.app_state();
    if let Some(direction) = direction {
        state.select_direction(direction);
    }
    let mut session = Session::new(store, state);
    let stdin = io::stdin();
    let failures = session.run(BufReader::new(stdin.lock()), &mut io::stdout())?;
    debug!("session finished with {} failed command(s)", failures);
    if failures > 0 {
        return Err(CliError::Usage(format!("{failures} session command(s) failed")));
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                let marker = if path.exists() { "" } else { " (not created)" };
                output::action("global", &format!("{}{}", path.display(), marker));
            }
            None => output::warning("no config directory on this platform"),
        },
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| ApplicationError::Config {
                message: "no config directory on this platform".into(),
            })?;
            if path.exists() && !force {
                return Err(CliError::InvalidArgs(format!(
                    "{} exists, use --force to overwrite",
                    path.display()
                )));
            }
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            std::fs::write(&path, Settings::template())?;
            output::action("created", &path.display());
        }
    }
    Ok(())
}
