//! Command dispatch

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::SelectionService;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::tree_traits::TreeNodeConvert;

/// Run the parsed command line, writing results to stdout.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_command_to(cli, &mut out)
}

/// Run the parsed command line, writing results to `out`.
#[instrument(level = "debug", skip(out))]
pub fn execute_command_to<W: Write>(cli: &Cli, out: &mut W) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `paramtree --help`".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, out);
        return Ok(());
    }

    let mut settings = resolve_settings(cli)?;
    if matches!(command, Commands::Check { .. }) {
        settings.strict = true;
    }
    debug!("settings: {:?}", settings);
    let service = SelectionService::new(&settings);

    match command {
        Commands::Parse { expr, json } => {
            let root = service.parse(expr)?;
            if *json {
                let rendered = serde_json::to_string_pretty(&root)
                    .map_err(|e| CliError::io("serialize tree", e.into()))?;
                write_line(out, &rendered)
            } else {
                write_line(out, &root.canonical_form())
            }
        }
        Commands::Tree { expr } => {
            let root = service.parse(expr)?;
            write!(out, "{}", root.to_tree_string()).map_err(|e| CliError::io("write output", e))
        }
        Commands::Names { expr, path } => {
            let root = service.parse(expr)?;
            let node = service.resolve(&root, path.as_deref().unwrap_or(""))?;
            for name in node.child_names() {
                write_line(out, name)?;
            }
            Ok(())
        }
        Commands::Leaves { expr } => {
            let root = service.parse(expr)?;
            for path in root.leaf_paths() {
                write_line(out, &path)?;
            }
            Ok(())
        }
        Commands::Check { expr } => {
            let canonical = service.normalize(expr)?;
            write_line(out, &output::success(&format!("valid: {}", canonical)))
        }
        Commands::Completion { .. } => Ok(()),
    }
}

/// Layered settings with command-line flags applied last.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.strict {
        settings.strict = true;
    }
    if let Some(max_depth) = cli.max_depth {
        settings.max_depth = max_depth as usize;
    }
    Ok(settings)
}

fn write_line<W: Write>(out: &mut W, line: &str) -> CliResult<()> {
    writeln!(out, "{}", line).map_err(|e| CliError::io("write output", e))
}
