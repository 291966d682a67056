//! Command-line interface for hugopane

use std::path::PathBuf;

use clap::Parser;

use pane_core::CommandLineOverrides;

/// hugopane - GTK4 terminal panes with drag-and-drop splitting
#[derive(Parser, Debug, Default)]
#[command(name = "hugopane")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Working directory of the first terminal
    #[arg(short = 'w', long, value_name = "DIR")]
    pub working_directory: Option<PathBuf>,

    /// Command to run instead of the shell in the first terminal
    #[arg(short = 'e', long, value_name = "COMMAND")]
    pub command: Option<String>,

    /// Profile used by the first terminal, by visible name
    #[arg(short = 'p', long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Settings file (default: $XDG_CONFIG_HOME/hugopane/settings.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Overrides applied to the first pane's first spawn
    pub fn overrides(&self) -> CommandLineOverrides {
        CommandLineOverrides {
            working_directory: self.working_directory.clone(),
            command: self.command.clone().filter(|c| !c.trim().is_empty()),
            profile_name: self.profile.clone(),
        }
    }
}
