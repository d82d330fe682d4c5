use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "strip-gallery")]
#[command(author, version, about)]
#[command(long_about = "An image strip gallery with an expanding lightbox.\n\n\
    Wide windows expand a strip into a lightbox; narrow windows turn the row \
    into a swipeable carousel with inertia.\n\n\
    Examples:\n  \
    strip-gallery                          Launch with the configured catalog\n  \
    strip-gallery --catalog works.yaml     Launch with a specific catalog\n  \
    strip-gallery --width 480              Start in a narrow (mobile) window\n  \
    strip-gallery simulate swipe --dx 60   Trace a swipe without a window")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog YAML file to show (overrides the configured catalog)
    #[arg(long, global = false)]
    pub catalog: Option<PathBuf>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Initial window width in pixels (implies --windowed)
    #[arg(long, global = false)]
    pub width: Option<f32>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// List the items of the gallery catalog
    Catalog {
        /// Catalog YAML file (defaults to the configured or built-in catalog)
        file: Option<PathBuf>,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Run gestures against a headless gallery and print the outcome
    Simulate {
        #[command(subcommand)]
        command: SimulateCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. timing.gallery_animation_ms, inertia.friction, catalog)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Subcommand)]
pub enum SimulateCommands {
    /// Swipe across the mobile carousel and trace every inertia tick
    Swipe {
        /// Featured strip before the swipe (0-indexed)
        #[arg(long, default_value = "0")]
        featured: usize,

        /// Horizontal travel in pixels; positive moves forward
        #[arg(long, allow_hyphen_values = true)]
        dx: f64,

        /// Vertical travel in pixels
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        dy: f64,

        /// Gesture duration in milliseconds
        #[arg(long, default_value = "100")]
        duration_ms: u64,

        /// Catalog YAML file (defaults to the configured or built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Catalog { file }) => crate::commands::catalog::run(file),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Simulate { command }) => crate::commands::simulate::run(command),
            Some(Commands::Version) => {
                crate::commands::version::run();
                Ok(())
            }
            None => {
                if let Some(file) = &self.catalog {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                }
                crate::app::run(self.catalog, self.windowed, self.width)
            }
        }
    }
}
