//! Steam Shelf - inspect and edit Steam's `shortcuts.vdf`.
//!
//! Without `--file`, the target is resolved from the Steam root (detected or
//! `--steam-root`) and the account id (`--user`, or the only account present).

mod commands;
mod output;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "steam-shelf")]
#[command(version, about = "Inspect and edit Steam non-Steam game shortcuts")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Steam installation root (defaults to $STEAM_ROOT or the platform default)
    #[arg(long, global = true)]
    steam_root: Option<PathBuf>,

    /// Steam account id under userdata/
    #[arg(long, global = true)]
    user: Option<u32>,

    /// Explicit shortcuts.vdf path, bypassing Steam root lookup
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a binary VDF file and print it
    Read(ReadArgs),

    /// List the shortcuts in the selected file
    List {
        /// Show every field
        #[arg(short, long)]
        verbose: bool,
    },

    /// Add a shortcut
    Add(AddArgs),

    /// Remove the shortcut with the given appid
    Remove {
        appid: u32,

        /// Terminate Steam first instead of refusing to write
        #[arg(long)]
        kill_steam: bool,
    },

    /// Remove every shortcut
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Terminate Steam first instead of refusing to write
        #[arg(long)]
        kill_steam: bool,
    },

    /// List Steam account ids with a userdata directory
    Users,
}

#[derive(Args, Debug)]
struct ReadArgs {
    /// File to decode (defaults to the selected shortcuts.vdf)
    path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ReadFormat::Summary)]
    format: ReadFormat,

    /// Fail on the first decode abnormality
    #[arg(long)]
    strict: bool,

    /// Report every substitution made while decoding
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct AddArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Executable path, quoted the way Steam expects if it contains spaces
    #[arg(long)]
    exe: String,

    /// Working directory (defaults to the executable's directory)
    #[arg(long)]
    start_dir: Option<String>,

    #[arg(long, default_value = "")]
    launch_options: String,

    /// Collections to place the shortcut in
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Terminate Steam first instead of refusing to write
    #[arg(long)]
    kill_steam: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ReadFormat {
    /// Generic tree as JSON
    Json,
    /// Typed shortcut records as JSON
    Shortcuts,
    /// One line per shortcut
    Summary,
    /// Hex dump of the file
    Raw,
}

fn init_logging(debug: bool) {
    let log_level = if debug { Level::DEBUG } else { Level::INFO };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    debug!("{:?}", cli);

    let target = commands::Target {
        steam_root: cli.steam_root,
        user: cli.user,
        file: cli.file,
    };

    match cli.command {
        Command::Read(args) => commands::read(&target, args),
        Command::List { verbose } => commands::list(&target, verbose),
        Command::Add(args) => commands::add(&target, args),
        Command::Remove { appid, kill_steam } => commands::remove(&target, appid, kill_steam),
        Command::Clear { yes, kill_steam } => commands::clear(&target, yes, kill_steam),
        Command::Users => commands::users(&target),
    }
}
