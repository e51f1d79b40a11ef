//! Subcommand handlers.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

use shelf_core::{
    platform, shortcut, vdf, Section, ShelfError, ShortcutRecord, ShortcutStore, StoreOptions,
};

use crate::output;
use crate::{AddArgs, ReadArgs, ReadFormat};

/// Polls after killing Steam before giving up.
const STEAM_EXIT_POLLS: u32 = 10;
const STEAM_EXIT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Where the shortcuts file lives, as selected by the global flags.
#[derive(Debug, Clone, Default)]
pub struct Target {
    pub steam_root: Option<PathBuf>,
    pub user: Option<u32>,
    pub file: Option<PathBuf>,
}

impl Target {
    fn steam_root(&self) -> Result<PathBuf> {
        match &self.steam_root {
            Some(root) => Ok(root.clone()),
            None => platform::steam_root().context("Failed to locate Steam"),
        }
    }

    /// Resolve the shortcuts.vdf path.
    pub fn shortcuts_path(&self) -> Result<PathBuf> {
        if let Some(file) = &self.file {
            return Ok(file.clone());
        }

        let root = self.steam_root()?;
        let user = match self.user {
            Some(user) => user,
            None => {
                let ids = platform::list_user_ids(&root)
                    .with_context(|| format!("Failed to list users under {}", root.display()))?;
                match ids.as_slice() {
                    [only] => *only,
                    [] => bail!("No Steam users found under {}", root.display()),
                    _ => bail!(
                        "Several Steam users found ({}); pick one with --user",
                        output::join_ids(&ids)
                    ),
                }
            }
        };
        Ok(platform::shortcuts_path(&root, user))
    }
}

fn open_store(target: &Target) -> Result<ShortcutStore> {
    let path = target.shortcuts_path()?;
    ShortcutStore::open(&path, StoreOptions::default())
        .with_context(|| format!("Failed to open {}", path.display()))
}

/// Make sure Steam will not overwrite our changes.
fn prepare_write(kill_steam: bool) -> Result<()> {
    if !platform::is_steam_running() {
        return Ok(());
    }
    if !kill_steam {
        bail!(ShelfError::SteamRunning);
    }

    platform::terminate_steam().context("Failed to stop Steam")?;
    for _ in 0..STEAM_EXIT_POLLS {
        if !platform::is_steam_running() {
            return Ok(());
        }
        thread::sleep(STEAM_EXIT_POLL_INTERVAL);
    }
    platform::ensure_steam_closed().context("Steam did not exit")?;
    Ok(())
}

fn save(store: &ShortcutStore) -> Result<()> {
    store
        .save()
        .with_context(|| format!("Failed to write {}", store.path().display()))
}

fn decode_file(path: &Path, bytes: &[u8], strict: bool, verbose: bool) -> Result<Section> {
    if strict {
        return vdf::decode_strict(bytes)
            .with_context(|| format!("Failed to decode {}", path.display()));
    }

    let decoded = vdf::decode_with_diagnostics(bytes);
    if verbose {
        for diagnostic in &decoded.diagnostics {
            warn!("{}", diagnostic);
        }
    } else if !decoded.is_clean() {
        warn!(
            "{} decoded with {} substitutions (use -v to list them)",
            path.display(),
            decoded.diagnostics.len()
        );
    }
    Ok(decoded.section)
}

pub fn read(target: &Target, args: ReadArgs) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => target.shortcuts_path()?,
    };
    let bytes = std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let decode = || decode_file(&path, &bytes, args.strict, args.verbose);

    match args.format {
        ReadFormat::Raw => print!("{}", output::HexDump(&bytes)),
        ReadFormat::Json => println!("{}", serde_json::to_string_pretty(&decode()?)?),
        ReadFormat::Shortcuts => {
            let records = shortcut::from_list(&decode()?);
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        ReadFormat::Summary => {
            for record in shortcut::from_list(&decode()?) {
                println!("{}", output::summary_line(&record));
            }
        }
    }
    Ok(())
}

pub fn list(target: &Target, verbose: bool) -> Result<()> {
    let store = open_store(target)?;
    if store.is_empty() {
        println!("No shortcuts in {}", store.path().display());
        return Ok(());
    }

    for record in &store {
        if verbose {
            println!("{}", output::ShortcutDetail(record));
        } else {
            println!("{}", output::summary_line(record));
        }
    }
    Ok(())
}

/// Default working directory: the executable's parent, keeping Steam's quoting.
fn default_start_dir(exe: &str) -> String {
    let quoted = exe.len() >= 2 && exe.starts_with('"') && exe.ends_with('"');
    let bare = if quoted { &exe[1..exe.len() - 1] } else { exe };
    let parent = Path::new(bare)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    if quoted {
        format!("\"{}\"", parent)
    } else {
        parent
    }
}

pub fn add(target: &Target, args: AddArgs) -> Result<()> {
    let mut store = open_store(target)?;

    let start_dir = args.start_dir.unwrap_or_else(|| default_start_dir(&args.exe));
    let mut record = ShortcutRecord::new(args.name, args.exe, start_dir);
    record.launch_options = args.launch_options;
    for tag in args.tags {
        record.add_tag(tag);
    }

    if store.find(record.appid).is_some() {
        bail!(
            "A shortcut for {} ({}) already exists with appid {}",
            record.app_name,
            record.exe,
            record.appid
        );
    }

    prepare_write(args.kill_steam)?;
    let appid = record.appid;
    store.add(record);
    save(&store)?;

    info!("Added shortcut {} to {}", appid, store.path().display());
    println!("{}", appid);
    Ok(())
}

pub fn remove(target: &Target, appid: u32, kill_steam: bool) -> Result<()> {
    let mut store = open_store(target)?;
    let Some(removed) = store.remove(appid) else {
        bail!("No shortcut with appid {} in {}", appid, store.path().display());
    };

    prepare_write(kill_steam)?;
    save(&store)?;
    info!("Removed shortcut {} ({})", appid, removed.app_name);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

pub fn clear(target: &Target, yes: bool, kill_steam: bool) -> Result<()> {
    let mut store = open_store(target)?;
    if store.is_empty() {
        println!("No shortcuts in {}", store.path().display());
        return Ok(());
    }

    let prompt = format!(
        "Remove all {} shortcuts from {}?",
        store.len(),
        store.path().display()
    );
    if !yes && !confirm(&prompt)? {
        println!("Aborted");
        return Ok(());
    }

    prepare_write(kill_steam)?;
    let count = store.len();
    store.clear();
    save(&store)?;
    info!("Removed {} shortcuts", count);
    Ok(())
}

pub fn users(target: &Target) -> Result<()> {
    let root = target.steam_root()?;
    let ids = platform::list_user_ids(&root)
        .with_context(|| format!("Failed to list users under {}", root.display()))?;

    for id in ids {
        let path = platform::shortcuts_path(&root, id);
        let count = if path.exists() {
            match ShortcutStore::open(&path, StoreOptions::default()) {
                Ok(store) => store.len().to_string(),
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    "?".to_string()
                }
            }
        } else {
            "0".to_string()
        };
        println!("{:<12} {:>4} shortcuts  {}", id, count, path.display());
    }
    Ok(())
}
