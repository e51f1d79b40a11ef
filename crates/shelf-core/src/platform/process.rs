//! Steam process detection.
//!
//! Steam keeps its own copy of the shortcut list and writes it back on exit,
//! so edits made while it runs are lost.

use sysinfo::{Process, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::{debug, info, warn};

use crate::config::ShelfConfig;
use crate::error::{Result, ShelfError};

fn is_steam_process(process: &Process) -> bool {
    let name = process.name().to_string_lossy().to_lowercase();
    ShelfConfig::STEAM_PROCESS_NAMES.contains(&name.as_str())
}

fn refreshed_system() -> System {
    let mut system = System::new();
    system.refresh_processes_specifics(ProcessesToUpdate::All, true, ProcessRefreshKind::new());
    system
}

/// PIDs of running Steam client processes.
pub fn steam_pids() -> Vec<u32> {
    refreshed_system()
        .processes()
        .iter()
        .filter(|(_, process)| is_steam_process(process))
        .map(|(pid, _)| pid.as_u32())
        .collect()
}

pub fn is_steam_running() -> bool {
    !steam_pids().is_empty()
}

/// Kill every Steam client process.
///
/// Returns the number of processes signalled.
pub fn terminate_steam() -> Result<usize> {
    let system = refreshed_system();
    let mut killed = 0;

    for (pid, process) in system.processes() {
        if !is_steam_process(process) {
            continue;
        }
        debug!("Killing Steam process {}", pid);
        if process.kill() {
            killed += 1;
        } else {
            warn!("Failed to kill Steam process {}", pid);
        }
    }

    if killed == 0 && is_steam_running() {
        return Err(ShelfError::Other("Could not terminate Steam".to_string()));
    }

    info!("Terminated {} Steam processes", killed);
    Ok(killed)
}

/// Fail if Steam is running.
pub fn ensure_steam_closed() -> Result<()> {
    if is_steam_running() {
        return Err(ShelfError::SteamRunning);
    }
    Ok(())
}
