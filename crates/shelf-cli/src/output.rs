//! Human-readable rendering of shortcuts and raw files.

use chrono::DateTime;
use std::fmt;

use shelf_core::ShortcutRecord;

const HEX_DUMP_WIDTH: usize = 16;

pub fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render `LastPlayTime` as UTC, or "never" for zero.
pub fn last_played(timestamp: u32) -> String {
    if timestamp == 0 {
        return "never".to_string();
    }
    match DateTime::from_timestamp(i64::from(timestamp), 0) {
        Some(time) => time.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => timestamp.to_string(),
    }
}

/// `appid  name  exe`, with a marker for hidden shortcuts.
pub fn summary_line(record: &ShortcutRecord) -> String {
    let hidden = if record.is_hidden() { " (hidden)" } else { "" };
    format!(
        "{:<10} {}{}  {}",
        record.appid, record.app_name, hidden, record.exe
    )
}

/// Every field of a shortcut, one per line.
pub struct ShortcutDetail<'a>(pub &'a ShortcutRecord);

impl fmt::Display for ShortcutDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        let flag = |value: u32| if value != 0 { "yes" } else { "no" };

        writeln!(f, "{} ({})", record.app_name, record.appid)?;
        writeln!(f, "  exe:            {}", record.exe)?;
        writeln!(f, "  start dir:      {}", record.start_dir)?;
        if !record.launch_options.is_empty() {
            writeln!(f, "  launch options: {}", record.launch_options)?;
        }
        if !record.icon.is_empty() {
            writeln!(f, "  icon:           {}", record.icon)?;
        }
        if !record.flatpak_app_id.is_empty() {
            writeln!(f, "  flatpak:        {}", record.flatpak_app_id)?;
        }
        writeln!(f, "  hidden:         {}", flag(record.is_hidden))?;
        writeln!(f, "  overlay:        {}", flag(record.allow_overlay))?;
        writeln!(f, "  desktop config: {}", flag(record.allow_desktop_config))?;
        writeln!(f, "  vr:             {}", flag(record.open_vr))?;
        writeln!(f, "  last played:    {}", last_played(record.last_play_time))?;
        write!(f, "  tags:           ")?;
        for (index, tag) in record.tag_names().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(tag)?;
        }
        Ok(())
    }
}

/// Offset, hex bytes and printable ASCII, 16 bytes per line.
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (line, chunk) in self.0.chunks(HEX_DUMP_WIDTH).enumerate() {
            let ascii: String = chunk
                .iter()
                .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
                .collect();
            writeln!(
                f,
                "{:08x}  {:<width$}  |{}|",
                line * HEX_DUMP_WIDTH,
                hex::encode(chunk),
                ascii,
                width = HEX_DUMP_WIDTH * 2
            )?;
        }
        Ok(())
    }
}
