use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
#[cfg(debug_assertions)]
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use simplelog::{CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, WriteLogger};

use crate::paths::AppPaths;
use crate::settings::BridgeSettings;

/// Only records from the plex crates reach the sinks.
const LOG_TARGET_PREFIX: &str = "plex";

/// Warnings are always kept; debug output only when the setting asks for it.
#[must_use]
pub fn level_for(settings: &BridgeSettings) -> LevelFilter {
    if settings.debug_logging {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

pub fn apply_log_level(settings: &BridgeSettings) {
    log::set_max_level(level_for(settings));
}

/// Append-only log in the host data directory.
///
/// Mobile hosts can clear that directory while the app is alive; the file is
/// reopened on the next write when that happens.
struct DataDirLog {
    path: PathBuf,
    file: Option<File>,
}

impl DataDirLog {
    fn open(path: PathBuf) -> io::Result<Self> {
        let mut log = Self { path, file: None };
        log.file()?;
        Ok(log)
    }

    fn file(&mut self) -> io::Result<&mut File> {
        if !self.path.exists() {
            self.file = None;
        }
        if self.file.is_none() {
            if let Some(dir) = self.path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            self.file = Some(file);
        }
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("log file not available"))
    }
}

impl Write for DataDirLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.as_mut().map_or(Ok(()), File::flush)
    }
}

/// Shrink a log above `max_bytes` to its last `max_bytes / 2` bytes,
/// starting at the first complete line.
fn cap_log_file(path: &Path, max_bytes: u64) -> io::Result<()> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    if len <= max_bytes {
        return Ok(());
    }

    file.seek(SeekFrom::Start(len - max_bytes / 2))?;
    let mut tail = Vec::new();
    file.read_to_end(&mut tail)?;
    drop(file);

    let first_line = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |pos| pos + 1);
    std::fs::write(path, &tail[first_line..])
}

/// Install the global logger for the bridge. Later calls only reapply the level.
pub fn init_logging(paths: &AppPaths, settings: &BridgeSettings) {
    let log_path = paths.log_file();
    let capped = cap_log_file(&log_path, settings.max_log_size_bytes);

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str(LOG_TARGET_PREFIX)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    #[cfg(debug_assertions)]
    loggers.push(TermLogger::new(
        LevelFilter::Debug,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));

    let open_error = match DataDirLog::open(log_path.clone()) {
        Ok(sink) => {
            loggers.push(WriteLogger::new(LevelFilter::Debug, config, sink));
            None
        }
        Err(error) => Some(error),
    };

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
    apply_log_level(settings);

    if let Some(error) = open_error {
        warn!("Log file {} unavailable: {error}", log_path.display());
    }
    if let Err(error) = capped
        && error.kind() != io::ErrorKind::NotFound
    {
        warn!("Could not cap log file {}: {error}", log_path.display());
    }
    info!(
        "Logging to {} at {}",
        log_path.display(),
        level_for(settings)
    );
}
