//! JSON files under the data directory, with timestamped backups.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, ScrapeError};
use crate::model::ScrapeOutput;

pub const TEAMS_FILE: &str = "teams.json";
pub const MATCHES_FILE: &str = "matches.json";
pub const MATCHDAYS_FILE: &str = "matchdays.json";
pub const STANDINGS_FILE: &str = "standings.json";

pub const BACKUP_DIR: &str = "backups";
const BACKUP_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Read a JSON file. A file that does not exist yields `None`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };
    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|e| json_error(path, e))
}

/// Write `data` as UTF-8 JSON indented by two spaces, replacing any existing file.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data).map_err(|e| json_error(path, e))?;
    writer.flush().map_err(|e| io_error(path, e))
}

/// Copy `path` to `backups/<file name>_<YYYYMMDD_HHMMSS>.json` next to it.
///
/// Returns the backup path, or `None` if there was nothing to back up.
pub fn create_backup(path: &Path, at: NaiveDateTime) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    let backup_dir = path
        .parent()
        .map(|p| p.join(BACKUP_DIR))
        .unwrap_or_else(|| PathBuf::from(BACKUP_DIR));
    fs::create_dir_all(&backup_dir).map_err(|e| io_error(&backup_dir, e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let backup_path = backup_dir.join(format!(
        "{file_name}_{}.json",
        at.format(BACKUP_STAMP_FORMAT)
    ));

    fs::copy(path, &backup_path).map_err(|e| io_error(path, e))?;
    debug!(from = %path.display(), to = %backup_path.display(), "backed up data file");
    Ok(Some(backup_path))
}

/// The data directory holding the four scrape output files.
#[derive(Debug, Clone)]
pub struct DataStore {
    dir: PathBuf,
}

impl DataStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Back up the existing files, then write every record list of `output`.
    ///
    /// Returns the backups that were created.
    pub fn write_output(&self, output: &ScrapeOutput, at: NaiveDateTime) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let mut backups = vec![];
        for file_name in [TEAMS_FILE, MATCHES_FILE, MATCHDAYS_FILE, STANDINGS_FILE] {
            if let Some(backup) = create_backup(&self.path(file_name), at)? {
                info!(backup = %backup.display(), "created backup");
                backups.push(backup);
            }
        }

        self.write_file(TEAMS_FILE, &output.teams)?;
        self.write_file(MATCHES_FILE, &output.matches)?;
        self.write_file(MATCHDAYS_FILE, &output.matchdays)?;
        self.write_file(STANDINGS_FILE, &output.standings)?;
        Ok(backups)
    }

    fn write_file<T: Serialize>(&self, file_name: &str, records: &[T]) -> Result<()> {
        save_json(&self.path(file_name), records)?;
        info!(file = file_name, count = records.len(), "saved data file");
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ScrapeError {
    ScrapeError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn json_error(path: &Path, source: serde_json::Error) -> ScrapeError {
    ScrapeError::Json {
        path: path.to_path_buf(),
        source,
    }
}
