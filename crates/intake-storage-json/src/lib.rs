use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use intake_core::{CoreError, ProfileStorage};
use intake_domain::ProfileRecord;
use serde::{Deserialize, Serialize};

const PROFILE_FILE: &str = "profile.json";
const MARKER_FILE: &str = "onboarding_completed.json";
const BACKUP_DIR: &str = "backups";
const BACKUP_PREFIX: &str = "profile";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";
const LEGACY_BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const BACKUP_SEQUENCE_SEPARATOR: char = '-';
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 3;

/// Contents of the completion marker file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionMarker {
    pub completed: bool,
    pub completed_at: DateTime<Utc>,
}

/// A copy of a profile that was overwritten by a later onboarding run.
#[derive(Debug, Clone)]
pub struct ProfileBackup {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    /// Disambiguates backups taken within the same millisecond.
    pub sequence: u32,
    pub path: PathBuf,
}

/// Filesystem-backed JSON persistence for the onboarding profile.
#[derive(Debug, Clone)]
pub struct JsonProfileStorage {
    root: PathBuf,
    retention: usize,
}

impl JsonProfileStorage {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(root, DEFAULT_RETENTION)
    }

    pub fn with_retention(root: PathBuf, retention: usize) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            retention: retention.max(1),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn profile_path(&self) -> PathBuf {
        self.root.join(PROFILE_FILE)
    }

    pub fn marker_path(&self) -> PathBuf {
        self.root.join(MARKER_FILE)
    }

    fn backups_dir(&self) -> PathBuf {
        self.root.join(BACKUP_DIR)
    }

    pub fn load_marker(&self) -> Result<Option<CompletionMarker>, CoreError> {
        let path = self.marker_path();
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|err| CoreError::Serde(err.to_string()))
    }

    /// Removes the profile and the marker so onboarding runs again.
    pub fn reset(&self) -> Result<(), CoreError> {
        for path in [self.marker_path(), self.profile_path()] {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    pub fn list_backups(&self) -> Result<Vec<ProfileBackup>, CoreError> {
        let dir = self.backups_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                let (created_at, sequence) = match parse_backup_name(name) {
                    Some((created_at, sequence)) => (Some(created_at), sequence),
                    None => (None, 0),
                };
                entries.push(ProfileBackup {
                    name: name.to_string(),
                    created_at,
                    sequence,
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|backup| Reverse((backup.created_at, backup.sequence)));
        Ok(entries)
    }

    fn backup_existing_profile(&self) -> Result<(), CoreError> {
        let current = self.profile_path();
        if !current.exists() {
            return Ok(());
        }
        let dir = self.backups_dir();
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let target = unused_backup_path(&dir, &timestamp);
        fs::copy(&current, &target)?;
        self.prune_backups()
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        for backup in self.list_backups()?.into_iter().skip(self.retention) {
            let _ = fs::remove_file(backup.path);
        }
        Ok(())
    }
}

impl ProfileStorage for JsonProfileStorage {
    fn persist_profile(&self, record: &ProfileRecord) -> Result<(), CoreError> {
        self.backup_existing_profile()?;
        let json = serde_json::to_string_pretty(record)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        write_replace(&self.profile_path(), &json)
    }

    fn mark_flow_complete(&self) -> Result<(), CoreError> {
        let marker = CompletionMarker {
            completed: true,
            completed_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&marker)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        write_replace(&self.marker_path(), &json)
    }

    fn discard_profile(&self) -> Result<(), CoreError> {
        let path = self.profile_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn load_profile(&self) -> Result<Option<ProfileRecord>, CoreError> {
        let path = self.profile_path();
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|err| CoreError::Serde(err.to_string()))
    }

    fn is_flow_complete(&self) -> Result<bool, CoreError> {
        Ok(self
            .load_marker()?
            .map(|marker| marker.completed)
            .unwrap_or(false))
    }
}

fn backup_file_name(timestamp: &str, sequence: u32) -> String {
    if sequence == 0 {
        format!("{}_{}.{}", BACKUP_PREFIX, timestamp, BACKUP_EXTENSION)
    } else {
        format!(
            "{}_{}{}{}.{}",
            BACKUP_PREFIX, timestamp, BACKUP_SEQUENCE_SEPARATOR, sequence, BACKUP_EXTENSION
        )
    }
}

/// First backup path for `timestamp` that does not exist yet.
fn unused_backup_path(dir: &Path, timestamp: &str) -> PathBuf {
    let mut sequence = 0;
    loop {
        let candidate = dir.join(backup_file_name(timestamp, sequence));
        if !candidate.exists() {
            return candidate;
        }
        sequence += 1;
    }
}

/// Splits `profile_<timestamp>[-<sequence>].json` into its parts.
/// Second-precision names from older releases still parse.
fn parse_backup_name(name: &str) -> Option<(DateTime<Utc>, u32)> {
    let trimmed = name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let raw = trimmed.strip_prefix(&format!("{}_", BACKUP_PREFIX))?;
    let (stamp, sequence) = match raw.split_once(BACKUP_SEQUENCE_SEPARATOR) {
        Some((stamp, sequence)) => (stamp, sequence.parse().ok()?),
        None => (raw, 0),
    };
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(stamp, LEGACY_BACKUP_TIMESTAMP_FORMAT))
        .ok()
        .map(|naive| (DateTime::from_naive_utc_and_offset(naive, Utc), sequence))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Stages `data` next to `path` and renames it into place.
fn write_replace(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
