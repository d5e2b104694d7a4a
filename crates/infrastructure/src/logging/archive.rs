use super::sink::LogSink;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use ferrous_doh_application::ports::LogRotationPort;
use ferrous_doh_domain::DomainError;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

const ARCHIVE_MODE: u32 = 0o644;

/// `<log path>-YYYYMMDD-HHMMSS.tar.gz`
pub fn archive_path_for(log_path: &Path, at: DateTime<Local>) -> PathBuf {
    let mut name = log_path.as_os_str().to_os_string();
    name.push(format!("-{}.tar.gz", at.format("%Y%m%d-%H%M%S")));
    PathBuf::from(name)
}

/// Archives the live log into a gzip-compressed tarball and truncates it.
pub struct TarGzLogArchiver {
    sink: LogSink,
}

impl TarGzLogArchiver {
    pub fn new(sink: LogSink) -> Self {
        Self { sink }
    }

    fn rotate_blocking(sink: &LogSink) -> Result<PathBuf, DomainError> {
        let log_path = sink.path();
        let live = sink.lock();

        let metadata = live
            .metadata()
            .map_err(|e| rotation_error("stat", log_path, e))?;
        let size = metadata.len();
        let mtime = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let archive_path = archive_path_for(log_path, Local::now());
        let archive_file =
            File::create(&archive_path).map_err(|e| rotation_error("create", &archive_path, e))?;

        let entry_name = log_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("log"));

        let mut header = tar::Header::new_gnu();
        header.set_size(size);
        header.set_mode(ARCHIVE_MODE);
        header.set_mtime(mtime);

        let contents = File::open(log_path)
            .map_err(|e| rotation_error("open", log_path, e))?
            .take(size);

        let mut builder = tar::Builder::new(GzEncoder::new(archive_file, Compression::best()));
        builder
            .append_data(&mut header, &entry_name, contents)
            .map_err(|e| rotation_error("archive", log_path, e))?;
        builder
            .into_inner()
            .and_then(|encoder| encoder.finish())
            .map_err(|e| rotation_error("finish", &archive_path, e))?;

        live.set_len(0)
            .map_err(|e| rotation_error("truncate", log_path, e))?;

        Ok(archive_path)
    }
}

fn rotation_error(step: &str, path: &Path, e: std::io::Error) -> DomainError {
    DomainError::LogRotation(format!("{} {}: {}", step, path.display(), e))
}

#[async_trait]
impl LogRotationPort for TarGzLogArchiver {
    async fn current_size(&self) -> Result<u64, DomainError> {
        tokio::fs::metadata(self.sink.path())
            .await
            .map(|m| m.len())
            .map_err(|e| DomainError::IoError(format!("{}: {}", self.sink.path().display(), e)))
    }

    async fn rotate(&self) -> Result<String, DomainError> {
        let sink = self.sink.clone();
        let archive_path = tokio::task::spawn_blocking(move || Self::rotate_blocking(&sink))
            .await
            .map_err(|e| DomainError::LogRotation(format!("rotation task failed: {}", e)))??;
        Ok(archive_path.display().to_string())
    }
}
