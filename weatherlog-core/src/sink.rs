use crate::{config::SaverConfig, error::Error};
use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Durable destination for formatted report blocks.
///
/// Implementations serialize their own writes and flush before returning,
/// so callers never manage the underlying handle.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn save(&self, report: &str) -> io::Result<()>;
}

/// Append-only file sink. The handle is acquired once at wiring time and
/// kept for the lifetime of the run.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: Mutex<File>,
}

impl FileSink {
    /// Open the report file in append mode. The configured directory must
    /// already exist; a missing directory is a fatal wiring error.
    pub async fn create(config: &SaverConfig) -> Result<Self, Error> {
        let directory = if config.working_directory.trim().is_empty() {
            std::env::current_dir()?
        } else {
            PathBuf::from(&config.working_directory)
        };

        if !directory.is_dir() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("report directory does not exist: {}", directory.display()),
            )));
        }

        let path = directory.join(&config.filename);
        info!(path = %path.display(), "Opening weather report file");

        let writer = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        Ok(Self {
            path,
            writer: Mutex::new(writer),
        })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl ReportSink for FileSink {
    async fn save(&self, report: &str) -> io::Result<()> {
        debug!(path = %self.path.display(), "Appending weather report to file");

        let mut writer = self.writer.lock().await;
        writer.write_all(report.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saved_reports_are_appended_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = SaverConfig {
            working_directory: dir.path().display().to_string(),
            filename: "reports.txt".to_string(),
        };

        let sink = FileSink::create(&config).await.expect("sink must open");
        sink.save("first").await.expect("first write");
        sink.save("second").await.expect("second write");

        let contents = std::fs::read_to_string(sink.path()).expect("report file must exist");
        assert_eq!(contents, "first\nsecond\n");
    }

    #[tokio::test]
    async fn missing_directory_is_fatal() {
        let config = SaverConfig {
            working_directory: "/definitely/not/a/real/directory".to_string(),
            filename: "reports.txt".to_string(),
        };

        let err = FileSink::create(&config).await.unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn reopening_appends_instead_of_truncating() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = SaverConfig {
            working_directory: dir.path().display().to_string(),
            filename: "reports.txt".to_string(),
        };

        {
            let sink = FileSink::create(&config).await.expect("sink must open");
            sink.save("kept").await.expect("write");
        }
        let sink = FileSink::create(&config).await.expect("sink must reopen");
        sink.save("added").await.expect("write");

        let contents = std::fs::read_to_string(sink.path()).expect("report file must exist");
        assert_eq!(contents, "kept\nadded\n");
    }
}
