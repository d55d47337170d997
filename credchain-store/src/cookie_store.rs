//! Cookie file management.
//!
//! Installs, inspects, backs up and restores the Netscape cookie file the
//! resolver tries first. The resolver itself only reads the file.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use credchain_core::{parse_netscape, validate_netscape};

use crate::error::StoreError;
use crate::persistence::{set_mode, write_atomic};

/// Cookie files with fewer cookies than this get a warning recommendation.
const FEW_COOKIES: usize = 5;

// ============================================================================
// Status
// ============================================================================

/// Snapshot of the cookie file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CookieFileStatus {
    /// Cookie file path.
    pub path: PathBuf,
    /// Whether the file exists.
    pub exists: bool,
    /// File size in bytes.
    pub file_size: u64,
    /// Last modification time.
    pub last_modified: Option<DateTime<Utc>>,
    /// Whether the file could be read.
    pub is_readable: bool,
    /// Number of parsed cookie lines.
    pub cookie_count: usize,
    /// Cookies whose expiry is in the past.
    pub expired_count: usize,
    /// Whether a backup file exists.
    pub backup_exists: bool,
}

impl CookieFileStatus {
    /// Operator-facing advice derived from the status.
    pub fn recommendations(&self) -> Vec<String> {
        let mut advice = Vec::new();

        let headline = if !self.exists {
            "Install a cookie file exported from a signed-in browser session"
        } else if self.file_size == 0 {
            "Cookie file is empty; install a valid one"
        } else if !self.is_readable {
            "Cookie file is not readable; check its permissions or reinstall it"
        } else if self.cookie_count == 0 {
            "No cookies found; make sure the file is in Netscape format"
        } else if self.cookie_count < FEW_COOKIES {
            "Few cookies found; authentication may be unreliable"
        } else {
            "Cookie file looks usable"
        };
        advice.push(headline.to_string());

        if self.expired_count > 0 {
            advice.push(format!(
                "{} of {} cookies have expired; export a fresh file",
                self.expired_count, self.cookie_count
            ));
        }
        if self.backup_exists {
            advice.push("A backup exists and can be restored".to_string());
        }

        advice
    }
}

/// Result of a successful install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallOutcome {
    /// Number of cookies in the installed file.
    pub cookie_count: usize,
    /// Whether the previous file was backed up.
    pub backed_up: bool,
}

/// Files removed by [`CookieFileStore::delete`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    /// Main file removed.
    pub cookie_file: bool,
    /// Backup file removed.
    pub backup: bool,
}

// ============================================================================
// Cookie File Store
// ============================================================================

/// Manages a cookie file and its single backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieFileStore {
    path: PathBuf,
    backup_path: PathBuf,
}

impl CookieFileStore {
    /// Creates a store for `path`. The backup sits next to it:
    /// `cookies.txt` is backed up to `cookies_backup.txt`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let backup_path = backup_path_for(&path);
        Self { path, backup_path }
    }

    /// Cookie file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Backup file path.
    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Validates and installs new cookie content.
    ///
    /// An existing file is copied to the backup first. With non-empty
    /// `required_domains`, at least one cookie must belong to one of them.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidCookies`] if the content is rejected; IO errors
    /// otherwise.
    pub async fn install(
        &self,
        content: &str,
        required_domains: &[&str],
    ) -> Result<InstallOutcome, StoreError> {
        let cookies = validate_netscape(content, required_domains)?;

        let backed_up = if tokio::fs::try_exists(&self.path).await? {
            tokio::fs::copy(&self.path, &self.backup_path).await?;
            info!(backup = %self.backup_path.display(), "Backed up existing cookie file");
            true
        } else {
            false
        };

        write_atomic(&self.path, content.as_bytes()).await?;
        set_mode(&self.path, 0o644).await?;

        info!(
            path = %self.path.display(),
            cookies = cookies.len(),
            "Installed cookie file"
        );

        Ok(InstallOutcome {
            cookie_count: cookies.len(),
            backed_up,
        })
    }

    /// Inspects the cookie file.
    ///
    /// # Errors
    ///
    /// Returns an IO error only if existence cannot be determined.
    pub async fn status(&self) -> Result<CookieFileStatus, StoreError> {
        self.status_at(Utc::now()).await
    }

    /// Inspects the cookie file, counting expiry against `now`.
    ///
    /// # Errors
    ///
    /// Returns an IO error only if existence cannot be determined.
    pub async fn status_at(&self, now: DateTime<Utc>) -> Result<CookieFileStatus, StoreError> {
        let mut status = CookieFileStatus {
            path: self.path.clone(),
            exists: tokio::fs::try_exists(&self.path).await?,
            file_size: 0,
            last_modified: None,
            is_readable: false,
            cookie_count: 0,
            expired_count: 0,
            backup_exists: tokio::fs::try_exists(&self.backup_path).await?,
        };

        if !status.exists {
            return Ok(status);
        }

        if let Ok(metadata) = tokio::fs::metadata(&self.path).await {
            status.file_size = metadata.len();
            status.last_modified = metadata.modified().ok().map(DateTime::<Utc>::from);
        }

        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let cookies = parse_netscape(&content);
                status.is_readable = true;
                status.cookie_count = cookies.len();
                status.expired_count = cookies.iter().filter(|c| c.is_expired_at(now)).count();
            }
            Err(e) => warn!(path = %self.path.display(), error = %e, "Cookie file not readable"),
        }

        Ok(status)
    }

    /// Removes the cookie file and its backup.
    ///
    /// # Errors
    ///
    /// Returns IO errors other than "not found".
    pub async fn delete(&self) -> Result<DeleteOutcome, StoreError> {
        let outcome = DeleteOutcome {
            cookie_file: remove_if_present(&self.path).await?,
            backup: remove_if_present(&self.backup_path).await?,
        };
        info!(
            cookie_file = outcome.cookie_file,
            backup = outcome.backup,
            "Deleted cookie files"
        );
        Ok(outcome)
    }

    /// Copies the backup over the cookie file.
    ///
    /// # Errors
    ///
    /// [`StoreError::NoBackup`] if there is no backup.
    pub async fn restore(&self) -> Result<(), StoreError> {
        if !tokio::fs::try_exists(&self.backup_path).await? {
            return Err(StoreError::NoBackup(self.backup_path.clone()));
        }

        tokio::fs::copy(&self.backup_path, &self.path).await?;
        set_mode(&self.path, 0o644).await?;
        info!(path = %self.path.display(), "Restored cookie file from backup");
        Ok(())
    }
}

fn backup_path_for(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map_or_else(|| "cookies".into(), |s| s.to_string_lossy());
    let name = match path.extension() {
        Some(ext) => format!("{stem}_backup.{}", ext.to_string_lossy()),
        None => format!("{stem}_backup"),
    };
    path.with_file_name(name)
}

async fn remove_if_present(path: &Path) -> Result<bool, StoreError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const YOUTUBE: &str = "# Netscape HTTP Cookie File\n\
        .youtube.com\tTRUE\t/\tTRUE\t1893456000\tSID\tone\n\
        .youtube.com\tTRUE\t/\tTRUE\t1000\tHSID\ttwo\n\
        .google.com\tTRUE\t/\tTRUE\t0\tNID\tthree\n";

    const OTHER: &str = ".example.com\tTRUE\t/\tFALSE\t0\ta\tb\n";

    fn store(dir: &Path) -> CookieFileStore {
        CookieFileStore::new(dir.join("cookies.txt"))
    }

    #[test]
    fn test_backup_path() {
        let store = CookieFileStore::new("/srv/app/cookies.txt");
        assert_eq!(store.backup_path(), Path::new("/srv/app/cookies_backup.txt"));

        let store = CookieFileStore::new("/srv/app/jar");
        assert_eq!(store.backup_path(), Path::new("/srv/app/jar_backup"));
    }

    #[tokio::test]
    async fn test_install_then_reinstall_backs_up() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let first = store.install(YOUTUBE, &["youtube.com"]).await.unwrap();
        assert_eq!(first, InstallOutcome { cookie_count: 3, backed_up: false });

        let second = store.install(OTHER, &[]).await.unwrap();
        assert!(second.backed_up);

        let backup = tokio::fs::read_to_string(store.backup_path()).await.unwrap();
        assert_eq!(backup, YOUTUBE);
        let current = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(current, OTHER);
    }

    #[tokio::test]
    async fn test_install_rejects_bad_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let result = store.install("", &[]).await;
        assert!(matches!(result, Err(StoreError::InvalidCookies(_))));

        let result = store.install("just some text", &[]).await;
        assert!(matches!(result, Err(StoreError::InvalidCookies(_))));

        let result = store.install(OTHER, &["youtube.com", "google.com"]).await;
        assert!(matches!(result, Err(StoreError::InvalidCookies(_))));

        assert!(!store.path().exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_installed_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        store.install(YOUTUBE, &[]).await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[tokio::test]
    async fn test_status_missing() {
        let dir = tempfile::tempdir().unwrap();
        let status = store(dir.path()).status().await.unwrap();

        assert!(!status.exists);
        assert!(!status.backup_exists);
        assert_eq!(status.cookie_count, 0);
        assert_eq!(
            status.recommendations(),
            vec!["Install a cookie file exported from a signed-in browser session"]
        );
    }

    #[tokio::test]
    async fn test_status_counts_expired() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        store.install(YOUTUBE, &[]).await.unwrap();

        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let status = store.status_at(now).await.unwrap();

        assert!(status.exists);
        assert!(status.is_readable);
        assert_eq!(status.file_size, YOUTUBE.len() as u64);
        assert!(status.last_modified.is_some());
        assert_eq!(status.cookie_count, 3);
        assert_eq!(status.expired_count, 1);

        let advice = status.recommendations();
        assert_eq!(advice[0], "Few cookies found; authentication may be unreliable");
        assert_eq!(advice[1], "1 of 3 cookies have expired; export a fresh file");
    }

    #[test]
    fn test_few_cookies_threshold() {
        let status = |cookie_count| CookieFileStatus {
            path: PathBuf::from("cookies.txt"),
            exists: true,
            file_size: 100,
            last_modified: None,
            is_readable: true,
            cookie_count,
            expired_count: 0,
            backup_exists: false,
        };

        assert_eq!(
            status(FEW_COOKIES - 1).recommendations()[0],
            "Few cookies found; authentication may be unreliable"
        );
        assert_eq!(status(FEW_COOKIES).recommendations()[0], "Cookie file looks usable");
    }

    #[tokio::test]
    async fn test_restore() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        assert!(matches!(store.restore().await, Err(StoreError::NoBackup(_))));

        store.install(YOUTUBE, &[]).await.unwrap();
        store.install(OTHER, &[]).await.unwrap();
        store.restore().await.unwrap();

        let current = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(current, YOUTUBE);
    }

    #[tokio::test]
    async fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        assert_eq!(store.delete().await.unwrap(), DeleteOutcome::default());

        store.install(YOUTUBE, &[]).await.unwrap();
        store.install(OTHER, &[]).await.unwrap();
        let outcome = store.delete().await.unwrap();

        assert!(outcome.cookie_file);
        assert!(outcome.backup);
        assert!(!store.path().exists());
        assert!(!store.backup_path().exists());
    }
}
