//! Stored-backup files.
//!
//! A backup file is only trusted after full validation: format tags
//! first (format, version, origin), content second (schema, hex
//! fields, lengths). Each stage has its own rejection so the caller
//! can tell a foreign file from a future revision from another
//! stack's backup.

use std::path::Path;

use serde_json::Value;

use crate::error::BackupError;
use crate::model::CoordinatorBackup;
use crate::unified;

/// Load and validate a stored backup.
///
/// `Ok(None)` means there is no file at `path`: the normal first-run
/// outcome, deliberately not an error.
pub async fn read_stored_backup(path: &Path) -> Result<Option<CoordinatorBackup>, BackupError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        tracing::debug!("no stored backup at {}", path.display());
        return Ok(None);
    }

    let raw = tokio::fs::read(path)
        .await
        .map_err(|e| BackupError::Corrupted(e.to_string()))?;
    let document: Value =
        serde_json::from_slice(&raw).map_err(|e| BackupError::Corrupted(e.to_string()))?;

    validate_tags(&document)?;

    let backup = unified::from_document(document)?;
    tracing::debug!(
        "stored backup loaded from {} ({} devices)",
        path.display(),
        backup.devices.len()
    );
    Ok(Some(backup))
}

/// Render and write a backup to `path`, pretty-printed.
pub async fn write_stored_backup(
    path: &Path,
    backup: &CoordinatorBackup,
) -> Result<(), BackupError> {
    let document = unified::to_unified(backup);
    let rendered =
        serde_json::to_string_pretty(&document).map_err(BackupError::Serialization)?;
    tokio::fs::write(path, rendered).await?;
    tracing::debug!("backup written to {}", path.display());
    Ok(())
}

/// Check the document tags, fail-fast, in order.
fn validate_tags(document: &Value) -> Result<(), BackupError> {
    let metadata = &document["metadata"];
    let version = &metadata["version"];
    if metadata["format"].as_str() != Some(unified::FORMAT_TAG) || version.is_null() {
        return Err(BackupError::UnknownFormat);
    }
    if version.as_u64() != Some(u64::from(unified::FORMAT_VERSION)) {
        return Err(BackupError::UnsupportedVersion(version.clone()));
    }
    if metadata["internal"]["ezspVersion"].is_null() {
        return Err(BackupError::WrongAdapter);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tagged(version: Value, internal: Value) -> Value {
        json!({
            "metadata": {
                "format": "zigpy/open-coordinator-backup",
                "version": version,
                "source": "test",
                "internal": internal,
            }
        })
    }

    #[test]
    fn accepts_current_tags() {
        let doc = tagged(json!(1), json!({"date": "", "ezspVersion": 8}));
        assert!(validate_tags(&doc).is_ok());
    }

    #[test]
    fn rejects_missing_metadata() {
        let err = validate_tags(&json!({})).unwrap_err();
        assert!(matches!(err, BackupError::UnknownFormat));
    }

    #[test]
    fn rejects_foreign_format() {
        let doc = json!({
            "metadata": {"format": "acme/backup", "version": 1}
        });
        let err = validate_tags(&doc).unwrap_err();
        assert!(matches!(err, BackupError::UnknownFormat));
    }

    #[test]
    fn rejects_missing_version() {
        let doc = json!({
            "metadata": {"format": "zigpy/open-coordinator-backup"}
        });
        let err = validate_tags(&doc).unwrap_err();
        assert!(matches!(err, BackupError::UnknownFormat));
    }

    #[test]
    fn rejects_future_version() {
        let doc = tagged(json!(2), json!({"ezspVersion": 8}));
        let err = validate_tags(&doc).unwrap_err();
        let BackupError::UnsupportedVersion(version) = err else {
            panic!("expected UnsupportedVersion");
        };
        assert_eq!(version, json!(2));
    }

    #[test]
    fn rejects_string_version() {
        let doc = tagged(json!("1"), json!({"ezspVersion": 8}));
        let err = validate_tags(&doc).unwrap_err();
        assert!(matches!(err, BackupError::UnsupportedVersion(_)));
    }

    #[test]
    fn rejects_other_stack_origin() {
        // znpVersion marks a different adapter family
        let doc = tagged(json!(1), json!({"date": "", "znpVersion": 2}));
        let err = validate_tags(&doc).unwrap_err();
        assert!(matches!(err, BackupError::WrongAdapter));
    }

    #[test]
    fn rejects_missing_internal() {
        let doc = json!({
            "metadata": {"format": "zigpy/open-coordinator-backup", "version": 1}
        });
        let err = validate_tags(&doc).unwrap_err();
        assert!(matches!(err, BackupError::WrongAdapter));
    }
}
