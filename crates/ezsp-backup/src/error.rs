use ezsp_session::SessionError;

use crate::unified::UnifiedError;

/// Errors surfaced by backup capture and the stored-backup loader.
///
/// "No backup on disk" is not in here: the loader reports that as
/// `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    /// A session command failed; the capture is abandoned whole.
    #[error("device query failed: {0}")]
    DeviceQuery(#[from] SessionError),

    /// The adapter answered, but not in the shape the negotiated
    /// protocol version promises.
    #[error("malformed adapter response: {detail}")]
    MalformedResponse { detail: String },

    /// The file exists but cannot be read or parsed as JSON.
    #[error("coordinator backup is corrupted ({0})")]
    Corrupted(String),

    /// The document does not carry the open-coordinator-backup tags.
    #[error("unknown backup format")]
    UnknownFormat,

    /// Recognized format, but a revision this crate cannot consume.
    #[error("unsupported open coordinator backup version (version={0})")]
    UnsupportedVersion(serde_json::Value),

    /// The document was produced for a different adapter family.
    #[error("backup format is not for EZSP adapter")]
    WrongAdapter,

    /// Tags check out but the document content does not convert.
    #[error("invalid backup: {0}")]
    InvalidBackup(#[from] UnifiedError),

    /// Rendering a backup as a document failed.
    #[error("backup serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Writing the backup file failed.
    #[error("backup write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_corrupted() {
        let err = BackupError::Corrupted("expected value at line 1 column 2".into());
        assert_eq!(
            err.to_string(),
            "coordinator backup is corrupted (expected value at line 1 column 2)"
        );
    }

    #[test]
    fn test_display_unknown_format() {
        assert_eq!(BackupError::UnknownFormat.to_string(), "unknown backup format");
    }

    #[test]
    fn test_display_unsupported_version_number() {
        let err = BackupError::UnsupportedVersion(serde_json::json!(2));
        assert_eq!(
            err.to_string(),
            "unsupported open coordinator backup version (version=2)"
        );
    }

    #[test]
    fn test_display_unsupported_version_string() {
        let err = BackupError::UnsupportedVersion(serde_json::json!("1"));
        assert_eq!(
            err.to_string(),
            "unsupported open coordinator backup version (version=\"1\")"
        );
    }

    #[test]
    fn test_display_wrong_adapter() {
        assert_eq!(
            BackupError::WrongAdapter.to_string(),
            "backup format is not for EZSP adapter"
        );
    }

    #[test]
    fn test_display_device_query() {
        let err = BackupError::from(SessionError::Status {
            command: "exportKey",
            status: "SL_STATUS_FAIL".into(),
        });
        assert_eq!(
            err.to_string(),
            "device query failed: command exportKey returned status SL_STATUS_FAIL"
        );
    }
}
