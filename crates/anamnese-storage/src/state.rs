use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use anamnese_core::keys;
use anamnese_core::models::record::AssessmentRecord;

use crate::error::StorageError;

/// Load a JSON file below `root`. Returns `Ok(None)` if it does not exist.
pub fn load_state<T: DeserializeOwned>(root: &Path, key: &str) -> Result<Option<T>, StorageError> {
    let path = root.join(key);
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::io(path, e)),
    };
    Ok(Some(serde_json::from_slice(&bytes)?))
}

/// Save a value as pretty JSON below `root`.
///
/// Writes to a temp file and renames it into place, so a crash never leaves
/// a half-written file behind.
pub fn save_state<T: Serialize>(root: &Path, key: &str, value: &T) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    write_atomic(root, key, &body)
}

/// Write raw bytes below `root` via temp file + rename.
pub fn write_atomic(root: &Path, key: &str, body: &[u8]) -> Result<(), StorageError> {
    let path = root.join(key);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
    }

    let mut tmp_path = path.clone().into_os_string();
    tmp_path.push(".tmp");
    std::fs::write(&tmp_path, body).map_err(|e| StorageError::io(&tmp_path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
            .map_err(|e| StorageError::io(&tmp_path, e))?;
    }

    std::fs::rename(&tmp_path, &path).map_err(|e| StorageError::io(&path, e))
}

/// Persist a completed assessment. Returns the key it was written under.
pub fn save_record(root: &Path, record: &AssessmentRecord) -> Result<String, StorageError> {
    let key = keys::record(&record.user_id, record.session_id);
    write_atomic(root, &key, &record.to_json()?)?;
    tracing::info!(
        user_id = %record.user_id,
        session_id = %record.session_id,
        key = %key,
        "assessment record saved"
    );
    Ok(key)
}
