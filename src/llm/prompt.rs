//! System prompt loading.

use std::path::Path;

use crate::error::{NewsdeskError, Result};

/// Name of the prompt used for question answering.
pub const DEFAULT_SYSTEM: &str = "default";

/// Read the system prompt called `system` from `dir`.
///
/// Only [`DEFAULT_SYSTEM`] is known; it lives in `default.txt`.
pub async fn load_system_prompt(dir: impl AsRef<Path>, system: &str) -> Result<String> {
    let file_name = match system {
        DEFAULT_SYSTEM => "default.txt",
        other => {
            return Err(NewsdeskError::Prompt(format!(
                "Invalid system type '{}'",
                other
            )))
        }
    };

    let path = dir.as_ref().join(file_name);
    tokio::fs::read_to_string(&path).await.map_err(|e| {
        NewsdeskError::Prompt(format!("failed to read {}: {}", path.display(), e))
    })
}
