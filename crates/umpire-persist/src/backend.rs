use crate::error::Result;

/// Synchronous string key/value store
///
/// Mirrors browser local storage: whole values are written at once and the
/// last write wins. Implementations must be usable from several threads.
pub trait StorageBackend: Send + Sync {
    /// Read a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}
