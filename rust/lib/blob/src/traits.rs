use crate::error::BlobError;

/// BlobStore holds uploaded attachment bytes.
///
/// Keys are flat, generated names such as `3f2a9c…e1.png`. The default
/// implementation (`FileStore`) maps keys to files in one directory; an
/// object-storage backend only has to implement this trait.
pub trait BlobStore: Send + Sync {
    /// Store a blob. Overwrites if the key already exists.
    fn put(&self, key: &str, data: &[u8]) -> Result<(), BlobError>;

    /// Retrieve a blob. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BlobError>;

    /// Size in bytes of a stored blob, None if the key does not exist.
    fn size(&self, key: &str) -> Result<Option<u64>, BlobError>;
}
