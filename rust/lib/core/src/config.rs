use std::path::PathBuf;

/// Storage locations and listen address shared by the server binary and
/// the modules it wires together.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Root directory for all persistent data.
    pub data_dir: Option<PathBuf>,

    /// Path to the SQLite database file.
    /// Defaults to `{data_dir}/helpdesk.sqlite` if not specified.
    pub sqlite_path: Option<PathBuf>,

    /// Directory where uploaded attachments are written.
    /// Defaults to `{data_dir}/uploads/` if not specified.
    pub upload_dir: Option<PathBuf>,

    /// Listen address for the HTTP server.
    pub listen: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            sqlite_path: None,
            upload_dir: None,
            listen: "0.0.0.0:8000".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve the SQLite database path, falling back to `{data_dir}/helpdesk.sqlite`.
    pub fn resolve_sqlite_path(&self) -> PathBuf {
        self.sqlite_path
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath("helpdesk.sqlite"))
    }

    /// Resolve the attachment upload directory.
    pub fn resolve_upload_dir(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath("uploads"))
    }

    fn resolve_data_subpath(&self, name: &str) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(|d| d.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }
}
