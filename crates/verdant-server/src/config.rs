use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Where multipart uploads are spooled before being moved into a
    /// record directory. Must live on the same filesystem as the content
    /// tree for the move to stay a rename.
    pub temp_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3001".parse().unwrap(),
            temp_dir: PathBuf::from("uploads/temp"),
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}
