use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use folio_config::ServerConfig;
use folio_core::IntakeHandler;
use folio_server::{build_router, serve};
use folio_store::FileMessageStore;

/// Start a server on an ephemeral port that appends to `log_path`.
pub async fn start_server(log_path: &Path, body_limit_bytes: usize) -> SocketAddr {
    let server = ServerConfig {
        body_limit_bytes,
        ..ServerConfig::default()
    };
    let handler = IntakeHandler::new(Box::new(FileMessageStore::new(log_path)));
    let router = build_router(handler, &server);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(serve(listener, router, std::future::pending()));
    addr
}

pub fn log_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("contact_messages.txt")
}
