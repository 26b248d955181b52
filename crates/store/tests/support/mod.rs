//! Shared scaffolding for store integration tests: a stub API server and
//! client/store builders wired to it.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use inkpost_client::ApiClient;
use inkpost_session::{MemorySessionStore, SessionStore};

/// Serve `router` on an ephemeral port, returning the base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A client talking to `base_url` with a fresh in-memory session.
pub fn client_with_session(base_url: &str) -> (ApiClient, Arc<MemorySessionStore>) {
    let session = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(base_url, Arc::clone(&session) as Arc<dyn SessionStore>);
    (client, session)
}

/// A base URL nothing listens on; requests fail at the transport level.
pub fn unreachable_base_url() -> String {
    // Bind a listener to reserve a port, then drop it so connections are
    // refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
