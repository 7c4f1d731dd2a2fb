use crate::cursor::Cursor;
use connectors::sql::base::{adapter::SqlClient, capabilities::DbCapabilities};
use model::core::version::ServerVersion;
use std::{
    num::NonZeroUsize,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tracing::info;

/// A client plus the server facts cursors need.
///
/// Clones share the client and the closed flag, so closing any clone closes
/// the connection for every cursor created from it.
#[derive(Clone)]
pub struct Connection {
    client: Arc<dyn SqlClient>,
    closed: Arc<AtomicBool>,
    lowest_server_version: ServerVersion,
}

impl Connection {
    pub fn new(client: Arc<dyn SqlClient>, lowest_server_version: ServerVersion) -> Self {
        Connection {
            client,
            closed: Arc::new(AtomicBool::new(false)),
            lowest_server_version,
        }
    }

    pub fn client(&self) -> &dyn SqlClient {
        self.client.as_ref()
    }

    /// Lowest version among the nodes the client talks to.
    pub fn lowest_server_version(&self) -> ServerVersion {
        self.lowest_server_version
    }

    pub fn capabilities(&self) -> DbCapabilities {
        DbCapabilities::for_version(self.lowest_server_version)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            info!("Connection closed");
        }
    }

    /// New cursor with the default batch size.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.clone(), None)
    }

    pub fn cursor_with_batch_size(&self, batch_size: NonZeroUsize) -> Cursor {
        Cursor::new(self.clone(), Some(batch_size))
    }
}
