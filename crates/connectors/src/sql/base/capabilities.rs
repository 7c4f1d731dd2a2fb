use model::core::version::ServerVersion;
use tracing::debug;

/// First server version that accepts `bulk_args` in a single request.
pub const BULK_INSERT_MIN_VERSION: ServerVersion = ServerVersion::new(0, 42, 0);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DbCapabilities {
    pub bulk_args: bool, // many parameter sets per round trip
}

impl DbCapabilities {
    /// Derives capabilities from the lowest version among the cluster nodes;
    /// a feature is only usable when every node supports it.
    pub fn for_version(lowest_server_version: ServerVersion) -> Self {
        let capabilities = DbCapabilities {
            bulk_args: lowest_server_version >= BULK_INSERT_MIN_VERSION,
        };
        debug!(
            "Capabilities for server version {}: {:?}",
            lowest_server_version, capabilities
        );
        capabilities
    }
}
