//! Appends insertion requests to the playlist.

use std::sync::Arc;

use discwatch_common::{ItemId, NodeId, Result};

use crate::playlist::PlaylistHost;
use crate::request::InsertionRequest;

/// Sends insertion requests to a single category node.
pub struct Dispatcher {
    host: Arc<dyn PlaylistHost>,
    node: NodeId,
}

impl Dispatcher {
    pub fn new(host: Arc<dyn PlaylistHost>, node: NodeId) -> Self {
        Self { host, node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Append one request under the category node.
    ///
    /// The playlist lock is held for this call only.
    pub fn dispatch(&self, request: &InsertionRequest) -> Result<ItemId> {
        let playlist = self.host.find_playlist()?;
        let mut playlist = playlist.lock();

        let mut item = playlist.new_item(&request.uri, &request.display_name)?;
        item.skip = false;
        let id = item.id;
        playlist.append_item(item, self.node)?;

        tracing::debug!(item = %id, uri = %request.uri, "Appended playlist item");
        Ok(id)
    }
}
