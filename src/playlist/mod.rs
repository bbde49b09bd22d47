//! Playlist collaborator.
//!
//! The host player owns the playlist. The watcher reaches it through a
//! [`PlaylistHost`] injected at construction, acquires a [`PlaylistRef`] for
//! each mutation and drops it straight after.

pub mod memory;

pub use memory::{MemoryPlaylist, MemoryPlaylistHost};

use discwatch_common::{ItemId, NodeId, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared, lockable reference to a playlist.
pub type PlaylistRef = Arc<Mutex<dyn Playlist>>;

/// A playable playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: ItemId,
    pub uri: String,
    pub name: String,
    /// Skipped during sequential playback while set.
    pub skip: bool,
}

/// Mutation API of a host playlist.
pub trait Playlist: Send {
    /// Create a category node at the root of the playlist, or return the
    /// existing node with that name.
    fn create_category_node(&mut self, name: &str) -> NodeId;

    /// Construct a new item. Fails with
    /// [`discwatch_common::Error::Allocation`] when the playlist cannot take
    /// another item.
    fn new_item(&mut self, uri: &str, name: &str) -> Result<PlaylistItem>;

    /// Append an item at the end of a category node.
    fn append_item(&mut self, item: PlaylistItem, node: NodeId) -> Result<()>;
}

/// Locates the host playlist.
pub trait PlaylistHost: Send + Sync {
    /// Fails with [`discwatch_common::Error::NotFound`] when no playlist is
    /// available.
    fn find_playlist(&self) -> Result<PlaylistRef>;
}
