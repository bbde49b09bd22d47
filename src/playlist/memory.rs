//! In-memory playlist.
//!
//! A flat list of category nodes, each holding an ordered list of items.
//! Backs the `watch` command and the test suite, and renders a node as an
//! extended M3U document.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use discwatch_common::{Error, ItemId, NodeId, Result};

use super::{Playlist, PlaylistHost, PlaylistItem, PlaylistRef};

#[derive(Debug, Clone)]
pub struct CategoryNode {
    pub id: NodeId,
    pub name: String,
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Default)]
pub struct MemoryPlaylist {
    nodes: Vec<CategoryNode>,
    capacity: Option<usize>,
}

impl MemoryPlaylist {
    pub fn new() -> Self {
        Self::default()
    }

    /// A playlist that refuses new items once `capacity` items have been
    /// appended.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&CategoryNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&CategoryNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn nodes(&self) -> &[CategoryNode] {
        &self.nodes
    }

    /// Total number of items appended across all nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().map(|n| n.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render a node as an extended M3U playlist.
    pub fn to_m3u(&self, id: NodeId) -> Option<String> {
        let node = self.node(id)?;
        let mut out = String::from("#EXTM3U\n");
        out.push_str(&format!("#PLAYLIST:{}\n", node.name));
        for item in &node.items {
            out.push_str(&format!("#EXTINF:-1,{}\n", single_line(&item.name)));
            out.push_str(&single_line(&item.uri));
            out.push('\n');
        }
        Some(out)
    }
}

/// Each M3U entry is line-oriented, so embedded line breaks become spaces.
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

impl Playlist for MemoryPlaylist {
    fn create_category_node(&mut self, name: &str) -> NodeId {
        if let Some(node) = self.node_by_name(name) {
            return node.id;
        }

        let id = NodeId::new();
        self.nodes.push(CategoryNode {
            id,
            name: name.to_string(),
            items: Vec::new(),
        });
        tracing::debug!(node = %id, name, "Created playlist category node");
        id
    }

    fn new_item(&mut self, uri: &str, name: &str) -> Result<PlaylistItem> {
        if let Some(capacity) = self.capacity {
            if self.len() >= capacity {
                return Err(Error::allocation(format!(
                    "playlist capacity of {capacity} items reached"
                )));
            }
        }

        Ok(PlaylistItem {
            id: ItemId::new(),
            uri: uri.to_string(),
            name: name.to_string(),
            skip: true,
        })
    }

    fn append_item(&mut self, item: PlaylistItem, node: NodeId) -> Result<()> {
        let target = self
            .nodes
            .iter_mut()
            .find(|n| n.id == node)
            .ok_or_else(|| Error::not_found("category node", node.to_string()))?;
        target.items.push(item);
        Ok(())
    }
}

/// Hands out a shared [`MemoryPlaylist`].
///
/// The playlist can be detached to simulate the host tearing it down.
#[derive(Debug, Default)]
pub struct MemoryPlaylistHost {
    playlist: RwLock<Option<Arc<Mutex<MemoryPlaylist>>>>,
}

impl MemoryPlaylistHost {
    pub fn new(playlist: Arc<Mutex<MemoryPlaylist>>) -> Self {
        Self {
            playlist: RwLock::new(Some(playlist)),
        }
    }

    /// A host with no playlist.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Remove the playlist, returning it if one was attached.
    pub fn detach(&self) -> Option<Arc<Mutex<MemoryPlaylist>>> {
        self.playlist.write().take()
    }
}

impl PlaylistHost for MemoryPlaylistHost {
    fn find_playlist(&self) -> Result<PlaylistRef> {
        match self.playlist.read().as_ref() {
            Some(playlist) => {
                let playlist: PlaylistRef = playlist.clone();
                Ok(playlist)
            }
            None => Err(Error::not_found("playlist", "memory")),
        }
    }
}
