//! Layout tree management

use slotmap::{new_key_type, SlotMap};
use taffy::prelude::*;

use crate::error::LayoutError;

new_key_type! {
    pub struct LayoutNodeId;
}

/// Maps between Blinc node IDs and Taffy node IDs
pub struct LayoutTree {
    taffy: TaffyTree,
    node_map: SlotMap<LayoutNodeId, NodeId>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: SlotMap::with_key(),
        }
    }

    fn node(&self, id: LayoutNodeId) -> Result<NodeId, LayoutError> {
        self.node_map
            .get(id)
            .copied()
            .ok_or(LayoutError::UnknownNode)
    }

    /// Create a new layout node with the given style
    pub fn create_node(&mut self, style: Style) -> Result<LayoutNodeId, LayoutError> {
        let taffy_node = self.taffy.new_leaf(style)?;
        Ok(self.node_map.insert(taffy_node))
    }

    /// Set the style for a node
    pub fn set_style(&mut self, id: LayoutNodeId, style: Style) -> Result<(), LayoutError> {
        let node = self.node(id)?;
        self.taffy.set_style(node, style)?;
        Ok(())
    }

    /// Get the style of a node
    pub fn style(&self, id: LayoutNodeId) -> Option<&Style> {
        self.node_map
            .get(id)
            .and_then(|&node| self.taffy.style(node).ok())
    }

    /// Insert a child at `index` among the parent's children
    pub fn insert_child(
        &mut self,
        parent: LayoutNodeId,
        index: usize,
        child: LayoutNodeId,
    ) -> Result<(), LayoutError> {
        let (parent, child) = (self.node(parent)?, self.node(child)?);
        self.taffy.insert_child_at_index(parent, index, child)?;
        Ok(())
    }

    /// Detach a child from its parent, keeping the node alive
    pub fn remove_child(
        &mut self,
        parent: LayoutNodeId,
        child: LayoutNodeId,
    ) -> Result<(), LayoutError> {
        let (parent, child) = (self.node(parent)?, self.node(child)?);
        self.taffy.remove_child(parent, child)?;
        Ok(())
    }

    /// Compute layout for a tree rooted at the given node
    pub fn compute_layout(
        &mut self,
        root: LayoutNodeId,
        available_space: Size<AvailableSpace>,
    ) -> Result<(), LayoutError> {
        let node = self.node(root)?;
        self.taffy.compute_layout(node, available_space)?;
        Ok(())
    }

    /// Get the computed layout for a node
    pub fn get_layout(&self, id: LayoutNodeId) -> Option<&Layout> {
        self.node_map
            .get(id)
            .and_then(|&taffy_node| self.taffy.layout(taffy_node).ok())
    }

    /// Remove a node
    pub fn remove_node(&mut self, id: LayoutNodeId) {
        if let Some(taffy_node) = self.node_map.remove(id) {
            let _ = self.taffy.remove(taffy_node);
        }
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}
