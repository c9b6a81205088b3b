//! Folder/album hierarchy models used for browse navigation

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One folder or album entry; children are lazily populated and may be
/// empty pending a further fetch by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    /// "folder" or "album"
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    #[schema(no_recursion)]
    pub children: Vec<TreeNode>,
}

/// A page of tree nodes in the Canto listing envelope shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TreeResult {
    pub results: Vec<TreeNode>,
    pub found: u64,
    pub limit: u32,
    pub start: u32,
}

impl TreeResult {
    /// Synthetic single-folder tree served when the upstream tree
    /// endpoint answers 404 (some tenants don't expose it)
    pub fn fallback_root() -> Self {
        Self {
            results: vec![TreeNode {
                id: "all".to_string(),
                name: "All Assets".to_string(),
                node_type: "folder".to_string(),
                children: Vec::new(),
            }],
            found: 1,
            limit: 1,
            start: 0,
        }
    }
}
