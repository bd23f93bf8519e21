use serde::{Deserialize, Serialize};

/// A node of the upstream category tree.
///
/// Every field is optional because upstream nodes are not uniform: grouping
/// nodes and promo entries often lack routing parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub name: Option<String>,
    pub url: Option<String>,
    pub shard: Option<String>,
    pub query: Option<String>,
    #[serde(default, alias = "childs", skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CategoryNode>>,
}

impl CategoryNode {
    /// Projects the node onto its lookup record, or `None` when any of the
    /// four routing fields is missing.
    pub fn to_flat(&self) -> Option<FlatCategory> {
        Some(FlatCategory {
            name: self.name.clone()?,
            url: self.url.clone()?,
            shard: self.shard.clone()?,
            query: self.query.clone()?,
        })
    }
}

impl Drop for CategoryNode {
    // Unlink descendants one at a time so dropping a deep tree does not recurse
    fn drop(&mut self) {
        let mut pending = self.children.take().unwrap_or_default();
        while let Some(mut node) = pending.pop() {
            if let Some(children) = node.children.take() {
                pending.extend(children);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatCategory {
    pub name: String,
    pub url: String,
    pub shard: String,
    pub query: String,
}
