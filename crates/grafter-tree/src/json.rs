//! The JSON tree document: `{"root": {"type": ..., "data": ..., "children": [...]}}`.
//!
//! `data` is left out when empty and `children` when there are none.

use serde::{Deserialize, Serialize};

use crate::{Factory, NULL_TYPE_NAME, Node, NodeRef, NullNode};

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("malformed tree document: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize)]
struct Document {
    root: Entry,
}

#[derive(Serialize, Deserialize)]
struct Entry {
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    data: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Entry>,
}

impl Entry {
    fn from_node(node: &dyn Node) -> Self {
        Self {
            node_type: node.type_name(),
            data: node.data().to_owned(),
            children: node.children().iter().map(|child| Self::from_node(&**child)).collect(),
        }
    }

    fn into_node(self, factory: &dyn Factory) -> NodeRef {
        if self.node_type == NULL_TYPE_NAME {
            return NullNode::create();
        }

        let children = self.children.into_iter().map(|child| child.into_node(factory)).collect();
        let mut builder = factory.create_builder(&self.node_type);
        builder.set_data(self.data);
        builder.set_children(children);
        builder.create_node()
    }
}

/// Pretty-printed document for the tree rooted at `root`.
pub fn to_json(root: &dyn Node) -> Result<String, TreeError> {
    Ok(serde_json::to_string_pretty(&Document { root: Entry::from_node(root) })?)
}

/// Decodes a document, building every node through `factory`.
pub fn from_json(text: &str, factory: &dyn Factory) -> Result<NodeRef, TreeError> {
    let document: Document = serde_json::from_str(text)?;
    Ok(document.root.into_node(factory))
}
