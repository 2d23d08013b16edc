use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Node ids are the persistent ids of the backing project or file.
pub type NodeId = Uuid;

/// A node as stored in the arena. Children are referenced by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Folder {
        children: Vec<NodeId>,
    },
    File {
        project_id: Uuid,
        file_type: Option<String>,
        /// Cached content; `None` until the file has been opened
        content: Option<String>,
    },
}

impl Node {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Folder { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { content, .. } => content.as_deref(),
            NodeKind::Folder { .. } => None,
        }
    }
}

/// The nested shape a tree view renders and that crosses serialization
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NestedNode {
    Folder {
        id: NodeId,
        name: String,
        #[serde(default)]
        children: Vec<NestedNode>,
    },
    File {
        id: NodeId,
        name: String,
        project_id: Uuid,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
}

impl NestedNode {
    pub fn folder(id: NodeId, name: impl Into<String>) -> Self {
        NestedNode::Folder {
            id,
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn file(id: NodeId, name: impl Into<String>, project_id: Uuid) -> Self {
        NestedNode::File {
            id,
            name: name.into(),
            project_id,
            file_type: None,
            content: None,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            NestedNode::Folder { id, .. } | NestedNode::File { id, .. } => *id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NestedNode::Folder { name, .. } | NestedNode::File { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_node_wire_shape() {
        let project = Uuid::new_v4();
        let file = Uuid::new_v4();
        let node = NestedNode::Folder {
            id: project,
            name: "Novel".into(),
            children: vec![NestedNode::file(file, "ch1.md", project)],
        };

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "folder");
        assert_eq!(json["children"][0]["type"], "file");
        assert_eq!(json["children"][0]["project_id"], project.to_string());
        assert!(json["children"][0].get("content").is_none());

        let back: NestedNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_folder_without_children_field() {
        let id = Uuid::new_v4();
        let json = serde_json::json!({"type": "folder", "id": id, "name": "Empty"});
        let node: NestedNode = serde_json::from_value(json).unwrap();
        assert_eq!(node, NestedNode::folder(id, "Empty"));
    }
}
