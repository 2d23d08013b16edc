use std::collections::HashMap;
use std::sync::Arc;

use super::node::{NestedNode, Node, NodeId, NodeKind};
use super::TreeError;

/// Immutable snapshot of the project tree.
///
/// Cloning is shallow: nodes are shared `Arc`s. Every reducer returns a new
/// snapshot and leaves `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    nodes: HashMap<NodeId, Arc<Node>>,
    roots: Vec<NodeId>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from its nested form.
    ///
    /// Ids must be unique across the whole input.
    pub fn from_nested(nodes: Vec<NestedNode>) -> Result<Self, TreeError> {
        let mut forest = Forest::new();
        for node in nodes {
            let id = node.id();
            forest.insert_subtree(node, None)?;
            forest.roots.push(id);
        }
        Ok(forest)
    }

    /// Render the forest back into its nested form, preserving child order.
    pub fn to_nested(&self) -> Vec<NestedNode> {
        self.roots.iter().filter_map(|id| self.nest(id)).collect()
    }

    pub fn get(&self, id: &NodeId) -> Option<&Arc<Node>> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids on the path from the root down to `id`, inclusive.
    ///
    /// Empty if `id` is not in the forest.
    pub fn path_to(&self, id: &NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cursor = self.nodes.get(id).map(|n| n.id);
        while let Some(current) = cursor {
            // a parent chain can never be longer than the arena
            if path.len() > self.nodes.len() {
                break;
            }
            path.push(current);
            cursor = self.nodes.get(&current).and_then(|n| n.parent);
        }
        path.reverse();
        path
    }

    /// Append a project folder to the top level.
    pub fn add_project(&self, project: NestedNode) -> Result<Self, TreeError> {
        let id = project.id();
        if !matches!(project, NestedNode::Folder { .. }) {
            return Err(TreeError::NotAFolder(id));
        }

        let mut next = self.clone();
        next.insert_subtree(project, None)?;
        next.roots.push(id);
        Ok(next)
    }

    /// Append `file` to the children of the top-level project `project_id`.
    ///
    /// Projects are never nested, so only roots are considered.
    pub fn add_file_to_project(
        &self,
        project_id: NodeId,
        file: NestedNode,
    ) -> Result<Self, TreeError> {
        if !self.roots.contains(&project_id) {
            return Err(TreeError::ProjectNotFound(project_id));
        }
        let project = self
            .nodes
            .get(&project_id)
            .ok_or(TreeError::ProjectNotFound(project_id))?;

        let mut updated = Node::clone(project);
        match &mut updated.kind {
            NodeKind::Folder { children } => children.push(file.id()),
            NodeKind::File { .. } => return Err(TreeError::NotAFolder(project_id)),
        }

        let mut next = self.clone();
        next.insert_subtree(file, Some(project_id))?;
        next.nodes.insert(project_id, Arc::new(updated));
        Ok(next)
    }

    /// Replace the cached content of the file `file_id`.
    ///
    /// Only the file node and its ancestors are re-allocated. If `file_id` is
    /// absent (or names a folder) the result is identical to `self`.
    pub fn update_file_content(&self, file_id: NodeId, content: impl Into<String>) -> Self {
        let node = match self.nodes.get(&file_id) {
            Some(node) if node.is_file() => node,
            _ => return self.clone(),
        };

        let mut updated = Node::clone(node);
        if let NodeKind::File { content: cached, .. } = &mut updated.kind {
            *cached = Some(content.into());
        }
        let parent = updated.parent;

        let mut next = self.clone();
        next.nodes.insert(file_id, Arc::new(updated));
        next.reallocate_ancestors(parent);
        next
    }

    /// Give every node from `from` up to its root a fresh identity.
    fn reallocate_ancestors(&mut self, from: Option<NodeId>) {
        let mut cursor = from;
        let mut steps = 0;
        while let Some(id) = cursor {
            if steps > self.nodes.len() {
                break;
            }
            steps += 1;

            let fresh = match self.nodes.get(&id) {
                Some(node) => Arc::new(Node::clone(node)),
                None => break,
            };
            cursor = fresh.parent;
            self.nodes.insert(id, fresh);
        }
    }

    fn insert_subtree(
        &mut self,
        nested: NestedNode,
        parent: Option<NodeId>,
    ) -> Result<(), TreeError> {
        let id = nested.id();
        if self.nodes.contains_key(&id) {
            return Err(TreeError::DuplicateNode(id));
        }

        match nested {
            NestedNode::Folder { id, name, children } => {
                let child_ids = children.iter().map(NestedNode::id).collect();
                // claim the id before descending so a descendant can't reuse it
                self.nodes.insert(
                    id,
                    Arc::new(Node {
                        id,
                        name,
                        parent,
                        kind: NodeKind::Folder {
                            children: child_ids,
                        },
                    }),
                );
                for child in children {
                    self.insert_subtree(child, Some(id))?;
                }
            }
            NestedNode::File {
                id,
                name,
                project_id,
                file_type,
                content,
            } => {
                self.nodes.insert(
                    id,
                    Arc::new(Node {
                        id,
                        name,
                        parent,
                        kind: NodeKind::File {
                            project_id,
                            file_type,
                            content,
                        },
                    }),
                );
            }
        }

        Ok(())
    }

    fn nest(&self, id: &NodeId) -> Option<NestedNode> {
        let node = self.nodes.get(id)?;
        let nested = match &node.kind {
            NodeKind::Folder { children } => NestedNode::Folder {
                id: node.id,
                name: node.name.clone(),
                children: children.iter().filter_map(|c| self.nest(c)).collect(),
            },
            NodeKind::File {
                project_id,
                file_type,
                content,
            } => NestedNode::File {
                id: node.id,
                name: node.name.clone(),
                project_id: *project_id,
                file_type: file_type.clone(),
                content: content.clone(),
            },
        };
        Some(nested)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    struct Fixture {
        forest: Forest,
        novel: NodeId,
        chapter: NodeId,
        characters: NodeId,
        hero: NodeId,
        script: NodeId,
        scene: NodeId,
    }

    fn fixture() -> Fixture {
        let (novel, chapter, characters, hero) = (
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        let (script, scene) = (Uuid::new_v4(), Uuid::new_v4());

        let nested = vec![
            NestedNode::Folder {
                id: novel,
                name: "Novel Project".into(),
                children: vec![
                    NestedNode::File {
                        id: chapter,
                        name: "Chapter 1.md".into(),
                        project_id: novel,
                        file_type: Some("markdown".into()),
                        content: Some("# Chapter 1".into()),
                    },
                    NestedNode::Folder {
                        id: characters,
                        name: "Characters".into(),
                        children: vec![NestedNode::File {
                            id: hero,
                            name: "Hero.md".into(),
                            project_id: novel,
                            file_type: None,
                            content: Some("## Hero".into()),
                        }],
                    },
                ],
            },
            NestedNode::Folder {
                id: script,
                name: "Script Project".into(),
                children: vec![NestedNode::file(scene, "Scene1.fountain", script)],
            },
        ];

        Fixture {
            forest: Forest::from_nested(nested).unwrap(),
            novel,
            chapter,
            characters,
            hero,
            script,
            scene,
        }
    }

    fn same(a: &Forest, b: &Forest, id: &NodeId) -> bool {
        Arc::ptr_eq(a.get(id).unwrap(), b.get(id).unwrap())
    }

    #[test]
    fn test_from_nested_links_parents() {
        let f = fixture();
        assert_eq!(f.forest.len(), 6);
        assert_eq!(f.forest.roots(), &[f.novel, f.script]);
        assert_eq!(f.forest.get(&f.hero).unwrap().parent, Some(f.characters));
        assert_eq!(f.forest.get(&f.novel).unwrap().parent, None);
        assert_eq!(
            f.forest.get(&f.novel).unwrap().children(),
            &[f.chapter, f.characters]
        );
    }

    #[test]
    fn test_nested_round_trip_preserves_order() {
        let f = fixture();
        let rebuilt = Forest::from_nested(f.forest.to_nested()).unwrap();
        assert_eq!(rebuilt, f.forest);
    }

    #[test]
    fn test_from_nested_rejects_duplicate_ids() {
        let id = Uuid::new_v4();
        let project = Uuid::new_v4();
        let nested = vec![NestedNode::Folder {
            id: project,
            name: "p".into(),
            children: vec![
                NestedNode::file(id, "a.md", project),
                NestedNode::file(id, "b.md", project),
            ],
        }];
        assert_eq!(
            Forest::from_nested(nested),
            Err(TreeError::DuplicateNode(id))
        );
    }

    #[test]
    fn test_from_nested_rejects_self_reference() {
        let id = Uuid::new_v4();
        let nested = vec![NestedNode::Folder {
            id,
            name: "loop".into(),
            children: vec![NestedNode::folder(id, "loop again")],
        }];
        assert_eq!(
            Forest::from_nested(nested),
            Err(TreeError::DuplicateNode(id))
        );
    }

    #[test]
    fn test_update_replaces_only_path_to_node() {
        let f = fixture();
        let next = f.forest.update_file_content(f.hero, "## Hero\n\n- Brave");

        assert_eq!(
            next.get(&f.hero).unwrap().content(),
            Some("## Hero\n\n- Brave")
        );

        // path root -> node gets fresh identities
        assert!(!same(&f.forest, &next, &f.novel));
        assert!(!same(&f.forest, &next, &f.characters));
        assert!(!same(&f.forest, &next, &f.hero));
        // ancestors are structurally unchanged
        assert_eq!(f.forest.get(&f.novel), next.get(&f.novel));
        assert_eq!(f.forest.get(&f.characters), next.get(&f.characters));

        // everything else is shared
        assert!(same(&f.forest, &next, &f.chapter));
        assert!(same(&f.forest, &next, &f.script));
        assert!(same(&f.forest, &next, &f.scene));

        // the input snapshot is untouched
        assert_eq!(f.forest.get(&f.hero).unwrap().content(), Some("## Hero"));
    }

    #[test]
    fn test_update_missing_id_is_identity() {
        let f = fixture();
        let next = f.forest.update_file_content(Uuid::new_v4(), "ignored");

        assert_eq!(next, f.forest);
        for id in [f.novel, f.chapter, f.characters, f.hero, f.script, f.scene] {
            assert!(same(&f.forest, &next, &id));
        }
    }

    #[test]
    fn test_update_folder_id_is_identity() {
        let f = fixture();
        let next = f.forest.update_file_content(f.characters, "not a file");
        assert_eq!(next, f.forest);
        assert!(same(&f.forest, &next, &f.characters));
    }

    #[test]
    fn test_update_same_content_twice() {
        let f = fixture();
        let once = f.forest.update_file_content(f.scene, "INT. COFFEE SHOP - DAY");
        let twice = once.update_file_content(f.scene, "INT. COFFEE SHOP - DAY");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_add_project_appends_root() {
        let f = fixture();
        let id = Uuid::new_v4();
        let next = f.forest.add_project(NestedNode::folder(id, "Poems")).unwrap();

        assert_eq!(next.roots(), &[f.novel, f.script, id]);
        assert!(!f.forest.contains(&id));
        assert!(same(&f.forest, &next, &f.novel));
    }

    #[test]
    fn test_add_project_rejects_duplicates_and_files() {
        let f = fixture();
        assert_eq!(
            f.forest.add_project(NestedNode::folder(f.novel, "again")),
            Err(TreeError::DuplicateNode(f.novel))
        );

        let id = Uuid::new_v4();
        assert_eq!(
            f.forest.add_project(NestedNode::file(id, "loose.md", id)),
            Err(TreeError::NotAFolder(id))
        );
    }

    #[test]
    fn test_add_file_to_project() {
        let f = fixture();
        let id = Uuid::new_v4();
        let next = f
            .forest
            .add_file_to_project(f.script, NestedNode::file(id, "Scene2.fountain", f.script))
            .unwrap();

        assert_eq!(next.get(&f.script).unwrap().children(), &[f.scene, id]);
        assert_eq!(next.get(&id).unwrap().parent, Some(f.script));
        assert!(same(&f.forest, &next, &f.novel));
        assert!(same(&f.forest, &next, &f.scene));
        assert_eq!(f.forest.get(&f.script).unwrap().children(), &[f.scene]);
    }

    #[test]
    fn test_add_file_to_project_top_level_only() {
        let f = fixture();
        let id = Uuid::new_v4();
        assert_eq!(
            f.forest
                .add_file_to_project(f.characters, NestedNode::file(id, "Villain.md", f.novel)),
            Err(TreeError::ProjectNotFound(f.characters))
        );

        let missing = Uuid::new_v4();
        assert_eq!(
            f.forest
                .add_file_to_project(missing, NestedNode::file(id, "x.md", missing)),
            Err(TreeError::ProjectNotFound(missing))
        );
    }

    #[test]
    fn test_add_file_rejects_existing_id() {
        let f = fixture();
        assert_eq!(
            f.forest
                .add_file_to_project(f.script, NestedNode::file(f.hero, "dup.md", f.script)),
            Err(TreeError::DuplicateNode(f.hero))
        );
    }

    #[test]
    fn test_path_to() {
        let f = fixture();
        assert_eq!(f.forest.path_to(&f.hero), vec![f.novel, f.characters, f.hero]);
        assert_eq!(f.forest.path_to(&f.script), vec![f.script]);
        assert!(f.forest.path_to(&Uuid::new_v4()).is_empty());
    }
}
