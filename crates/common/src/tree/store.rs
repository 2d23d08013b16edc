use std::sync::Arc;

use super::forest::Forest;
use super::node::{NestedNode, Node, NodeId};
use super::TreeError;

/// Everything the tree view and editor need to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeState {
    pub forest: Forest,
    /// Id of the file open in the editor
    pub current_file: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub enum TreeAction {
    /// Replace the whole forest, e.g. after the initial load
    SetTree(Forest),
    AddProject(NestedNode),
    AddFileToProject {
        project_id: NodeId,
        file: NestedNode,
    },
    UpdateFileContent {
        file_id: NodeId,
        content: String,
    },
    SetCurrentFile(Option<NodeId>),
}

impl TreeState {
    /// Apply `action` to this snapshot, producing the next one.
    pub fn reduce(&self, action: TreeAction) -> Result<TreeState, TreeError> {
        let next = match action {
            TreeAction::SetTree(forest) => {
                // keep the selection only if it still names a file
                let current_file = self
                    .current_file
                    .filter(|id| forest.get(id).is_some_and(|node| node.is_file()));
                TreeState {
                    forest,
                    current_file,
                }
            }
            TreeAction::AddProject(project) => TreeState {
                forest: self.forest.add_project(project)?,
                current_file: self.current_file,
            },
            TreeAction::AddFileToProject { project_id, file } => TreeState {
                forest: self.forest.add_file_to_project(project_id, file)?,
                current_file: self.current_file,
            },
            TreeAction::UpdateFileContent { file_id, content } => TreeState {
                forest: self.forest.update_file_content(file_id, content),
                current_file: self.current_file,
            },
            TreeAction::SetCurrentFile(None) => TreeState {
                forest: self.forest.clone(),
                current_file: None,
            },
            TreeAction::SetCurrentFile(Some(id)) => {
                let node = self.forest.get(&id).ok_or(TreeError::NodeNotFound(id))?;
                if !node.is_file() {
                    return Err(TreeError::NotAFile(id));
                }
                TreeState {
                    forest: self.forest.clone(),
                    current_file: Some(id),
                }
            }
        };
        Ok(next)
    }
}

/// State container owned by the UI root.
///
/// A failed dispatch leaves the state exactly as it was.
#[derive(Debug, Default)]
pub struct TreeStore {
    state: TreeState,
}

impl TreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forest(forest: Forest) -> Self {
        Self {
            state: TreeState {
                forest,
                current_file: None,
            },
        }
    }

    pub fn dispatch(&mut self, action: TreeAction) -> Result<(), TreeError> {
        self.state = self.state.reduce(action)?;
        Ok(())
    }

    pub fn state(&self) -> &TreeState {
        &self.state
    }

    pub fn forest(&self) -> &Forest {
        &self.state.forest
    }

    /// The live node of the open file.
    ///
    /// `None` when nothing is selected or the selection no longer exists.
    pub fn current_file(&self) -> Option<&Arc<Node>> {
        self.state
            .current_file
            .as_ref()
            .and_then(|id| self.state.forest.get(id))
    }
}
