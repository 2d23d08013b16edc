use clap::Args;

use common::prelude::{
    Forest, Language, NestedNode, Node, TreeAction, TreeError, TreeStore,
};
use crate::cli::op::SessionError;
use quillmind_daemon::http_server::api::client::ApiError;
use quillmind_daemon::http_server::api::projects::{ListFilesRequest, ListProjectsRequest};

/// Print every project and its files as a tree.
#[derive(Args, Debug, Clone)]
pub struct Tree;

#[derive(Debug, thiserror::Error)]
pub enum TreeOpError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("inconsistent tree: {0}")]
    Tree(#[from] TreeError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Tree {
    type Error = TreeOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.authenticated_client()?;
        let mut store = TreeStore::new();

        for project in client.call(ListProjectsRequest).await? {
            let project_id = project.project_id;
            store.dispatch(TreeAction::AddProject(NestedNode::folder(
                project_id,
                project.name,
            )))?;

            for file in client.call(ListFilesRequest { project_id }).await? {
                store.dispatch(TreeAction::AddFileToProject {
                    project_id,
                    file: NestedNode::File {
                        id: file.file_id,
                        name: file.name,
                        project_id,
                        file_type: file.file_type,
                        content: None,
                    },
                })?;
            }
        }

        Ok(render(store.forest()))
    }
}

fn render(forest: &Forest) -> String {
    if forest.is_empty() {
        return "No projects found".to_string();
    }
    let mut out = Vec::new();
    for id in forest.roots() {
        if let Some(node) = forest.get(id) {
            out.push(label(node));
            render_children(forest, node, "", &mut out);
        }
    }
    out.join("\n")
}

/// Draw `node`'s children below it, descending into nested folders.
fn render_children(forest: &Forest, node: &Node, prefix: &str, out: &mut Vec<String>) {
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let Some(child_node) = forest.get(child) else {
            continue;
        };
        let last = i + 1 == children.len();
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        out.push(format!("{}{}{}", prefix, branch, label(child_node)));
        if child_node.is_folder() {
            render_children(forest, child_node, &format!("{}{}", prefix, indent), out);
        }
    }
}

fn label(node: &Node) -> String {
    if node.is_folder() {
        format!("{}/", node.name)
    } else {
        format!("{} ({})", node.name, Language::from_file_name(&node.name))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_render_projects_with_languages() {
        let project = Uuid::new_v4();
        let mut store = TreeStore::new();
        store
            .dispatch(TreeAction::AddProject(NestedNode::folder(project, "Novel")))
            .unwrap();
        for name in ["ch1.md", "notes.txt"] {
            store
                .dispatch(TreeAction::AddFileToProject {
                    project_id: project,
                    file: NestedNode::file(Uuid::new_v4(), name, project),
                })
                .unwrap();
        }

        assert_eq!(
            render(store.forest()),
            "Novel/\n├── ch1.md (markdown)\n└── notes.txt (plaintext)"
        );
    }

    #[test]
    fn test_render_nested_folders() {
        let project = Uuid::new_v4();
        let forest = Forest::from_nested(vec![NestedNode::Folder {
            id: project,
            name: "Novel".into(),
            children: vec![
                NestedNode::Folder {
                    id: Uuid::new_v4(),
                    name: "drafts".into(),
                    children: vec![NestedNode::file(Uuid::new_v4(), "ch1.md", project)],
                },
                NestedNode::Folder {
                    id: Uuid::new_v4(),
                    name: "archive".into(),
                    children: vec![NestedNode::Folder {
                        id: Uuid::new_v4(),
                        name: "2023".into(),
                        children: vec![NestedNode::file(Uuid::new_v4(), "old.txt", project)],
                    }],
                },
            ],
        }])
        .unwrap();

        let expected = [
            "Novel/",
            "├── drafts/",
            "│   └── ch1.md (markdown)",
            "└── archive/",
            "    └── 2023/",
            "        └── old.txt (plaintext)",
        ];
        assert_eq!(render(&forest), expected.join("\n"));
    }

    #[test]
    fn test_render_empty_forest() {
        assert_eq!(render(&Forest::new()), "No projects found");
    }
}
