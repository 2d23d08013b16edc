//! Integration tests for the client-side project tree

use std::sync::Arc;

use common::prelude::{Forest, Language, NestedNode, TreeAction, TreeStore};
use serde_json::json;
use uuid::Uuid;

#[test]
fn test_load_edit_and_render_tree() {
    let project = Uuid::new_v4();
    let chapter = Uuid::new_v4();
    let notes = Uuid::new_v4();

    // the nested shape as a tree view would persist it
    let loaded: Vec<NestedNode> = serde_json::from_value(json!([{
        "type": "folder",
        "id": project,
        "name": "Novel",
        "children": [
            {"type": "file", "id": chapter, "name": "ch1.md", "project_id": project},
        ],
    }]))
    .unwrap();

    let mut store = TreeStore::new();
    store
        .dispatch(TreeAction::SetTree(Forest::from_nested(loaded).unwrap()))
        .unwrap();
    store
        .dispatch(TreeAction::AddFileToProject {
            project_id: project,
            file: NestedNode::file(notes, "notes.txt", project),
        })
        .unwrap();

    store.dispatch(TreeAction::SetCurrentFile(Some(chapter))).unwrap();
    let untouched = Arc::clone(store.forest().get(&notes).unwrap());
    store
        .dispatch(TreeAction::UpdateFileContent {
            file_id: chapter,
            content: "It was a dark night.".into(),
        })
        .unwrap();

    let open = store.current_file().unwrap();
    assert_eq!(open.content(), Some("It was a dark night."));
    assert_eq!(Language::from_file_name(&open.name), Language::Markdown);
    assert!(Arc::ptr_eq(&untouched, store.forest().get(&notes).unwrap()));

    let rendered = serde_json::to_value(store.forest().to_nested()).unwrap();
    assert_eq!(
        rendered,
        json!([{
            "type": "folder",
            "id": project,
            "name": "Novel",
            "children": [
                {
                    "type": "file",
                    "id": chapter,
                    "name": "ch1.md",
                    "project_id": project,
                    "content": "It was a dark night.",
                },
                {"type": "file", "id": notes, "name": "notes.txt", "project_id": project},
            ],
        }])
    );
}

#[test]
fn test_files_only_attach_to_top_level_projects() {
    let project = Uuid::new_v4();
    let file = Uuid::new_v4();
    let mut store = TreeStore::new();
    store
        .dispatch(TreeAction::AddProject(NestedNode::folder(project, "Poems")))
        .unwrap();
    store
        .dispatch(TreeAction::AddFileToProject {
            project_id: project,
            file: NestedNode::file(file, "haiku.txt", project),
        })
        .unwrap();

    let stray = NestedNode::file(Uuid::new_v4(), "stray.txt", file);
    assert!(store
        .dispatch(TreeAction::AddFileToProject {
            project_id: file,
            file: stray,
        })
        .is_err());
    assert_eq!(store.forest().len(), 2);
    assert_eq!(store.forest().path_to(&file), vec![project, file]);
}
