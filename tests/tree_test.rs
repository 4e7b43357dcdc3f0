//! Tests for the copy-on-write forest functions

use std::sync::Arc;

use rstest::{fixture, rstest};

use kbase::domain::{
    filter_documents, find_node, flatten_documents, insert_child, remove_node, sample_forest,
    update_node, Direction, Document, DocumentFilter, DocumentType, Folder, FolderNode, Forest,
};

#[fixture]
fn safe_city() -> Forest {
    sample_forest(Direction::SafeCity)
}

/// root folder "a" > folder "b" > folder "c" > document "deep", plus documents at each level
fn nested() -> Forest {
    let deep = Folder::new("c", "C").with_children([
        FolderNode::from(Document::new("deep", "Deep", DocumentType::Reference)),
    ]);
    let middle = Folder::new("b", "B").with_children([
        FolderNode::from(deep),
        FolderNode::from(Document::new("mid", "Mid", DocumentType::Process)),
    ]);
    let top = Folder::new("a", "A").with_children([
        FolderNode::from(Document::new("top", "Top", DocumentType::Instruction)),
        FolderNode::from(middle),
        FolderNode::from(Folder::new("empty", "Empty")),
    ]);
    vec![
        Arc::new(top.into()),
        Arc::new(Document::new("root-doc", "Root doc", DocumentType::Document).into()),
    ]
}

fn children_of<'a>(forest: &'a [Arc<FolderNode>], id: &str) -> &'a [Arc<FolderNode>] {
    match find_node(forest, id).map(|n| n.as_ref()) {
        Some(FolderNode::Folder(folder)) => &folder.children,
        other => panic!("expected folder {id}, got {other:?}"),
    }
}

// ============================================================
// update_node
// ============================================================

#[rstest]
#[case("missing")]
#[case("")]
#[case("1-99")]
fn given_unknown_id_when_updating_then_forest_unchanged(safe_city: Forest, #[case] id: &str) {
    // Act
    let updated = update_node(&safe_city, id, |n| Some(n.renamed("changed")));

    // Assert
    assert_eq!(updated, safe_city);
    assert!(updated
        .iter()
        .zip(&safe_city)
        .all(|(a, b)| Arc::ptr_eq(a, b)));
}

#[rstest]
fn given_identity_updater_when_updating_then_forest_equal(safe_city: Forest) {
    let updated = update_node(&safe_city, "2-1", |n| Some(n.clone()));

    assert_eq!(updated, safe_city);
    // siblings of the rewritten path are shared
    assert!(Arc::ptr_eq(&updated[0], &safe_city[0]));
    assert!(Arc::ptr_eq(&updated[2], &safe_city[2]));
}

#[rstest]
fn given_nested_node_when_renaming_then_only_path_rebuilt() {
    // Arrange
    let forest = nested();

    // Act
    let updated = update_node(&forest, "deep", |n| Some(n.renamed("Renamed")));

    // Assert
    assert_eq!(find_node(&updated, "deep").unwrap().name(), "Renamed");
    assert_eq!(find_node(&forest, "deep").unwrap().name(), "Deep");
    assert!(Arc::ptr_eq(&updated[1], &forest[1]));
    let old_top = children_of(&forest, "a");
    let new_top = children_of(&updated, "a");
    assert!(Arc::ptr_eq(&new_top[0], &old_top[0]));
    assert!(!Arc::ptr_eq(&new_top[1], &old_top[1]));
    assert!(Arc::ptr_eq(&new_top[2], &old_top[2]));
}

#[rstest]
fn given_updater_returning_none_when_updating_then_subtree_removed() {
    let forest = nested();

    let updated = update_node(&forest, "b", |_| None);

    assert!(find_node(&updated, "b").is_none());
    assert!(find_node(&updated, "deep").is_none());
    assert_eq!(children_of(&updated, "a").len(), 2);
}

// ============================================================
// remove_node / insert_child
// ============================================================

#[rstest]
fn given_root_folder_when_removing_then_documents_gone(safe_city: Forest) {
    let updated = remove_node(&safe_city, "1");

    assert_eq!(updated.len(), 2);
    assert!(find_node(&updated, "1-1").is_none());
    assert_eq!(flatten_documents(&updated).len(), 4);
}

#[rstest]
#[case(None)]
#[case(Some("a"))]
#[case(Some("c"))]
fn given_fresh_id_when_inserting_then_found(#[case] parent: Option<&str>) {
    // Arrange
    let forest = nested();
    let node = FolderNode::from(Document::new("fresh", "Fresh", DocumentType::Process));

    // Act
    let updated = insert_child(&forest, parent, node.clone());

    // Assert
    assert_eq!(find_node(&updated, "fresh").map(|n| n.as_ref()), Some(&node));
}

#[rstest]
fn given_unknown_parent_when_inserting_then_forest_unchanged() {
    let forest = nested();
    let node = FolderNode::from(Document::new("fresh", "Fresh", DocumentType::Process));

    let updated = insert_child(&forest, Some("1"), node);

    assert!(find_node(&updated, "fresh").is_none());
    assert_eq!(updated, forest);
    assert!(updated.iter().zip(&forest).all(|(a, b)| Arc::ptr_eq(a, b)));
}

#[rstest]
fn given_document_parent_when_inserting_then_no_op() {
    let forest = nested();

    let updated = insert_child(&forest, Some("mid"), Folder::new("x", "X").into());

    assert_eq!(updated, forest);
}

#[rstest]
fn given_no_parent_when_inserting_then_appended_at_root(safe_city: Forest) {
    let updated = insert_child(&safe_city, None, Folder::new("7", "Новая папка").into());

    assert_eq!(updated.len(), 4);
    assert_eq!(updated[3].id(), "7");
    assert!(Arc::ptr_eq(&updated[0], &safe_city[0]));
}

// ============================================================
// flatten_documents / filter_documents
// ============================================================

#[rstest]
fn given_deep_nesting_when_flattening_then_each_document_once_in_pre_order() {
    let forest = nested();

    let ids: Vec<&str> = flatten_documents(&forest)
        .iter()
        .map(|d| d.id.as_str())
        .collect();

    assert_eq!(ids, ["top", "deep", "mid", "root-doc"]);
}

#[rstest]
fn given_sample_forest_when_flattening_then_no_folders(safe_city: Forest) {
    let documents = flatten_documents(&safe_city);

    assert_eq!(documents.len(), 7);
    for doc in documents {
        assert!(!["1", "2", "3"].contains(&doc.id.as_str()));
    }
}

#[rstest]
#[case("", None, 7)]
#[case("НАСТРОЙКА", None, 2)]
#[case("", Some(DocumentType::Reference), 2)]
#[case("камер", Some(DocumentType::Instruction), 1)]
#[case("nothing like this", None, 0)]
fn given_query_and_section_when_filtering_then_matches(
    safe_city: Forest,
    #[case] query: &str,
    #[case] section: Option<DocumentType>,
    #[case] expected: usize,
) {
    let mut filter = DocumentFilter::new(query);
    if let Some(section) = section {
        filter = filter.in_section(section);
    }

    let found = filter_documents(flatten_documents(&safe_city), &filter);

    assert_eq!(found.len(), expected);
}

#[rstest]
fn given_tag_match_when_filtering_then_document_found() {
    let tagged = Document::new("t", "Untitled", DocumentType::Document).with_tags(["camera", "ptz"]);
    let plain = Document::new("p", "Plain", DocumentType::Document).with_text("mentions PTZ inline");

    let found = filter_documents([&tagged, &plain], &DocumentFilter::new("ptz"));

    assert_eq!(found.len(), 2);
}
