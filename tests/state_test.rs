//! Tests for AppState: direction switching, dialogs, rename and delete bookkeeping

use std::sync::Arc;

use rstest::{fixture, rstest};

use kbase::application::{AppState, ApplicationError, DocumentTreeStore, StoreDefaults};
use kbase::domain::{find_node, Direction, DocumentType, NodeKind};
use kbase::infrastructure::{SequentialIds, SystemClock};

struct Screen {
    store: DocumentTreeStore,
    state: AppState,
}

#[fixture]
fn screen() -> Screen {
    Screen {
        store: DocumentTreeStore::with_sample_data(
            Arc::new(SystemClock),
            Arc::new(SequentialIds::new()),
            StoreDefaults::default(),
        ),
        state: AppState::new(Direction::SafeCity, DocumentType::Instruction),
    }
}

// ============================================================
// Add dialog
// ============================================================

#[rstest]
fn given_dialog_on_folder_when_submitting_document_then_inserted_with_selected_type(
    mut screen: Screen,
) {
    // Arrange
    screen.state.open_add_dialog(Some("1"), NodeKind::Document);
    screen
        .state
        .fill_add_dialog("Test", Some(DocumentType::Reference));

    // Act
    let id = screen.state.submit_add(&mut screen.store).unwrap();

    // Assert
    let forest = screen.store.forest(Direction::SafeCity);
    let folder = find_node(forest, "1").unwrap().as_folder().unwrap();
    assert_eq!(folder.children.len(), 4);
    let doc = find_node(forest, &id).unwrap().as_document().unwrap();
    assert_eq!(doc.name, "Test");
    assert_eq!(doc.document_type, DocumentType::Reference);
    assert!(screen.state.is_expanded("1"));
    assert!(screen.state.dialog.is_none());
}

#[rstest]
fn given_dialog_without_type_change_when_submitting_then_default_type_used(mut screen: Screen) {
    screen.state.open_add_dialog(Some("1"), NodeKind::Document);
    screen.state.fill_add_dialog("Test", None);

    let id = screen.state.submit_add(&mut screen.store).unwrap();

    let doc = screen.store.document(Direction::SafeCity, &id).unwrap();
    assert_eq!(doc.document_type, DocumentType::Instruction);
}

#[rstest]
fn given_blank_name_when_submitting_then_dialog_stays_open(mut screen: Screen) {
    screen.state.open_add_dialog(None, NodeKind::Folder);

    let result = screen.state.submit_add(&mut screen.store);

    assert!(result.is_err());
    assert!(screen.state.dialog.is_some());
    assert_eq!(screen.store.forest(Direction::SafeCity).len(), 3);
}

#[rstest]
fn given_no_dialog_when_submitting_then_no_dialog_error(mut screen: Screen) {
    let err = screen.state.submit_add(&mut screen.store).unwrap_err();

    assert!(matches!(err, ApplicationError::NoDialog));
}

// ============================================================
// Direction and folders
// ============================================================

#[rstest]
fn given_selection_when_switching_direction_then_cleared(mut screen: Screen) {
    screen.state.select(Some("1-1".into()));
    screen.state.toggle_folder("1");

    screen.state.select_direction(Direction::Transport);

    assert_eq!(screen.state.direction, Direction::Transport);
    assert!(screen.state.selected.is_none());
    assert!(screen.state.expanded.is_empty());
    let ids: Vec<&str> = screen
        .state
        .visible_documents(&screen.store)
        .iter()
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(ids.first(), Some(&"4-1"));
}

#[rstest]
fn given_folder_when_toggling_twice_then_collapsed(mut screen: Screen) {
    assert!(screen.state.toggle_folder("2"));
    assert!(!screen.state.toggle_folder("2"));
    assert!(!screen.state.is_expanded("2"));
}

#[rstest]
#[case(Some(DocumentType::Process), "", 1)]
#[case(None, "архив", 1)]
#[case(Some(DocumentType::Reference), "сетевая", 1)]
#[case(Some(DocumentType::Document), "", 0)]
fn given_section_and_query_when_listing_then_filtered(
    mut screen: Screen,
    #[case] section: Option<DocumentType>,
    #[case] query: &str,
    #[case] expected: usize,
) {
    screen.state.select_section(section);
    screen.state.set_query(query);

    assert_eq!(screen.state.visible_documents(&screen.store).len(), expected);
}

// ============================================================
// Rename and delete
// ============================================================

#[rstest]
fn given_rename_in_progress_when_committing_then_store_renamed(mut screen: Screen) {
    // Arrange
    screen.state.begin_rename(&screen.store, "3").unwrap();
    assert_eq!(screen.state.renaming.as_ref().unwrap().value, "Инфраструктура");
    screen.state.set_rename_value("ЦОД").unwrap();

    // Act
    screen.state.commit_rename(&mut screen.store).unwrap();

    // Assert
    assert!(screen.state.renaming.is_none());
    assert_eq!(screen.store.get(Direction::SafeCity, "3").unwrap().name(), "ЦОД");
}

#[rstest]
fn given_cancelled_rename_when_committing_then_not_renaming(mut screen: Screen) {
    screen.state.begin_rename(&screen.store, "3").unwrap();
    screen.state.cancel_rename();

    let err = screen.state.commit_rename(&mut screen.store).unwrap_err();

    assert!(matches!(err, ApplicationError::NotRenaming));
}

#[rstest]
fn given_selected_document_inside_folder_when_deleting_folder_then_selection_cleared(
    mut screen: Screen,
) {
    screen.state.select(Some("2-2".into()));
    screen.state.toggle_folder("2");

    screen.state.delete(&mut screen.store, "2").unwrap();

    assert!(screen.state.selected.is_none());
    assert!(!screen.state.is_expanded("2"));
    assert!(screen.store.find(Direction::SafeCity, "2-2").is_none());
}

#[rstest]
fn given_selection_elsewhere_when_deleting_then_selection_kept(mut screen: Screen) {
    screen.state.select(Some("1-1".into()));

    screen.state.delete(&mut screen.store, "3-2").unwrap();

    assert_eq!(screen.state.selected.as_deref(), Some("1-1"));
}

#[rstest]
fn given_dialog_under_deleted_folder_when_deleting_then_dialog_closed(mut screen: Screen) {
    // Arrange
    screen.state.open_add_dialog(Some("2"), NodeKind::Document);

    // Act
    screen.state.delete(&mut screen.store, "2").unwrap();

    // Assert
    assert!(screen.state.dialog.is_none());
}

#[rstest]
fn given_dialog_elsewhere_when_deleting_then_dialog_kept(mut screen: Screen) {
    screen.state.open_add_dialog(Some("1"), NodeKind::Folder);

    screen.state.delete(&mut screen.store, "2").unwrap();

    assert_eq!(
        screen.state.dialog.as_ref().and_then(|d| d.parent.as_deref()),
        Some("1")
    );
}
