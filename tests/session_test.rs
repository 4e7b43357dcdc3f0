//! Tests for the line-oriented session driving store, state and editor

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use kbase::application::{AppState, DocumentTreeStore, StoreDefaults};
use kbase::cli::Session;
use kbase::domain::{Direction, DocumentType};
use kbase::infrastructure::{FixedClock, SequentialIds};
use kbase::util::testing;

#[fixture]
fn session() -> Session {
    testing::init_test_setup();
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
    let store = DocumentTreeStore::with_sample_data(
        Arc::new(FixedClock::new(start)),
        Arc::new(SequentialIds::new()),
        StoreDefaults::default(),
    );
    Session::new(store, AppState::new(Direction::SafeCity, DocumentType::Instruction))
}

fn run(session: &mut Session, script: &str) -> (usize, String) {
    let mut out = Vec::new();
    let failures = session.run(script.as_bytes(), &mut out).unwrap();
    (failures, String::from_utf8(out).unwrap())
}

#[rstest]
fn given_add_doc_script_when_run_then_folder_has_four_children(mut session: Session) {
    // Act
    let (failures, out) = run(&mut session, "add-doc 1 process Test\nshow 1\n");

    // Assert
    assert_eq!(failures, 0);
    assert!(out.contains("added document n1"));
    let folder = session.store().get(Direction::SafeCity, "1").unwrap();
    assert_eq!(folder.as_folder().unwrap().children.len(), 4);
    let doc = session.store().document(Direction::SafeCity, "n1").unwrap();
    assert_eq!(doc.document_type, DocumentType::Process);
    assert!(session.state().is_expanded("1"));
}

#[rstest]
fn given_comments_and_blank_lines_when_run_then_skipped(mut session: Session) {
    let (failures, out) = run(&mut session, "# listing\n\n   \ndocs видео\n");

    assert_eq!(failures, 0);
    assert_eq!(out.trim(), "1-2\tinstruction\tВидеоаналитика");
}

#[rstest]
fn given_failing_line_when_run_then_reported_and_run_continues(mut session: Session) {
    let (failures, out) = run(&mut session, "delete 404\nrename 1 Камеры\nsave\n");

    assert_eq!(failures, 2);
    assert!(out.contains("error (line 1): node not found in safe-city: 404"));
    assert!(out.contains("error (line 3): no document open"));
    assert_eq!(session.store().get(Direction::SafeCity, "1").unwrap().name(), "Камеры");
}

#[rstest]
fn given_editing_script_when_run_then_content_saved_and_versioned(mut session: Session) {
    // Arrange
    let script = "\
open 3-1
text Стойки и серверы
table
cell 0 1 0 R-01
relate 3-2
save
version first draft
text changed
restore v-n1
close
";

    // Act
    let (failures, out) = run(&mut session, script);

    // Assert
    assert_eq!(failures, 0, "{out}");
    let doc = session.store().document(Direction::SafeCity, "3-1").unwrap();
    assert_eq!(doc.content.text, "Стойки и серверы");
    assert_eq!(doc.content.tables[0].rows[1].cells[0].content, "R-01");
    assert_eq!(doc.content.related_documents, ["3-2"]);
    assert_eq!(doc.versions.len(), 1);
    assert_eq!(doc.metrics.as_ref().unwrap().edit_count, 1);
    assert!(session.editor().is_none());
}

#[rstest]
fn given_direction_switch_when_showing_tree_then_transport_rendered(mut session: Session) {
    let (failures, out) = run(&mut session, "open 1-1\ndir transport\ntree\n");

    assert_eq!(failures, 0);
    assert!(session.editor().is_none());
    assert!(out.contains("Светофорные объекты [4]"));
    assert!(!out.contains("Видеонаблюдение"));
}

#[rstest]
fn given_open_document_when_its_folder_deleted_then_editor_closed(mut session: Session) {
    let (failures, _) = run(&mut session, "open 2-1\ndelete 2\n");

    assert_eq!(failures, 0);
    assert!(session.editor().is_none());
    assert!(session.state().selected.is_none());
}

#[rstest]
fn given_other_direction_id_when_relating_then_line_fails(mut session: Session) {
    let (failures, out) = run(&mut session, "open 1-1\nrelate 4-1\n");

    assert_eq!(failures, 1);
    assert!(out.contains("error (line 2): node not found in safe-city: 4-1"));
    assert!(!session.editor().unwrap().is_editing());
}
