//! Built-in sample knowledge base, one forest per direction.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::{Direction, Document, DocumentType, Folder, FolderNode, Forest};

fn doc(id: &str, name: &str, document_type: DocumentType) -> FolderNode {
    Document::new(id, name, document_type).into()
}

fn folder(id: &str, name: &str, children: Vec<FolderNode>) -> Arc<FolderNode> {
    Arc::new(Folder::new(id, name).with_children(children).into())
}

pub fn sample_forest(direction: Direction) -> Forest {
    use DocumentType::{Instruction, Process, Reference};

    match direction {
        Direction::SafeCity => vec![
            folder(
                "1",
                "Видеонаблюдение",
                vec![
                    doc("1-1", "Настройка камер", Instruction),
                    doc("1-2", "Видеоаналитика", Instruction),
                    doc("1-3", "Архив записей", Reference),
                ],
            ),
            folder(
                "2",
                "Системы оповещения",
                vec![
                    doc("2-1", "Настройка громкоговорителей", Instruction),
                    doc("2-2", "Протоколы оповещения", Process),
                ],
            ),
            folder(
                "3",
                "Инфраструктура",
                vec![
                    doc("3-1", "Серверное оборудование", Instruction),
                    doc("3-2", "Сетевая инфраструктура", Reference),
                ],
            ),
        ],
        Direction::Transport => vec![
            folder(
                "4",
                "Светофорные объекты",
                vec![
                    doc("4-1", "Настройка контроллеров", Instruction),
                    doc("4-2", "Схемы управления", Reference),
                    doc("4-3", "Техническое обслуживание", Process),
                ],
            ),
            folder(
                "5",
                "Детекторы транспорта",
                vec![
                    doc("5-1", "Установка датчиков", Instruction),
                    doc("5-2", "Калибровка", Process),
                ],
            ),
            folder(
                "6",
                "АСУДД",
                vec![
                    doc("6-1", "Настройка центра управления", Instruction),
                    doc("6-2", "Алгоритмы управления", Reference),
                ],
            ),
        ],
    }
}

/// Sample forests for every direction.
pub fn sample_forests() -> BTreeMap<Direction, Forest> {
    Direction::ALL
        .into_iter()
        .map(|d| (d, sample_forest(d)))
        .collect()
}
