//! Line-oriented session commands
//!
//! Each input line is one command against an in-memory store; structural
//! edits go through [`AppState`] the same way the interactive screen does.
//! Blank lines and lines starting with `#` are skipped.

use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, AppState, DocumentTreeStore, EditorSession};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output::{document_line, node_lines};
use crate::domain::{forest_to_tree, Direction, DocumentType, NodeId, NodeKind};

pub const HELP: &str = "\
dir <safe-city|transport>          switch direction
section <type|all>                 restrict listings to a document type
tree                               show the folder tree
docs [query]                       list matching documents
add-folder <parent|-> <name>       add a folder (- for root level)
add-doc <parent|-> <type> <name>   add a document
rename <id> <name>                 rename a node
delete <id>                        delete a node and everything below it
show <id>                          describe a node
open <id>                          open a document for editing
text <content>                     replace the open document's text
table                              append a table to the open document
cell <table> <row> <col> <value>   set a table cell
relate <id>                        link a related document
save                               save the open document
version <comment>                  store the edited content as a version
restore <version-id>               restore a stored version
close                              close the open document
help                               show this help";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Direction(Direction),
    Section(Option<DocumentType>),
    Tree,
    Docs(String),
    AddFolder {
        parent: Option<NodeId>,
        name: String,
    },
    AddDocument {
        parent: Option<NodeId>,
        document_type: DocumentType,
        name: String,
    },
    Rename {
        id: NodeId,
        name: String,
    },
    Delete(NodeId),
    Show(NodeId),
    Open(NodeId),
    Text(String),
    Table,
    Cell {
        table: usize,
        row: usize,
        column: usize,
        value: String,
    },
    Relate(NodeId),
    Save,
    Version(String),
    Restore(String),
    Close,
    Help,
}

fn usage(msg: impl Into<String>) -> CliError {
    CliError::Usage(msg.into())
}

fn arg<'a>(args: &[&'a str], i: usize, what: &str) -> CliResult<&'a str> {
    args.get(i)
        .copied()
        .ok_or_else(|| usage(format!("missing {what}")))
}

fn rest(args: &[&str], from: usize) -> String {
    args.get(from..).unwrap_or_default().join(" ")
}

fn required_rest(args: &[&str], from: usize, what: &str) -> CliResult<String> {
    let value = rest(args, from);
    if value.is_empty() {
        Err(usage(format!("missing {what}")))
    } else {
        Ok(value)
    }
}

fn parent(word: &str) -> Option<NodeId> {
    match word {
        "-" | "root" => None,
        id => Some(id.to_string()),
    }
}

fn index(word: &str, what: &str) -> CliResult<usize> {
    word.parse()
        .map_err(|_| usage(format!("{what} must be a number: {word}")))
}

impl FromStr for SessionCommand {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let (verb, args) = words
            .split_first()
            .ok_or_else(|| usage("empty command"))?;

        let command = match *verb {
            "dir" => SessionCommand::Direction(
                arg(args, 0, "direction")?
                    .parse()
                    .map_err(ApplicationError::from)?,
            ),
            "section" => match arg(args, 0, "section")? {
                "all" => SessionCommand::Section(None),
                s => SessionCommand::Section(Some(s.parse().map_err(ApplicationError::from)?)),
            },
            "tree" => SessionCommand::Tree,
            "docs" => SessionCommand::Docs(rest(args, 0)),
            "add-folder" => SessionCommand::AddFolder {
                parent: parent(arg(args, 0, "parent")?),
                name: required_rest(args, 1, "name")?,
            },
            "add-doc" => SessionCommand::AddDocument {
                parent: parent(arg(args, 0, "parent")?),
                document_type: arg(args, 1, "document type")?
                    .parse()
                    .map_err(ApplicationError::from)?,
                name: required_rest(args, 2, "name")?,
            },
            "rename" => SessionCommand::Rename {
                id: arg(args, 0, "id")?.to_string(),
                name: required_rest(args, 1, "name")?,
            },
            "delete" => SessionCommand::Delete(arg(args, 0, "id")?.to_string()),
            "show" => SessionCommand::Show(arg(args, 0, "id")?.to_string()),
            "open" => SessionCommand::Open(arg(args, 0, "id")?.to_string()),
            "text" => SessionCommand::Text(rest(args, 0)),
            "table" => SessionCommand::Table,
            "cell" => SessionCommand::Cell {
                table: index(arg(args, 0, "table")?, "table")?,
                row: index(arg(args, 1, "row")?, "row")?,
                column: index(arg(args, 2, "column")?, "column")?,
                value: rest(args, 3),
            },
            "relate" => SessionCommand::Relate(arg(args, 0, "id")?.to_string()),
            "save" => SessionCommand::Save,
            "version" => SessionCommand::Version(rest(args, 0)),
            "restore" => SessionCommand::Restore(arg(args, 0, "version id")?.to_string()),
            "close" => SessionCommand::Close,
            "help" => SessionCommand::Help,
            other => return Err(usage(format!("unknown command: {other}"))),
        };
        Ok(command)
    }
}

/// Store, screen state and the optionally open document.
pub struct Session {
    store: DocumentTreeStore,
    state: AppState,
    editor: Option<EditorSession>,
}

impl Session {
    pub fn new(store: DocumentTreeStore, state: AppState) -> Self {
        Self {
            store,
            state,
            editor: None,
        }
    }

    pub fn store(&self) -> &DocumentTreeStore {
        &self.store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn editor(&self) -> Option<&EditorSession> {
        self.editor.as_ref()
    }

    /// Execute every line of `input`. Failing commands are reported to `out`
    /// and do not stop the run; returns the number of failures.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> CliResult<usize> {
        let mut failures = 0;
        for (number, line) in input.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let result = match line.parse::<SessionCommand>() {
                Ok(command) => self.execute(command, out),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                debug!("line {}: {}", number + 1, e);
                writeln!(out, "error (line {}): {}", number + 1, e)?;
                failures += 1;
            }
        }
        Ok(failures)
    }

    #[instrument(level = "debug", skip(self, out))]
    pub fn execute<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> CliResult<()> {
        let direction = self.state.direction;
        match command {
            SessionCommand::Direction(d) => {
                self.state.select_direction(d);
                self.editor = None;
                writeln!(out, "direction: {}", d.label())?;
            }
            SessionCommand::Section(section) => self.state.select_section(section),
            SessionCommand::Tree => {
                let tree = forest_to_tree(direction.label(), self.store.forest(direction));
                write!(out, "{tree}")?;
            }
            SessionCommand::Docs(query) => {
                self.state.set_query(query);
                for doc in self.state.visible_documents(&self.store) {
                    writeln!(out, "{}", document_line(doc))?;
                }
            }
            SessionCommand::AddFolder { parent, name } => {
                self.add(parent, NodeKind::Folder, &name, None, out)?;
            }
            SessionCommand::AddDocument {
                parent,
                document_type,
                name,
            } => {
                self.add(parent, NodeKind::Document, &name, Some(document_type), out)?;
            }
            SessionCommand::Rename { id, name } => {
                self.state.begin_rename(&self.store, &id)?;
                self.state.set_rename_value(&name)?;
                if let Err(e) = self.state.commit_rename(&mut self.store) {
                    self.state.cancel_rename();
                    return Err(e.into());
                }
                if let Some(editor) = self.editor.as_mut() {
                    editor.refresh(&self.store)?;
                }
                writeln!(out, "renamed {id}")?;
            }
            SessionCommand::Delete(id) => {
                self.state.delete(&mut self.store, &id)?;
                let editor_gone = self
                    .editor
                    .as_ref()
                    .is_some_and(|e| self.store.find(direction, e.id()).is_none());
                if editor_gone {
                    self.editor = None;
                }
                writeln!(out, "deleted {id}")?;
            }
            SessionCommand::Show(id) => {
                for line in node_lines(self.store.get(direction, &id)?) {
                    writeln!(out, "{line}")?;
                }
            }
            SessionCommand::Open(id) => {
                let editor = EditorSession::open(&mut self.store, direction, &id)?;
                self.state.select(Some(id.clone()));
                for line in node_lines(self.store.get(direction, &id)?) {
                    writeln!(out, "{line}")?;
                }
                self.editor = Some(editor);
            }
            SessionCommand::Text(text) => {
                let editor = self.open_editor()?;
                editor.begin_edit();
                editor.set_text(text);
            }
            SessionCommand::Table => {
                let editor = self.editor.as_mut().ok_or_else(no_document)?;
                editor.begin_edit();
                let table = editor.add_table(&self.store);
                writeln!(out, "table {table} added")?;
            }
            SessionCommand::Cell {
                table,
                row,
                column,
                value,
            } => {
                let editor = self.open_editor()?;
                editor.begin_edit();
                editor
                    .edit(|content| content.update_cell(table, row, column, value))
                    .map_err(ApplicationError::from)?;
            }
            SessionCommand::Relate(other) => {
                let editor = self.editor.as_mut().ok_or_else(no_document)?;
                let added = editor.add_related(&self.store, &other)?;
                editor.begin_edit();
                if !added {
                    writeln!(out, "already related: {other}")?;
                }
            }
            SessionCommand::Save => {
                let editor = self.editor.as_mut().ok_or_else(no_document)?;
                editor.save(&mut self.store)?;
                writeln!(out, "saved {}", editor.id())?;
            }
            SessionCommand::Version(comment) => {
                let editor = self.editor.as_mut().ok_or_else(no_document)?;
                let version = editor.save_version(&mut self.store, &comment)?;
                writeln!(out, "version {version}")?;
            }
            SessionCommand::Restore(version) => {
                let editor = self.editor.as_mut().ok_or_else(no_document)?;
                editor.restore_version(&mut self.store, &version)?;
                writeln!(out, "restored {version}")?;
            }
            SessionCommand::Close => {
                self.editor = None;
                self.state.select(None);
            }
            SessionCommand::Help => writeln!(out, "{HELP}")?,
        }
        Ok(())
    }

    fn add<W: Write>(
        &mut self,
        parent: Option<NodeId>,
        kind: NodeKind,
        name: &str,
        document_type: Option<DocumentType>,
        out: &mut W,
    ) -> CliResult<()> {
        self.state.open_add_dialog(parent.as_deref(), kind);
        self.state.fill_add_dialog(name, document_type);
        match self.state.submit_add(&mut self.store) {
            Ok(id) => {
                writeln!(out, "added {kind} {id}")?;
                Ok(())
            }
            Err(e) => {
                self.state.close_add_dialog();
                Err(e.into())
            }
        }
    }

    fn open_editor(&mut self) -> CliResult<&mut EditorSession> {
        self.editor.as_mut().ok_or_else(no_document)
    }
}

fn no_document() -> CliError {
    usage("no document open")
}
