use grove_types::{FileStatus, Language, NodeId};
use serde::{Deserialize, Serialize};

/// A single entry in the workspace tree: either a file or a folder.
///
/// Serialized form carries a `"type"` tag (`"file"` or `"folder"`) alongside
/// the variant's fields, so persisted trees stay readable and stable across
/// versions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    File(FileNode),
    Folder(FolderNode),
}

impl Node {
    /// The node's identifier, regardless of variant.
    pub fn id(&self) -> NodeId {
        match self {
            Self::File(file) => file.id,
            Self::Folder(folder) => folder.id,
        }
    }

    /// The node's display name.
    pub fn name(&self) -> &str {
        match self {
            Self::File(file) => &file.name,
            Self::Folder(folder) => &folder.name,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Self::File(file) => Some(file),
            Self::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            Self::Folder(folder) => Some(folder),
            Self::File(_) => None,
        }
    }
}

impl From<FileNode> for Node {
    fn from(file: FileNode) -> Self {
        Self::File(file)
    }
}

impl From<FolderNode> for Node {
    fn from(folder: FolderNode) -> Self {
        Self::Folder(folder)
    }
}

/// A leaf node: a named piece of content plus its change status.
///
/// The language is derived from the file name at construction and rides
/// along as advisory metadata; the engine never branches on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub id: NodeId,
    pub name: String,
    pub language: Language,
    pub content: String,
    pub status: FileStatus,
}

impl FileNode {
    /// A freshly created file. Starts with [`FileStatus::New`] so it shows
    /// up as a change until it is committed.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        let language = Language::from_file_name(&name);
        Self {
            id: NodeId::new(),
            name,
            language,
            content: content.into(),
            status: FileStatus::New,
        }
    }

    /// A file that is already part of the committed baseline, starting
    /// [`FileStatus::Unmodified`]. Used when seeding a workspace.
    pub fn pristine(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            status: FileStatus::Unmodified,
            ..Self::new(name, content)
        }
    }

    /// Whether this file counts as a change (status other than unmodified).
    pub fn is_dirty(&self) -> bool {
        self.status.is_dirty()
    }
}

/// An interior node: a named, ordered collection of children.
///
/// Child order is insertion order and every tree transform preserves it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    pub id: NodeId,
    pub name: String,
    pub children: Vec<Node>,
}

impl FolderNode {
    /// An empty folder with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Append a child, returning the folder. Convenient for building
    /// literal trees.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
