//! The built-in workspace seeded when no saved state exists.

use crate::node::{FileNode, FolderNode};

/// Path of the file the tracker falls back to when nothing else is open.
pub const ENTRY_PATH: &str = "src/index.ts";

const README: &str = r#"# sandbox

A small playground project. Edit files, stage the ones you want to keep,
and commit. Every branch holds its own copy of this tree.
"#;

const STYLES_CSS: &str = r#"body {
  font-family: sans-serif;
  margin: 2rem;
}
"#;

const INDEX_TS: &str = r#"import { greet } from "./util";

console.log(greet("world"));
"#;

const UTIL_TS: &str = r#"export function greet(name: string): string {
  return `hello, ${name}`;
}
"#;

/// The default workspace: a small sample project with every file
/// unmodified. Ids are freshly generated on each call.
pub fn starter_tree() -> FolderNode {
    FolderNode::new("workspace")
        .with_child(FileNode::pristine("README.md", README))
        .with_child(FileNode::pristine("styles.css", STYLES_CSS))
        .with_child(
            FolderNode::new("src")
                .with_child(FileNode::pristine("index.ts", INDEX_TS))
                .with_child(FileNode::pristine("util.ts", UTIL_TS)),
        )
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use grove_types::{Language, NodeId};

    use super::*;

    #[test]
    fn starter_is_fully_unmodified() {
        let tree = starter_tree();
        assert_eq!(tree.file_count(), 4);
        assert!(tree.changed_files().is_empty());
    }

    #[test]
    fn entry_path_resolves_to_a_typescript_file() {
        let tree = starter_tree();
        let entry = tree.find_by_path(ENTRY_PATH).unwrap();
        assert_eq!(entry.name, "index.ts");
        assert_eq!(entry.language, Language::TypeScript);
    }

    #[test]
    fn starter_ids_are_unique() {
        let tree = starter_tree();
        let ids = tree.all_ids();
        let unique: HashSet<NodeId> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }
}
