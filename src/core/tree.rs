//! Typed directory tree persisted in the transient project record.
//!
//! A node is either a file leaf or a directory with ordered children;
//! flattening and lookup are recursive functions over the node type.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TreeNode {
    File(String),
    Dir(DirNode),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirNode {
    pub name: String,
    pub children: Vec<TreeNode>,
}

impl DirNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    fn insert(&mut self, components: &[&str]) {
        match components {
            [] => {}
            [file] => {
                let name = (*file).to_string();
                if !self
                    .children
                    .iter()
                    .any(|c| matches!(c, TreeNode::File(f) if *f == name))
                {
                    self.children.push(TreeNode::File(name));
                }
            }
            [dir, rest @ ..] => {
                let position = self
                    .children
                    .iter()
                    .position(|c| matches!(c, TreeNode::Dir(d) if d.name == *dir));
                match position {
                    Some(index) => {
                        if let TreeNode::Dir(d) = &mut self.children[index] {
                            d.insert(rest);
                        }
                    }
                    None => {
                        let mut d = DirNode::new(*dir);
                        d.insert(rest);
                        self.children.push(TreeNode::Dir(d));
                    }
                }
            }
        }
    }

    fn collect(&self, prefix: &Path, out: &mut Vec<PathBuf>) {
        for child in &self.children {
            match child {
                TreeNode::File(name) => out.push(prefix.join(name)),
                TreeNode::Dir(dir) => dir.collect(&prefix.join(&dir.name), out),
            }
        }
    }

    fn lookup(&self, components: &[&str]) -> bool {
        match components {
            [] => false,
            [file] => self
                .children
                .iter()
                .any(|c| matches!(c, TreeNode::File(f) if f == file)),
            [dir, rest @ ..] => self.children.iter().any(|c| match c {
                TreeNode::Dir(d) if d.name == *dir => d.lookup(rest),
                _ => false,
            }),
        }
    }
}

/// Directory structure of one project, rooted at the project directory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileTree {
    pub root: DirNode,
}

impl FileTree {
    /// Builds the tree from root-relative views of the given absolute paths.
    /// Paths outside `root` are skipped.
    pub fn from_paths(root: &Path, files: &[PathBuf]) -> Self {
        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string());
        let mut tree = Self {
            root: DirNode::new(root_name),
        };
        for file in files {
            if let Ok(rel) = file.strip_prefix(root) {
                let components = normal_components(rel);
                tree.root.insert(&components);
            }
        }
        tree
    }

    /// All file paths in the tree, relative to the project root, in tree order.
    pub fn relative_files(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        self.root.collect(Path::new(""), &mut out);
        out
    }

    /// Typed path lookup: whether the tree holds a file at the given
    /// root-relative path.
    pub fn contains(&self, rel: &Path) -> bool {
        let components = normal_components(rel);
        self.root.lookup(&components)
    }
}

fn normal_components(path: &Path) -> Vec<&str> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FileTree {
        let root = Path::new("/repo");
        let files = vec![
            PathBuf::from("/repo/a.c"),
            PathBuf::from("/repo/src/main.c"),
            PathBuf::from("/repo/src/util/io.c"),
            PathBuf::from("/repo/src/util/io.h"),
        ];
        FileTree::from_paths(root, &files)
    }

    #[test]
    fn test_round_trips_paths() {
        let tree = sample_tree();
        let files = tree.relative_files();
        assert_eq!(
            files,
            vec![
                PathBuf::from("a.c"),
                PathBuf::from("src/main.c"),
                PathBuf::from("src/util/io.c"),
                PathBuf::from("src/util/io.h"),
            ]
        );
    }

    #[test]
    fn test_lookup() {
        let tree = sample_tree();
        assert!(tree.contains(Path::new("src/util/io.h")));
        assert!(!tree.contains(Path::new("src/util/missing.c")));
        assert!(!tree.contains(Path::new("src")));
    }

    #[test]
    fn test_skips_paths_outside_root() {
        let tree = FileTree::from_paths(Path::new("/repo"), &[PathBuf::from("/elsewhere/x.c")]);
        assert!(tree.relative_files().is_empty());
    }

    #[test]
    fn test_duplicate_insert_is_idempotent() {
        let files = vec![PathBuf::from("/repo/a.c"), PathBuf::from("/repo/a.c")];
        let tree = FileTree::from_paths(Path::new("/repo"), &files);
        assert_eq!(tree.relative_files().len(), 1);
    }
}
