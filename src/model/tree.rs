use std::collections::BTreeSet;

use crate::foundation::error::{GrowError, GrowResult};

/// Deepest nesting accepted by [`FileNode::validate`].
pub const MAX_TREE_DEPTH: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Folder,
    File,
    Config,
}

/// Glyph reference; resolved to drawing by a [`crate::render::glyph::GlyphSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Box,
    FileCode,
    Folder,
    Settings,
    Database,
    Layout,
    Terminal,
    Cpu,
}

impl Icon {
    pub fn name(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::FileCode => "file-code",
            Self::Folder => "folder",
            Self::Settings => "settings",
            Self::Database => "database",
            Self::Layout => "layout",
            Self::Terminal => "terminal",
            Self::Cpu => "cpu",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FileNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>, // order drives angular layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

impl FileNode {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: NodeKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            description: description.into(),
            children: Vec::new(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = FileNode>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Direct child with `id`.
    pub fn child(&self, id: &str) -> Option<&FileNode> {
        self.children.iter().find(|c| c.id == id)
    }

    /// Depth-first search for `id`, including `self`.
    pub fn find(&self, id: &str) -> Option<&FileNode> {
        self.iter().find(|n| n.id == id)
    }

    /// Pre-order traversal.
    pub fn iter(&self) -> impl Iterator<Item = &FileNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Number of levels, a leaf being 1.
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(FileNode::height).max().unwrap_or(0)
    }

    pub fn validate(&self) -> GrowResult<()> {
        let mut seen = BTreeSet::new();
        validate_node(self, 0, &mut seen)
    }
}

fn validate_node<'a>(
    node: &'a FileNode,
    depth: usize,
    seen: &mut BTreeSet<&'a str>,
) -> GrowResult<()> {
    if depth >= MAX_TREE_DEPTH {
        return Err(GrowError::validation(format!(
            "tree is deeper than {MAX_TREE_DEPTH} levels at '{}'",
            node.id
        )));
    }
    if node.id.trim().is_empty() {
        return Err(GrowError::validation("node id must be non-empty"));
    }
    if !seen.insert(node.id.as_str()) {
        return Err(GrowError::validation(format!(
            "duplicate node id '{}'",
            node.id
        )));
    }
    for child in &node.children {
        validate_node(child, depth + 1, seen)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> FileNode {
        FileNode::new("r", "r", NodeKind::Root, "").with_children([
            FileNode::new("a", "a", NodeKind::Folder, "")
                .with_icon(Icon::Folder)
                .with_children([FileNode::new("a1", "a1", NodeKind::File, "")]),
            FileNode::new("b", "b", NodeKind::Config, ""),
        ])
    }

    #[test]
    fn preorder_follows_child_order() {
        let ids: Vec<_> = small().iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, ["r", "a", "a1", "b"]);
    }

    #[test]
    fn find_and_child() {
        let t = small();
        assert_eq!(t.find("a1").map(|n| n.kind), Some(NodeKind::File));
        assert!(t.child("a1").is_none());
        assert!(t.child("b").is_some_and(FileNode::is_leaf));
        assert_eq!(t.height(), 3);
    }

    #[test]
    fn validate_rejects_duplicates_and_empty_ids() {
        assert!(small().validate().is_ok());

        let mut dup = small();
        dup.children[1].id = "a1".to_string();
        assert!(dup.validate().is_err());

        let mut empty = small();
        empty.children[0].id = " ".to_string();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn validate_rejects_runaway_depth() {
        let mut node = FileNode::new("leaf", "leaf", NodeKind::File, "");
        for i in 0..MAX_TREE_DEPTH {
            node = FileNode::new(format!("n{i}"), "n", NodeKind::Folder, "").with_children([node]);
        }
        assert!(node.validate().is_err());
    }

    #[test]
    fn json_omits_empty_children_and_icon() {
        let leaf = FileNode::new("x", "x.ts", NodeKind::File, "d");
        let s = serde_json::to_string(&leaf).unwrap();
        assert!(!s.contains("children"));
        assert!(!s.contains("icon"));
        let back: FileNode = serde_json::from_str(&s).unwrap();
        assert_eq!(back, leaf);

        let with_icon: FileNode = serde_json::from_str(
            r#"{"id":"c","name":"c","kind":"config","description":"","icon":"file-code"}"#,
        )
        .unwrap();
        assert_eq!(with_icon.icon, Some(Icon::FileCode));
    }
}
