//! Hierarchical file tree built from a flat member-path list.

use serde::Serialize;

/// One path segment in an archive's member namespace.
///
/// `id` is the full slash-joined path from the archive root and is unique
/// within the tree; `full_path` duplicates it, kept separate for clarity of
/// intent at call sites. Sibling `name`s are unique. Trees are built fresh
/// per listing request and never mutated afterwards; they are a read-only
/// projection of the member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTreeNode {
    pub id: String,
    pub name: String,
    pub full_path: String,
    /// Child nodes in first-seen order; empty for file entries.
    pub children: Vec<FileTreeNode>,
}

/// Assemble a tree of [`FileTreeNode`]s from a flat list of member paths.
///
/// Splits each path on `/` and walks the tree from the root, creating one
/// node per unique path prefix, so intermediate directories are synthesized
/// even when the archive emits no explicit directory entries. Children keep
/// the order their segment was first seen in the input — insertion order,
/// not sorted; display grouping is the caller's concern.
///
/// Never fails: a path with leading, trailing, or doubled separators maps
/// its empty segments to nodes literally named `""`.
///
/// # Examples
///
/// ```
/// use oven_archive::build_file_tree;
///
/// let tree = build_file_tree(["a/b/x.txt", "a/b/y.txt"]);
/// assert_eq!(tree.len(), 1);
/// assert_eq!(tree[0].name, "a");
/// assert_eq!(tree[0].children[0].name, "b");
/// assert_eq!(tree[0].children[0].children.len(), 2);
/// assert_eq!(tree[0].children[0].children[0].id, "a/b/x.txt");
/// ```
pub fn build_file_tree<I>(paths: I) -> Vec<FileTreeNode>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut roots = Vec::new();
    for path in paths {
        let mut current = &mut roots;
        let mut full_path = String::new();
        for (index, segment) in path.as_ref().split('/').enumerate() {
            if index > 0 {
                full_path.push('/');
            }
            full_path.push_str(segment);
            let position = match current.iter().position(|node: &FileTreeNode| node.name == segment) {
                Some(position) => position,
                None => {
                    current.push(FileTreeNode {
                        id: full_path.clone(),
                        name: segment.to_string(),
                        full_path: full_path.clone(),
                        children: Vec::new(),
                    });
                    current.len() - 1
                },
            };
            current = &mut current[position].children;
        }
    }
    roots
}
