//! The compressed trie that backs each method of the [`Router`](crate::Router).
//!
//! Every node owns a fragment of the registered patterns. Literal fragments
//! are shared between patterns with a common prefix, so a tree holding
//! `/search/`, `/support` and `/blog/:post/` looks like this:
//!
//! ```ignore
//! Priority   Path             Value
//! 3          /                *<1>
//! 2          |-s              nil
//! 1          | |-earch/       *<2>
//! 1          | |-upport       *<3>
//! 1          |-blog/          nil
//! 1            |-:post/       *<4>
//! ```
//!
//! The priority of a node is the number of values reachable through it.
//! Children are ordered by priority so that the most populated branches are
//! probed first, and wildcard children never share a parent with literal
//! children, which is what lets lookup run without backtracking.

use crate::error::InsertError;
use crate::params::Params;

use parking_lot::RwLock;

/// Trailing slash recommendation returned by a failed lookup.
///
/// `AddSlash` means the path with an extra trailing slash would match,
/// `RemoveSlash` means the path without its trailing slash would match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tsr {
    No,
    AddSlash,
    RemoveSlash,
}

/// A successful lookup: the stored value and the captured parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<T> {
    pub value: T,
    pub params: Params,
}

/// A route tree guarded by a reader-writer lock.
///
/// `add` and `remove` take the write lock, `get` takes the read lock, so
/// lookups run concurrently with each other and are only blocked while the
/// tree is being mutated.
///
/// ```rust
/// use radixmux::tree::{Tree, Tsr};
///
/// let tree = Tree::new();
/// tree.add("/files/*path", 1).unwrap();
/// tree.add("/add/user/", 2).unwrap();
///
/// let matched = tree.get("/files/a/b.txt", false).unwrap();
/// assert_eq!(matched.value, 1);
/// assert_eq!(matched.params.get("path"), Some("/a/b.txt"));
///
/// assert_eq!(tree.get("/add/user", true).unwrap_err(), Tsr::AddSlash);
/// ```
#[derive(Debug)]
pub struct Tree<T> {
    root: RwLock<Node<T>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Tree {
            root: RwLock::new(Node::default()),
        }
    }
}

impl<T: Clone> Tree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` for the pattern `path`.
    ///
    /// The tree is left untouched if an error is returned.
    pub fn add(&self, path: &str, value: T) -> Result<(), InsertError> {
        self.root.write().insert(path, value)
    }

    /// Removes the value registered for the exact pattern `path`.
    ///
    /// Wildcards in `path` are not expanded: to remove `/user/:id`, pass
    /// `/user/:id`.
    pub fn remove(&self, path: &str) -> Option<T> {
        self.root.write().remove(path)
    }

    /// Looks up the value registered for a concrete request path.
    ///
    /// On a miss, the error carries a trailing slash recommendation if
    /// `tsr` is set, and `Tsr::No` otherwise.
    pub fn get(&self, path: &str, tsr: bool) -> Result<Match<T>, Tsr> {
        let root = self.root.read();
        root.at(path, tsr).map(|(value, params)| Match {
            value: value.clone(),
            params,
        })
    }

    /// Returns `true` if no value is registered.
    pub fn is_empty(&self) -> bool {
        self.root.read().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Static,
    Param,
    CatchAll,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Node<T> {
    pub(crate) path: Vec<u8>,
    pub(crate) kind: NodeKind,
    pub(crate) children: Vec<Node<T>>,
    pub(crate) priority: u32,
    pub(crate) value: Option<T>,
    pub(crate) max_params: u8,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Node {
            path: Vec::new(),
            kind: NodeKind::Static,
            children: Vec::new(),
            priority: 0,
            value: None,
            max_params: 0,
        }
    }
}

impl<T> Node<T> {
    pub(crate) fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    pub(crate) fn insert(&mut self, path: &str, value: T) -> Result<(), InsertError> {
        validate(path)?;

        if self.is_empty() {
            *self = Node::build(path.as_bytes(), value);
            return Ok(());
        }

        self.add(path.as_bytes(), 0, path, value)
    }

    /// Builds a fresh chain of nodes for an already validated pattern.
    fn build(path: &[u8], value: T) -> Node<T> {
        let (start, end) = match find_wildcard(path) {
            Some(wildcard) => wildcard,
            None => return Node::leaf(NodeKind::Static, path, value),
        };

        if path[start] == b':' {
            if start > 0 {
                let child = Node::build(&path[start..], value);
                return Node::parent(NodeKind::Static, &path[..start], child);
            }

            // the param keeps its trailing slash unless a catch-all follows
            let fragment_end = if end < path.len() && path.get(end + 1) != Some(&b'*') {
                end + 1
            } else {
                end
            };

            return match &path[fragment_end..] {
                [] => Node::leaf(NodeKind::Param, path, value),
                rest => Node::parent(
                    NodeKind::Param,
                    &path[..fragment_end],
                    Node::build(rest, value),
                ),
            };
        }

        // the catch-all owns the slash that precedes it
        let slash = start.saturating_sub(1);
        if slash > 0 {
            let child = Node::build(&path[slash..], value);
            return Node::parent(NodeKind::Static, &path[..slash], child);
        }

        Node::leaf(NodeKind::CatchAll, path, value)
    }

    fn leaf(kind: NodeKind, path: &[u8], value: T) -> Node<T> {
        Node {
            path: path.to_vec(),
            kind,
            children: Vec::new(),
            priority: 1,
            value: Some(value),
            max_params: own_params(kind),
        }
    }

    fn parent(kind: NodeKind, path: &[u8], child: Node<T>) -> Node<T> {
        Node {
            path: path.to_vec(),
            kind,
            priority: child.priority,
            max_params: own_params(kind).saturating_add(child.max_params),
            children: vec![child],
            value: None,
        }
    }

    /// Inserts `path`, the part of `full` starting at `offset`, below this
    /// node. `path` shares at least its first byte with this node.
    fn add(&mut self, path: &[u8], offset: usize, full: &str, value: T) -> Result<(), InsertError> {
        let common = match self.kind {
            NodeKind::Static => longest_common_prefix(&self.path, path),
            NodeKind::Param => self.param_prefix(path, offset, full)?,
            NodeKind::CatchAll => {
                return Err(if self.path == path {
                    InsertError::AlreadyRegistered { path: full.into() }
                } else {
                    InsertError::CatchAllConflict {
                        path: full.into(),
                        prefix: prefix_of(full, offset + self.path.len().min(path.len())),
                    }
                });
            }
        };

        let split = common < self.path.len();
        if split {
            self.split_at(common);
        }

        match self.add_below(&path[common..], offset + common, full, value) {
            Ok(()) => {
                self.priority += 1;
                Ok(())
            }
            Err(err) => {
                if split {
                    self.merge_child();
                }
                Err(err)
            }
        }
    }

    /// Attaches `path` to a node whose own fragment has been fully matched.
    fn add_below(&mut self, path: &[u8], offset: usize, full: &str, value: T) -> Result<(), InsertError> {
        let conflict = || InsertError::WildcardConflict {
            path: full.into(),
            prefix: prefix_of(full, offset),
        };

        let c = match path.first() {
            Some(&c) => c,
            None => {
                if self.value.is_some() {
                    return Err(InsertError::AlreadyRegistered { path: full.into() });
                }
                self.value = Some(value);
                return Ok(());
            }
        };

        if self.has_wild_child() {
            let child = &mut self.children[0];
            let descend = match child.kind {
                NodeKind::Param => c == b':',
                _ => path.starts_with(b"/*"),
            };

            if !descend {
                return Err(match child.kind {
                    NodeKind::CatchAll => InsertError::CatchAllConflict {
                        path: full.into(),
                        prefix: prefix_of(full, offset),
                    },
                    _ => conflict(),
                });
            }

            child.add(path, offset, full, value)?;
            self.update_max_params();
            return Ok(());
        }

        match c {
            b'*' => {
                return Err(InsertError::CatchAllConflict {
                    path: full.into(),
                    prefix: prefix_of(full, offset),
                })
            }
            b':' if !self.children.is_empty() => return Err(conflict()),
            b'/' if path.get(1) == Some(&b'*') && !self.children.is_empty() => {
                return Err(conflict())
            }
            _ => {}
        }

        match self.children.iter().position(|child| child.path[0] == c) {
            Some(i) => self.children[i].add(path, offset, full, value)?,
            None => self.children.push(Node::build(path, value)),
        }

        self.sort_children();
        self.update_max_params();
        Ok(())
    }

    /// Returns how much of `path` is shared with this param node, or an
    /// error if the parameter names differ.
    fn param_prefix(&self, path: &[u8], offset: usize, full: &str) -> Result<usize, InsertError> {
        let name_end = segment_end(&self.path);
        let new_end = segment_end(path);

        if self.path[..name_end] != path[..new_end] {
            return Err(InsertError::WildcardNameConflict {
                wildcard: String::from_utf8_lossy(&path[..new_end]).into_owned(),
                path: full.into(),
                existing: String::from_utf8_lossy(&self.path[..name_end]).into_owned(),
                prefix: prefix_of(full, offset),
            });
        }

        let both_slash = self.path.len() > name_end && path.get(new_end) == Some(&b'/');
        Ok(if both_slash { name_end + 1 } else { name_end })
    }

    /// Splits this node at `at`: the node keeps the first `at` bytes and a
    /// new static child takes over the suffix, children and value.
    fn split_at(&mut self, at: usize) {
        let child = Node {
            path: self.path.split_off(at),
            kind: NodeKind::Static,
            children: std::mem::take(&mut self.children),
            priority: self.priority,
            value: self.value.take(),
            max_params: self.max_params - own_params(self.kind),
        };

        self.children = vec![child];
    }

    /// The inverse of `split_at`: absorbs the only child into this node.
    fn merge_child(&mut self) {
        if let Some(child) = self.children.pop() {
            self.path.extend_from_slice(&child.path);
            self.children = child.children;
            self.value = child.value;
            self.priority = child.priority;
            self.max_params = own_params(self.kind).saturating_add(child.max_params);
        }
    }

    pub(crate) fn remove(&mut self, path: &str) -> Option<T> {
        let value = self.remove_at(path.as_bytes())?;
        if self.compact() {
            *self = Node::default();
        }
        Some(value)
    }

    fn remove_at(&mut self, path: &[u8]) -> Option<T> {
        let rest = path.strip_prefix(self.path.as_slice())?;

        let value = match rest.first() {
            None => self.value.take()?,
            Some(c) => {
                let i = self.children.iter().position(|child| child.path.first() == Some(c))?;
                let value = self.children[i].remove_at(rest)?;
                if self.children[i].compact() {
                    self.children.remove(i);
                }
                self.sort_children();
                value
            }
        };

        self.priority -= 1;
        self.update_max_params();
        Some(value)
    }

    /// Merges a valueless node with its only child where the pair is the
    /// product of a split. Returns `true` if the node holds nothing anymore.
    fn compact(&mut self) -> bool {
        if self.value.is_some() {
            return false;
        }

        if self.children.is_empty() {
            return true;
        }

        if self.children.len() == 1 && self.can_merge(&self.children[0]) {
            self.merge_child();
        }
        false
    }

    fn can_merge(&self, child: &Node<T>) -> bool {
        if child.kind != NodeKind::Static {
            return false;
        }

        match self.kind {
            NodeKind::Static => true,
            NodeKind::Param => !self.path.ends_with(b"/") && child.path == b"/",
            NodeKind::CatchAll => false,
        }
    }

    /// Walks the tree for a concrete request path.
    pub(crate) fn at<'n>(&'n self, full: &str, tsr: bool) -> Result<(&'n T, Params), Tsr> {
        let miss = |advice: Tsr| Err(if tsr { advice } else { Tsr::No });

        let bytes = full.as_bytes();
        let mut params = Params::with_capacity(self.max_params as usize);
        let mut parent: Option<&Node<T>> = None;
        let mut node = self;
        let mut pos = 0;

        loop {
            let rest = &bytes[pos..];

            match node.kind {
                NodeKind::Static => {
                    if !rest.starts_with(&node.path) {
                        let add_slash = node.value.is_some()
                            && rest.len() + 1 == node.path.len()
                            && node.path.ends_with(b"/")
                            && node.path.starts_with(rest);
                        let remove_slash =
                            rest == b"/" && parent.map_or(false, |p| p.value.is_some());

                        return miss(if add_slash {
                            Tsr::AddSlash
                        } else if remove_slash {
                            Tsr::RemoveSlash
                        } else {
                            Tsr::No
                        });
                    }

                    pos += node.path.len();
                }
                NodeKind::Param => {
                    let end = segment_end(rest);
                    if end == 0 {
                        return miss(Tsr::No);
                    }

                    params.push(node.param_name(), full.get(pos..pos + end).unwrap_or_default());
                    pos += end;

                    if node.path.ends_with(b"/") {
                        if pos == bytes.len() {
                            return miss(if node.value.is_some() {
                                Tsr::AddSlash
                            } else {
                                Tsr::No
                            });
                        }

                        pos += 1;
                    }
                }
                NodeKind::CatchAll => {
                    params.push(node.param_name(), full.get(pos..).unwrap_or_default());
                    return match node.value {
                        Some(ref value) => Ok((value, params)),
                        None => miss(Tsr::No),
                    };
                }
            }

            let rest = &bytes[pos..];

            if rest.is_empty() {
                if let Some(ref value) = node.value {
                    return Ok((value, params));
                }

                // a handler one slash further down
                let add_slash = node.children.iter().any(|child| {
                    child.kind == NodeKind::CatchAll || (child.path == b"/" && child.value.is_some())
                });
                // a slash-only node below a handler
                let remove_slash = node.kind == NodeKind::Static
                    && node.path == b"/"
                    && parent.map_or(false, |p| p.value.is_some());

                return miss(if add_slash {
                    Tsr::AddSlash
                } else if remove_slash {
                    Tsr::RemoveSlash
                } else {
                    Tsr::No
                });
            }

            match node.child_for(rest) {
                Some(child) => {
                    parent = Some(node);
                    node = child;
                }
                None => {
                    return miss(if rest == b"/" && node.value.is_some() {
                        Tsr::RemoveSlash
                    } else {
                        Tsr::No
                    });
                }
            }
        }
    }

    fn child_for(&self, rest: &[u8]) -> Option<&Node<T>> {
        match self.children.first() {
            Some(child) if child.kind == NodeKind::Param => Some(child),
            Some(child) if child.kind == NodeKind::CatchAll => {
                if rest.first() == Some(&b'/') {
                    Some(child)
                } else {
                    None
                }
            }
            _ => self
                .children
                .iter()
                .find(|child| child.path.first() == rest.first()),
        }
    }

    fn has_wild_child(&self) -> bool {
        self.children
            .first()
            .map_or(false, |child| child.kind != NodeKind::Static)
    }

    fn param_name(&self) -> String {
        let start = match self.kind {
            NodeKind::CatchAll => 2,
            _ => 1,
        };
        let end = start + segment_end(&self.path[start..]);
        String::from_utf8_lossy(&self.path[start..end]).into_owned()
    }

    fn sort_children(&mut self) {
        // stable, so equal priorities keep insertion order
        self.children.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    fn update_max_params(&mut self) {
        let below = self
            .children
            .iter()
            .map(|child| child.max_params)
            .max()
            .unwrap_or(0);
        self.max_params = own_params(self.kind).saturating_add(below);
    }
}

fn own_params(kind: NodeKind) -> u8 {
    match kind {
        NodeKind::Static => 0,
        NodeKind::Param | NodeKind::CatchAll => 1,
    }
}

fn longest_common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(a, b)| a == b).count()
}

fn segment_end(path: &[u8]) -> usize {
    path.iter().position(|&c| c == b'/').unwrap_or(path.len())
}

fn prefix_of(full: &str, end: usize) -> String {
    String::from_utf8_lossy(&full.as_bytes()[..end.min(full.len())]).into_owned()
}

/// Returns the `(start, end)` of the first wildcard segment in `path`.
fn find_wildcard(path: &[u8]) -> Option<(usize, usize)> {
    let start = path.iter().position(|&c| c == b':' || c == b'*')?;
    Some((start, start + 1 + segment_end(&path[start + 1..])))
}

/// Checks the syntax of a whole pattern before the tree is touched.
fn validate(path: &str) -> Result<(), InsertError> {
    let bytes = path.as_bytes();

    if !path.starts_with('/') {
        return Err(InsertError::MissingLeadingSlash { path: path.into() });
    }

    let mut offset = 0;
    while let Some((start, end)) = find_wildcard(&bytes[offset..]) {
        let (start, end) = (offset + start, offset + end);
        let segment = &bytes[start..end];

        if segment[1..].iter().any(|&c| c == b':' || c == b'*') {
            return Err(InsertError::TooManyWildcards {
                segment: String::from_utf8_lossy(segment).into_owned(),
                path: path.into(),
            });
        }

        if segment.len() < 2 {
            return Err(InsertError::EmptyWildcardName { path: path.into() });
        }

        if segment[0] == b'*' {
            if end != bytes.len() {
                return Err(InsertError::CatchAllNotAtEnd { path: path.into() });
            }

            if bytes[start - 1] != b'/' {
                return Err(InsertError::MissingSlashBeforeCatchAll { path: path.into() });
            }
        }

        offset = end;
    }

    Ok(())
}
