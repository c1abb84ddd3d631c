//! Object paths: chains of dictionary keys and array indices.
//!
//! A path is written as a sequence of `.Key` and `[index]` steps, e.g.
//! `.Resources.Font.F1` or `.Kids[-1].MediaBox[2]`. The empty path (written
//! `.` or as an empty string) denotes the starting node itself.
//!
//! Resolution errors carry both the requested path and the prefix that did
//! resolve, so the caller can see where the walk stopped.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::object::{normalize_index, Object, ObjectRef};
use std::fmt;
use std::str::FromStr;

/// One step of an [`ObjectPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Dictionary (or stream dictionary) key, without the leading `/`
    Key(String),
    /// Array index; negative values count from the end
    Index(isize),
}

/// Immutable sequence of path steps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ObjectPath {
    steps: Vec<PathStep>,
}

impl ObjectPath {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from steps.
    pub fn from_steps(steps: impl IntoIterator<Item = PathStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// The steps, in order.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for the empty path.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// A new path with a key step appended.
    pub fn child(&self, key: impl Into<String>) -> Self {
        self.with_step(PathStep::Key(key.into()))
    }

    /// A new path with an index step appended.
    pub fn index(&self, index: isize) -> Self {
        self.with_step(PathStep::Index(index))
    }

    fn with_step(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    fn prefix(&self, len: usize) -> ObjectPath {
        Self {
            steps: self.steps[..len].to_vec(),
        }
    }

    /// The path without its last step, and that step.
    pub fn split_last(&self) -> Option<(ObjectPath, &PathStep)> {
        let (last, _) = self.steps.split_last()?;
        Some((self.prefix(self.steps.len() - 1), last))
    }

    /// Follow the path from `node`.
    ///
    /// # Example
    ///
    /// ```
    /// use pdf_graph::node::Node;
    /// use pdf_graph::object::Object;
    /// use pdf_graph::path::ObjectPath;
    ///
    /// let obj = Object::dictionary([(
    ///     "A",
    ///     Object::dictionary([("B", Object::Array(vec![Object::Integer(7)]))]),
    /// )]);
    /// let path: ObjectPath = ".A.B[0]".parse().unwrap();
    /// let found = path.resolve(Node::direct(&obj)).unwrap();
    /// assert_eq!(found.resolve(), Some(&Object::Integer(7)));
    ///
    /// let err = ".A.B.C".parse::<ObjectPath>().unwrap().resolve(Node::direct(&obj));
    /// assert!(err.is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] and [`Error::IndexOutOfRange`] for missing
    /// children, [`Error::InvalidObjectType`] when a step meets a node of the
    /// wrong kind.
    pub fn resolve<'a>(&self, node: Node<'a>) -> Result<Node<'a>> {
        let mut current = node;
        for (depth, step) in self.steps.iter().enumerate() {
            current = self.step_into(current, step, depth)?;
        }
        Ok(current)
    }

    /// Like [`resolve`](Self::resolve), but a missing key or index yields
    /// `default`. Type errors are still reported.
    pub fn resolve_or<'a>(&self, node: Node<'a>, default: Node<'a>) -> Result<Node<'a>> {
        match self.resolve(node) {
            Ok(found) => Ok(found),
            Err(Error::KeyNotFound { .. }) | Err(Error::IndexOutOfRange { .. }) => Ok(default),
            Err(e) => Err(e),
        }
    }

    fn step_into<'a>(&self, current: Node<'a>, step: &PathStep, depth: usize) -> Result<Node<'a>> {
        let traversed = || self.prefix(depth).to_string();
        let mismatch = |expected: &str| {
            Error::type_error(
                expected,
                format!(
                    "{} at {} (requested {})",
                    current.type_tag(),
                    traversed(),
                    self
                ),
            )
        };
        match step {
            PathStep::Key(key) => {
                if current.dict().is_none() {
                    return Err(mismatch("Dictionary or Stream"));
                }
                current.get(key).ok_or_else(|| Error::KeyNotFound {
                    key: key.clone(),
                    requested: self.to_string(),
                    traversed: traversed(),
                })
            },
            PathStep::Index(index) => {
                if !matches!(current.resolve(), Some(Object::Array(_))) {
                    return Err(mismatch("Array"));
                }
                current.item(*index).ok_or_else(|| Error::IndexOutOfRange {
                    index: *index,
                    len: current.len(),
                    requested: self.to_string(),
                    traversed: traversed(),
                })
            },
        }
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str(".");
        }
        for step in &self.steps {
            match step {
                PathStep::Key(key) => write!(f, ".{}", key)?,
                PathStep::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl FromStr for ObjectPath {
    type Err = Error;

    /// Parse `.A.B[0]` syntax. Keys run up to the next `.` or `[`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidPath {
            path: s.to_string(),
            reason: reason.to_string(),
        };
        if s.is_empty() || s == "." {
            return Ok(Self::root());
        }

        let mut steps = Vec::new();
        let mut rest = s;
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('.') {
                let end = after.find(['.', '[']).unwrap_or(after.len());
                if end == 0 {
                    return Err(invalid("empty key"));
                }
                steps.push(PathStep::Key(after[..end].to_string()));
                rest = &after[end..];
            } else if let Some(after) = rest.strip_prefix('[') {
                let end = after.find(']').ok_or_else(|| invalid("unclosed '['"))?;
                let index = after[..end]
                    .trim()
                    .parse::<isize>()
                    .map_err(|_| invalid("index must be an integer"))?;
                steps.push(PathStep::Index(index));
                rest = &after[end + 1..];
            } else {
                return Err(invalid("expected '.' or '['"));
            }
        }
        Ok(Self { steps })
    }
}

/// Descend one step into a direct container for writing.
fn step_mut<'o>(obj: &'o mut Object, step: &PathStep) -> Result<&'o mut Object> {
    let found = obj.type_name();
    match step {
        PathStep::Key(key) => obj
            .as_dict_mut()
            .ok_or_else(|| Error::type_error("Dictionary or Stream", found))?
            .get_mut(key.as_str())
            .ok_or_else(|| Error::InvalidPath {
                path: key.clone(),
                reason: "key vanished during assignment".to_string(),
            }),
        PathStep::Index(index) => {
            let items = obj
                .as_array_mut()
                .ok_or_else(|| Error::type_error("Array", found))?;
            let len = items.len();
            let pos = normalize_index(*index, len).ok_or_else(|| Error::IndexOutOfRange {
                index: *index,
                len,
                requested: format!("[{}]", index),
                traversed: ".".to_string(),
            })?;
            Ok(&mut items[pos])
        },
    }
}

fn assign_last(
    target: &mut Object,
    path: &ObjectPath,
    parent: &ObjectPath,
    last: &PathStep,
    value: Object,
) -> Result<()> {
    let result = match last {
        PathStep::Key(key) => target.set_key(key, value),
        PathStep::Index(index) => target.set_item(*index, value),
    };
    result.map_err(|err| match err {
        Error::IndexOutOfRange { index, len, .. } => Error::IndexOutOfRange {
            index,
            len,
            requested: path.to_string(),
            traversed: parent.to_string(),
        },
        Error::InvalidObjectType { expected, found } => Error::InvalidObjectType {
            expected,
            found: format!("{} at {} (requested {})", found, parent, path),
        },
        other => other,
    })
}

fn root_assignment(path: &ObjectPath) -> Error {
    Error::InvalidPath {
        path: path.to_string(),
        reason: "cannot assign to the starting node itself".to_string(),
    }
}

/// Assign `value` at `path` inside a detached object.
///
/// Every step but the last must already resolve; the last step creates or
/// replaces a key (or replaces an array item). Paths that cross an indirect
/// reference cannot be followed without a document.
pub fn assign_direct(root: &mut Object, path: &ObjectPath, value: Object) -> Result<()> {
    let (parent, last) = path.split_last().ok_or_else(|| root_assignment(path))?;
    parent.resolve(Node::direct(root))?;

    let mut target = root;
    for step in parent.steps() {
        target = step_mut(target, step)?;
    }
    assign_last(target, path, &parent, last, value)
}

impl Document {
    /// Follow `path` from the indirect object `root`.
    pub fn resolve_path(&self, root: ObjectRef, path: &ObjectPath) -> Result<Node<'_>> {
        path.resolve(self.node(root))
    }

    /// Assign `value` at `path` starting from the indirect object `root`.
    ///
    /// The walk follows indirect references, so the value lands in whichever
    /// object holds the parent container.
    pub fn assign_path(&mut self, root: ObjectRef, path: &ObjectPath, value: Object) -> Result<()> {
        let (parent, last) = path.split_last().ok_or_else(|| root_assignment(path))?;
        parent.resolve(self.node(root))?;

        let (anchor, local) = self.anchor_for(root, parent.steps())?;
        let mut target = self
            .get_mut(anchor)
            .ok_or(Error::ObjectNotFound(anchor.id, anchor.gen))?;
        for step in &local {
            target = step_mut(target, step)?;
        }
        assign_last(target, path, &parent, last, value)
    }

    /// The last indirect object on the walk, and the direct steps below it.
    fn anchor_for(&self, root: ObjectRef, steps: &[PathStep]) -> Result<(ObjectRef, Vec<PathStep>)> {
        let missing = |r: ObjectRef| Error::ObjectNotFound(r.id, r.gen);
        let mut anchor = root;
        let mut local = Vec::new();
        let mut current = self.get(root).ok_or_else(|| missing(root))?;

        for step in steps {
            let child = match (step, current) {
                (PathStep::Key(key), obj) => obj.as_dict().and_then(|d| d.get(key.as_str())),
                (PathStep::Index(index), Object::Array(items)) => {
                    normalize_index(*index, items.len()).map(|pos| &items[pos])
                },
                _ => None,
            }
            .ok_or_else(|| Error::InvalidPath {
                path: ObjectPath::from_steps(steps.iter().cloned()).to_string(),
                reason: "path changed during assignment".to_string(),
            })?;

            if let Object::Reference(r) = child {
                anchor = *r;
                local.clear();
                current = self.get(*r).ok_or_else(|| missing(*r))?;
            } else {
                local.push(step.clone());
                current = child;
            }
        }
        Ok((anchor, local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Object {
        Object::dictionary([(
            "A",
            Object::dictionary([("B", Object::Dictionary(Default::default()))]),
        )])
    }

    #[test]
    fn test_parse_and_display() {
        let path: ObjectPath = ".Kids[-1].MediaBox[2]".parse().unwrap();
        assert_eq!(
            path.steps(),
            &[
                PathStep::Key("Kids".into()),
                PathStep::Index(-1),
                PathStep::Key("MediaBox".into()),
                PathStep::Index(2),
            ]
        );
        assert_eq!(path.to_string(), ".Kids[-1].MediaBox[2]");
        assert_eq!(ObjectPath::root().to_string(), ".");
        assert!("".parse::<ObjectPath>().unwrap().is_empty());
        assert!("A".parse::<ObjectPath>().is_err());
        assert!(".A[x]".parse::<ObjectPath>().is_err());
        assert!(".A[1".parse::<ObjectPath>().is_err());
        assert!("..A".parse::<ObjectPath>().is_err());
    }

    #[test]
    fn test_functional_append() {
        let base = ObjectPath::root().child("A");
        let extended = base.index(0);
        assert_eq!(base.to_string(), ".A");
        assert_eq!(extended.to_string(), ".A[0]");
    }

    #[test]
    fn test_missing_key_reports_prefix() {
        let obj = nested();
        let path: ObjectPath = ".A.B.C".parse().unwrap();
        let err = path.resolve(Node::direct(&obj)).unwrap_err();
        match &err {
            Error::KeyNotFound {
                key,
                requested,
                traversed,
            } => {
                assert_eq!(key, "C");
                assert_eq!(requested, ".A.B.C");
                assert_eq!(traversed, ".A.B");
            },
            other => panic!("expected KeyNotFound, got {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains("C"));
        assert!(message.contains("A.B"));
    }

    #[test]
    fn test_empty_path_is_identity() {
        let obj = nested();
        let node = Node::direct(&obj);
        assert!(ObjectPath::root().resolve(node).unwrap().same_underlying(&node));
    }

    #[test]
    fn test_type_errors_are_not_defaulted() {
        let obj = Object::dictionary([("A", Object::Integer(1))]);
        let fallback = Object::Null;
        let node = Node::direct(&obj);

        let missing: ObjectPath = ".B".parse().unwrap();
        let got = missing.resolve_or(node, Node::direct(&fallback)).unwrap();
        assert_eq!(got.resolve(), Some(&Object::Null));

        let wrong: ObjectPath = ".A.B".parse().unwrap();
        assert!(matches!(
            wrong.resolve_or(node, Node::direct(&fallback)),
            Err(Error::InvalidObjectType { .. })
        ));
    }

    #[test]
    fn test_assign_direct() {
        let mut obj = nested();
        assign_direct(&mut obj, &".A.B.C".parse().unwrap(), Object::Integer(3)).unwrap();
        let path: ObjectPath = ".A.B.C".parse().unwrap();
        assert_eq!(path.resolve(Node::direct(&obj)).unwrap().resolve(), Some(&Object::Integer(3)));

        let err = assign_direct(&mut obj, &".X.Y".parse().unwrap(), Object::Integer(1));
        assert!(matches!(err, Err(Error::KeyNotFound { .. })));
        assert!(assign_direct(&mut obj, &ObjectPath::root(), Object::Null).is_err());
    }

    #[test]
    fn test_assign_through_references() {
        let mut doc = Document::new();
        let resources = doc.add_object(Object::dictionary([(
            "Font",
            Object::Dictionary(Default::default()),
        )]));
        let page = doc.add_object(Object::dictionary([
            ("Type", Object::name("Page")),
            ("Resources", Object::Reference(resources)),
        ]));

        let path: ObjectPath = ".Resources.Font.F1".parse().unwrap();
        doc.assign_path(page, &path, Object::name("Helvetica")).unwrap();

        let font = doc
            .get(resources)
            .and_then(Object::as_dict)
            .and_then(|d| d.get("Font"))
            .and_then(Object::as_dict)
            .and_then(|d| d.get("F1"));
        assert_eq!(font, Some(&Object::name("Helvetica")));
        assert!(doc.resolve_path(page, &path).is_ok());
    }
}
