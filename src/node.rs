//! Object handles.
//!
//! A [`Node`] is a borrowed view of one object in the graph: either an
//! indirect object of a [`Document`] (identified by its [`ObjectRef`]) or a
//! direct object reached by walking into a container. Child handles inherit
//! the owning document, so references found inside direct containers
//! resolve against it.
//!
//! Two handles are the *same object* when they are indirect handles to the
//! same reference of the same document, or direct handles to the same
//! storage location. A handle whose reference cannot be reached (no owning
//! document, or a deleted object) is *unrealized*.

use crate::document::{Document, DocumentId};
use crate::object::{Dictionary, Object, ObjectRef, ObjectType};
use bytes::Bytes;

/// Borrowed handle to an object, direct or indirect.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    doc: Option<&'a Document>,
    kind: NodeKind<'a>,
}

#[derive(Clone, Copy)]
enum NodeKind<'a> {
    Direct(&'a Object),
    Indirect(ObjectRef),
}

/// Stable identity of a realized node, used for visited sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Indirect object of a document
    Indirect(DocumentId, ObjectRef),
    /// Direct object, keyed by storage address
    Direct(usize),
}

impl<'a> Node<'a> {
    /// Handle to an object with no owning document.
    ///
    /// A bare [`Object::Reference`] viewed this way is unrealized.
    pub fn direct(obj: &'a Object) -> Self {
        Self::from_object(None, obj)
    }

    /// Handle to a direct object inside `doc`.
    pub fn in_document(doc: &'a Document, obj: &'a Object) -> Self {
        Self::from_object(Some(doc), obj)
    }

    /// Handle to an indirect object of `doc`.
    pub fn indirect(doc: &'a Document, obj_ref: ObjectRef) -> Self {
        Self {
            doc: Some(doc),
            kind: NodeKind::Indirect(obj_ref),
        }
    }

    fn from_object(doc: Option<&'a Document>, obj: &'a Object) -> Self {
        let kind = match obj {
            Object::Reference(r) => NodeKind::Indirect(*r),
            other => NodeKind::Direct(other),
        };
        Self { doc, kind }
    }

    fn child(&self, obj: &'a Object) -> Node<'a> {
        Self::from_object(self.doc, obj)
    }

    /// The object behind this handle, following its reference if indirect.
    pub fn resolve(&self) -> Option<&'a Object> {
        match self.kind {
            NodeKind::Direct(obj) => Some(obj),
            NodeKind::Indirect(r) => self.doc.and_then(|doc| doc.get(r)),
        }
    }

    /// True if the handle can be resolved.
    pub fn is_realized(&self) -> bool {
        self.resolve().is_some()
    }

    /// Type tag; `Unresolved` for unrealized handles.
    pub fn type_tag(&self) -> ObjectType {
        self.resolve().map_or(ObjectType::Unresolved, Object::type_tag)
    }

    /// True for handles to indirect objects.
    pub fn is_indirect(&self) -> bool {
        matches!(self.kind, NodeKind::Indirect(_))
    }

    /// Owning document, if any.
    pub fn owner(&self) -> Option<&'a Document> {
        self.doc
    }

    /// Object and generation number of an indirect handle.
    pub fn objgen(&self) -> Option<ObjectRef> {
        match self.kind {
            NodeKind::Indirect(r) => Some(r),
            NodeKind::Direct(_) => None,
        }
    }

    /// Identity of a realized handle.
    pub fn identity(&self) -> Option<Identity> {
        match self.kind {
            NodeKind::Indirect(r) => {
                let doc = self.doc?;
                doc.get(r)?;
                Some(Identity::Indirect(doc.id(), r))
            },
            NodeKind::Direct(obj) => Some(Identity::Direct(obj as *const Object as usize)),
        }
    }

    /// True if both handles view the same underlying object.
    ///
    /// Unrealized handles are never the same as anything.
    pub fn same_underlying(&self, other: &Node<'_>) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Dictionary view of a dictionary or stream.
    pub fn dict(&self) -> Option<&'a Dictionary> {
        self.resolve().and_then(Object::as_dict)
    }

    /// Value of `key` in a dictionary or stream.
    pub fn get(&self, key: &str) -> Option<Node<'a>> {
        self.dict()?.get(key).map(|value| self.child(value))
    }

    /// Array item; negative indices count from the end.
    pub fn item(&self, index: isize) -> Option<Node<'a>> {
        let items = self.resolve()?.as_array()?;
        let pos = crate::object::normalize_index(index, items.len())?;
        Some(self.child(&items[pos]))
    }

    /// Number of array items or dictionary entries; zero for everything else.
    pub fn len(&self) -> usize {
        match self.resolve() {
            Some(Object::Array(items)) => items.len(),
            Some(Object::Dictionary(dict)) | Some(Object::Stream { dict, .. }) => dict.len(),
            _ => 0,
        }
    }

    /// True if [`Node::len`] is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of a dictionary or stream, in storage order.
    pub fn keys(&self) -> Vec<&'a str> {
        self.dict()
            .map(|dict| dict.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Array items as child handles.
    pub fn items(&self) -> Vec<Node<'a>> {
        match self.resolve() {
            Some(Object::Array(items)) => items.iter().map(|item| self.child(item)).collect(),
            _ => Vec::new(),
        }
    }

    /// Dictionary entries as child handles.
    pub fn entries(&self) -> Vec<(&'a str, Node<'a>)> {
        self.dict()
            .map(|dict| {
                dict.iter()
                    .map(|(k, v)| (k.as_str(), self.child(v)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Stored payload of a stream.
    pub fn stream_data(&self) -> Option<&'a Bytes> {
        match self.resolve() {
            Some(Object::Stream { data, .. }) => Some(data),
            _ => None,
        }
    }

    /// The `/Type` name of a dictionary or stream.
    pub fn pdf_type(&self) -> Option<&'a str> {
        self.dict()?.get("Type")?.as_name()
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("Node");
        s.field("owner", &self.doc.map(Document::id));
        match self.kind {
            NodeKind::Direct(obj) => s.field("direct", obj),
            NodeKind::Indirect(r) => s.field("indirect", &r),
        };
        s.finish()
    }
}

impl std::fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::repr::represent(*self))
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        crate::equality::equal(*self, *other)
    }
}
