//! In-memory PDF document: an arena of indirect objects plus the page order.
//!
//! The arena is keyed by [`ObjectRef`]. Indirect objects refer to each other
//! through [`Object::Reference`], so cycles (a page's `/Parent` pointing back
//! at the page tree, outlines pointing at pages) never create ownership
//! loops; they are plain keys into the map.
//!
//! The page tree is kept flat: the catalog's `/Pages` node lists every page
//! in `/Kids`, carries `/Count`, and each page's `/Parent` points back at it.
//! `page_order` is the authoritative order and the tree is rewritten from it
//! after every page mutation.

use crate::error::{Error, Result};
use crate::filters::{self, DecodeLevel};
use crate::node::Node;
use crate::object::{Dictionary, Object, ObjectRef, ObjectType};
use bytes::Bytes;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        DocumentId(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A PDF document held entirely in memory.
///
/// # Example
///
/// ```
/// use pdf_graph::document::Document;
/// use pdf_graph::object::Object;
///
/// let mut doc = Document::new();
/// let page = doc
///     .push_page(Object::dictionary([("Type", Object::name("Page"))]))
///     .unwrap();
/// assert_eq!(doc.page_refs(), &[page]);
/// ```
#[derive(Debug)]
pub struct Document {
    id: DocumentId,
    objects: IndexMap<ObjectRef, Object>,
    next_object_id: u32,
    catalog: ObjectRef,
    pages_root: ObjectRef,
    page_order: Vec<ObjectRef>,
    /// Per source document: source object -> local copy
    foreign_copies: HashMap<DocumentId, HashMap<ObjectRef, ObjectRef>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with a catalog and an empty page tree.
    pub fn new() -> Self {
        let mut doc = Self {
            id: DocumentId::next(),
            objects: IndexMap::new(),
            next_object_id: 1,
            catalog: ObjectRef::new(0, 0),
            pages_root: ObjectRef::new(0, 0),
            page_order: Vec::new(),
            foreign_copies: HashMap::new(),
        };

        doc.pages_root = doc.add_object(Object::dictionary([
            ("Type", Object::name("Pages")),
            ("Kids", Object::Array(Vec::new())),
            ("Count", Object::Integer(0)),
        ]));
        doc.catalog = doc.add_object(Object::dictionary([
            ("Type", Object::name("Catalog")),
            ("Pages", Object::Reference(doc.pages_root)),
        ]));

        log::debug!("Created document {}", doc.id);
        doc
    }

    /// Identity of this document.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Store `obj` as a new indirect object and return its reference.
    pub fn add_object(&mut self, obj: Object) -> ObjectRef {
        let obj_ref = ObjectRef::new(self.next_object_id, 0);
        self.next_object_id += 1;
        self.objects.insert(obj_ref, obj);
        obj_ref
    }

    /// Make `obj` indirect. A reference to an existing object is returned as is.
    pub fn make_indirect(&mut self, obj: Object) -> ObjectRef {
        match obj {
            Object::Reference(r) if self.contains(r) => r,
            other => self.add_object(other),
        }
    }

    /// Store a new stream object. Any `/Length` in `dict` is dropped.
    pub fn add_stream(&mut self, dict: Dictionary, data: impl Into<Bytes>) -> ObjectRef {
        self.add_object(Object::stream(dict, data))
    }

    /// Look up an indirect object.
    pub fn get(&self, obj_ref: ObjectRef) -> Option<&Object> {
        self.objects.get(&obj_ref)
    }

    /// Look up an indirect object for mutation.
    pub fn get_mut(&mut self, obj_ref: ObjectRef) -> Option<&mut Object> {
        self.objects.get_mut(&obj_ref)
    }

    fn fetch(&self, obj_ref: ObjectRef) -> Result<&Object> {
        self.objects
            .get(&obj_ref)
            .ok_or(Error::ObjectNotFound(obj_ref.id, obj_ref.gen))
    }

    fn fetch_mut(&mut self, obj_ref: ObjectRef) -> Result<&mut Object> {
        self.objects
            .get_mut(&obj_ref)
            .ok_or(Error::ObjectNotFound(obj_ref.id, obj_ref.gen))
    }

    /// Replace an indirect object in place, keeping its identity. Returns the old value.
    pub fn replace_object(&mut self, obj_ref: ObjectRef, obj: Object) -> Result<Object> {
        let slot = self.fetch_mut(obj_ref)?;
        Ok(std::mem::replace(slot, obj))
    }

    /// True if the arena holds `obj_ref`.
    pub fn contains(&self, obj_ref: ObjectRef) -> bool {
        self.objects.contains_key(&obj_ref)
    }

    /// Number of indirect objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// All indirect object references, in creation order.
    pub fn object_refs(&self) -> impl Iterator<Item = ObjectRef> + '_ {
        self.objects.keys().copied()
    }

    /// Type tag of an indirect object; `Unresolved` when it does not exist.
    pub fn type_tag(&self, obj_ref: ObjectRef) -> ObjectType {
        self.get(obj_ref)
            .map_or(ObjectType::Unresolved, Object::type_tag)
    }

    /// Handle to an indirect object of this document.
    pub fn node(&self, obj_ref: ObjectRef) -> Node<'_> {
        Node::indirect(self, obj_ref)
    }

    /// The document catalog.
    pub fn catalog_ref(&self) -> ObjectRef {
        self.catalog
    }

    /// The root `/Pages` node.
    pub fn pages_root(&self) -> ObjectRef {
        self.pages_root
    }

    /// Pages in document order.
    pub fn page_refs(&self) -> &[ObjectRef] {
        &self.page_order
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Position of a page in the page order.
    pub fn page_index(&self, page: ObjectRef) -> Option<usize> {
        self.page_order.iter().position(|&r| r == page)
    }

    /// Add a page dictionary as a new indirect object at the end of the page order.
    pub fn push_page(&mut self, page: Object) -> Result<ObjectRef> {
        if !page.is_page_dict() {
            return Err(Error::NotAPage(page.type_name().to_string()));
        }
        let page_ref = self.add_object(page);
        self.insert_page_at(self.page_order.len(), page_ref)?;
        Ok(page_ref)
    }

    /// Insert an existing page object at `index` (`0..=page_count`).
    ///
    /// The page's `/Parent` is pointed at the page tree root. A page that is
    /// already in the order is rejected; callers that want a second copy must
    /// make one first.
    pub fn insert_page_at(&mut self, index: usize, page: ObjectRef) -> Result<()> {
        if index > self.page_order.len() {
            return Err(Error::PageIndexOutOfRange {
                index: index as isize,
                len: self.page_order.len(),
            });
        }
        if self.page_index(page).is_some() {
            return Err(Error::DuplicatePage(page.to_string()));
        }

        let pages_root = self.pages_root;
        let obj = self.fetch_mut(page)?;
        if !obj.is_page_dict() {
            return Err(Error::NotAPage(format!("{} is a {}", page, obj.type_name())));
        }
        obj.set_key("Parent", Object::Reference(pages_root))?;

        self.page_order.insert(index, page);
        self.sync_page_tree()?;
        log::debug!("Inserted page {} at index {} of document {}", page, index, self.id);
        Ok(())
    }

    /// Remove a page from the page order. The object stays in the arena so
    /// other references to it (outlines, annotations) remain valid.
    pub fn remove_page(&mut self, page: ObjectRef) -> Result<()> {
        let index = self
            .page_index(page)
            .ok_or_else(|| Error::PageNotInDocument(page.to_string()))?;
        self.page_order.remove(index);
        self.sync_page_tree()?;
        log::debug!("Removed page {} (index {}) from document {}", page, index, self.id);
        Ok(())
    }

    /// Reorder the page list. `order` must be a permutation of the current pages.
    pub(crate) fn reorder_pages(&mut self, order: Vec<ObjectRef>) -> Result<()> {
        let mut current = self.page_order.clone();
        let mut proposed = order.clone();
        current.sort();
        proposed.sort();
        if current != proposed {
            return Err(Error::InvalidObjectType {
                expected: "permutation of the page list".to_string(),
                found: format!("{} pages", order.len()),
            });
        }
        self.page_order = order;
        self.sync_page_tree()
    }

    /// Rewrite `/Kids` and `/Count` of the page tree root from `page_order`.
    fn sync_page_tree(&mut self) -> Result<()> {
        let kids: Vec<Object> = self
            .page_order
            .iter()
            .map(|&r| Object::Reference(r))
            .collect();
        let count = kids.len() as i64;
        let root = self.fetch_mut(self.pages_root)?;
        root.set_key("Kids", Object::Array(kids))?;
        root.set_key("Count", Object::Integer(count))?;
        Ok(())
    }

    /// Copy a dictionary, array or stream into a new indirect object.
    ///
    /// Only the top level is copied: direct children are cloned, indirect
    /// children stay shared. Stream payloads are shared immutable buffers.
    pub fn shallow_copy(&mut self, obj_ref: ObjectRef) -> Result<ObjectRef> {
        let obj = self.fetch(obj_ref)?;
        match obj {
            Object::Dictionary(_) | Object::Array(_) | Object::Stream { .. } => {
                let copy = obj.clone();
                let new_ref = self.add_object(copy);
                log::debug!("Shallow-copied {} to {}", obj_ref, new_ref);
                Ok(new_ref)
            },
            other => Err(Error::type_error(
                "Dictionary, Array or Stream",
                other.type_name(),
            )),
        }
    }

    /// Deep-copy an object of `source` (and everything it references) into
    /// this document.
    ///
    /// Copies are remembered per source document, so objects shared by
    /// several copied pages (fonts, images) are copied once. A page's
    /// `/Parent` is not followed; insertion into the page list sets it.
    /// References to objects missing from `source` become null.
    pub fn copy_foreign(&mut self, source: &Document, obj_ref: ObjectRef) -> Result<ObjectRef> {
        if source.id == self.id {
            return Ok(obj_ref);
        }
        let mut map = self.foreign_copies.remove(&source.id).unwrap_or_default();
        let result = self.copy_foreign_ref(source, obj_ref, &mut map);
        self.foreign_copies.insert(source.id, map);
        let new_ref = result?;
        log::debug!(
            "Copied {} from document {} to {} in document {}",
            obj_ref,
            source.id,
            new_ref,
            self.id
        );
        Ok(new_ref)
    }

    /// Reserve a slot for `obj_ref` and queue its body for copying. Slots are
    /// reserved before any body is copied, so cycles resolve to them and
    /// long reference chains never deepen the stack.
    fn copy_foreign_ref(
        &mut self,
        source: &Document,
        obj_ref: ObjectRef,
        map: &mut HashMap<ObjectRef, ObjectRef>,
    ) -> Result<ObjectRef> {
        source.fetch(obj_ref)?;
        let mut pending = Vec::new();
        let new_ref = self.reserve_foreign(obj_ref, map, &mut pending);

        while let Some((src_ref, dst_ref)) = pending.pop() {
            let original = source.fetch(src_ref)?;
            let copied = self.copy_foreign_value(
                source,
                original,
                map,
                &mut pending,
                original.is_page_dict(),
            )?;
            self.objects.insert(dst_ref, copied);
        }
        Ok(new_ref)
    }

    fn reserve_foreign(
        &mut self,
        obj_ref: ObjectRef,
        map: &mut HashMap<ObjectRef, ObjectRef>,
        pending: &mut Vec<(ObjectRef, ObjectRef)>,
    ) -> ObjectRef {
        if let Some(&mapped) = map.get(&obj_ref) {
            return mapped;
        }
        let new_ref = self.add_object(Object::Null);
        map.insert(obj_ref, new_ref);
        pending.push((obj_ref, new_ref));
        new_ref
    }

    fn copy_foreign_value(
        &mut self,
        source: &Document,
        obj: &Object,
        map: &mut HashMap<ObjectRef, ObjectRef>,
        pending: &mut Vec<(ObjectRef, ObjectRef)>,
        skip_parent: bool,
    ) -> Result<Object> {
        match obj {
            Object::Reference(r) => {
                if source.contains(*r) {
                    Ok(Object::Reference(self.reserve_foreign(*r, map, pending)))
                } else {
                    Ok(Object::Null)
                }
            },
            Object::Array(items) => items
                .iter()
                .map(|item| self.copy_foreign_value(source, item, map, pending, false))
                .collect::<Result<Vec<_>>>()
                .map(Object::Array),
            Object::Dictionary(dict) => self
                .copy_foreign_dict(source, dict, map, pending, skip_parent)
                .map(Object::Dictionary),
            Object::Stream { dict, data } => Ok(Object::Stream {
                dict: self.copy_foreign_dict(source, dict, map, pending, false)?,
                data: data.clone(),
            }),
            other => Ok(other.clone()),
        }
    }

    fn copy_foreign_dict(
        &mut self,
        source: &Document,
        dict: &Dictionary,
        map: &mut HashMap<ObjectRef, ObjectRef>,
        pending: &mut Vec<(ObjectRef, ObjectRef)>,
        skip_parent: bool,
    ) -> Result<Dictionary> {
        let mut out = Dictionary::with_capacity(dict.len());
        for (key, value) in dict {
            if skip_parent && key == "Parent" {
                continue;
            }
            let copied = self.copy_foreign_value(source, value, map, pending, false)?;
            if !copied.is_null() {
                out.insert(key.clone(), copied);
            }
        }
        Ok(out)
    }

    /// Stream data decoded to `level`.
    pub fn stream_bytes(&self, obj_ref: ObjectRef, level: DecodeLevel) -> Result<Vec<u8>> {
        match self.fetch(obj_ref)? {
            Object::Stream { dict, data } => filters::decode_stream(dict, data, level),
            other => Err(Error::type_error("Stream", other.type_name())),
        }
    }

    /// Stream data exactly as stored.
    pub fn raw_stream_bytes(&self, obj_ref: ObjectRef) -> Result<Bytes> {
        match self.fetch(obj_ref)? {
            Object::Stream { data, .. } => Ok(data.clone()),
            other => Err(Error::type_error("Stream", other.type_name())),
        }
    }

    /// Replace a stream's payload together with its `/Filter` and `/DecodeParms`.
    ///
    /// `None` removes the corresponding key. `data` must already be encoded
    /// with `filter`.
    pub fn replace_stream_bytes(
        &mut self,
        obj_ref: ObjectRef,
        new_data: impl Into<Bytes>,
        filter: Option<Object>,
        decode_parms: Option<Object>,
    ) -> Result<()> {
        match self.fetch_mut(obj_ref)? {
            Object::Stream { dict, data } => {
                *data = new_data.into();
                for (key, value) in [("Filter", filter), ("DecodeParms", decode_parms)] {
                    match value {
                        Some(v) if !v.is_null() => {
                            dict.insert(key.to_string(), v);
                        },
                        _ => {
                            dict.shift_remove(key);
                        },
                    }
                }
                Ok(())
            },
            other => Err(Error::type_error("Stream", other.type_name())),
        }
    }

    /// Decoded content of a content stream, or of a page's `/Contents`.
    ///
    /// Multiple content streams are joined with a newline.
    pub fn content_bytes(&self, obj_ref: ObjectRef) -> Result<Vec<u8>> {
        let obj = self.fetch(obj_ref)?;
        if let Object::Stream { .. } = obj {
            return self.stream_bytes(obj_ref, DecodeLevel::Generalized);
        }
        if !obj.is_page_dict() {
            return Err(Error::type_error("Page or Stream", obj.type_name()));
        }

        let streams: Vec<ObjectRef> = match obj.as_dict().and_then(|d| d.get("Contents")) {
            Some(Object::Reference(r)) => vec![*r],
            Some(Object::Array(items)) => items.iter().filter_map(Object::as_reference).collect(),
            _ => Vec::new(),
        };

        let mut out = Vec::new();
        for (i, stream) in streams.into_iter().enumerate() {
            if i > 0 {
                out.push(b'\n');
            }
            out.extend(self.stream_bytes(stream, DecodeLevel::Generalized)?);
        }
        Ok(out)
    }

    /// Set a key on an indirect dictionary or stream; `Null` deletes it.
    pub fn set_key(&mut self, obj_ref: ObjectRef, key: &str, value: Object) -> Result<()> {
        self.fetch_mut(obj_ref)?.set_key(key, value)
    }

    /// Delete a key from an indirect dictionary or stream.
    pub fn delete_key(&mut self, obj_ref: ObjectRef, key: &str) -> Result<Option<Object>> {
        self.fetch_mut(obj_ref)?.delete_key(key)
    }

    /// Replace an item of an indirect array.
    pub fn set_item(&mut self, obj_ref: ObjectRef, index: isize, value: Object) -> Result<()> {
        self.fetch_mut(obj_ref)?.set_item(index, value)
    }

    /// Remove an item of an indirect array.
    pub fn delete_item(&mut self, obj_ref: ObjectRef, index: isize) -> Result<Object> {
        self.fetch_mut(obj_ref)?.delete_item(index)
    }

    /// Append to an indirect array.
    pub fn push_item(&mut self, obj_ref: ObjectRef, value: Object) -> Result<()> {
        let obj = self.fetch_mut(obj_ref)?;
        let found = obj.type_name();
        obj.as_array_mut()
            .ok_or_else(|| Error::type_error("Array", found))?
            .push(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FlateDecoder;

    fn page() -> Object {
        Object::dictionary([("Type", Object::name("Page"))])
    }

    #[test]
    fn test_new_document_has_empty_page_tree() {
        let doc = Document::new();
        let root = doc.get(doc.pages_root()).unwrap().as_dict().unwrap();
        assert_eq!(root.get("Count"), Some(&Object::Integer(0)));
        let catalog = doc.get(doc.catalog_ref()).unwrap().as_dict().unwrap();
        assert_eq!(catalog.get("Pages"), Some(&Object::Reference(doc.pages_root())));
    }

    #[test]
    fn test_document_ids_are_unique() {
        assert_ne!(Document::new().id(), Document::new().id());
    }

    #[test]
    fn test_page_tree_stays_in_sync() {
        let mut doc = Document::new();
        let a = doc.push_page(page()).unwrap();
        let b = doc.add_object(page());
        doc.insert_page_at(0, b).unwrap();

        let root = doc.get(doc.pages_root()).unwrap().as_dict().unwrap();
        assert_eq!(root.get("Count"), Some(&Object::Integer(2)));
        assert_eq!(
            root.get("Kids"),
            Some(&Object::Array(vec![Object::Reference(b), Object::Reference(a)]))
        );
        let parent = doc.get(b).unwrap().as_dict().unwrap().get("Parent");
        assert_eq!(parent, Some(&Object::Reference(doc.pages_root())));

        doc.remove_page(b).unwrap();
        assert_eq!(doc.page_refs(), &[a]);
        assert!(doc.contains(b));
        assert!(matches!(doc.remove_page(b), Err(Error::PageNotInDocument(_))));
    }

    #[test]
    fn test_insert_rejects_duplicates_and_non_pages() {
        let mut doc = Document::new();
        let a = doc.push_page(page()).unwrap();
        assert!(matches!(doc.insert_page_at(1, a), Err(Error::DuplicatePage(_))));
        let not_page = doc.add_object(Object::dictionary([("Type", Object::name("Font"))]));
        assert!(matches!(doc.insert_page_at(1, not_page), Err(Error::NotAPage(_))));
        let p = doc.add_object(page());
        assert!(matches!(
            doc.insert_page_at(5, p),
            Err(Error::PageIndexOutOfRange { index: 5, len: 1 })
        ));
    }

    #[test]
    fn test_shallow_copy_is_independent() {
        let mut doc = Document::new();
        let a = doc.push_page(page()).unwrap();
        let b = doc.shallow_copy(a).unwrap();
        assert_ne!(a, b);
        doc.set_key(b, "Rotate", Object::Integer(90)).unwrap();
        assert!(doc.get(a).unwrap().as_dict().unwrap().get("Rotate").is_none());

        let n = doc.add_object(Object::Integer(3));
        assert!(doc.shallow_copy(n).is_err());
    }

    #[test]
    fn test_copy_foreign_shares_resources_and_survives_cycles() {
        let mut src = Document::new();
        let font = src.add_object(Object::dictionary([("Type", Object::name("Font"))]));
        let p1 = src
            .push_page(Object::dictionary([
                ("Type", Object::name("Page")),
                ("Font", Object::Reference(font)),
            ]))
            .unwrap();
        let p2 = src
            .push_page(Object::dictionary([
                ("Type", Object::name("Page")),
                ("Font", Object::Reference(font)),
            ]))
            .unwrap();
        // self-referencing annotation
        let annot = src.add_object(Object::dictionary([("P", Object::Reference(p1))]));
        src.set_key(annot, "Self", Object::Reference(annot)).unwrap();
        src.set_key(p1, "Annots", Object::Array(vec![Object::Reference(annot)]))
            .unwrap();

        let mut dst = Document::new();
        let c1 = dst.copy_foreign(&src, p1).unwrap();
        let c2 = dst.copy_foreign(&src, p2).unwrap();

        let d1 = dst.get(c1).unwrap().as_dict().unwrap();
        let d2 = dst.get(c2).unwrap().as_dict().unwrap();
        assert!(d1.get("Parent").is_none());
        assert_eq!(d1.get("Font"), d2.get("Font"));

        let annots = d1.get("Annots").unwrap().as_array().unwrap();
        let annot_copy = annots[0].as_reference().unwrap();
        let annot_dict = dst.get(annot_copy).unwrap().as_dict().unwrap();
        assert_eq!(annot_dict.get("Self"), Some(&Object::Reference(annot_copy)));
        assert_eq!(annot_dict.get("P"), Some(&Object::Reference(c1)));
    }

    #[test]
    fn test_stream_bytes_and_replace() {
        let mut doc = Document::new();
        let mut dict = Dictionary::new();
        dict.insert("Filter".to_string(), Object::name("FlateDecode"));
        let packed = FlateDecoder::encode(b"0 0 m 10 10 l S").unwrap();
        let s = doc.add_stream(dict, packed.clone());

        assert_eq!(doc.stream_bytes(s, DecodeLevel::Generalized).unwrap(), b"0 0 m 10 10 l S");
        assert_eq!(doc.raw_stream_bytes(s).unwrap().as_ref(), packed.as_slice());

        doc.replace_stream_bytes(s, b"q Q".to_vec(), None, None).unwrap();
        assert_eq!(doc.stream_bytes(s, DecodeLevel::Generalized).unwrap(), b"q Q");
        assert!(doc.get(s).unwrap().as_dict().unwrap().get("Filter").is_none());
        assert!(matches!(
            doc.set_key(s, "Length", Object::Integer(3)),
            Err(Error::ReadOnlyLength)
        ));
    }

    #[test]
    fn test_content_bytes_joins_page_streams() {
        let mut doc = Document::new();
        let s1 = doc.add_stream(Dictionary::new(), b"q".to_vec());
        let s2 = doc.add_stream(Dictionary::new(), b"Q".to_vec());
        let p = doc
            .push_page(Object::dictionary([
                ("Type", Object::name("Page")),
                (
                    "Contents",
                    Object::Array(vec![Object::Reference(s1), Object::Reference(s2)]),
                ),
            ]))
            .unwrap();
        assert_eq!(doc.content_bytes(p).unwrap(), b"q\nQ");
    }

    #[test]
    fn test_array_mutation() {
        let mut doc = Document::new();
        let arr = doc.add_object(Object::Array(vec![]));
        doc.push_item(arr, Object::Integer(1)).unwrap();
        doc.push_item(arr, Object::Integer(2)).unwrap();
        doc.set_item(arr, -1, Object::Integer(3)).unwrap();
        assert_eq!(doc.delete_item(arr, 0).unwrap(), Object::Integer(1));
        assert_eq!(doc.get(arr), Some(&Object::Array(vec![Object::Integer(3)])));
        assert!(matches!(
            doc.replace_object(ObjectRef::new(999, 0), Object::Null),
            Err(Error::ObjectNotFound(999, 0))
        ));
    }
}
