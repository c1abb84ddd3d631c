//! List-like view over a document's pages.
//!
//! [`Pages`] behaves like a resizable sequence of pages with 0-based indexing,
//! negative indices and slices. It differs from a plain list in one way: a
//! page object can occupy only one position. Assigning or inserting a page
//! that is already in the list stores an independent shallow copy, so the two
//! positions can be edited separately while other references to the original
//! (outlines, links) keep pointing at it.
//!
//! ```
//! use pdf_graph::document::Document;
//! use pdf_graph::object::Object;
//!
//! let mut doc = Document::new();
//! let mut pages = doc.pages();
//! pages.append(Object::dictionary([("Type", Object::name("Page"))])).unwrap();
//! pages.append(Object::dictionary([("Type", Object::name("Page"))])).unwrap();
//!
//! let second = pages.get(1).unwrap();
//! pages.set(0, second).unwrap();
//! assert_eq!(pages.len(), 2);
//! assert_ne!(pages.get(0).unwrap(), pages.get(1).unwrap());
//! ```

use crate::document::{Document, DocumentId};
use crate::error::{Error, Result};
use crate::node::Node;
use crate::object::{Object, ObjectRef};
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};
use std::sync::Once;

static PAGE_PROMOTION_WARNING: Once = Once::new();

/// Identity of a page object within a specific document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRef {
    document: DocumentId,
    object: ObjectRef,
}

impl PageRef {
    /// Document the page object lives in.
    pub fn document(&self) -> DocumentId {
        self.document
    }

    /// Indirect object holding the page dictionary.
    pub fn object_ref(&self) -> ObjectRef {
        self.object
    }

    /// Handle to the page dictionary, if `doc` is the owning document.
    pub fn node<'a>(&self, doc: &'a Document) -> Option<Node<'a>> {
        (doc.id() == self.document).then(|| doc.node(self.object))
    }
}

impl std::fmt::Display for PageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<page {} of document {}>", self.object, self.document)
    }
}

/// A value offered to the page list.
#[derive(Debug, Clone)]
pub enum PageInput<'s> {
    /// A page obtained from a page list
    Page(PageRef),
    /// A page of another document; it is deep-copied in
    Foreign {
        /// Document that owns the page
        source: &'s Document,
        /// The page object in `source`
        page: ObjectRef,
    },
    /// A bare page dictionary, or a reference to one. Accepted with a
    /// one-time deprecation warning.
    Object(Object),
}

impl From<PageRef> for PageInput<'_> {
    fn from(page: PageRef) -> Self {
        PageInput::Page(page)
    }
}

impl From<Object> for PageInput<'_> {
    fn from(obj: Object) -> Self {
        PageInput::Object(obj)
    }
}

impl<'s> From<(&'s Document, ObjectRef)> for PageInput<'s> {
    fn from((source, page): (&'s Document, ObjectRef)) -> Self {
        PageInput::Foreign { source, page }
    }
}

/// Slice bounds with optional start, stop and step, resolved like Python
/// slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceSpec {
    /// First position (negative counts from the end)
    pub start: Option<isize>,
    /// Position to stop before (negative counts from the end)
    pub stop: Option<isize>,
    /// Stride; defaults to 1 and must not be zero
    pub step: Option<isize>,
}

impl SliceSpec {
    /// Create a slice.
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    /// The whole sequence.
    pub fn full() -> Self {
        Self::default()
    }

    /// Same bounds, different step.
    pub fn with_step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    /// Resolve against a sequence length: `(start, stop, step, length)`.
    ///
    /// ```
    /// use pdf_graph::pages::SliceSpec;
    ///
    /// let reversed = SliceSpec::full().with_step(-1);
    /// assert_eq!(reversed.indices(4).unwrap(), (3, -1, -1, 4));
    /// ```
    pub fn indices(&self, len: usize) -> Result<(isize, isize, isize, usize)> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(Error::ZeroSliceStep);
        }
        let len = len as isize;
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };

        let clamp = |bound: Option<isize>, default: isize| match bound {
            None => default,
            Some(v) if v < 0 => (v + len).max(lower),
            Some(v) => v.min(upper),
        };
        let start = clamp(self.start, if step < 0 { upper } else { lower });
        let stop = clamp(self.stop, if step < 0 { lower } else { upper });

        let length = if step < 0 {
            if stop < start {
                (start - stop - 1) / (-step) + 1
            } else {
                0
            }
        } else if start < stop {
            (stop - start - 1) / step + 1
        } else {
            0
        };
        Ok((start, stop, step, length as usize))
    }

    /// Positions selected in a sequence of `len` items, in slice order.
    pub fn positions(&self, len: usize) -> Result<Vec<usize>> {
        let (start, _, step, length) = self.indices(len)?;
        Ok((0..length as isize).map(|i| (start + i * step) as usize).collect())
    }
}

impl From<RangeFull> for SliceSpec {
    fn from(_: RangeFull) -> Self {
        SliceSpec::full()
    }
}

impl From<Range<isize>> for SliceSpec {
    fn from(r: Range<isize>) -> Self {
        SliceSpec::new(Some(r.start), Some(r.end), None)
    }
}

impl From<RangeFrom<isize>> for SliceSpec {
    fn from(r: RangeFrom<isize>) -> Self {
        SliceSpec::new(Some(r.start), None, None)
    }
}

impl From<RangeTo<isize>> for SliceSpec {
    fn from(r: RangeTo<isize>) -> Self {
        SliceSpec::new(None, Some(r.end), None)
    }
}

impl Document {
    /// List-like view of the pages.
    pub fn pages(&mut self) -> Pages<'_> {
        Pages { doc: self }
    }
}

/// The page list of a document.
#[derive(Debug)]
pub struct Pages<'d> {
    doc: &'d mut Document,
}

impl<'d> Pages<'d> {
    /// The underlying document.
    pub fn document(&self) -> &Document {
        self.doc
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.doc.page_count()
    }

    /// Number of pages.
    pub fn count(&self) -> usize {
        self.len()
    }

    /// True when the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn page_ref(&self, object: ObjectRef) -> PageRef {
        PageRef {
            document: self.doc.id(),
            object,
        }
    }

    fn position(&self, index: isize) -> Result<usize> {
        let len = self.len();
        crate::object::normalize_index(index, len).ok_or(Error::PageIndexOutOfRange { index, len })
    }

    /// Page at `index`; negative indices count from the end.
    pub fn get(&self, index: isize) -> Result<PageRef> {
        let pos = self.position(index)?;
        Ok(self.page_ref(self.doc.page_refs()[pos]))
    }

    /// Pages selected by a slice.
    pub fn get_slice(&self, slice: impl Into<SliceSpec>) -> Result<Vec<PageRef>> {
        let refs = self.doc.page_refs();
        Ok(slice
            .into()
            .positions(refs.len())?
            .into_iter()
            .map(|pos| self.page_ref(refs[pos]))
            .collect())
    }

    /// Page number `n`, counting from 1.
    pub fn nth(&self, n: usize) -> Result<PageRef> {
        if n == 0 {
            return Err(Error::ZeroPageNumber);
        }
        self.get((n - 1) as isize)
    }

    /// Snapshot of the pages in order.
    pub fn iter(&self) -> impl Iterator<Item = PageRef> + '_ {
        self.doc.page_refs().iter().map(move |&r| self.page_ref(r))
    }

    /// Position of `page`.
    pub fn index_of(&self, page: PageRef) -> Result<usize> {
        if page.document != self.doc.id() {
            return Err(Error::PageNotInDocument(format!(
                "{} belongs to document {}, not {}",
                page.object,
                page.document,
                self.doc.id()
            )));
        }
        self.doc
            .page_index(page.object)
            .ok_or_else(|| Error::PageNotInDocument(page.object.to_string()))
    }

    /// Replace the page at `index`.
    pub fn set<'s>(&mut self, index: isize, page: impl Into<PageInput<'s>>) -> Result<()> {
        let pos = self.position(index)?;
        let page = page.into();
        self.check(&page)?;
        self.set_at(pos, page)
    }

    fn set_at(&mut self, pos: usize, page: PageInput<'_>) -> Result<()> {
        let old = self.doc.page_refs()[pos];
        let new = self.materialize(page)?;
        self.doc.insert_page_at(pos, new)?;
        self.doc.remove_page(old)
    }

    /// Replace the pages selected by a slice.
    ///
    /// With a step of 1 the list may grow or shrink: the new pages are
    /// inserted first, then the surplus old pages are removed. Any other
    /// step requires exactly one page per selected position.
    pub fn set_slice<'s, I, P>(&mut self, slice: impl Into<SliceSpec>, pages: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: Into<PageInput<'s>>,
    {
        let (start, _, step, length) = slice.into().indices(self.len())?;
        let pages: Vec<PageInput<'s>> = pages.into_iter().map(Into::into).collect();
        for page in &pages {
            self.check(page)?;
        }

        if step != 1 {
            if pages.len() != length {
                return Err(Error::SliceArity {
                    expected: length,
                    found: pages.len(),
                });
            }
            for (i, page) in pages.into_iter().enumerate() {
                self.set_at((start + i as isize * step) as usize, page)?;
            }
            return Ok(());
        }

        let start = start as usize;
        let doomed: Vec<ObjectRef> = self.doc.page_refs()[start..start + length].to_vec();
        let mut insert_at = start;
        for page in pages {
            let new = self.materialize(page)?;
            self.doc.insert_page_at(insert_at, new)?;
            insert_at += 1;
        }
        for old in doomed {
            self.doc.remove_page(old)?;
        }
        Ok(())
    }

    /// Insert a page before `index`; `index == len` appends.
    pub fn insert<'s>(&mut self, index: isize, page: impl Into<PageInput<'s>>) -> Result<()> {
        let len = self.len();
        let pos = if index < 0 { index + len as isize } else { index };
        if pos < 0 || pos as usize > len {
            return Err(Error::PageIndexOutOfRange { index, len });
        }
        let page = page.into();
        self.check(&page)?;
        let new = self.materialize(page)?;
        self.doc.insert_page_at(pos as usize, new)
    }

    /// Add a page at the end.
    pub fn append<'s>(&mut self, page: impl Into<PageInput<'s>>) -> Result<PageRef> {
        let page = page.into();
        self.check(&page)?;
        let new = self.materialize(page)?;
        self.doc.insert_page_at(self.len(), new)?;
        Ok(self.page_ref(new))
    }

    /// Append several pages.
    pub fn extend<'s, I, P>(&mut self, pages: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: Into<PageInput<'s>>,
    {
        let pages: Vec<PageInput<'s>> = pages.into_iter().map(Into::into).collect();
        for page in &pages {
            self.check(page)?;
        }
        for page in pages {
            let new = self.materialize(page)?;
            self.doc.insert_page_at(self.len(), new)?;
        }
        Ok(())
    }

    /// Append a copy of every current page. The page count is read once, so
    /// the list doubles rather than growing without end.
    pub fn extend_from_self(&mut self) -> Result<()> {
        let snapshot: Vec<PageRef> = self.iter().collect();
        self.extend(snapshot)
    }

    /// Append copies of all pages of `other`.
    pub fn extend_from_document(&mut self, other: &Document) -> Result<()> {
        let inputs = other
            .page_refs()
            .iter()
            .map(|&page| PageInput::Foreign {
                source: other,
                page,
            })
            .collect::<Vec<_>>();
        self.extend(inputs)
    }

    /// Remove the page at `index`.
    pub fn delete(&mut self, index: isize) -> Result<()> {
        let pos = self.position(index)?;
        let page = self.doc.page_refs()[pos];
        self.doc.remove_page(page)
    }

    /// Remove the pages selected by a slice.
    pub fn delete_slice(&mut self, slice: impl Into<SliceSpec>) -> Result<()> {
        let refs = self.doc.page_refs();
        let doomed: Vec<ObjectRef> = slice
            .into()
            .positions(refs.len())?
            .into_iter()
            .map(|pos| refs[pos])
            .collect();
        for page in doomed {
            self.doc.remove_page(page)?;
        }
        Ok(())
    }

    /// Remove `page` from the list.
    pub fn remove(&mut self, page: PageRef) -> Result<()> {
        let pos = self.index_of(page)?;
        self.delete(pos as isize)
    }

    /// Remove page number `n`, counting from 1.
    pub fn remove_nth(&mut self, n: usize) -> Result<()> {
        let page = self.nth(n)?;
        self.remove(page)
    }

    /// Reverse the page order in place.
    pub fn reverse(&mut self) -> Result<()> {
        let mut order = self.doc.page_refs().to_vec();
        order.reverse();
        self.doc.reorder_pages(order)
    }

    /// Reject anything that is not a page before the list is touched.
    fn check(&self, page: &PageInput<'_>) -> Result<()> {
        match page {
            PageInput::Page(p) => {
                if p.document != self.doc.id() {
                    return Err(Error::ForeignObject(format!(
                        "{} is owned by another document; pass it as a foreign page to copy it",
                        p
                    )));
                }
                require_page(self.doc, p.object)
            },
            PageInput::Foreign { source, page } => require_page(source, *page),
            PageInput::Object(Object::Reference(r)) => require_page(self.doc, *r),
            PageInput::Object(obj) if obj.is_page_dict() => Ok(()),
            PageInput::Object(obj) => Err(Error::NotAPage(format!(
                "expected a page or a page dictionary, found {}",
                obj.type_name()
            ))),
        }
    }

    /// Turn an input into an indirect page object of this document that is
    /// not yet in the page list.
    fn materialize(&mut self, page: PageInput<'_>) -> Result<ObjectRef> {
        let local = match page {
            PageInput::Page(p) => p.object,
            PageInput::Foreign { source, page } => self.doc.copy_foreign(source, page)?,
            PageInput::Object(obj) => {
                PAGE_PROMOTION_WARNING.call_once(|| {
                    log::warn!(
                        "Implicit conversion of a dictionary to a page is deprecated; \
                         use a PageRef from a page list"
                    );
                });
                match obj {
                    Object::Reference(r) => r,
                    direct => self.doc.add_object(direct),
                }
            },
        };

        if self.doc.page_index(local).is_some() {
            self.doc.shallow_copy(local)
        } else {
            Ok(local)
        }
    }
}

fn require_page(doc: &Document, page: ObjectRef) -> Result<()> {
    match doc.get(page) {
        Some(obj) if obj.is_page_dict() => Ok(()),
        Some(obj) => Err(Error::NotAPage(format!("{} is a {}", page, obj.type_name()))),
        None => Err(Error::ObjectNotFound(page.id, page.gen)),
    }
}
