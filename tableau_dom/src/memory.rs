// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory element tree.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use tableau_core::scene::NodeId;
use tableau_render::DisplayList;

use crate::element::{Element, TransitionInbox};
use crate::error::DomError;

#[derive(Debug, Default)]
struct Document {
    canvas_limit: Cell<Option<usize>>,
    canvases: Cell<usize>,
}

#[derive(Debug)]
struct Node {
    tag: String,
    doc: Rc<Document>,
    style: BTreeMap<String, String>,
    attrs: BTreeMap<String, String>,
    children: Vec<MemoryElement>,
    parent: Weak<RefCell<Node>>,
    listener: Option<(NodeId, TransitionInbox)>,
}

/// An [`Element`] backed by plain Rust data.
///
/// Used headless and in tests: it keeps inline styles, children and
/// listeners so they can be inspected, and paints canvases into
/// [`DisplayList`]s.
#[derive(Clone)]
pub struct MemoryElement(Rc<RefCell<Node>>);

impl core::fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("MemoryElement")
            .field("tag", &node.tag)
            .field("style", &node.style)
            .field("children", &node.children.len())
            .finish_non_exhaustive()
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl MemoryElement {
    /// Creates a `<body>` element in a fresh document.
    #[must_use]
    pub fn body() -> Self {
        Self::new("body", Rc::new(Document::default()))
    }

    fn new(tag: &str, doc: Rc<Document>) -> Self {
        Self(Rc::new(RefCell::new(Node {
            tag: tag.to_owned(),
            doc,
            style: BTreeMap::new(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
            parent: Weak::new(),
            listener: None,
        })))
    }

    /// Limits how many canvases the document will create; later requests
    /// fail as an exhausted graphics context would.
    pub fn set_canvas_limit(&self, limit: Option<usize>) {
        self.0.borrow().doc.canvas_limit.set(limit);
    }

    /// Returns the tag name.
    #[must_use]
    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    /// Returns an inline style property.
    #[must_use]
    pub fn style(&self, name: &str) -> Option<String> {
        self.0.borrow().style.get(name).cloned()
    }

    /// Returns an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attrs.get(name).cloned()
    }

    /// Returns the children in document order.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.0.borrow().children.clone()
    }

    /// Returns the parent element.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.borrow().parent.upgrade().map(Self)
    }

    /// Simulates the host firing `transitionend` on this element.
    ///
    /// Returns `false` if nothing listens.
    pub fn fire_transition_end(&self) -> bool {
        let listener = self.0.borrow().listener.clone();
        match listener {
            Some((node, inbox)) => {
                inbox.push(node);
                true
            }
            None => false,
        }
    }

    fn detach(&self) {
        let parent = self.0.borrow_mut().parent.upgrade();
        if let Some(parent) = parent {
            parent.borrow_mut().children.retain(|c| c != self);
        }
        self.0.borrow_mut().parent = Weak::new();
    }

    fn is_ancestor_of(&self, other: &Self) -> bool {
        let mut cur = Some(other.clone());
        while let Some(el) = cur {
            if el == *self {
                return true;
            }
            cur = el.parent();
        }
        false
    }

    fn insert(&self, child: &Self, first: bool) -> Result<(), DomError> {
        if child.is_ancestor_of(self) {
            return Err(DomError::Attach(format!(
                "<{}> cannot contain its ancestor <{}>",
                self.tag(),
                child.tag()
            )));
        }
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        let mut node = self.0.borrow_mut();
        if first {
            node.children.insert(0, child.clone());
        } else {
            node.children.push(child.clone());
        }
        Ok(())
    }
}

impl Element for MemoryElement {
    type Canvas = DisplayList;

    fn create_element(&self, tag: &str) -> Result<Self, DomError> {
        let doc = self.0.borrow().doc.clone();
        Ok(Self::new(tag, doc))
    }

    fn set_style(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .style
            .insert(name.to_owned(), value.to_owned());
    }

    fn remove_style(&self, name: &str) {
        self.0.borrow_mut().style.remove(name);
    }

    fn append_child(&self, child: &Self) -> Result<(), DomError> {
        self.insert(child, false)
    }

    fn prepend_child(&self, child: &Self) -> Result<(), DomError> {
        self.insert(child, true)
    }

    fn remove(&self) {
        self.detach();
        self.0.borrow_mut().listener = None;
    }

    fn create_canvas(&self, width: u32, height: u32) -> Result<(Self, Self::Canvas), DomError> {
        let doc = self.0.borrow().doc.clone();
        if let Some(limit) = doc.canvas_limit.get()
            && doc.canvases.get() >= limit
        {
            return Err(DomError::Canvas {
                width,
                height,
                reason: format!("limit of {limit} canvases reached"),
            });
        }
        doc.canvases.set(doc.canvases.get() + 1);

        let canvas = Self::new("canvas", doc);
        {
            let mut node = canvas.0.borrow_mut();
            node.attrs.insert("width".to_owned(), width.to_string());
            node.attrs.insert("height".to_owned(), height.to_string());
        }
        Ok((canvas, DisplayList::with_size(width.into(), height.into())))
    }

    fn resize_canvas(&self, surface: &mut Self::Canvas, width: u32, height: u32) -> bool {
        let (w, h) = (f64::from(width), f64::from(height));
        let size = surface.size();
        if size.width == w && size.height == h {
            return false;
        }
        {
            let mut node = self.0.borrow_mut();
            node.attrs.insert("width".to_owned(), width.to_string());
            node.attrs.insert("height".to_owned(), height.to_string());
        }
        surface.set_size(w, h);
        true
    }

    fn listen_transition_end(&self, node: NodeId, inbox: &TransitionInbox) {
        self.0.borrow_mut().listener = Some((node, inbox.clone()));
    }
}
