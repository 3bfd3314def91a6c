// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live DOM elements.

use std::cell::RefCell;
use std::rc::Rc;

use tableau_core::scene::NodeId;
use tableau_dom::{DomError, Element, TransitionInbox};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Event, HtmlCanvasElement, HtmlElement};

use crate::canvas::WebCanvas;

fn reason(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

type TransitionListener = Closure<dyn FnMut(Event)>;

/// An [`Element`] wrapping an `HtmlElement`.
///
/// Clones share the element's `transitionend` listener, which lives until
/// [`remove`](Element::remove) detaches the element.
#[derive(Clone)]
pub struct WebElement {
    element: HtmlElement,
    listener: Rc<RefCell<Option<TransitionListener>>>,
}

impl core::fmt::Debug for WebElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebElement")
            .field("element", &self.element)
            .field("listening", &self.listener.borrow().is_some())
            .finish()
    }
}

impl PartialEq for WebElement {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

impl Eq for WebElement {}

impl WebElement {
    /// Wraps an element.
    #[must_use]
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            listener: Rc::default(),
        }
    }

    /// Returns the document's `<body>`.
    pub fn body() -> Result<Self, DomError> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .map(Self::new)
            .ok_or_else(|| DomError::CreateElement {
                tag: "body".to_owned(),
                reason: "no document body".to_owned(),
            })
    }

    /// Returns the wrapped element.
    #[must_use]
    pub fn as_html(&self) -> &HtmlElement {
        &self.element
    }

    fn drop_listener(&self) {
        let Some(listener) = self.listener.borrow_mut().take() else {
            return;
        };
        let _ = self
            .element
            .remove_event_listener_with_callback("transitionend", listener.as_ref().unchecked_ref());
    }
}

impl Element for WebElement {
    type Canvas = WebCanvas;

    fn create_element(&self, tag: &str) -> Result<Self, DomError> {
        let failed = |reason: String| DomError::CreateElement {
            tag: tag.to_owned(),
            reason,
        };
        let doc = self
            .element
            .owner_document()
            .ok_or_else(|| failed("element has no owner document".to_owned()))?;
        doc.create_element(tag)
            .map_err(|e| failed(reason(&e)))?
            .dyn_into::<HtmlElement>()
            .map(Self::new)
            .map_err(|_| failed("not an HTML element".to_owned()))
    }

    fn set_style(&self, name: &str, value: &str) {
        let _ = self.element.style().set_property(name, value);
    }

    fn remove_style(&self, name: &str) {
        let _ = self.element.style().remove_property(name);
    }

    fn append_child(&self, child: &Self) -> Result<(), DomError> {
        self.element
            .append_child(&child.element)
            .map(drop)
            .map_err(|e| DomError::Attach(reason(&e)))
    }

    fn prepend_child(&self, child: &Self) -> Result<(), DomError> {
        let first = self.element.first_child();
        self.element
            .insert_before(&child.element, first.as_ref())
            .map(drop)
            .map_err(|e| DomError::Attach(reason(&e)))
    }

    fn remove(&self) {
        self.drop_listener();
        self.element.remove();
    }

    fn create_canvas(&self, width: u32, height: u32) -> Result<(Self, Self::Canvas), DomError> {
        let unavailable = |reason: String| DomError::Canvas {
            width,
            height,
            reason,
        };
        let el = self.create_element("canvas")?;
        let canvas = el
            .element
            .clone()
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| unavailable("not a canvas element".to_owned()))?;
        canvas.set_width(width);
        canvas.set_height(height);
        el.set_style("display", "block");
        let surface = WebCanvas::new(canvas)?;
        Ok((el, surface))
    }

    fn resize_canvas(&self, surface: &mut Self::Canvas, width: u32, height: u32) -> bool {
        let canvas = surface.canvas();
        if canvas.width() == width && canvas.height() == height {
            return false;
        }
        // Assigning either dimension clears the bitmap.
        canvas.set_width(width);
        canvas.set_height(height);
        true
    }

    fn listen_transition_end(&self, node: NodeId, inbox: &TransitionInbox) {
        self.drop_listener();
        let inbox = inbox.clone();
        let listener = TransitionListener::new(move |evt: Event| {
            // Descendants mirror other nodes and report for themselves.
            if evt.target() != evt.current_target() {
                return;
            }
            evt.stop_propagation();
            inbox.push(node);
        });
        if let Err(err) = self
            .element
            .add_event_listener_with_callback("transitionend", listener.as_ref().unchecked_ref())
        {
            tracing::warn!(node = ?node, err = %reason(&err), "transitionend listener not added");
            return;
        }
        *self.listener.borrow_mut() = Some(listener);
    }
}
