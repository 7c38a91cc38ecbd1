//! [`Dom`] over the page's real `document`.

use crate::convert::dom_error;
use momentum_core::{Dom, DomError, NameKind};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, DomException, Element, HtmlElement, Node, SvgElement};

pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The current window's document, if there is one.
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Dom for WebDom {
    type Node = Element;
    type Parent = Node;

    fn as_parent(node: Element) -> Node {
        node.into()
    }

    fn create_element(&mut self, tag: &str) -> Result<Element, DomError> {
        self.document
            .create_element(tag)
            .map_err(|e| invalid_name(&e, NameKind::Element, tag))
    }

    fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_selector(&self, locator: &str) -> Result<Option<Element>, DomError> {
        self.document
            .query_selector(locator)
            .map_err(|e| invalid_locator(&e, locator))
    }

    fn query_selector_all(&self, locator: &str) -> Result<Vec<Element>, DomError> {
        let list = self
            .document
            .query_selector_all(locator)
            .map_err(|e| invalid_locator(&e, locator))?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn append_child(&mut self, parent: &Node, child: &Element) -> Result<(), DomError> {
        parent
            .append_child(child)
            .map(drop)
            .map_err(|e| dom_error(&e))
    }

    fn set_class_name(&mut self, element: &Element, value: &str) -> Result<(), DomError> {
        element.set_class_name(value);
        Ok(())
    }

    fn set_text_content(&mut self, element: &Element, text: &str) -> Result<(), DomError> {
        element.set_text_content(Some(text));
        Ok(())
    }

    fn set_attribute(
        &mut self,
        element: &Element,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        element
            .set_attribute(name, value)
            .map_err(|e| invalid_name(&e, NameKind::Attribute, name))
    }

    fn set_style_property(
        &mut self,
        element: &Element,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let style = if let Some(html) = element.dyn_ref::<HtmlElement>() {
            html.style()
        } else if let Some(svg) = element.dyn_ref::<SvgElement>() {
            svg.style()
        } else {
            return Err(DomError::Host {
                name: "TypeError".to_string(),
                message: format!("<{}> has no inline style", element.tag_name()),
            });
        };
        style
            .set_property(property, value)
            .map_err(|e| dom_error(&e))
    }
}

fn exception_name(value: &JsValue) -> Option<String> {
    value.dyn_ref::<DomException>().map(DomException::name)
}

fn invalid_name(value: &JsValue, kind: NameKind, name: &str) -> DomError {
    match exception_name(value).as_deref() {
        Some("InvalidCharacterError") => DomError::InvalidCharacter {
            kind,
            name: name.to_string(),
        },
        _ => dom_error(value),
    }
}

fn invalid_locator(value: &JsValue, locator: &str) -> DomError {
    match value.dyn_ref::<DomException>() {
        Some(exception) if exception.name() == "SyntaxError" => DomError::Syntax {
            locator: locator.to_string(),
            reason: exception.message(),
        },
        _ => dom_error(value),
    }
}
