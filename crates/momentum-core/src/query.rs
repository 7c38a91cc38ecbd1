//! Lookup shorthands: `I`, `Q` and `A` in the content script.
//!
//! Thin pass-throughs; lookup errors (bad locator syntax) are returned as-is.

use crate::dom::{Dom, DomError};

/// `I(id)`: element by identifier.
pub fn by_id<D: Dom>(dom: &D, id: &str) -> Option<D::Node> {
    dom.get_element_by_id(id)
}

/// `Q(locator)`: first match in document order.
pub fn query<D: Dom>(dom: &D, locator: &str) -> Result<Option<D::Node>, DomError> {
    dom.query_selector(locator)
}

/// `A(locator)`: every match, as a snapshot that later mutations don't affect.
pub fn query_all<D: Dom>(dom: &D, locator: &str) -> Result<Vec<D::Node>, DomError> {
    dom.query_selector_all(locator)
}
