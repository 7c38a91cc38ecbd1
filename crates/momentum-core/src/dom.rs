//! The host DOM seam.
//!
//! [`Dom`] is the small slice of the document API the factory and the query
//! shorthands need. The browser implementation lives in `momentum-wasm`;
//! [`crate::memory::MemoryDom`] implements it in-process.

use std::fmt;
use thiserror::Error;

// ─── Errors ───────────────────────────────────────────────────────────────

/// Which kind of name failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Element,
    Attribute,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Element => f.write_str("element"),
            NameKind::Attribute => f.write_str("attribute"),
        }
    }
}

/// Failure raised by a DOM operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// A tag or attribute name contains characters the host rejects.
    #[error("invalid {kind} name `{name}`")]
    InvalidCharacter { kind: NameKind, name: String },

    /// A locator could not be parsed.
    #[error("`{locator}` is not a valid locator: {reason}")]
    Syntax { locator: String, reason: String },

    /// An insertion would produce an impossible tree (cycle, second root, ...).
    #[error("hierarchy request rejected: {reason}")]
    HierarchyRequest { reason: String },

    /// The node handle does not belong to this document.
    #[error("node does not belong to this document")]
    NotFound,

    /// Any other exception raised by the host, kept by name and message.
    #[error("{name}: {message}")]
    Host { name: String, message: String },
}

// ─── Trait ────────────────────────────────────────────────────────────────

/// Document operations used by the element factory and the query shorthands.
///
/// Lookups borrow the document shared; anything that mutates the tree or an
/// element takes `&mut self`.
pub trait Dom {
    /// Handle to an element owned by the document.
    type Node: Clone + fmt::Debug;

    /// Handle to anything that can hold children: an element, the document
    /// itself or a fragment.
    type Parent: Clone + fmt::Debug;

    /// View an element as a parent. Locator lookups yield elements, and the
    /// factory attaches under whatever they resolve to.
    fn as_parent(node: Self::Node) -> Self::Parent;

    /// Construct a new, detached element.
    fn create_element(&mut self, tag: &str) -> Result<Self::Node, DomError>;

    /// First connected element whose `id` attribute equals `id`.
    fn get_element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// First connected element matching `locator`, in document order.
    fn query_selector(&self, locator: &str) -> Result<Option<Self::Node>, DomError>;

    /// Every connected element matching `locator`, in document order.
    fn query_selector_all(&self, locator: &str) -> Result<Vec<Self::Node>, DomError>;

    /// Append `child` as the last child of `parent`, moving it if it already
    /// has a parent.
    fn append_child(&mut self, parent: &Self::Parent, child: &Self::Node) -> Result<(), DomError>;

    fn set_class_name(&mut self, element: &Self::Node, value: &str) -> Result<(), DomError>;

    /// Replace the element's children with a single run of text.
    fn set_text_content(&mut self, element: &Self::Node, text: &str) -> Result<(), DomError>;

    fn set_attribute(
        &mut self,
        element: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), DomError>;

    /// Set one inline style property. `property` is a CSS property name
    /// (`z-index`, not `zIndex`).
    fn set_style_property(
        &mut self,
        element: &Self::Node,
        property: &str,
        value: &str,
    ) -> Result<(), DomError>;
}

// ─── Name validation ──────────────────────────────────────────────────────

/// Whether `name` is acceptable as an element or attribute name.
///
/// Follows the XML `Name` production in the shape hosts enforce for
/// `createElement`/`setAttribute`: a letter, `_`, `:` or non-ASCII start,
/// followed by those plus digits, `-` and `.`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_name_start(first) && chars.all(is_name_char)
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == ':' || (!c.is_ascii() && !c.is_whitespace())
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-' || c == '.'
}
