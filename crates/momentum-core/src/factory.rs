//! The element factory.
//!
//! Builds one element, attaches it, then decorates it, in that fixed order.
//! Construction failures are reported silently; attachment and decoration
//! failures are logged. Either way the caller gets a typed error, and a
//! decoration error still carries the element that was built.

use crate::dom::{Dom, DomError};
use crate::spec::{ElementSpec, Pairs, ParentRef};
use crate::style::css_property_name;
use std::fmt;
use thiserror::Error;

/// The step after construction that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationStage {
    Parent,
    Class,
    Text,
    Attribute,
    Style,
}

impl fmt::Display for DecorationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DecorationStage::Parent => "parent attachment",
            DecorationStage::Class => "class names",
            DecorationStage::Text => "text content",
            DecorationStage::Attribute => "attributes",
            DecorationStage::Style => "styles",
        })
    }
}

/// Why [`create_element`] did not produce a finished element.
#[derive(Debug, Error)]
pub enum CreateError<N> {
    /// The host refused to construct the tag. Nothing was mutated.
    #[error("cannot construct <{tag}>: {source}")]
    Construction {
        tag: String,
        #[source]
        source: DomError,
    },

    /// The element exists (and may already be attached) but a later step
    /// failed. Steps after `stage` were not applied.
    #[error("<{tag}> {stage} failed: {source}")]
    Decoration {
        tag: String,
        element: N,
        stage: DecorationStage,
        #[source]
        source: DomError,
    },
}

impl<N> CreateError<N> {
    /// The partially built element, if construction got that far.
    pub fn element(&self) -> Option<&N> {
        match self {
            CreateError::Construction { .. } => None,
            CreateError::Decoration { element, .. } => Some(element),
        }
    }

    pub fn into_element(self) -> Option<N> {
        match self {
            CreateError::Construction { .. } => None,
            CreateError::Decoration { element, .. } => Some(element),
        }
    }

    pub fn is_construction(&self) -> bool {
        matches!(self, CreateError::Construction { .. })
    }
}

/// Treat an empty string as "not supplied".
///
/// Loosely typed callers (the JS `createElement` export) use this so that a
/// falsy class or text argument is skipped instead of set.
#[must_use]
pub fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Create an element from `spec`.
///
/// Order: construct, attach to parent, class names, text, attributes,
/// styles. A parent locator that matches nothing leaves the element detached
/// but otherwise finished.
///
/// # Errors
/// [`CreateError::Construction`] if the tag cannot be built (not logged).
/// [`CreateError::Decoration`] if any later step fails (logged at `error`).
pub fn create_element<D: Dom>(
    dom: &mut D,
    spec: ElementSpec<D::Parent>,
) -> Result<D::Node, CreateError<D::Node>> {
    let ElementSpec {
        tag,
        parent,
        class_names,
        text,
        attributes,
        styles,
    } = spec;

    let element = match dom.create_element(&tag) {
        Ok(element) => element,
        Err(source) => return Err(CreateError::Construction { tag, source }),
    };

    let decoration = Decoration {
        parent,
        class_names,
        text,
        attributes,
        styles,
    };
    match decoration.apply(dom, &element) {
        Ok(()) => {
            log::debug!("created <{tag}>");
            Ok(element)
        }
        Err((stage, source)) => {
            log::error!("createElement <{tag}>: {stage} failed: {source}");
            Err(CreateError::Decoration {
                tag,
                element,
                stage,
                source,
            })
        }
    }
}

struct Decoration<P> {
    parent: Option<ParentRef<P>>,
    class_names: Option<String>,
    text: Option<String>,
    attributes: Pairs,
    styles: Pairs,
}

impl<P: Clone + fmt::Debug> Decoration<P> {
    fn apply<D: Dom<Parent = P>>(
        self,
        dom: &mut D,
        element: &D::Node,
    ) -> Result<(), (DecorationStage, DomError)> {
        if let Some(parent) = self.parent {
            attach(dom, parent, element).map_err(at(DecorationStage::Parent))?;
        }
        if let Some(class_names) = &self.class_names {
            dom.set_class_name(element, class_names)
                .map_err(at(DecorationStage::Class))?;
        }
        if let Some(text) = &self.text {
            dom.set_text_content(element, text)
                .map_err(at(DecorationStage::Text))?;
        }
        for (name, value) in &self.attributes {
            dom.set_attribute(element, name, value)
                .map_err(at(DecorationStage::Attribute))?;
        }
        for (key, value) in &self.styles {
            dom.set_style_property(element, &css_property_name(key), value)
                .map_err(at(DecorationStage::Style))?;
        }
        Ok(())
    }
}

fn attach<D: Dom>(
    dom: &mut D,
    parent: ParentRef<D::Parent>,
    element: &D::Node,
) -> Result<(), DomError> {
    let target = match parent {
        ParentRef::Locator(locator) => {
            let found = dom.query_selector(&locator)?;
            if found.is_none() {
                log::debug!("parent `{locator}` matched nothing; element left detached");
            }
            found.map(D::as_parent)
        }
        ParentRef::Node(node) => Some(node),
    };
    match target {
        Some(parent) => dom.append_child(&parent, element),
        None => Ok(()),
    }
}

fn at(stage: DecorationStage) -> impl Fn(DomError) -> (DecorationStage, DomError) {
    move |err| (stage, err)
}
