//! Parameters for [`crate::factory::create_element`].

use smallvec::SmallVec;

/// Ordered name/value pairs; most elements carry only a handful.
pub type Pairs = SmallVec<[(String, String); 4]>;

/// Where a new element should be attached.
#[derive(Debug, Clone, PartialEq)]
pub enum ParentRef<N> {
    /// Resolved with a single-node lookup when the element is created.
    Locator(String),
    /// A node the caller already holds. Any node that accepts children
    /// works, not only elements.
    Node(N),
}

/// Everything needed to build one element.
///
/// Absent fields are skipped. `Some("")` is a real value: it sets an empty
/// class or text rather than being treated as missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec<N> {
    pub tag: String,
    pub parent: Option<ParentRef<N>>,
    pub class_names: Option<String>,
    pub text: Option<String>,
    /// Applied in order; a repeated name overwrites the earlier value.
    pub attributes: Pairs,
    /// Applied in order. Names may be CSS (`z-index`) or DOM-property
    /// (`zIndex`) form.
    pub styles: Pairs,
}

impl<N> ElementSpec<N> {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            parent: None,
            class_names: None,
            text: None,
            attributes: SmallVec::new(),
            styles: SmallVec::new(),
        }
    }

    /// Attach under the first node matching `locator`.
    pub fn parent(mut self, locator: impl Into<String>) -> Self {
        self.parent = Some(ParentRef::Locator(locator.into()));
        self
    }

    /// Attach under an existing node.
    pub fn parent_node(mut self, node: N) -> Self {
        self.parent = Some(ParentRef::Node(node));
        self
    }

    /// Whitespace-separated class tokens, applied verbatim.
    pub fn class(mut self, class_names: impl Into<String>) -> Self {
        self.class_names = Some(class_names.into());
        self
    }

    pub fn maybe_class(mut self, class_names: Option<String>) -> Self {
        self.class_names = class_names;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn maybe_text(mut self, text: Option<String>) -> Self {
        self.text = text;
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn attrs<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.push((property.into(), value.into()));
        self
    }

    pub fn styles<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.styles
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_keeps_insertion_order() {
        let spec: ElementSpec<()> = ElementSpec::new("a")
            .attr("href", "#")
            .attrs([("id", "x"), ("data-y", "1")])
            .style("color", "red");
        let names: Vec<&str> = spec.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["href", "id", "data-y"]);
        assert_eq!(spec.styles[0], ("color".to_string(), "red".to_string()));
    }

    #[test]
    fn maybe_setters_clear_fields() {
        let spec: ElementSpec<()> = ElementSpec::new("p")
            .class("a")
            .text("b")
            .maybe_class(None)
            .maybe_text(None);
        assert_eq!(spec.class_names, None);
        assert_eq!(spec.text, None);
    }
}
