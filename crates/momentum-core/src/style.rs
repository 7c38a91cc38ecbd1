//! Inline style property names.
//!
//! Callers often pass DOM-property names (`zIndex`, `backgroundColor`) the
//! way `element.style[key] = value` accepts them. `setProperty` only takes CSS
//! names, so everything is normalized before it reaches the host.

use std::borrow::Cow;

/// Lowercase vendor prefixes that become `-prefix-` in CSS.
const VENDOR_PREFIXES: [&str; 3] = ["webkit", "moz", "ms"];

/// Convert a style key to its CSS property name.
///
/// Custom properties (`--x`) and names already containing `-` pass through.
#[must_use]
pub fn css_property_name(key: &str) -> Cow<'_, str> {
    if key.starts_with("--") || key.contains('-') || !key.chars().any(|c| c.is_ascii_uppercase())
    {
        return Cow::Borrowed(key);
    }
    if key == "cssFloat" {
        return Cow::Borrowed("float");
    }

    let mut out = String::with_capacity(key.len() + 4);
    if VENDOR_PREFIXES.iter().any(|p| {
        key.strip_prefix(p)
            .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
    }) {
        out.push('-');
    }
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_becomes_kebab_case() {
        assert_eq!(css_property_name("zIndex"), "z-index");
        assert_eq!(css_property_name("backgroundColor"), "background-color");
        assert_eq!(css_property_name("borderTopLeftRadius"), "border-top-left-radius");
    }

    #[test]
    fn css_names_pass_through_borrowed() {
        assert!(matches!(css_property_name("color"), Cow::Borrowed("color")));
        assert!(matches!(css_property_name("z-index"), Cow::Borrowed("z-index")));
        assert!(matches!(css_property_name("--accentColor"), Cow::Borrowed(_)));
    }

    #[test]
    fn vendor_and_special_names() {
        assert_eq!(css_property_name("cssFloat"), "float");
        assert_eq!(css_property_name("webkitTransform"), "-webkit-transform");
        assert_eq!(css_property_name("WebkitTransform"), "-webkit-transform");
        assert_eq!(css_property_name("msTransform"), "-ms-transform");
    }
}
