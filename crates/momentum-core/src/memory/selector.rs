//! Locator engine for [`MemoryDom`](super::MemoryDom).
//!
//! Supports selector lists (`a, b`), descendant and child (`>`) combinators,
//! and compound selectors made of `*`, type, `#id`, `.class`, `[attr]` and
//! `[attr=value]`. Anything else is a syntax error.

use super::{MemoryDom, NodeHandle};
use crate::dom::DomError;
use smallvec::SmallVec;
use std::collections::HashSet;
use winnow::ascii::{multispace0, multispace1};
use winnow::combinator::{alt, delimited, opt, preceded, repeat, separated};
use winnow::prelude::*;
use winnow::token::{one_of, take_till, take_while};

// ─── Model ────────────────────────────────────────────────────────────────

/// A parsed, comma-separated locator.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(Vec<Complex>);

/// Compounds joined by combinators; `combinators[i]` sits between
/// `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Complex {
    compounds: Vec<Compound>,
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Compound(SmallVec<[Simple; 2]>);

#[derive(Debug, Clone, PartialEq)]
pub enum Simple {
    Universal,
    Type(String),
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
}

// ─── Matching ─────────────────────────────────────────────────────────────

impl SelectorList {
    /// Parse a locator.
    ///
    /// # Errors
    /// [`DomError::Syntax`] if the locator is empty or outside the supported
    /// grammar.
    pub fn parse(locator: &str) -> Result<Self, DomError> {
        let trimmed = locator.trim();
        if trimmed.is_empty() {
            return Err(DomError::Syntax {
                locator: locator.to_string(),
                reason: "empty locator".into(),
            });
        }
        selector_list.parse(trimmed).map_err(|e| DomError::Syntax {
            locator: locator.to_string(),
            reason: format!("unexpected input at offset {}", e.offset()),
        })
    }

    pub fn matches(&self, dom: &MemoryDom, node: NodeHandle) -> bool {
        self.0.iter().any(|complex| complex.matches(dom, node))
    }
}

impl Complex {
    fn matches(&self, dom: &MemoryDom, node: NodeHandle) -> bool {
        let last = self.compounds.len() - 1;
        let mut failed = HashSet::new();
        self.compounds[last].matches(dom, node)
            && self.matches_left_of(last, dom, node, &mut failed)
    }

    /// `compounds[i]` matched `node`; check everything to its left.
    ///
    /// `failed` remembers `(i, node)` pairs already known not to match, so a
    /// descendant combinator never rescans the same ancestor chain for the
    /// same compound.
    fn matches_left_of(
        &self,
        i: usize,
        dom: &MemoryDom,
        node: NodeHandle,
        failed: &mut HashSet<(usize, NodeHandle)>,
    ) -> bool {
        if i == 0 {
            return true;
        }
        if failed.contains(&(i, node)) {
            return false;
        }
        let left = &self.compounds[i - 1];
        let found = match self.combinators[i - 1] {
            Combinator::Child => dom.parent_element(node).is_some_and(|p| {
                left.matches(dom, p) && self.matches_left_of(i - 1, dom, p, failed)
            }),
            Combinator::Descendant => {
                std::iter::successors(dom.parent_element(node), |&p| dom.parent_element(p))
                    .any(|p| left.matches(dom, p) && self.matches_left_of(i - 1, dom, p, failed))
            }
        };
        if !found {
            failed.insert((i, node));
        }
        found
    }
}

impl Compound {
    fn matches(&self, dom: &MemoryDom, node: NodeHandle) -> bool {
        let Some(element) = dom.element(node) else {
            return false;
        };
        self.0.iter().all(|simple| match simple {
            Simple::Universal => true,
            Simple::Type(tag) => element.tag.eq_ignore_ascii_case(tag),
            Simple::Id(id) => element.attribute("id") == Some(id.as_str()),
            Simple::Class(class) => element.has_class(class),
            Simple::Attribute { name, value } => match (element.attribute(name), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            },
        })
    }
}

// ─── Parsers ──────────────────────────────────────────────────────────────

fn selector_list(input: &mut &str) -> ModalResult<SelectorList> {
    separated(1.., complex, (multispace0, ',', multispace0))
        .map(SelectorList)
        .parse_next(input)
}

fn complex(input: &mut &str) -> ModalResult<Complex> {
    (compound, repeat(0.., (combinator, compound)))
        .map(|(head, rest): (Compound, Vec<(Combinator, Compound)>)| {
            let mut compounds = Vec::with_capacity(rest.len() + 1);
            let mut combinators = Vec::with_capacity(rest.len());
            compounds.push(head);
            for (combinator, compound) in rest {
                combinators.push(combinator);
                compounds.push(compound);
            }
            Complex {
                compounds,
                combinators,
            }
        })
        .parse_next(input)
}

fn combinator(input: &mut &str) -> ModalResult<Combinator> {
    alt((
        delimited(multispace0, '>', multispace0).value(Combinator::Child),
        multispace1.value(Combinator::Descendant),
    ))
    .parse_next(input)
}

fn compound(input: &mut &str) -> ModalResult<Compound> {
    (opt(type_selector), repeat(0.., subclass_selector))
        .verify(|(head, tail): &(Option<Simple>, Vec<Simple>)| {
            head.is_some() || !tail.is_empty()
        })
        .map(|(head, tail)| Compound(head.into_iter().chain(tail).collect()))
        .parse_next(input)
}

fn type_selector(input: &mut &str) -> ModalResult<Simple> {
    alt((
        '*'.value(Simple::Universal),
        ident.map(|tag: &str| Simple::Type(tag.to_ascii_lowercase())),
    ))
    .parse_next(input)
}

fn subclass_selector(input: &mut &str) -> ModalResult<Simple> {
    alt((
        preceded('#', name).map(|id: &str| Simple::Id(id.to_string())),
        preceded('.', ident).map(|class: &str| Simple::Class(class.to_string())),
        attribute_selector,
    ))
    .parse_next(input)
}

fn attribute_selector(input: &mut &str) -> ModalResult<Simple> {
    delimited(
        ('[', multispace0),
        (
            name,
            multispace0,
            opt(preceded(('=', multispace0), attribute_value)),
            multispace0,
        ),
        ']',
    )
    .map(
        |(name, _, value, _): (&str, &str, Option<&str>, &str)| Simple::Attribute {
            name: name.to_ascii_lowercase(),
            value: value.map(str::to_string),
        },
    )
    .parse_next(input)
}

fn attribute_value<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    alt((
        delimited('"', take_till(0.., '"'), '"'),
        delimited('\'', take_till(0.., '\''), '\''),
        name,
    ))
    .parse_next(input)
}

/// An identifier that may start a type or class selector.
fn ident<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '-' || !c.is_ascii()),
        take_while(0.., is_name_char),
    )
        .take()
        .parse_next(input)
}

/// Identifier characters with no restriction on the first one (`#1a` is fine).
fn name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., is_name_char).parse_next(input)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}
