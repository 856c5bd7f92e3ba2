//! # Collection Shape Dispatcher
//!
//! Collection fields such as a recipe's ingredients arrive in several shapes:
//! a list of strings, a list of lists of strings, a list of objects, or a
//! single string. The shape is classified once, from the first element, into
//! a closed set of variants; record mappers only ever see the flattened
//! [`Element`] list that comes out of it.

use serde_json::{Map, Value};

use super::coerce;

/// Recognized wire shapes of a collection field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollectionShape<'a> {
    /// Absent, `null`, or an empty list
    Empty,
    /// A bare string where a list was expected
    Paragraph(&'a str),
    /// List whose first element is a string
    Strings(&'a [Value]),
    /// List whose first element is itself a list
    Nested(&'a [Value]),
    /// List whose first element is an object
    Objects(&'a [Value]),
    /// Anything else (numbers, booleans, a lone object)
    Unrecognized,
}

/// How a [`CollectionShape::Paragraph`] is split into elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphRule {
    /// The whole string is one element
    Whole,
    /// One element per non-blank line
    Lines,
    /// One element per non-blank comma-separated part
    Commas,
}

/// One flattened collection entry, ready for a record mapper
#[derive(Debug, Clone, PartialEq)]
pub enum Element<'a> {
    Text(String),
    Object(&'a Map<String, Value>),
}

impl<'a> CollectionShape<'a> {
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => CollectionShape::Empty,
            Some(Value::String(s)) if s.trim().is_empty() => CollectionShape::Empty,
            Some(Value::String(s)) => CollectionShape::Paragraph(s),
            Some(Value::Array(items)) => match items.first() {
                None => CollectionShape::Empty,
                Some(Value::String(_)) => CollectionShape::Strings(items),
                Some(Value::Array(_)) => CollectionShape::Nested(items),
                Some(Value::Object(_)) => CollectionShape::Objects(items),
                Some(_) => CollectionShape::Unrecognized,
            },
            Some(_) => CollectionShape::Unrecognized,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CollectionShape::Empty => "empty",
            CollectionShape::Paragraph(_) => "paragraph",
            CollectionShape::Strings(_) => "strings",
            CollectionShape::Nested(_) => "nested",
            CollectionShape::Objects(_) => "objects",
            CollectionShape::Unrecognized => "unrecognized",
        }
    }

    /// Flatten the collection into elements in wire order
    pub fn into_elements(self, paragraph: ParagraphRule) -> Vec<Element<'a>> {
        match self {
            CollectionShape::Empty | CollectionShape::Unrecognized => Vec::new(),
            CollectionShape::Paragraph(text) => split_paragraph(text, paragraph),
            CollectionShape::Strings(items) => texts(items.iter()),
            CollectionShape::Nested(items) => texts(items.iter().flat_map(|item| match item {
                Value::Array(inner) => inner.iter().collect::<Vec<_>>(),
                other => vec![other],
            })),
            CollectionShape::Objects(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(Element::Object(map)),
                    other => text_element(other),
                })
                .collect(),
        }
    }
}

fn texts<'v, 'a>(items: impl Iterator<Item = &'v Value>) -> Vec<Element<'a>> {
    items.filter_map(text_element).collect()
}

fn text_element<'a>(value: &Value) -> Option<Element<'a>> {
    let text = coerce::text(Some(value));
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(Element::Text(trimmed.to_string()))
    }
}

fn split_paragraph<'a>(text: &str, rule: ParagraphRule) -> Vec<Element<'a>> {
    let parts: Vec<&str> = match rule {
        ParagraphRule::Whole => vec![text],
        ParagraphRule::Lines => text.lines().collect(),
        ParagraphRule::Commas => text.split(',').collect(),
    };
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| Element::Text(part.to_string()))
        .collect()
}
