use std::borrow::Cow;
use std::collections::HashMap;

use log::{debug, error};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use shared::{ExportConfig, ExportFormat};

use crate::domain::export_service::{ExportStrategy, ExportTable};
use crate::errors::ExportError;

/// XML document with one child element per row and one grandchild per column.
///
/// Column labels are sanitized into element names. Two distinct labels that
/// sanitize to the same name are rejected with
/// [`ExportError::XmlElementCollision`].
#[derive(Debug, Clone)]
pub struct XmlExport {
    root_element: String,
    row_element: String,
}

impl XmlExport {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            root_element: sanitize_element_name(&config.xml_root_element),
            row_element: sanitize_element_name(&config.xml_row_element),
        }
    }

    /// Element name for each column, in column order
    pub fn element_names(&self, columns: &[&str]) -> Result<Vec<String>, ExportError> {
        let mut seen: HashMap<String, &str> = HashMap::with_capacity(columns.len());
        let mut names = Vec::with_capacity(columns.len());
        for &column in columns {
            let element = sanitize_element_name(column);
            if let Some(first) = seen.get(&element) {
                error!(
                    "❌ EXPORT: columns {:?} and {:?} both sanitize to <{}>",
                    first, column, element
                );
                return Err(ExportError::XmlElementCollision {
                    element,
                    first: first.to_string(),
                    second: column.to_string(),
                });
            }
            seen.insert(element.clone(), column);
            names.push(element);
        }
        Ok(names)
    }
}

impl Default for XmlExport {
    fn default() -> Self {
        Self::new(&ExportConfig::default())
    }
}

impl ExportStrategy for XmlExport {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xml
    }

    fn render(&self, table: &ExportTable<'_>) -> Result<String, ExportError> {
        let elements = self.element_names(table.columns())?;

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)?;
        writer
            .write_event(Event::Start(BytesStart::new(self.root_element.as_str())))
            .map_err(xml_error)?;

        for row in table.rows() {
            writer
                .write_event(Event::Start(BytesStart::new(self.row_element.as_str())))
                .map_err(xml_error)?;
            for (element, value) in elements.iter().zip(table.rendered_cells(row)) {
                writer
                    .write_event(Event::Start(BytesStart::new(element.as_str())))
                    .map_err(xml_error)?;
                writer
                    .write_event(Event::Text(BytesText::new(&xml_safe_text(&value))))
                    .map_err(xml_error)?;
                writer
                    .write_event(Event::End(BytesEnd::new(element.as_str())))
                    .map_err(xml_error)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(self.row_element.as_str())))
                .map_err(xml_error)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(self.root_element.as_str())))
            .map_err(xml_error)?;

        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn xml_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Xml(e.to_string())
}

/// Turn an arbitrary label into a legal XML element name.
///
/// Characters outside the XML 1.0 `NameChar` production become `_`, so
/// Unicode letters survive. `:` is replaced as well to keep names free of
/// namespace prefixes. Names that would not start with a `NameStartChar`, or
/// that start with the reserved `xml` prefix, get a leading `_`.
pub fn sanitize_element_name(label: &str) -> String {
    let mut name: String = label
        .trim()
        .chars()
        .map(|c| if c != ':' && is_name_char(c) { c } else { '_' })
        .collect();

    let needs_prefix = match name.chars().next() {
        None => true,
        Some(first) => !is_name_start_char(first),
    } || name.to_ascii_lowercase().starts_with("xml");

    if needs_prefix {
        name.insert(0, '_');
    }
    name
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | '_' | 'A'..='Z' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

/// Characters allowed by the XML 1.0 `Char` production
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Replace characters XML cannot carry, even escaped, with U+FFFD
fn xml_safe_text(value: &str) -> Cow<'_, str> {
    if value.chars().all(is_xml_char) {
        return Cow::Borrowed(value);
    }
    debug!("EXPORT: replacing control characters in XML text {:?}", value);
    Cow::Owned(
        value
            .chars()
            .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
            .collect(),
    )
}
