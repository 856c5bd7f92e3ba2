use serde::{Deserialize, Serialize};
use std::fmt;

/// The record kinds the dashboard fetches from its backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Recipe,
    Category,
    Subcategory,
    Merchant,
}

impl RecordKind {
    pub const ALL: &'static [RecordKind] = &[
        RecordKind::Recipe,
        RecordKind::Category,
        RecordKind::Subcategory,
        RecordKind::Merchant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Recipe => "recipe",
            RecordKind::Category => "category",
            RecordKind::Subcategory => "subcategory",
            RecordKind::Merchant => "merchant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "recipe" => Some(RecordKind::Recipe),
            "category" => Some(RecordKind::Category),
            "subcategory" => Some(RecordKind::Subcategory),
            "merchant" => Some(RecordKind::Merchant),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Synthetic identifier assigned during normalization
    pub id: String,
    pub name: String,
    /// Quantity as entered ("1", "1/2", "200")
    pub quantity: String,
    pub unit: String,
}

/// One preparation step of a recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionStep {
    /// Synthetic identifier assigned during normalization
    pub id: String,
    /// 1-based position of the step
    pub step_number: u32,
    pub instruction: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category_id: String,
    pub subcategory_id: String,
    pub merchant_id: String,
    pub image_url: String,
    /// Estimated preparation time in minutes
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub servings: u32,
    pub price: f64,
    pub is_active: bool,
    pub is_featured: bool,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<InstructionStep>,
    pub tags: Vec<String>,
    /// RFC 3339 timestamp, or the raw wire text when it could not be parsed
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image_url: String,
    pub sort_order: i64,
    pub subcategory_count: u32,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image_url: String,
    pub sort_order: i64,
    pub recipe_count: u32,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: String,
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    /// Average customer rating (0-5)
    pub rating: f64,
    /// Platform commission as a percentage
    pub commission_rate: f64,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// A fully-typed record as held in application state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum CanonicalRecord {
    Recipe(Recipe),
    Category(Category),
    Subcategory(Subcategory),
    Merchant(Merchant),
}

impl CanonicalRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            CanonicalRecord::Recipe(_) => RecordKind::Recipe,
            CanonicalRecord::Category(_) => RecordKind::Category,
            CanonicalRecord::Subcategory(_) => RecordKind::Subcategory,
            CanonicalRecord::Merchant(_) => RecordKind::Merchant,
        }
    }

    /// The all-defaults record of the given kind
    pub fn default_for(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Recipe => CanonicalRecord::Recipe(Recipe::default()),
            RecordKind::Category => CanonicalRecord::Category(Category::default()),
            RecordKind::Subcategory => CanonicalRecord::Subcategory(Subcategory::default()),
            RecordKind::Merchant => CanonicalRecord::Merchant(Merchant::default()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CanonicalRecord::Recipe(r) => &r.id,
            CanonicalRecord::Category(c) => &c.id,
            CanonicalRecord::Subcategory(s) => &s.id,
            CanonicalRecord::Merchant(m) => &m.id,
        }
    }
}

/// Export targets offered by the dashboard's export menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Xml,
    Text,
    Print,
}

impl ExportFormat {
    pub const ALL: &'static [ExportFormat] = &[
        ExportFormat::Csv,
        ExportFormat::Json,
        ExportFormat::Xml,
        ExportFormat::Text,
        ExportFormat::Print,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xml => "xml",
            ExportFormat::Text => "text",
            ExportFormat::Print => "print",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            "xml" => Some(ExportFormat::Xml),
            "text" | "txt" => Some(ExportFormat::Text),
            "print" => Some(ExportFormat::Print),
            _ => None,
        }
    }

    /// MIME type a caller should attach to a download of this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Xml => "application/xml",
            ExportFormat::Text => "text/plain",
            ExportFormat::Print => "text/html",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xml => "xml",
            ExportFormat::Text => "txt",
            ExportFormat::Print => "html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for export rendering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Name of the XML element wrapping all rows
    pub xml_root_element: String,
    /// Name of the XML element wrapping a single row
    pub xml_row_element: String,
    /// Separator placed between fields in the plain text dump
    pub text_delimiter: String,
    /// Heading and `<title>` of the print document
    pub print_title: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            xml_root_element: "records".to_string(),
            xml_row_element: "record".to_string(),
            text_delimiter: "\t".to_string(),
            print_title: "Export".to_string(),
        }
    }
}
