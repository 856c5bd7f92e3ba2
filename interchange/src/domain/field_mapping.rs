//! # Field Mapping Tables
//!
//! One static table per record kind pairing each canonical field with the wire
//! keys that may supply it. Candidates are ordered by preference: on read the
//! first key present in the payload wins, on write the first key is the only
//! one emitted. Adding a backend alias is a change to these tables only.

use serde_json::{Map, Value};
use shared::RecordKind;

/// How a wire value is coerced into its canonical field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldType {
    Text,
    /// Whole number; `fallback` is used when a value is present but unparseable
    Integer { fallback: i64 },
    Decimal { fallback: f64 },
    Flag,
    Timestamp,
    Collection(CollectionKind),
}

/// Shape-ambiguous collection fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Ingredients,
    Steps,
    Tags,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub canonical: &'static str,
    pub wire_names: &'static [&'static str],
    pub field_type: FieldType,
}

impl FieldSpec {
    pub const fn new(
        canonical: &'static str,
        wire_names: &'static [&'static str],
        field_type: FieldType,
    ) -> Self {
        Self {
            canonical,
            wire_names,
            field_type,
        }
    }

    /// The key the backend expects on create/update calls
    pub fn write_name(&self) -> &'static str {
        self.wire_names.first().copied().unwrap_or(self.canonical)
    }
}

#[derive(Debug)]
pub struct FieldMapping {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FieldMapping {
    pub fn field(&self, canonical: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.canonical == canonical)
    }

    /// True when any key of `map` is a wire name of this table
    pub fn describes(&self, map: &Map<String, Value>) -> bool {
        self.fields
            .iter()
            .flat_map(|f| f.wire_names.iter())
            .any(|name| map.contains_key(*name))
    }
}

/// Table for a top-level record kind
pub fn mapping_for(kind: RecordKind) -> &'static FieldMapping {
    match kind {
        RecordKind::Recipe => &recipe::MAPPING,
        RecordKind::Category => &category::MAPPING,
        RecordKind::Subcategory => &subcategory::MAPPING,
        RecordKind::Merchant => &merchant::MAPPING,
    }
}

const TEXT: FieldType = FieldType::Text;
const FLAG: FieldType = FieldType::Flag;
const TIMESTAMP: FieldType = FieldType::Timestamp;
const WHOLE: FieldType = FieldType::Integer { fallback: 0 };
const AMOUNT: FieldType = FieldType::Decimal { fallback: 0.0 };

pub mod recipe {
    use super::*;

    pub const ID: FieldSpec = FieldSpec::new("id", &["id", "_id", "recipe_id", "recipeId"], TEXT);
    pub const NAME: FieldSpec =
        FieldSpec::new("name", &["name", "title", "recipe_name", "recipeName"], TEXT);
    pub const DESCRIPTION: FieldSpec =
        FieldSpec::new("description", &["description", "desc", "summary"], TEXT);
    pub const CATEGORY_ID: FieldSpec =
        FieldSpec::new("category_id", &["category_id", "categoryId", "category"], TEXT);
    pub const SUBCATEGORY_ID: FieldSpec = FieldSpec::new(
        "subcategory_id",
        &["subcategory_id", "subcategoryId", "subCategoryId", "sub_category_id"],
        TEXT,
    );
    pub const MERCHANT_ID: FieldSpec = FieldSpec::new(
        "merchant_id",
        &["merchant_id", "merchantId", "restaurant_id", "restaurantId"],
        TEXT,
    );
    pub const IMAGE_URL: FieldSpec =
        FieldSpec::new("image_url", &["image_url", "imageUrl", "image", "photo"], TEXT);
    pub const PREP_TIME: FieldSpec = FieldSpec::new(
        "prep_time_minutes",
        &[
            "prep_time",
            "prepTime",
            "preparation_time",
            "preparationTime",
            "estimated_time",
            "estimatedTime",
        ],
        FieldType::Integer { fallback: 30 },
    );
    pub const COOK_TIME: FieldSpec =
        FieldSpec::new("cook_time_minutes", &["cook_time", "cookTime", "cooking_time"], WHOLE);
    pub const SERVINGS: FieldSpec = FieldSpec::new(
        "servings",
        &["servings", "serving_size", "servingSize", "yield"],
        FieldType::Integer { fallback: 1 },
    );
    pub const PRICE: FieldSpec =
        FieldSpec::new("price", &["price", "unit_price", "unitPrice"], AMOUNT);
    pub const IS_ACTIVE: FieldSpec =
        FieldSpec::new("is_active", &["is_active", "isActive", "active"], FLAG);
    pub const IS_FEATURED: FieldSpec =
        FieldSpec::new("is_featured", &["is_featured", "isFeatured", "featured"], FLAG);
    pub const INGREDIENTS: FieldSpec = FieldSpec::new(
        "ingredients",
        &[
            "ingredients",
            "recipe_ingredients",
            "recipeIngredients",
            "recipeIngredient",
        ],
        FieldType::Collection(CollectionKind::Ingredients),
    );
    pub const INSTRUCTIONS: FieldSpec = FieldSpec::new(
        "instructions",
        &[
            "instructions",
            "steps",
            "preparation",
            "recipe_instructions",
            "recipeInstructions",
            "method",
        ],
        FieldType::Collection(CollectionKind::Steps),
    );
    pub const TAGS: FieldSpec = FieldSpec::new(
        "tags",
        &["tags", "labels", "keywords"],
        FieldType::Collection(CollectionKind::Tags),
    );
    pub const CREATED_AT: FieldSpec =
        FieldSpec::new("created_at", &["created_at", "createdAt"], TIMESTAMP);
    pub const UPDATED_AT: FieldSpec =
        FieldSpec::new("updated_at", &["updated_at", "updatedAt"], TIMESTAMP);

    pub static MAPPING: FieldMapping = FieldMapping {
        name: "recipe",
        fields: &[
            ID,
            NAME,
            DESCRIPTION,
            CATEGORY_ID,
            SUBCATEGORY_ID,
            MERCHANT_ID,
            IMAGE_URL,
            PREP_TIME,
            COOK_TIME,
            SERVINGS,
            PRICE,
            IS_ACTIVE,
            IS_FEATURED,
            INGREDIENTS,
            INSTRUCTIONS,
            TAGS,
            CREATED_AT,
            UPDATED_AT,
        ],
    };
}

/// Fields of one ingredient object inside a recipe
pub mod ingredient {
    use super::*;

    pub const ID: FieldSpec = FieldSpec::new("id", &["id"], TEXT);
    pub const NAME: FieldSpec =
        FieldSpec::new("name", &["name", "ingredient", "item", "title"], TEXT);
    pub const QUANTITY: FieldSpec =
        FieldSpec::new("quantity", &["quantity", "qty", "amount"], TEXT);
    pub const UNIT: FieldSpec = FieldSpec::new("unit", &["unit", "measure", "uom"], TEXT);

    pub static MAPPING: FieldMapping = FieldMapping {
        name: "ingredient",
        fields: &[ID, NAME, QUANTITY, UNIT],
    };

    /// Placeholders for ingredients that arrive as bare names
    pub const DEFAULT_QUANTITY: &str = "1";
    pub const DEFAULT_UNIT: &str = "piece";
}

/// Fields of one instruction step object inside a recipe
pub mod step {
    use super::*;

    pub const ID: FieldSpec = FieldSpec::new("id", &["id"], TEXT);
    pub const STEP_NUMBER: FieldSpec = FieldSpec::new(
        "step_number",
        &["step_number", "stepNumber", "step", "order", "position"],
        WHOLE,
    );
    pub const INSTRUCTION: FieldSpec = FieldSpec::new(
        "instruction",
        &["instruction", "text", "description", "content"],
        TEXT,
    );

    pub static MAPPING: FieldMapping = FieldMapping {
        name: "step",
        fields: &[ID, STEP_NUMBER, INSTRUCTION],
    };
}

/// Tags occasionally arrive as objects instead of strings
pub mod tag {
    use super::*;

    pub const NAME: FieldSpec = FieldSpec::new("name", &["name", "label", "title"], TEXT);
}

pub mod category {
    use super::*;

    pub const ID: FieldSpec =
        FieldSpec::new("id", &["id", "_id", "category_id", "categoryId"], TEXT);
    pub const NAME: FieldSpec =
        FieldSpec::new("name", &["name", "category_name", "categoryName", "title"], TEXT);
    pub const SLUG: FieldSpec = FieldSpec::new("slug", &["slug"], TEXT);
    pub const DESCRIPTION: FieldSpec =
        FieldSpec::new("description", &["description", "desc"], TEXT);
    pub const IMAGE_URL: FieldSpec =
        FieldSpec::new("image_url", &["image_url", "imageUrl", "image", "icon"], TEXT);
    pub const SORT_ORDER: FieldSpec = FieldSpec::new(
        "sort_order",
        &["sort_order", "sortOrder", "display_order", "displayOrder", "position"],
        WHOLE,
    );
    pub const SUBCATEGORY_COUNT: FieldSpec = FieldSpec::new(
        "subcategory_count",
        &[
            "subcategory_count",
            "subcategoryCount",
            "subcategories_count",
            "subcategoriesCount",
        ],
        WHOLE,
    );
    pub const IS_ACTIVE: FieldSpec =
        FieldSpec::new("is_active", &["is_active", "isActive", "active"], FLAG);
    pub const CREATED_AT: FieldSpec =
        FieldSpec::new("created_at", &["created_at", "createdAt"], TIMESTAMP);
    pub const UPDATED_AT: FieldSpec =
        FieldSpec::new("updated_at", &["updated_at", "updatedAt"], TIMESTAMP);

    pub static MAPPING: FieldMapping = FieldMapping {
        name: "category",
        fields: &[
            ID,
            NAME,
            SLUG,
            DESCRIPTION,
            IMAGE_URL,
            SORT_ORDER,
            SUBCATEGORY_COUNT,
            IS_ACTIVE,
            CREATED_AT,
            UPDATED_AT,
        ],
    };
}

pub mod subcategory {
    use super::*;

    pub const ID: FieldSpec =
        FieldSpec::new("id", &["id", "_id", "subcategory_id", "subcategoryId"], TEXT);
    pub const CATEGORY_ID: FieldSpec = FieldSpec::new(
        "category_id",
        &["category_id", "categoryId", "parent_id", "parentId"],
        TEXT,
    );
    pub const NAME: FieldSpec = FieldSpec::new(
        "name",
        &["name", "subcategory_name", "subcategoryName", "title"],
        TEXT,
    );
    pub const SLUG: FieldSpec = FieldSpec::new("slug", &["slug"], TEXT);
    pub const DESCRIPTION: FieldSpec =
        FieldSpec::new("description", &["description", "desc"], TEXT);
    pub const IMAGE_URL: FieldSpec =
        FieldSpec::new("image_url", &["image_url", "imageUrl", "image", "icon"], TEXT);
    pub const SORT_ORDER: FieldSpec = FieldSpec::new(
        "sort_order",
        &["sort_order", "sortOrder", "display_order", "displayOrder", "position"],
        WHOLE,
    );
    pub const RECIPE_COUNT: FieldSpec = FieldSpec::new(
        "recipe_count",
        &["recipe_count", "recipeCount", "recipes_count", "recipesCount"],
        WHOLE,
    );
    pub const IS_ACTIVE: FieldSpec =
        FieldSpec::new("is_active", &["is_active", "isActive", "active"], FLAG);
    pub const CREATED_AT: FieldSpec =
        FieldSpec::new("created_at", &["created_at", "createdAt"], TIMESTAMP);
    pub const UPDATED_AT: FieldSpec =
        FieldSpec::new("updated_at", &["updated_at", "updatedAt"], TIMESTAMP);

    pub static MAPPING: FieldMapping = FieldMapping {
        name: "subcategory",
        fields: &[
            ID,
            CATEGORY_ID,
            NAME,
            SLUG,
            DESCRIPTION,
            IMAGE_URL,
            SORT_ORDER,
            RECIPE_COUNT,
            IS_ACTIVE,
            CREATED_AT,
            UPDATED_AT,
        ],
    };
}

pub mod merchant {
    use super::*;

    pub const ID: FieldSpec =
        FieldSpec::new("id", &["id", "_id", "merchant_id", "merchantId"], TEXT);
    pub const BUSINESS_NAME: FieldSpec = FieldSpec::new(
        "business_name",
        &["business_name", "businessName", "store_name", "storeName", "name"],
        TEXT,
    );
    pub const OWNER_NAME: FieldSpec = FieldSpec::new(
        "owner_name",
        &["owner_name", "ownerName", "contact_name", "contactName"],
        TEXT,
    );
    pub const EMAIL: FieldSpec = FieldSpec::new("email", &["email", "email_address", "emailAddress"], TEXT);
    pub const PHONE: FieldSpec =
        FieldSpec::new("phone", &["phone", "phone_number", "phoneNumber", "mobile"], TEXT);
    pub const ADDRESS: FieldSpec =
        FieldSpec::new("address", &["address", "street_address", "streetAddress"], TEXT);
    pub const CITY: FieldSpec = FieldSpec::new("city", &["city"], TEXT);
    pub const RATING: FieldSpec =
        FieldSpec::new("rating", &["rating", "average_rating", "averageRating"], AMOUNT);
    pub const COMMISSION_RATE: FieldSpec = FieldSpec::new(
        "commission_rate",
        &["commission_rate", "commissionRate", "commission"],
        AMOUNT,
    );
    pub const IS_ACTIVE: FieldSpec =
        FieldSpec::new("is_active", &["is_active", "isActive", "active"], FLAG);
    pub const IS_VERIFIED: FieldSpec =
        FieldSpec::new("is_verified", &["is_verified", "isVerified", "verified"], FLAG);
    pub const CREATED_AT: FieldSpec =
        FieldSpec::new("created_at", &["created_at", "createdAt", "joined_at", "joinedAt"], TIMESTAMP);
    pub const UPDATED_AT: FieldSpec =
        FieldSpec::new("updated_at", &["updated_at", "updatedAt"], TIMESTAMP);

    pub static MAPPING: FieldMapping = FieldMapping {
        name: "merchant",
        fields: &[
            ID,
            BUSINESS_NAME,
            OWNER_NAME,
            EMAIL,
            PHONE,
            ADDRESS,
            CITY,
            RATING,
            COMMISSION_RATE,
            IS_ACTIVE,
            IS_VERIFIED,
            CREATED_AT,
            UPDATED_AT,
        ],
    };
}
