use shared::Category;

use crate::domain::field_mapping::category;
use crate::domain::wire::{WireRecord, WireView, WireWriter};

pub struct CategoryMapper;

impl CategoryMapper {
    /// Convert a wire category into the canonical Category
    pub fn to_domain(wire: &WireRecord) -> Category {
        let view = WireView::new(wire);
        Category {
            id: view.text(&category::ID),
            name: view.text(&category::NAME),
            slug: view.text(&category::SLUG),
            description: view.text(&category::DESCRIPTION),
            image_url: view.text(&category::IMAGE_URL),
            sort_order: view.integer(&category::SORT_ORDER),
            subcategory_count: view.count(&category::SUBCATEGORY_COUNT),
            is_active: view.flag(&category::IS_ACTIVE),
            created_at: view.timestamp(&category::CREATED_AT),
            updated_at: view.timestamp(&category::UPDATED_AT),
        }
    }

    /// Convert a canonical Category into its create/update body
    pub fn to_wire(domain: &Category) -> WireRecord {
        WireWriter::new()
            .text_if_present(&category::ID, &domain.id)
            .text(&category::NAME, &domain.name)
            .text(&category::SLUG, &domain.slug)
            .text(&category::DESCRIPTION, &domain.description)
            .text(&category::IMAGE_URL, &domain.image_url)
            .integer(&category::SORT_ORDER, domain.sort_order)
            .integer(&category::SUBCATEGORY_COUNT, domain.subcategory_count)
            .flag(&category::IS_ACTIVE, domain.is_active)
            .text_if_present(&category::CREATED_AT, &domain.created_at)
            .text_if_present(&category::UPDATED_AT, &domain.updated_at)
            .finish()
    }

    /// Convert Vec<WireRecord> to Vec<Category>
    pub fn to_domain_list(wires: &[WireRecord]) -> Vec<Category> {
        wires.iter().map(Self::to_domain).collect()
    }

    /// Convert Vec<Category> to Vec<WireRecord>
    pub fn to_wire_list(categories: &[Category]) -> Vec<WireRecord> {
        categories.iter().map(Self::to_wire).collect()
    }
}
