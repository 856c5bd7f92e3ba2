use shared::Subcategory;

use crate::domain::field_mapping::subcategory;
use crate::domain::wire::{WireRecord, WireView, WireWriter};

pub struct SubcategoryMapper;

impl SubcategoryMapper {
    /// Convert a wire subcategory into the canonical Subcategory
    pub fn to_domain(wire: &WireRecord) -> Subcategory {
        let view = WireView::new(wire);
        Subcategory {
            id: view.text(&subcategory::ID),
            category_id: view.text(&subcategory::CATEGORY_ID),
            name: view.text(&subcategory::NAME),
            slug: view.text(&subcategory::SLUG),
            description: view.text(&subcategory::DESCRIPTION),
            image_url: view.text(&subcategory::IMAGE_URL),
            sort_order: view.integer(&subcategory::SORT_ORDER),
            recipe_count: view.count(&subcategory::RECIPE_COUNT),
            is_active: view.flag(&subcategory::IS_ACTIVE),
            created_at: view.timestamp(&subcategory::CREATED_AT),
            updated_at: view.timestamp(&subcategory::UPDATED_AT),
        }
    }

    /// Convert a canonical Subcategory into its create/update body
    pub fn to_wire(domain: &Subcategory) -> WireRecord {
        WireWriter::new()
            .text_if_present(&subcategory::ID, &domain.id)
            .text(&subcategory::CATEGORY_ID, &domain.category_id)
            .text(&subcategory::NAME, &domain.name)
            .text(&subcategory::SLUG, &domain.slug)
            .text(&subcategory::DESCRIPTION, &domain.description)
            .text(&subcategory::IMAGE_URL, &domain.image_url)
            .integer(&subcategory::SORT_ORDER, domain.sort_order)
            .integer(&subcategory::RECIPE_COUNT, domain.recipe_count)
            .flag(&subcategory::IS_ACTIVE, domain.is_active)
            .text_if_present(&subcategory::CREATED_AT, &domain.created_at)
            .text_if_present(&subcategory::UPDATED_AT, &domain.updated_at)
            .finish()
    }

    /// Convert Vec<WireRecord> to Vec<Subcategory>
    pub fn to_domain_list(wires: &[WireRecord]) -> Vec<Subcategory> {
        wires.iter().map(Self::to_domain).collect()
    }

    /// Convert Vec<Subcategory> to Vec<WireRecord>
    pub fn to_wire_list(subcategories: &[Subcategory]) -> Vec<WireRecord> {
        subcategories.iter().map(Self::to_wire).collect()
    }
}
