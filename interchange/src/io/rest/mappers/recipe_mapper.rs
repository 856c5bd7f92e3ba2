use serde_json::Value;
use shared::{Ingredient, InstructionStep, Recipe, RecordKind};

use crate::domain::field_mapping::{ingredient, recipe, step, tag};
use crate::domain::shape::{Element, ParagraphRule};
use crate::domain::wire::{synthetic_id, WireRecord, WireView, WireWriter};

pub struct RecipeMapper;

impl RecipeMapper {
    /// Convert a wire recipe into the canonical Recipe
    pub fn to_domain(wire: &WireRecord) -> Recipe {
        let view = WireView::new(wire);
        let id = view.text(&recipe::ID);

        Recipe {
            name: view.text(&recipe::NAME),
            description: view.text(&recipe::DESCRIPTION),
            category_id: view.text(&recipe::CATEGORY_ID),
            subcategory_id: view.text(&recipe::SUBCATEGORY_ID),
            merchant_id: view.text(&recipe::MERCHANT_ID),
            image_url: view.text(&recipe::IMAGE_URL),
            prep_time_minutes: view.count(&recipe::PREP_TIME),
            cook_time_minutes: view.count(&recipe::COOK_TIME),
            servings: view.count(&recipe::SERVINGS),
            price: view.decimal(&recipe::PRICE),
            is_active: view.flag(&recipe::IS_ACTIVE),
            is_featured: view.flag(&recipe::IS_FEATURED),
            ingredients: Self::ingredients_to_domain(&view, &id),
            instructions: Self::instructions_to_domain(&view, &id),
            tags: Self::tags_to_domain(&view),
            created_at: view.timestamp(&recipe::CREATED_AT),
            updated_at: view.timestamp(&recipe::UPDATED_AT),
            id,
        }
    }

    /// Convert a canonical Recipe into the one wire shape the backend accepts for writes
    pub fn to_wire(domain: &Recipe) -> WireRecord {
        WireWriter::new()
            .text_if_present(&recipe::ID, &domain.id)
            .text(&recipe::NAME, &domain.name)
            .text(&recipe::DESCRIPTION, &domain.description)
            .text(&recipe::CATEGORY_ID, &domain.category_id)
            .text(&recipe::SUBCATEGORY_ID, &domain.subcategory_id)
            .text(&recipe::MERCHANT_ID, &domain.merchant_id)
            .text(&recipe::IMAGE_URL, &domain.image_url)
            .integer(&recipe::PREP_TIME, domain.prep_time_minutes)
            .integer(&recipe::COOK_TIME, domain.cook_time_minutes)
            .integer(&recipe::SERVINGS, domain.servings)
            .decimal(&recipe::PRICE, domain.price)
            .flag(&recipe::IS_ACTIVE, domain.is_active)
            .flag(&recipe::IS_FEATURED, domain.is_featured)
            .array(
                &recipe::INGREDIENTS,
                domain.ingredients.iter().map(Self::ingredient_to_wire).collect(),
            )
            .array(
                &recipe::INSTRUCTIONS,
                domain.instructions.iter().map(Self::step_to_wire).collect(),
            )
            .array(
                &recipe::TAGS,
                domain.tags.iter().cloned().map(Value::String).collect(),
            )
            .text_if_present(&recipe::CREATED_AT, &domain.created_at)
            .text_if_present(&recipe::UPDATED_AT, &domain.updated_at)
            .finish()
    }

    /// Convert Vec<WireRecord> to Vec<Recipe>
    pub fn to_domain_list(wires: &[WireRecord]) -> Vec<Recipe> {
        wires.iter().map(Self::to_domain).collect()
    }

    /// Convert Vec<Recipe> to Vec<WireRecord>
    pub fn to_wire_list(recipes: &[Recipe]) -> Vec<WireRecord> {
        recipes.iter().map(Self::to_wire).collect()
    }

    fn ingredients_to_domain(view: &WireView<'_>, recipe_id: &str) -> Vec<Ingredient> {
        view.elements(&recipe::INGREDIENTS, ParagraphRule::Lines)
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                let id = synthetic_id(RecordKind::Recipe, recipe_id, "ingredients", index);
                match element {
                    Element::Text(name) => Ingredient {
                        id,
                        name,
                        quantity: ingredient::DEFAULT_QUANTITY.to_string(),
                        unit: ingredient::DEFAULT_UNIT.to_string(),
                    },
                    Element::Object(map) => {
                        let item = WireView::from_map(map);
                        Ingredient {
                            id,
                            name: item.text(&ingredient::NAME).trim().to_string(),
                            quantity: item.text(&ingredient::QUANTITY).trim().to_string(),
                            unit: item.text(&ingredient::UNIT).trim().to_string(),
                        }
                    }
                }
            })
            .collect()
    }

    fn instructions_to_domain(view: &WireView<'_>, recipe_id: &str) -> Vec<InstructionStep> {
        view.elements(&recipe::INSTRUCTIONS, ParagraphRule::Whole)
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                let id = synthetic_id(RecordKind::Recipe, recipe_id, "instructions", index);
                let position = index as u32 + 1;
                match element {
                    Element::Text(instruction) => InstructionStep {
                        id,
                        step_number: position,
                        instruction,
                    },
                    Element::Object(map) => {
                        let item = WireView::from_map(map);
                        let step_number = match item.count(&step::STEP_NUMBER) {
                            0 => position,
                            n => n,
                        };
                        InstructionStep {
                            id,
                            step_number,
                            instruction: item.text(&step::INSTRUCTION).trim().to_string(),
                        }
                    }
                }
            })
            .collect()
    }

    fn tags_to_domain(view: &WireView<'_>) -> Vec<String> {
        view.elements(&recipe::TAGS, ParagraphRule::Commas)
            .into_iter()
            .filter_map(|element| match element {
                Element::Text(tag) => Some(tag),
                Element::Object(map) => {
                    let name = WireView::from_map(map).text(&tag::NAME);
                    let name = name.trim();
                    (!name.is_empty()).then(|| name.to_string())
                }
            })
            .collect()
    }

    fn ingredient_to_wire(domain: &Ingredient) -> Value {
        WireWriter::new()
            .text(&ingredient::ID, &domain.id)
            .text(&ingredient::NAME, &domain.name)
            .text(&ingredient::QUANTITY, &domain.quantity)
            .text(&ingredient::UNIT, &domain.unit)
            .finish()
    }

    fn step_to_wire(domain: &InstructionStep) -> Value {
        WireWriter::new()
            .text(&step::ID, &domain.id)
            .integer(&step::STEP_NUMBER, domain.step_number)
            .text(&step::INSTRUCTION, &domain.instruction)
            .finish()
    }
}
