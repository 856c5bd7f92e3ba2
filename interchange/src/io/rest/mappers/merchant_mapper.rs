use shared::Merchant;

use crate::domain::field_mapping::merchant;
use crate::domain::wire::{WireRecord, WireView, WireWriter};

pub struct MerchantMapper;

impl MerchantMapper {
    /// Convert a wire merchant into the canonical Merchant
    pub fn to_domain(wire: &WireRecord) -> Merchant {
        let view = WireView::new(wire);
        Merchant {
            id: view.text(&merchant::ID),
            business_name: view.text(&merchant::BUSINESS_NAME),
            owner_name: view.text(&merchant::OWNER_NAME),
            email: view.text(&merchant::EMAIL),
            phone: view.text(&merchant::PHONE),
            address: view.text(&merchant::ADDRESS),
            city: view.text(&merchant::CITY),
            rating: view.decimal(&merchant::RATING),
            commission_rate: view.decimal(&merchant::COMMISSION_RATE),
            is_active: view.flag(&merchant::IS_ACTIVE),
            is_verified: view.flag(&merchant::IS_VERIFIED),
            created_at: view.timestamp(&merchant::CREATED_AT),
            updated_at: view.timestamp(&merchant::UPDATED_AT),
        }
    }

    /// Convert a canonical Merchant into its create/update body
    pub fn to_wire(domain: &Merchant) -> WireRecord {
        WireWriter::new()
            .text_if_present(&merchant::ID, &domain.id)
            .text(&merchant::BUSINESS_NAME, &domain.business_name)
            .text(&merchant::OWNER_NAME, &domain.owner_name)
            .text(&merchant::EMAIL, &domain.email)
            .text(&merchant::PHONE, &domain.phone)
            .text(&merchant::ADDRESS, &domain.address)
            .text(&merchant::CITY, &domain.city)
            .decimal(&merchant::RATING, domain.rating)
            .decimal(&merchant::COMMISSION_RATE, domain.commission_rate)
            .flag(&merchant::IS_ACTIVE, domain.is_active)
            .flag(&merchant::IS_VERIFIED, domain.is_verified)
            .text_if_present(&merchant::CREATED_AT, &domain.created_at)
            .text_if_present(&merchant::UPDATED_AT, &domain.updated_at)
            .finish()
    }

    /// Convert Vec<WireRecord> to Vec<Merchant>
    pub fn to_domain_list(wires: &[WireRecord]) -> Vec<Merchant> {
        wires.iter().map(Self::to_domain).collect()
    }

    /// Convert Vec<Merchant> to Vec<WireRecord>
    pub fn to_wire_list(merchants: &[Merchant]) -> Vec<WireRecord> {
        merchants.iter().map(Self::to_wire).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_domain_reads_mixed_payload() {
        let wire = json!({
            "merchantId": "m-3",
            "name": "Corner Deli",
            "phoneNumber": "+1 555 0100",
            "averageRating": "4.7",
            "commission": 12.5,
            "verified": 1,
            "joinedAt": 1_700_000_000_000_i64
        });
        let merchant = MerchantMapper::to_domain(&wire);

        assert_eq!(merchant.id, "m-3");
        assert_eq!(merchant.business_name, "Corner Deli");
        assert_eq!(merchant.phone, "+1 555 0100");
        assert_eq!(merchant.rating, 4.7);
        assert_eq!(merchant.commission_rate, 12.5);
        assert!(merchant.is_verified);
        assert!(!merchant.is_active);
        assert_eq!(merchant.created_at, "2023-11-14T22:13:20Z");
    }

    #[test]
    fn test_business_name_prefers_explicit_field() {
        let merchant = MerchantMapper::to_domain(&json!({"name": "Alias", "businessName": "Real"}));
        assert_eq!(merchant.business_name, "Real");
    }

    #[test]
    fn test_bidirectional_conversion() {
        let original = Merchant {
            id: "m-1".to_string(),
            business_name: "Noodle Bar".to_string(),
            email: "owner@noodle.example".to_string(),
            rating: 4.25,
            commission_rate: 15.0,
            is_active: true,
            created_at: "2024-02-10T08:00:00Z".to_string(),
            ..Merchant::default()
        };
        let wire = MerchantMapper::to_wire(&original);
        assert_eq!(wire["business_name"], "Noodle Bar");
        assert_eq!(MerchantMapper::to_domain(&wire), original);
    }
}
