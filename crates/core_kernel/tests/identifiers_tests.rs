//! Tests for strongly-typed identifiers and contract numbers

use core_kernel::{ContractNumber, InsurerId, PaymentId, PersonId, SettlementId};
use std::collections::HashSet;
use uuid::Uuid;

mod uuid_identifiers {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(PersonId::prefix(), "PRS");
        assert_eq!(InsurerId::prefix(), "INS");
        assert_eq!(PaymentId::prefix(), "PAY");
        assert_eq!(SettlementId::prefix(), "STL");
    }

    #[test]
    fn test_new_ids_are_unique() {
        let ids: HashSet<PersonId> = (0..100).map(|_| PersonId::new()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_v7_ids_are_time_ordered() {
        let first = PaymentId::new_v7();
        let second = PaymentId::new_v7();
        assert!(first <= second);
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let uuid = Uuid::new_v4();
        let with_prefix: PersonId = format!("PRS-{}", uuid).parse().unwrap();
        let without_prefix: PersonId = uuid.to_string().parse().unwrap();

        assert_eq!(with_prefix, without_prefix);
        assert_eq!(with_prefix.as_uuid(), &uuid);
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!("PRS-not-a-uuid".parse::<PersonId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = InsurerId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }
}

mod contract_numbers {
    use super::*;

    #[test]
    fn test_display_is_raw_number() {
        let number = ContractNumber::new("VEH-2024-001").unwrap();
        assert_eq!(number.to_string(), "VEH-2024-001");
    }

    #[test]
    fn test_empty_number_is_rejected() {
        assert!(ContractNumber::new("").is_err());
        assert!("".parse::<ContractNumber>().is_err());
    }

    #[test]
    fn test_whitespace_number_is_kept_verbatim() {
        let number = ContractNumber::new(" C 1 ").unwrap();
        assert_eq!(number.as_str(), " C 1 ");
        assert_ne!(number, ContractNumber::new("C 1").unwrap());
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let result: Result<ContractNumber, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());

        let number: ContractNumber = serde_json::from_str("\"T-7\"").unwrap();
        assert_eq!(number.as_str(), "T-7");
    }

    #[test]
    fn test_try_from_str() {
        let number = ContractNumber::try_from("M-1").unwrap();
        assert_eq!(String::from(number), "M-1");
    }
}
