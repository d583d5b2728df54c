//! Typed ID definitions for the platform's resources.

use crate::define_id;

define_id!(PackageId, "pkg");
define_id!(ShipmentId, "shp");
define_id!(SessionId, "sess");
define_id!(RequestId, "req");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_id_roundtrip() {
        let id = PackageId::new();
        let s = id.to_string();
        let parsed: PackageId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_package_id_prefix() {
        let id = PackageId::new();
        assert!(id.to_string().starts_with("pkg_"));
    }

    #[test]
    fn test_wrong_prefix_rejected() {
        let shipment = ShipmentId::new().to_string();
        let result: Result<PackageId, _> = shipment.parse();
        assert!(matches!(
            result.unwrap_err(),
            crate::IdError::InvalidPrefix { .. }
        ));
    }

    #[test]
    fn test_missing_separator() {
        let result: Result<SessionId, _> = "sess01JD2X8WQXKJNM8GPQY6VBKC3D".parse();
        assert!(matches!(
            result.unwrap_err(),
            crate::IdError::MissingSeparator
        ));
    }

    #[test]
    fn test_empty_rejected() {
        let result: Result<PackageId, _> = "".parse();
        assert!(matches!(result.unwrap_err(), crate::IdError::Empty));
    }

    #[test]
    fn test_invalid_ulid_rejected() {
        let result: Result<PackageId, _> = "pkg_not-a-ulid".parse();
        assert!(matches!(result.unwrap_err(), crate::IdError::InvalidUlid(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let id = ShipmentId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ShipmentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_package_ids_sortable() {
        let id1 = PackageId::new();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = PackageId::new();
        // ULIDs are time-ordered
        assert!(id1 < id2);
    }

    #[test]
    fn test_all_id_prefixes_unique() {
        let prefixes = [
            PackageId::PREFIX,
            ShipmentId::PREFIX,
            SessionId::PREFIX,
            RequestId::PREFIX,
        ];

        let unique: std::collections::HashSet<_> = prefixes.iter().collect();
        assert_eq!(prefixes.len(), unique.len(), "Duplicate ID prefixes found!");
    }
}
