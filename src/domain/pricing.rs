//! Static pricing reference data shared by the valuation engine and the
//! price projection.

use super::entities::PropertyType;

/// Region key used whenever a lookup misses.
pub const DEFAULT_REGION: &str = "default";

/// Base price per m² used by projections when the property type is not in
/// the table. Valuations never fall back to it.
pub const FALLBACK_BASE_PRICE: f64 = 35_000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub multiplier: f64,
    /// Annual growth as a fraction (0.06 = 6 % per year).
    pub growth: f64,
}

/// Per-type adjustment factors. Reserved: the valuation formula does not
/// read them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReservedFactors {
    pub condition: f64,
    pub location: f64,
    pub utilities: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyTypeEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub base_price: f64,
    pub factors: ReservedFactors,
}

const REGIONS: &[RegionEntry] = &[
    RegionEntry {
        key: "praha",
        name: "Praha",
        multiplier: 1.8,
        growth: 0.06,
    },
    RegionEntry {
        key: "brno",
        name: "Brno",
        multiplier: 1.3,
        growth: 0.05,
    },
    RegionEntry {
        key: "ostrava",
        name: "Ostrava",
        multiplier: 0.9,
        growth: 0.04,
    },
    RegionEntry {
        key: "plzen",
        name: "Plzeň",
        multiplier: 1.1,
        growth: 0.045,
    },
    RegionEntry {
        key: "liberec",
        name: "Liberec",
        multiplier: 0.95,
        growth: 0.04,
    },
    RegionEntry {
        key: DEFAULT_REGION,
        name: "Ostatní",
        multiplier: 1.0,
        growth: 0.04,
    },
];

const PROPERTY_TYPES: &[PropertyTypeEntry] = &[
    PropertyTypeEntry {
        key: "rodinny",
        name: "Rodinný dům",
        base_price: 45_000.0,
        factors: ReservedFactors {
            condition: 1.2,
            location: 1.1,
            utilities: 1.05,
        },
    },
    PropertyTypeEntry {
        key: "byt",
        name: "Byt",
        base_price: 52_000.0,
        factors: ReservedFactors {
            condition: 1.15,
            location: 1.2,
            utilities: 1.03,
        },
    },
    PropertyTypeEntry {
        key: "bytovy",
        name: "Bytový dům",
        base_price: 38_000.0,
        factors: ReservedFactors {
            condition: 1.1,
            location: 1.05,
            utilities: 1.08,
        },
    },
    PropertyTypeEntry {
        key: "komercni",
        name: "Komerční",
        base_price: 35_000.0,
        factors: ReservedFactors {
            condition: 1.05,
            location: 1.3,
            utilities: 1.1,
        },
    },
    PropertyTypeEntry {
        key: "pozemek",
        name: "Pozemek",
        base_price: 2_500.0,
        factors: ReservedFactors {
            condition: 1.0,
            location: 1.4,
            utilities: 1.2,
        },
    },
    PropertyTypeEntry {
        key: "ostatni",
        name: "Ostatní",
        base_price: 25_000.0,
        factors: ReservedFactors {
            condition: 1.0,
            location: 1.0,
            utilities: 1.0,
        },
    },
];

/// Read-only view over the regional and per-type price tables.
#[derive(Clone, Copy, Debug)]
pub struct PricingReferenceTable {
    regions: &'static [RegionEntry],
    property_types: &'static [PropertyTypeEntry],
}

pub static PRICING: PricingReferenceTable = PricingReferenceTable {
    regions: REGIONS,
    property_types: PROPERTY_TYPES,
};

impl PricingReferenceTable {
    pub fn regions(&self) -> &'static [RegionEntry] {
        self.regions
    }

    pub fn property_types(&self) -> &'static [PropertyTypeEntry] {
        self.property_types
    }

    pub fn region(&self, key: &str) -> Option<&'static RegionEntry> {
        self.regions.iter().find(|entry| entry.key == key)
    }

    /// Region lookup that never misses: unknown keys resolve to the default
    /// region.
    pub fn region_or_default(&self, key: &str) -> &'static RegionEntry {
        self.region(key)
            .or_else(|| self.region(DEFAULT_REGION))
            .unwrap_or(&REGIONS[REGIONS.len() - 1])
    }

    pub fn property_type(&self, property_type: &PropertyType) -> Option<&'static PropertyTypeEntry> {
        let key = property_type.key();
        self.property_types.iter().find(|entry| entry.key == key)
    }

    /// Display label for a type; unknown keys are shown verbatim.
    pub fn type_label(&self, property_type: &PropertyType) -> String {
        self.property_type(property_type)
            .map(|entry| entry.name.to_string())
            .unwrap_or_else(|| property_type.key().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_type_resolves() {
        for kind in PropertyType::KNOWN {
            assert!(
                PRICING.property_type(&kind).is_some(),
                "missing table entry for {}",
                kind.key()
            );
        }
    }

    #[test]
    fn unrecognized_type_has_no_entry() {
        let castle = PropertyType::from("castle".to_string());
        assert!(PRICING.property_type(&castle).is_none());
        assert_eq!(PRICING.type_label(&castle), "castle");
    }

    #[test]
    fn unknown_region_falls_back_to_default() {
        let entry = PRICING.region_or_default("atlantis");
        assert_eq!(entry.key, DEFAULT_REGION);
        assert_eq!(entry.multiplier, 1.0);
        assert_eq!(entry.growth, 0.04);
    }

    #[test]
    fn multipliers_are_non_negative() {
        assert!(PRICING.regions().iter().all(|r| r.multiplier >= 0.0));
        assert!(PRICING.property_types().iter().all(|t| t.base_price > 0.0));
    }
}
