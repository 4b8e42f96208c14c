//! Reference catalog of known herb species

use serde::Serialize;

/// Static reference information about a species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HerbInfo {
    /// Label used on batches, e.g. `Withania somnifera (Ashwagandha)`
    pub label: &'static str,
    /// Common name
    pub common_name: &'static str,
    /// Binomial name
    pub scientific_name: &'static str,
    /// Botanical family
    pub family: &'static str,
    /// Short description
    pub description: &'static str,
    /// Typical dosage guidance
    pub dosage: &'static str,
}

/// Known species
pub static CATALOG: [HerbInfo; 3] = [
    HerbInfo {
        label: "Withania somnifera (Ashwagandha)",
        common_name: "Ashwagandha",
        scientific_name: "Withania somnifera",
        family: "Solanaceae",
        description: "Adaptogenic root used in Ayurveda for stress management and vitality.",
        dosage: "300-500mg standardized extract twice daily, or 1-6g of root powder daily",
    },
    HerbInfo {
        label: "Curcuma longa (Turmeric)",
        common_name: "Turmeric",
        scientific_name: "Curcuma longa",
        family: "Zingiberaceae",
        description: "Curcumin-rich rhizome valued for anti-inflammatory and antioxidant use.",
        dosage: "500-1000mg curcumin extract daily, or 1-3g turmeric powder with black pepper",
    },
    HerbInfo {
        label: "Ocimum sanctum (Holy Basil)",
        common_name: "Holy Basil (Tulsi)",
        scientific_name: "Ocimum sanctum",
        family: "Lamiaceae",
        description: "Sacred adaptogenic herb known for respiratory benefits.",
        dosage: "300-600mg standardized extract daily, or 1-2 cups of fresh leaf tea",
    },
];

/// Look up a species by label, scientific name or common name (case-insensitive)
#[must_use]
pub fn lookup(species: &str) -> Option<&'static HerbInfo> {
    let needle = species.trim().to_lowercase();
    CATALOG.iter().find(|h| {
        h.label.to_lowercase() == needle
            || h.scientific_name.to_lowercase() == needle
            || h.common_name.to_lowercase() == needle
            || needle.starts_with(&h.scientific_name.to_lowercase())
    })
}
