use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A situation signal derived from the primary detected object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SituationAttribute {
    LargeWaste,
    HazardousWaste,
    LargePothole,
    DeepPothole,
    NearElectric,   // reserved, never triggered
    NearWater,      // reserved, never triggered
}

impl SituationAttribute {
    /// Number of attributes.
    pub const COUNT: usize = 6;

    /// All attributes in declaration order (graph insertion order).
    pub const ALL: [SituationAttribute; Self::COUNT] = [
        SituationAttribute::LargeWaste,
        SituationAttribute::HazardousWaste,
        SituationAttribute::LargePothole,
        SituationAttribute::DeepPothole,
        SituationAttribute::NearElectric,
        SituationAttribute::NearWater,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            SituationAttribute::LargeWaste => "large_waste",
            SituationAttribute::HazardousWaste => "hazardous_waste",
            SituationAttribute::LargePothole => "large_pothole",
            SituationAttribute::DeepPothole => "deep_pothole",
            SituationAttribute::NearElectric => "near_electric",
            SituationAttribute::NearWater => "near_water",
        }
    }

    /// Position of this attribute in `ALL`.
    #[inline] pub fn ordinal(&self) -> usize { *self as usize }
}

impl fmt::Display for SituationAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for SituationAttribute {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
            .find(|attr| attr.to_str() == s)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("unknown situation attribute '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_declaration_order() {
        for (i, attr) in SituationAttribute::ALL.iter().enumerate() {
            assert_eq!(attr.ordinal(), i);
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for attr in SituationAttribute::ALL {
            assert_eq!(attr.to_str().parse::<SituationAttribute>().unwrap(), attr);
        }
        assert!("shallow_pothole".parse::<SituationAttribute>().is_err());
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&SituationAttribute::DeepPothole).unwrap();
        assert_eq!(json, "\"deep_pothole\"");
    }
}
