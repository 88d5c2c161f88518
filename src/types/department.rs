use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A civic department eligible to receive a routed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Waste Management")]
    WasteManagement,
    Construction,
    Municipality,
    Roads,
    Electricity,
    Water,
    #[serde(rename = "Ward Office")]
    WardOffice,
}

impl Department {
    /// Number of departments scored by the reasoner.
    pub const COUNT: usize = 7;

    /// All departments in declaration order (graph insertion order and score column order).
    pub const ALL: [Department; Self::COUNT] = [
        Department::WasteManagement,
        Department::Construction,
        Department::Municipality,
        Department::Roads,
        Department::Electricity,
        Department::Water,
        Department::WardOffice,
    ];

    /// Sentinel department name used when nothing can be routed.
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn to_str(&self) -> &'static str {
        match self {
            Department::WasteManagement => "Waste Management",
            Department::Construction => "Construction",
            Department::Municipality => "Municipality",
            Department::Roads => "Roads",
            Department::Electricity => "Electricity",
            Department::Water => "Water",
            Department::WardOffice => "Ward Office",
        }
    }

    /// Position of this department in `ALL`, which is also its output column.
    #[inline] pub fn ordinal(&self) -> usize { *self as usize }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Department {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
            .find(|dept| dept.to_str() == s)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("unknown department '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_serde_representation() {
        for dept in Department::ALL {
            let json = serde_json::to_string(&dept).unwrap();
            assert_eq!(json, format!("\"{}\"", dept.to_str()));
        }
    }

    #[test]
    fn from_str_rejects_sentinel() {
        assert_eq!("Ward Office".parse::<Department>().unwrap(), Department::WardOffice);
        assert!(Department::UNKNOWN.parse::<Department>().is_err());
    }
}
