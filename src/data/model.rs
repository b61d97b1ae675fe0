use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Fixed schema
// ---------------------------------------------------------------------------

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";
pub const OUTCOME_COLUMN: &str = "class";

// ---------------------------------------------------------------------------
// Data-format errors
// ---------------------------------------------------------------------------

/// The table does not match the fixed launch-record schema.
///
/// `row` is 1-based and counts data rows only; a CSV header is not counted.
#[derive(Debug, thiserror::Error)]
pub enum DataFormatError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("data row {row}: column '{column}' is empty")]
    EmptyValue { row: usize, column: &'static str },

    #[error("data row {row}: column '{column}' has non-numeric value '{value}'")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("data row {row}: column '{column}' must be text, got '{value}'")]
    InvalidText {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("data row {row}: outcome must be 0 or 1, got '{value}'")]
    InvalidOutcome { row: usize, value: String },

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType {
        column: &'static str,
        data_type: String,
    },

    #[error("dataset contains no launch records")]
    EmptyDataset,
}

// ---------------------------------------------------------------------------
// Outcome – the 0/1 `class` column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Decode the numeric encoding used by the dataset (0 = failure, 1 = success).
    pub fn from_f64(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Outcome::Failure)
        } else if value == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Outcome::Failure => 0.0,
            Outcome::Success => 1.0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure => write!(f, "Failure"),
            Outcome::Success => write!(f, "Success"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    /// Payload mass in kg.
    pub payload_mass: f64,
    pub booster_category: String,
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// PayloadRange – inclusive numeric bounds on payload mass
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub lower: f64,
    pub upper: f64,
}

impl PayloadRange {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, payload: f64) -> bool {
        payload >= self.lower && payload <= self.upper
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} – {:.0} kg", self.lower, self.upper)
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed indices for the controls.
/// Never mutated after construction.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct sites, most launches first (ties by name).
    sites: Vec<String>,
    /// Sorted distinct booster categories.
    booster_categories: Vec<String>,
    payload_bounds: PayloadRange,
}

impl LaunchDataset {
    /// Build the dataset and its indices. An empty table has no payload
    /// bounds, so it is rejected here.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DataFormatError> {
        if records.is_empty() {
            return Err(DataFormatError::EmptyDataset);
        }

        let mut site_counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut boosters: BTreeSet<&str> = BTreeSet::new();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for rec in &records {
            *site_counts.entry(rec.site.as_str()).or_default() += 1;
            boosters.insert(rec.booster_category.as_str());
            min = min.min(rec.payload_mass);
            max = max.max(rec.payload_mass);
        }

        let mut by_count: Vec<(&str, usize)> = site_counts.into_iter().collect();
        // BTreeMap iteration is already name-ordered, so a stable sort keeps ties by name.
        by_count.sort_by(|a, b| b.1.cmp(&a.1));
        let sites = by_count.into_iter().map(|(s, _)| s.to_string()).collect();
        let booster_categories = boosters.into_iter().map(str::to_string).collect();

        Ok(LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds: PayloadRange::new(min, max),
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// Observed `[min, max]` of the payload column.
    pub fn payload_bounds(&self) -> PayloadRange {
        self.payload_bounds
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(site: &str, payload: f64, booster: &str, success: bool) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass: payload,
            booster_category: booster.to_string(),
            outcome: if success { Outcome::Success } else { Outcome::Failure },
        }
    }

    /// Small table with uneven site counts: KSC 3, CCAFS 2, VAFB 1.
    pub(crate) fn sample_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("CCAFS LC-40", 0.0, "v1.0", false),
            record("CCAFS LC-40", 2500.0, "v1.1", true),
            record("KSC LC-39A", 3000.0, "FT", true),
            record("KSC LC-39A", 5300.0, "FT", true),
            record("KSC LC-39A", 9600.0, "B4", false),
            record("VAFB SLC-4E", 9600.0, "FT", true),
        ])
        .unwrap()
    }

    #[test]
    fn test_sites_ordered_by_launch_count() {
        let ds = sample_dataset();
        assert_eq!(ds.sites(), ["KSC LC-39A", "CCAFS LC-40", "VAFB SLC-4E"]);
    }

    #[test]
    fn test_site_count_ties_break_by_name() {
        let ds = LaunchDataset::from_records(vec![
            record("b", 1.0, "FT", true),
            record("a", 2.0, "FT", true),
        ])
        .unwrap();
        assert_eq!(ds.sites(), ["a", "b"]);
    }

    #[test]
    fn test_payload_bounds_and_boosters() {
        let ds = sample_dataset();
        assert_eq!(ds.payload_bounds(), PayloadRange::new(0.0, 9600.0));
        assert_eq!(ds.booster_categories(), ["B4", "FT", "v1.0", "v1.1"]);
        assert_eq!(ds.len(), 6);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let err = LaunchDataset::from_records(Vec::new()).unwrap_err();
        assert!(matches!(err, DataFormatError::EmptyDataset));
    }

    #[test]
    fn test_outcome_decoding() {
        assert_eq!(Outcome::from_f64(0.0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_f64(1.0), Some(Outcome::Success));
        assert_eq!(Outcome::from_f64(0.5), None);
        assert_eq!(Outcome::Success.as_f64(), 1.0);
    }

    #[test]
    fn test_payload_range_is_inclusive() {
        let range = PayloadRange::new(1000.0, 2000.0);
        assert!(range.contains(1000.0));
        assert!(range.contains(2000.0));
        assert!(!range.contains(2000.5));
        assert!(!range.contains(999.0));
    }
}
