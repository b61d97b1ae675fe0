use std::fmt;

use super::model::{LaunchDataset, LaunchRecord, PayloadRange};

// ---------------------------------------------------------------------------
// Site selector
// ---------------------------------------------------------------------------

/// Value of the site dropdown: every site, or exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Control state: the two user inputs
// ---------------------------------------------------------------------------

/// Site selection plus payload range.
///
/// The range is only mutated through the setters, which clamp into the
/// dataset's observed bounds and keep `lower <= upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    site: SiteSelection,
    range: PayloadRange,
    bounds: PayloadRange,
    /// Slider granularity in kg; `0` disables snapping.
    step: f64,
}

impl ControlState {
    /// Defaults: all sites, full observed range.
    pub fn new(bounds: PayloadRange, step: f64) -> Self {
        Self {
            site: SiteSelection::All,
            range: bounds,
            bounds,
            step: if step.is_finite() && step > 0.0 { step } else { 0.0 },
        }
    }

    pub fn for_dataset(dataset: &LaunchDataset, step: f64) -> Self {
        Self::new(dataset.payload_bounds(), step)
    }

    pub fn site(&self) -> &SiteSelection {
        &self.site
    }

    pub fn range(&self) -> PayloadRange {
        self.range
    }

    pub fn bounds(&self) -> PayloadRange {
        self.bounds
    }

    /// Returns whether the selection changed.
    pub fn select_site(&mut self, site: SiteSelection) -> bool {
        if self.site == site {
            return false;
        }
        self.site = site;
        true
    }

    /// Move the lower bound, never past the upper one.
    pub fn set_lower(&mut self, value: f64) -> bool {
        let lower = self.snap(value).min(self.range.upper);
        if lower == self.range.lower {
            return false;
        }
        self.range.lower = lower;
        true
    }

    /// Move the upper bound, never below the lower one.
    pub fn set_upper(&mut self, value: f64) -> bool {
        let upper = self.snap(value).max(self.range.lower);
        if upper == self.range.upper {
            return false;
        }
        self.range.upper = upper;
        true
    }

    pub fn reset(&mut self) {
        self.site = SiteSelection::All;
        self.range = self.bounds;
    }

    /// Clamp into bounds and round to the nearest step counted from the
    /// minimum. The maximum itself is always reachable.
    fn snap(&self, value: f64) -> f64 {
        let PayloadRange { lower: min, upper: max } = self.bounds;
        if value.is_nan() {
            return min;
        }
        let clamped = value.clamp(min, max);
        if self.step == 0.0 || clamped == max {
            return clamped;
        }
        let stepped = min + ((clamped - min) / self.step).round() * self.step;
        stepped.min(max)
    }
}

// ---------------------------------------------------------------------------
// Row filter
// ---------------------------------------------------------------------------

/// Records with payload inside `range` (inclusive) and, unless `site` is
/// [`SiteSelection::All`], launched from the selected site. Dataset order is kept.
pub fn filter_by_payload_and_site<'a>(
    dataset: &'a LaunchDataset,
    range: PayloadRange,
    site: &SiteSelection,
) -> Vec<&'a LaunchRecord> {
    dataset
        .records()
        .iter()
        .filter(|rec| range.contains(rec.payload_mass) && site.matches(&rec.site))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    fn controls() -> ControlState {
        ControlState::new(PayloadRange::new(0.0, 9600.0), 1000.0)
    }

    #[test]
    fn test_full_range_returns_full_dataset() {
        let ds = sample_dataset();
        let rows = filter_by_payload_and_site(&ds, ds.payload_bounds(), &SiteSelection::All);
        assert_eq!(rows.len(), ds.len());
        assert!(rows.iter().zip(ds.records()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_site_and_narrow_range_is_subset_of_site_only() {
        let ds = sample_dataset();
        let site = SiteSelection::Site("KSC LC-39A".to_string());

        let site_only = filter_by_payload_and_site(&ds, ds.payload_bounds(), &site);
        let narrowed = filter_by_payload_and_site(&ds, PayloadRange::new(2000.0, 6000.0), &site);

        assert_eq!(site_only.len(), 3);
        assert_eq!(narrowed.len(), 2);
        assert!(narrowed.len() <= site_only.len());
        assert!(narrowed.iter().all(|r| site_only.contains(r)));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let ds = sample_dataset();
        let rows = filter_by_payload_and_site(&ds, PayloadRange::new(2500.0, 3000.0), &SiteSelection::All);
        let payloads: Vec<f64> = rows.iter().map(|r| r.payload_mass).collect();
        assert_eq!(payloads, vec![2500.0, 3000.0]);
    }

    #[test]
    fn test_unknown_site_yields_no_rows() {
        let ds = sample_dataset();
        let site = SiteSelection::Site("Boca Chica".to_string());
        assert!(filter_by_payload_and_site(&ds, ds.payload_bounds(), &site).is_empty());
    }

    #[test]
    fn test_all_sites_up_to_ten_tonnes() {
        let ds = sample_dataset();
        let rows = filter_by_payload_and_site(&ds, PayloadRange::new(0.0, 10000.0), &SiteSelection::All);
        let expected = ds.records().iter().filter(|r| r.payload_mass <= 10000.0).count();
        assert_eq!(rows.len(), expected);
    }

    #[test]
    fn test_controls_default_to_all_and_full_range() {
        let c = controls();
        assert_eq!(c.site(), &SiteSelection::All);
        assert_eq!(c.range(), c.bounds());
    }

    #[test]
    fn test_setters_clamp_into_bounds() {
        let mut c = controls();
        assert!(!c.set_lower(-500.0));
        assert!(!c.set_upper(20000.0));
        assert_eq!(c.range(), PayloadRange::new(0.0, 9600.0));

        assert!(c.set_upper(4200.0));
        assert_eq!(c.range().upper, 4000.0);
    }

    #[test]
    fn test_lower_never_exceeds_upper() {
        let mut c = controls();
        c.set_upper(3000.0);
        c.set_lower(8000.0);
        assert_eq!(c.range(), PayloadRange::new(3000.0, 3000.0));

        c.set_upper(1000.0);
        assert_eq!(c.range().upper, 3000.0);
        assert!(c.range().lower <= c.range().upper);
    }

    #[test]
    fn test_snapping_keeps_max_reachable() {
        let mut c = controls();
        c.set_upper(5000.0);
        assert!(c.set_upper(9550.0));
        assert_eq!(c.range().upper, 9600.0);

        let mut c = ControlState::new(PayloadRange::new(350.0, 9600.0), 1000.0);
        c.set_lower(1800.0);
        assert_eq!(c.range().lower, 1350.0);
    }

    #[test]
    fn test_zero_step_disables_snapping() {
        let mut c = ControlState::new(PayloadRange::new(0.0, 9600.0), 0.0);
        c.set_lower(1234.5);
        assert_eq!(c.range().lower, 1234.5);
    }

    #[test]
    fn test_select_site_and_reset() {
        let mut c = controls();
        let site = SiteSelection::Site("KSC LC-39A".to_string());
        assert!(c.select_site(site.clone()));
        assert!(!c.select_site(site));
        c.set_lower(2000.0);

        c.reset();
        assert_eq!(c, controls());
    }

    #[test]
    fn test_site_selection_display() {
        assert_eq!(SiteSelection::All.to_string(), "All Sites");
        assert_eq!(SiteSelection::Site("KSC LC-39A".into()).to_string(), "KSC LC-39A");
    }
}
