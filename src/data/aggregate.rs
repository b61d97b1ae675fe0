use std::collections::BTreeMap;

use super::model::{LaunchDataset, LaunchRecord};

/// Success and failure shares of one site's launches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuccessFailure {
    pub success: f64,
    pub failure: f64,
}

/// Mean of the 0/1 outcome; `None` for no records.
pub fn mean_outcome<'a>(records: impl IntoIterator<Item = &'a LaunchRecord>) -> Option<f64> {
    let (count, sum) = records
        .into_iter()
        .fold((0usize, 0.0), |(n, s), rec| (n + 1, s + rec.outcome.as_f64()));
    (count > 0).then(|| sum / count as f64)
}

/// Mean outcome per site, keyed (and therefore ordered) by site name.
pub fn success_rate_by_site(dataset: &LaunchDataset) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for rec in dataset.records() {
        let entry = totals.entry(rec.site.as_str()).or_default();
        entry.0 += 1;
        entry.1 += rec.outcome.as_f64();
    }
    totals
        .into_iter()
        .map(|(site, (n, sum))| (site.to_string(), sum / n as f64))
        .collect()
}

/// Success rate `p` of one site's launches and its complement.
///
/// A site without launches has no mean, so the result is `None`; callers
/// render an empty chart for it.
pub fn success_failure_counts(dataset: &LaunchDataset, site: &str) -> Option<SuccessFailure> {
    let p = mean_outcome(dataset.records().iter().filter(|rec| rec.site == site))?;
    Some(SuccessFailure {
        success: p,
        failure: 1.0 - p,
    })
}
