/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset (fails fast on schema errors)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site order, payload bounds
///   └───────────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌───────────┐
///   │  filter   │          │ aggregate │  per-site success means
///   └──────────┘          └───────────┘
///   site + payload range
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
