/// Data layer: core types, loading, and the derived views.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  existence check, parse file → EvDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │   EvDataset   │  Vec<Vehicle>, immutable
///   └──────────────┘
///        │
///        ▼
///   ┌──────────────────────┐
///   │ metrics + aggregate   │  totals, means, grouped counts, pairs
///   └──────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  summary  │  everything the report shows
///   └──────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod summary;
