/// Data layer: typed manifest records and loading.
///
/// Architecture:
/// ```text
///  titanic.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Manifest
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Manifest  │  Vec<Passenger>, observed-value indexes
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ analysis  │  group / aggregate → result tables
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
