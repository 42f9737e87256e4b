/// Data layer: wire model, fetching, and filtering.
///
/// Architecture:
/// ```text
///  GET pictures.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  HTTP + JSON → Vec<ImageRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  ImageRecord, ViewState, category dedup
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selected tab → visible indices
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
