/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .xlsx / delimited text (bytes + file name)
///        │
///        ▼
///   ┌──────────┐    ┌───────────┐
///   │  cache    │ →  │  loader    │  dispatch by extension → RawRow
///   └──────────┘    └───────────┘
///                         │
///                         ▼
///                  ┌────────────┐
///                  │ normalize   │  parse dates, fill defaults, drop bad rows
///                  └────────────┘
///                         │
///                         ▼
///                  ┌──────────────┐
///                  │CanonicalTable│  Vec<ArticleRecord>, stable row ids
///                  └──────────────┘
///                         │
///                         ▼
///                  ┌──────────┐
///                  │  filter   │  range → selected date → theme → sort
///                  └──────────┘
/// ```

pub mod cache;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
