//! # postnorm
//!
//! Normalizes heterogeneous, deeply nested platform API records into flat,
//! schema-stable output records suitable for persistence or export.
//!
//! The engine tolerates missing, partial, and malformed nested structures
//! without ever raising: every lookup degrades to an explicit default, so a
//! single malformed item can never poison a batch. The only error a caller
//! sees is an unsupported dispatch tag.
//!
//! ```no_run
//! use postnorm::{ContentKind, Extractor, MemoryRecorder, UserParams};
//! use chrono::NaiveDate;
//!
//! let items: Vec<serde_json::Value> = serde_json::from_str("[]").unwrap();
//! let extractor = Extractor::new("%Y-%m-%d %H:%M:%S");
//! let mut recorder = MemoryRecorder::default();
//! let params = UserParams {
//!     nickname: "casey".into(),
//!     mark: String::new(),
//!     earliest: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
//!     latest: NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
//!     post: true,
//! };
//! let records = extractor
//!     .run(ContentKind::UserTimeline, &items, &mut recorder, &params)
//!     .unwrap();
//! ```

pub mod clean;
pub mod config;
pub mod extract;
pub mod recorder;
pub mod tree;

pub use clean::TextCleaner;
pub use config::Config;
pub use extract::{
    ContentKind, ExtractError, Extractor, FieldValue, OutputRecord, Shape, UserParams,
};
pub use recorder::{JsonlRecorder, MemoryRecorder, Recorder, DEFAULT_FIELD_KEYS};
pub use tree::Node;
