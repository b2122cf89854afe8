//! Core of textdiff: named text variants organised into groups, compared
//! token-by-token against a base.
//!
//! The model layer ([`store`], [`group`], [`text_set`]) is synchronous and
//! owns no I/O. [`compare`] memoises alignments for the presentation layer.
//! [`db`] persists whole-store snapshots to SQLite.

pub mod compare;
pub mod db;
pub mod diff;
pub mod error;
pub mod group;
pub mod schema;
pub mod snapshot;
pub mod store;
pub mod text_set;
pub mod tokenize;
pub mod types;

pub use compare::{CandidateDiff, Comparison, DiffCache, DiffOptions};
pub use diff::{diff, render_inline, DiffSummary};
pub use error::{Error, Result};
pub use group::DiffGroup;
pub use snapshot::Snapshot;
pub use store::GroupStore;
pub use tokenize::tokenize;
pub use types::{DiffSegment, GroupId, SegmentKind, Source, TextSet, TextSetId};
