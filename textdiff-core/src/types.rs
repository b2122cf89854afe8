use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a text set. UUID v4 text for anything created locally;
/// imported snapshots keep whatever identifiers they carried.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextSetId(String);

/// Identifier of a diff group. Same representation as [`TextSetId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(TextSetId);
string_id!(GroupId);

/// Where a text set's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Typed or pasted by the user.
    #[default]
    Manual,
    /// Produced by a speech-to-text provider. Older exports spell this `"audio"`.
    #[serde(alias = "audio")]
    Transcribed,
}

impl Source {
    pub fn label(self) -> &'static str {
        match self {
            Source::Manual => "manual",
            Source::Transcribed => "transcribed",
        }
    }
}

/// One named text variant.
///
/// `content` is fixed at construction; a changed text is a new `TextSet`.
/// Only `name` can be edited, and only through the owning group.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSet {
    id: TextSetId,
    name: String,
    content: Arc<str>,
    source: Source,
    created_at: DateTime<Utc>,
}

impl TextSet {
    /// Creates a text set with a fresh id and the current time.
    ///
    /// This is also the hand-off point for transcription results: the caller
    /// that talked to the provider passes `Source::Transcribed`.
    pub fn new(name: impl Into<String>, content: impl Into<Arc<str>>, source: Source) -> Self {
        Self {
            id: TextSetId::generate(),
            name: name.into(),
            content: content.into(),
            source,
            created_at: Utc::now(),
        }
    }

    /// Rebuilds a text set from stored fields (snapshot restore).
    pub(crate) fn from_parts(
        id: TextSetId,
        name: String,
        content: String,
        source: Source,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self { id, name, content: content.into(), source, created_at }
    }

    pub fn id(&self) -> &TextSetId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Shared handle to the content, used as a memo key without copying the text.
    pub fn content_handle(&self) -> Arc<str> {
        Arc::clone(&self.content)
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// Classification of one token in a diff result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Present in both base and candidate.
    Equal,
    /// Present only in the candidate.
    Insert,
    /// Present only in the base.
    Delete,
}

/// One classified token of a diff result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub token: String,
}

impl DiffSegment {
    pub fn equal(token: impl Into<String>) -> Self {
        Self { kind: SegmentKind::Equal, token: token.into() }
    }

    pub fn insert(token: impl Into<String>) -> Self {
        Self { kind: SegmentKind::Insert, token: token.into() }
    }

    pub fn delete(token: impl Into<String>) -> Self {
        Self { kind: SegmentKind::Delete, token: token.into() }
    }
}
