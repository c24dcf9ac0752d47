// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cursor pagination primitives.
//!
//! Lists are paged by row identifier in descending order. A cursor is the
//! standard base64 encoding of the decimal identifier of a row; a page
//! requested `after` a cursor contains only rows with a strictly smaller
//! identifier.

use crate::application::HackathonApplication;
use crate::error::DomainError;
use crate::types::{Event, Sponsor, User};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Serialize, Serializer};

/// Opaque position in a paged list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    /// Encodes a row identifier.
    #[must_use]
    pub fn encode(id: i64) -> Self {
        Self(BASE64.encode(id.to_string()))
    }

    /// Decodes a cursor string back into a row identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCursor` if the value is not base64, is not
    /// UTF-8 once decoded, or does not hold an integer.
    pub fn decode(value: &str) -> Result<i64, DomainError> {
        let invalid = || DomainError::InvalidCursor(value.to_string());
        let bytes = BASE64.decode(value).map_err(|_| invalid())?;
        let text = String::from_utf8(bytes).map_err(|_| invalid())?;
        text.parse::<i64>().map_err(|_| invalid())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Cursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A validated request for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    first: i64,
    after: Option<i64>,
}

impl PageRequest {
    /// Builds a request from raw `first`/`after` arguments.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPageSize` if `first` is below one and
    /// `DomainError::InvalidCursor` if `after` cannot be decoded.
    pub fn new(first: i64, after: Option<&str>) -> Result<Self, DomainError> {
        if first < 1 {
            return Err(DomainError::InvalidPageSize(first));
        }
        let after = after.map(Cursor::decode).transpose()?;
        Ok(Self { first, after })
    }

    /// Number of rows requested.
    #[must_use]
    pub const fn first(&self) -> i64 {
        self.first
    }

    /// Identifier the page must start below, if any.
    #[must_use]
    pub const fn after(&self) -> Option<i64> {
        self.after
    }

    /// Rows to fetch so that the presence of a further page can be detected.
    #[must_use]
    pub const fn probe_limit(&self) -> i64 {
        self.first.saturating_add(1)
    }
}

/// Anything listed through the pagination engine exposes the identifier it
/// is ordered by.
pub trait PageKey {
    fn page_key(&self) -> i64;
}

impl PageKey for Event {
    fn page_key(&self) -> i64 {
        self.id
    }
}

impl PageKey for Sponsor {
    fn page_key(&self) -> i64 {
        self.id
    }
}

impl PageKey for User {
    fn page_key(&self) -> i64 {
        self.id
    }
}

impl PageKey for HackathonApplication {
    fn page_key(&self) -> i64 {
        self.id.user_id
    }
}

/// Page boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageInfo {
    /// The page holds no items, so it has no boundaries.
    Empty,
    Range {
        start_cursor: Cursor,
        end_cursor: Cursor,
        has_next_page: bool,
    },
}

impl PageInfo {
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Range { has_next_page, .. } => *has_next_page,
        }
    }

    #[must_use]
    pub const fn end_cursor(&self) -> Option<&Cursor> {
        match self {
            Self::Empty => None,
            Self::Range { end_cursor, .. } => Some(end_cursor),
        }
    }
}

/// One page of a relation together with the relation's total size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page_info: PageInfo,
}

impl<T: PageKey> Connection<T> {
    /// Assembles a connection from an already truncated page.
    #[must_use]
    pub fn from_page(items: Vec<T>, total_count: i64, has_next_page: bool) -> Self {
        let page_info = match (items.first(), items.last()) {
            (Some(first), Some(last)) => PageInfo::Range {
                start_cursor: Cursor::encode(first.page_key()),
                end_cursor: Cursor::encode(last.page_key()),
                has_next_page,
            },
            _ => PageInfo::Empty,
        };

        Self {
            items,
            total_count,
            page_info,
        }
    }
}
