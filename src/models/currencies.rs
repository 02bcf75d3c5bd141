// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A row of the `currencies` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub id: String,
    pub name: String,
    pub current_exchange_rate: f64,
    pub base: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Fields to match a currency on. Supplied fields are OR-ed together.
///
/// With neither field set the lookup is unconstrained and yields whichever
/// row the store returns first, so callers should always set at least one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupCriteria {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl LookupCriteria {
    #[cfg(test)]
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// The id to match on. Empty strings do not count as a criterion.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// The name to match on. Empty strings do not count as a criterion.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.id().is_none() && self.name().is_none()
    }
}
