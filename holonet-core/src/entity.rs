//! Static per-entity-type configuration
//!
//! Each catalog entity type maps a local path segment to an upstream
//! resource and carries the table of filterable fields with their match
//! mode. The exact/contains split per entity is inherited upstream-facing
//! behavior and is deliberately a per-entity knob rather than a unified
//! policy.

use crate::filter::{FieldFilter, FilterSet, MatchMode};
use serde::{Deserialize, Serialize};

/// The catalog entity types the gateway re-exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Characters,
    Films,
    Starships,
    Planets,
}

impl Entity {
    /// All entity types, in route registration order.
    pub const ALL: [Entity; 4] = [
        Entity::Characters,
        Entity::Films,
        Entity::Starships,
        Entity::Planets,
    ];

    /// The upstream resource name for this entity.
    pub fn resource(&self) -> &'static str {
        match self {
            Entity::Characters => "people",
            Entity::Films => "films",
            Entity::Starships => "starships",
            Entity::Planets => "planets",
        }
    }

    /// The local URL path segment for this entity.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Entity::Characters => "characters",
            Entity::Films => "films",
            Entity::Starships => "starships",
            Entity::Planets => "planets",
        }
    }

    /// The filterable fields for this entity and their match mode.
    pub fn filter_fields(&self) -> &'static [(&'static str, MatchMode)] {
        match self {
            Entity::Characters => &[
                ("name", MatchMode::Exact),
                ("gender", MatchMode::Exact),
                ("birth_year", MatchMode::Exact),
            ],
            Entity::Films => &[
                ("title", MatchMode::Exact),
                ("director", MatchMode::Exact),
                ("producer", MatchMode::Exact),
                ("release_date", MatchMode::Exact),
            ],
            Entity::Starships => &[
                ("name", MatchMode::Contains),
                ("model", MatchMode::Contains),
                ("manufacturer", MatchMode::Contains),
                ("starship_class", MatchMode::Contains),
                ("hyperdrive_rating", MatchMode::Contains),
                ("crew", MatchMode::Contains),
            ],
            Entity::Planets => &[
                ("name", MatchMode::Contains),
                ("climate", MatchMode::Contains),
                ("terrain", MatchMode::Contains),
                ("population", MatchMode::Contains),
                ("diameter", MatchMode::Contains),
            ],
        }
    }

    /// Build a filter set from request query parameters.
    ///
    /// Only keys present in this entity's field table become filters; other
    /// keys (page, limit, search, typos) are ignored.
    pub fn filter_set<'a, I>(&self, query: I) -> FilterSet
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let table = self.filter_fields();
        let filters = query
            .into_iter()
            .filter_map(|(key, value)| {
                table
                    .iter()
                    .find(|(field, _)| *field == key)
                    .map(|(field, mode)| FieldFilter::new(*field, value, *mode))
            })
            .collect();
        FilterSet::new(filters)
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl std::str::FromStr for Entity {
    type Err = ();

    /// Parse a local path segment.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Entity::ALL
            .into_iter()
            .find(|e| e.path_segment() == s)
            .ok_or(())
    }
}
