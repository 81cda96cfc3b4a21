use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub mod error;
pub mod position;

pub use error::DataError;
pub use position::PosValue;

/// Identifier of an entity. Ids come from the data document and must be
/// unique within it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A positioned, labeled node of the map.
///
/// `x`/`y` are CSS-like position descriptors (`"50%"`, `"120px"`, bare
/// numbers). Missing positions are backfilled by the loader before rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<PosValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<PosValue>,
}

/// A directed, tagged relation between two entities.
///
/// Relations whose `from`/`to` do not resolve to a rendered entity are
/// skipped at scene build time, not treated as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    pub from: EntityId,
    pub to: EntityId,
    pub tag: String,
    pub label: String,
}

impl Relation {
    /// Unordered pair key: the two endpoint ids in sorted order. Relations
    /// over the same pair share a key regardless of direction.
    pub fn pair_key(&self) -> (&EntityId, &EntityId) {
        if self.from <= self.to {
            (&self.from, &self.to)
        } else {
            (&self.to, &self.from)
        }
    }
}

/// The whole data document handed to the renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphData {
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
}

impl GraphData {
    /// Reject duplicate entity ids. Dangling relation endpoints are fine
    /// here; they are filtered out at render time instead.
    pub fn validate(&self) -> Result<(), DataError> {
        let mut seen = HashSet::new();
        for entity in &self.entities {
            if !seen.insert(&entity.id) {
                return Err(DataError::DuplicateEntity(entity.id.clone()));
            }
        }
        Ok(())
    }

    /// Distinct relation tags in first-appearance order.
    pub fn tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.relations
            .iter()
            .map(|r| r.tag.as_str())
            .filter(|t| !t.is_empty() && seen.insert(*t))
            .collect()
    }
}
