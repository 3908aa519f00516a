//! Team identity lookup
//!
//! Ranking sources refer to teams by display name. The directory resolves
//! those names to canonical ids using the team identity table plus an alias
//! table for names the ranking site spells differently.

use crate::types::{TeamId, TeamRecord};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    by_name: HashMap<String, TeamId>,
}

impl TeamDirectory {
    /// Build the directory from identity rows and `scraped -> canonical` aliases.
    /// An alias whose canonical name is unknown is ignored.
    pub fn from_records(records: &[TeamRecord], aliases: &BTreeMap<String, String>) -> Self {
        let mut by_name = HashMap::new();

        for record in records {
            by_name.insert(record.name.trim().to_string(), record.id);
            if let Some(short) = &record.short_name {
                by_name.entry(short.trim().to_string()).or_insert(record.id);
            }
        }

        for (scraped, canonical) in aliases {
            match by_name.get(canonical.trim()).copied() {
                Some(id) => {
                    by_name.insert(scraped.trim().to_string(), id);
                }
                None => debug!("Alias target not in team table: {} -> {}", scraped, canonical),
            }
        }

        Self { by_name }
    }

    pub fn lookup(&self, name: &str) -> Option<TeamId> {
        self.by_name.get(name.trim()).copied()
    }

    /// Number of resolvable names, aliases included
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
