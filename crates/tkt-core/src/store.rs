//! JSON record store for tkt tickets
//!
//! One flat JSON file, fully loaded into memory on open and fully
//! rewritten on every mutation. No SQLite, no daemon - just a file.
//!
//! The legacy file layout is kept: a single top-level object holding the
//! `id_numbers` counter plus one entry per ticket under its decimal id.
//! In memory the counter and the tickets are separate fields, so the
//! reserved keys only exist at the file boundary.

use crate::{Result, Ticket};
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Reserved key holding the highest id ever assigned
const ID_COUNTER_KEY: &str = "id_numbers";
/// Reserved by the legacy format; never written, skipped on load
const STATS_KEY: &str = "estatisticas";

/// How the store came up on open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Existing file read successfully
    Loaded,
    /// No file existed; a fresh one was written
    Initialized,
    /// File was unreadable or malformed; running on an empty in-memory
    /// state. The file on disk stays as-is until the next mutation.
    Recovered,
}

/// File-backed ticket store
///
/// Not safe to share across processes; the last writer wins. Callers in
/// concurrent environments must serialize access externally.
pub struct Store {
    path: PathBuf,
    last_id: u64,
    pub(crate) tickets: IndexMap<u64, Ticket>,
    outcome: LoadOutcome,
}

impl Store {
    /// Open the store at `path`, creating the file if it does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                fs::create_dir_all(parent)?;
            }
            let store = Self {
                path,
                last_id: 0,
                tickets: IndexMap::new(),
                outcome: LoadOutcome::Initialized,
            };
            store.save()?;
            return Ok(store);
        }

        // Corrupt or unreadable files are recovered as an empty store in
        // memory. The file itself is only replaced once a mutation writes.
        match Self::load(&path) {
            Ok((last_id, tickets)) => Ok(Self {
                path,
                last_id,
                tickets,
                outcome: LoadOutcome::Loaded,
            }),
            Err(_) => Ok(Self {
                path,
                last_id: 0,
                tickets: IndexMap::new(),
                outcome: LoadOutcome::Recovered,
            }),
        }
    }

    /// Parse the whole file, keeping ticket order as written
    fn load(path: &Path) -> Result<(u64, IndexMap<u64, Ticket>)> {
        let content = fs::read_to_string(path)?;
        let root: IndexMap<String, Value> = serde_json::from_str(&content)?;

        let mut last_id = 0;
        let mut tickets = IndexMap::new();
        for (key, value) in root {
            if key == ID_COUNTER_KEY {
                last_id = value.as_u64().unwrap_or(0);
            } else if key == STATS_KEY {
                continue;
            } else if let Ok(id) = key.parse::<u64>() {
                tickets.insert(id, serde_json::from_value(value)?);
            }
        }
        Ok((last_id, tickets))
    }

    /// Rewrite the whole store file, via temp file + rename so a failed
    /// write never truncates the previous contents
    fn save(&self) -> Result<()> {
        let mut root: IndexMap<String, Value> =
            IndexMap::with_capacity(self.tickets.len() + 1);
        root.insert(ID_COUNTER_KEY.to_string(), Value::from(self.last_id));
        for (id, ticket) in &self.tickets {
            root.insert(id.to_string(), serde_json::to_value(ticket)?);
        }

        let content = serde_json::to_string_pretty(&root)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// How the last open went
    pub fn load_outcome(&self) -> LoadOutcome {
        self.outcome
    }

    /// Path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a ticket, assign the next id, persist. Ids are never reused,
    /// even after tickets are removed.
    pub fn create(&mut self, ticket: Ticket) -> Result<u64> {
        let id = self.last_id + 1;
        self.tickets.insert(id, ticket);
        self.last_id = id;
        self.save()?;
        Ok(id)
    }

    /// Close a ticket. Returns `Ok(false)` for an unknown id, leaving both
    /// the store and the file untouched. Closing an already-closed ticket
    /// succeeds silently.
    pub fn close(&mut self, id: u64) -> Result<bool> {
        match self.tickets.get_mut(&id) {
            Some(ticket) => {
                ticket.close();
                self.save()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Get a ticket by id
    pub fn get(&self, id: u64) -> Option<&Ticket> {
        self.tickets.get(&id)
    }

    /// All ticket ids in creation order
    pub fn ids(&self) -> Vec<u64> {
        self.tickets.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Remove every closed ticket. The id counter is not reset, so removed
    /// ids are never handed out again.
    pub fn clean_finished(&mut self) -> Result<()> {
        self.tickets.retain(|_, ticket| ticket.status);
        self.save()
    }

    /// Discard all tickets and reset the id counter to zero. Irreversible;
    /// confirmation is the caller's job.
    pub fn reset(&mut self) -> Result<()> {
        self.tickets.clear();
        self.last_id = 0;
        self.save()
    }
}
