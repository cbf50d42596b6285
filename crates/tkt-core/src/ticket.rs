//! Ticket data model for tkt
//!
//! Field names on disk stay compatible with the legacy database files
//! ("prioridade"/"descricao").

use serde::{Deserialize, Serialize};

/// Sentinel description used when the stored field is absent
pub const NULL_DESCRIPTION: &str = "NullDescription";

/// Ticket priority
///
/// The store is schema-light: any string is accepted on disk. Unknown
/// strings are preserved verbatim and sort after the known priorities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
    /// Sentinel for an absent priority
    #[default]
    Null,
    /// Unrecognized priority string, kept as written
    Other(String),
}

impl Priority {
    /// Sort rank: high before medium before low, everything else last
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
            Priority::Null | Priority::Other(_) => 4,
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.as_str() {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            "NullPriority" => Priority::Null,
            _ => Priority::Other(s),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::High => "high".to_string(),
            Priority::Medium => "medium".to_string(),
            Priority::Low => "low".to_string(),
            Priority::Null => "NullPriority".to_string(),
            Priority::Other(s) => s,
        }
    }
}

/// Strict parse for user input: only the three real priorities
impl std::str::FromStr for Priority {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(crate::Error::InvalidPriority(s.to_string())),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
            Priority::Null => write!(f, "NullPriority"),
            Priority::Other(s) => write!(f, "{}", s),
        }
    }
}

/// A trouble ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Open (true) or closed (false)
    #[serde(default = "default_status")]
    pub status: bool,

    /// Ticket priority
    #[serde(default, rename = "prioridade")]
    pub priority: Priority,

    /// Free-text description
    #[serde(default = "default_description", rename = "descricao")]
    pub description: String,
}

fn default_status() -> bool {
    true
}

fn default_description() -> String {
    NULL_DESCRIPTION.to_string()
}

impl Ticket {
    /// Create a new open ticket
    pub fn new(description: String, priority: Priority) -> Self {
        Self {
            status: true,
            priority,
            description,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status
    }

    pub fn is_closed(&self) -> bool {
        !self.status
    }

    /// Mark as closed
    pub fn close(&mut self) {
        self.status = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_string_roundtrip() {
        assert_eq!(Priority::from("high".to_string()), Priority::High);
        assert_eq!(Priority::from("NullPriority".to_string()), Priority::Null);
        assert_eq!(
            Priority::from("urgent".to_string()),
            Priority::Other("urgent".to_string())
        );
        assert_eq!(String::from(Priority::Medium), "medium");
        assert_eq!(String::from(Priority::Other("urgent".into())), "urgent");
    }

    #[test]
    fn test_priority_strict_parse_rejects_unknown() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
        assert!("NullPriority".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
        assert!(Priority::Low.rank() < Priority::Null.rank());
        assert_eq!(Priority::Other("urgent".into()).rank(), Priority::Null.rank());
    }

    #[test]
    fn test_ticket_defaults_on_deserialize() {
        let ticket: Ticket = serde_json::from_str("{}").unwrap();
        assert!(ticket.status);
        assert_eq!(ticket.priority, Priority::Null);
        assert_eq!(ticket.description, NULL_DESCRIPTION);
    }

    #[test]
    fn test_ticket_serializes_legacy_field_names() {
        let ticket = Ticket::new("printer broken".to_string(), Priority::High);
        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["status"], true);
        assert_eq!(value["prioridade"], "high");
        assert_eq!(value["descricao"], "printer broken");
    }
}
