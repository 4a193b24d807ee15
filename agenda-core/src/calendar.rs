//! Calendar records.

use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, AgendaResult};
use crate::event::generate_id;

fn default_checked() -> bool {
    true
}

/// A named calendar with a visibility flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub id: String,
    pub name: String,
    #[serde(default = "default_checked")]
    pub is_checked: bool,
}

impl Calendar {
    /// Build a new, visible calendar with a fresh id.
    pub fn new(name: &str) -> AgendaResult<Self> {
        Ok(Calendar {
            id: generate_id(),
            name: Self::check_name(name)?,
            is_checked: true,
        })
    }

    /// Trimmed `name`, or a validation error when it is blank.
    pub(crate) fn check_name(name: &str) -> AgendaResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AgendaError::Validation("Calendar name is required".into()));
        }
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_calendar_is_checked() {
        let cal = Calendar::new("  Work ").unwrap();
        assert_eq!(cal.name, "Work");
        assert!(cal.is_checked);
        assert!(!cal.id.is_empty());
    }

    #[test]
    fn test_new_calendar_requires_name() {
        assert!(matches!(Calendar::new(""), Err(AgendaError::Validation(_))));
    }

    #[test]
    fn test_missing_flag_defaults_to_checked() {
        let cal: Calendar = serde_json::from_str(r#"{"id":"1","name":"Home"}"#).unwrap();
        assert!(cal.is_checked);
    }
}
