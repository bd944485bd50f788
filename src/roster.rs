use serde::{Deserialize, Serialize};

use crate::error::SplitError;
use crate::schemas::MemberName;

/// Ordered list of trip members. Names are compared as-is, case included.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Roster(Vec<MemberName>);

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trimmed name, refusing blanks and duplicates.
    pub fn add_member(&mut self, name: &str) -> Result<&MemberName, SplitError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SplitError::InvalidMember(name.to_string()));
        }
        if self.contains(name) {
            return Err(SplitError::ExistingMember(name.to_string()));
        }
        self.0.push(name.to_string());
        tracing::debug!(member = name, size = self.0.len(), "member added");
        Ok(&self.0[self.0.len() - 1])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|member| member == name)
    }

    /// Errors with [`SplitError::UnknownMember`] unless `name` is on the roster.
    pub fn require(&self, name: &str) -> Result<(), SplitError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(SplitError::UnknownMember(name.to_string()))
        }
    }

    pub fn members(&self) -> &[MemberName] {
        &self.0
    }
}

impl FromIterator<MemberName> for Roster {
    /// Collects names, silently skipping blanks and repeats.
    fn from_iter<I: IntoIterator<Item = MemberName>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for name in iter {
            let _ = roster.add_member(&name);
        }
        roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_member_trims() {
        let mut roster = Roster::new();
        roster.add_member("  Ming ").unwrap();

        assert_eq!(roster.members(), &["Ming".to_string()]);
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut roster = Roster::new();
        roster.add_member("Ming").unwrap();

        assert_eq!(
            roster.add_member("Ming"),
            Err(SplitError::ExistingMember("Ming".to_string()))
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut roster = Roster::new();
        roster.add_member("ming").unwrap();
        roster.add_member("Ming").unwrap();

        assert_eq!(roster.members().len(), 2);
        assert!(roster.require("MING").is_err());
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(matches!(
            Roster::new().add_member("   "),
            Err(SplitError::InvalidMember(_))
        ));
    }

    #[test]
    fn collect_drops_repeats() {
        let roster: Roster = ["A", "B", "A", " "].iter().map(|n| n.to_string()).collect();

        assert_eq!(roster.members(), &["A".to_string(), "B".to_string()]);
    }
}
