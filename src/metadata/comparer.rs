//! Identity used to de-duplicate action definitions.

use super::definitions::ActionDefinition;

/// Two actions are the same when their full names and descriptions match,
/// whatever their capability flags say.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullNameAndDescription;

impl FullNameAndDescription {
    pub fn equals(&self, x: &ActionDefinition, y: &ActionDefinition) -> bool {
        x.full_name == y.full_name && x.description == y.description
    }

    pub fn key<'a>(&self, action: &'a ActionDefinition) -> (&'a str, &'a str) {
        (&action.full_name, &action.description)
    }

    /// Keeps the first occurrence of each identity, in input order.
    pub fn distinct(&self, actions: impl IntoIterator<Item = ActionDefinition>) -> Vec<ActionDefinition> {
        let mut distinct: Vec<ActionDefinition> = Vec::new();
        for action in actions {
            if !distinct.iter().any(|seen| self.equals(seen, &action)) {
                distinct.push(action);
            }
        }
        distinct
    }
}
