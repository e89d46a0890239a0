//! Edge (pairing) types

use crate::limits::{ValidationError, MAX_STRENGTH, MIN_STRENGTH};
use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// Pairing strength, 1 (suggested) to 4 (holy grail)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Strength(u8);

impl Strength {
    pub const SUGGESTED: Strength = Strength(1);
    pub const RECOMMENDED: Strength = Strength(2);
    pub const HIGHLY_RECOMMENDED: Strength = Strength(3);
    pub const HOLY_GRAIL: Strength = Strength(4);

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(MIN_STRENGTH..=MAX_STRENGTH).contains(&value) {
            return Err(ValidationError::StrengthOutOfRange { value });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "suggested",
            2 => "recommended",
            3 => "highly recommended",
            _ => "holy grail",
        }
    }
}

impl TryFrom<u8> for Strength {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Strength> for u8 {
    fn from(s: Strength) -> Self {
        s.0
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An undirected pairing between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub strength: Strength,

    /// Pairing came from a flavor-affinity group rather than a plain list
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub from_affinity: bool,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, strength: Strength) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            strength,
            from_affinity: false,
        }
    }

    pub fn with_affinity(mut self) -> Self {
        self.from_affinity = true;
        self
    }

    /// Whether this edge joins `a` and `b`, in either order
    pub fn connects(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
    }

    /// The endpoint opposite `id`, if `id` is an endpoint
    pub fn other(&self, id: &NodeId) -> Option<&NodeId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }

    pub fn is_holy_grail(&self) -> bool {
        self.strength == Strength::HOLY_GRAIL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_bounds() {
        assert!(Strength::new(0).is_err());
        assert!(Strength::new(5).is_err());
        assert_eq!(Strength::new(4).unwrap(), Strength::HOLY_GRAIL);
    }

    #[test]
    fn test_edge_is_undirected() {
        let edge = Edge::new("tomato", "basil", Strength::RECOMMENDED);
        let tomato = NodeId::new("tomato");
        let basil = NodeId::new("basil");

        assert!(edge.connects(&tomato, &basil));
        assert!(edge.connects(&basil, &tomato));
        assert_eq!(edge.other(&basil), Some(&tomato));
        assert_eq!(edge.other(&NodeId::new("garlic")), None);
    }

    #[test]
    fn test_strength_rejected_on_deserialize() {
        let json = r#"{"source":"a","target":"b","strength":9}"#;
        assert!(serde_json::from_str::<Edge>(json).is_err());
    }
}
