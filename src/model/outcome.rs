use std::fmt;

/// A named outcome slot inside an action's `connections` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Execute,
    Yes,
    No,
    Loop,
    ForEach,
    Complete,
}

impl Outcome {
    /// Every slot, in the order they are inspected.
    pub const ALL: [Outcome; 6] = [
        Outcome::Execute,
        Outcome::Yes,
        Outcome::No,
        Outcome::Loop,
        Outcome::ForEach,
        Outcome::Complete,
    ];

    /// The JSON key of this slot.
    pub fn key(self) -> &'static str {
        match self {
            Outcome::Execute => "execute",
            Outcome::Yes => "yes",
            Outcome::No => "no",
            Outcome::Loop => "loop",
            Outcome::ForEach => "forEach",
            Outcome::Complete => "complete",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
