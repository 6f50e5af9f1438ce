//! Who is on move, as shown in the status line.

use crate::error::ConfigurationError;
use crate::types::Mark;
use std::str::FromStr;

/// The party that holds a mark in Computer mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Owner {
    /// The human at the keyboard.
    Player,
    /// The computer strategy.
    Computer,
}

impl Owner {
    /// Returns the display label for this owner.
    pub fn label(self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Computer => "Computer",
        }
    }
}

/// A mark on move, optionally tagged with its owner.
///
/// Parses the forms the status line uses: `"X"`, `"O (Computer)"`,
/// `"Turn: X (Player)"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnDescriptor {
    /// The mark on move.
    pub mark: Mark,
    /// Who holds it, when stated.
    pub owner: Option<Owner>,
}

impl FromStr for TurnDescriptor {
    type Err = ConfigurationError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let text = text.strip_prefix("Turn:").map(str::trim).unwrap_or(text);

        let (mark_text, owner_text) = match text.split_once('(') {
            Some((mark, rest)) => match rest.trim_end().strip_suffix(')') {
                Some(owner) => (mark.trim(), Some(owner.trim())),
                None => return Err(ConfigurationError::new("turn descriptor", s)),
            },
            None => (text, None),
        };

        let Ok(mark) = mark_text.parse::<Mark>() else {
            return Err(ConfigurationError::new("turn descriptor", s));
        };

        let owner = match owner_text {
            None => None,
            Some(o) if o.eq_ignore_ascii_case(Owner::Player.label()) => Some(Owner::Player),
            Some(o) if o.eq_ignore_ascii_case(Owner::Computer.label()) => Some(Owner::Computer),
            Some(_) => return Err(ConfigurationError::new("turn descriptor", s)),
        };

        Ok(Self { mark, owner })
    }
}

impl std::fmt::Display for TurnDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.owner {
            Some(owner) => write!(f, "{} ({})", self.mark, owner),
            None => write!(f, "{}", self.mark),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_mark() {
        let turn: TurnDescriptor = "O".parse().unwrap();
        assert_eq!(turn.mark, Mark::O);
        assert_eq!(turn.owner, None);
    }

    #[test]
    fn test_mark_with_owner() {
        let turn: TurnDescriptor = "X (computer)".parse().unwrap();
        assert_eq!(turn.mark, Mark::X);
        assert_eq!(turn.owner, Some(Owner::Computer));
    }

    #[test]
    fn test_status_line_form() {
        let turn: TurnDescriptor = "Turn: O (Player)".parse().unwrap();
        assert_eq!(turn, TurnDescriptor { mark: Mark::O, owner: Some(Owner::Player) });
        assert_eq!(turn.to_string(), "O (Player)");
        assert_eq!(Owner::Computer.to_string(), Owner::Computer.label());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("Z".parse::<TurnDescriptor>().is_err());
        assert!("X (Referee)".parse::<TurnDescriptor>().is_err());
        assert!("X (Computer".parse::<TurnDescriptor>().is_err());
        assert!("".parse::<TurnDescriptor>().is_err());
    }
}
