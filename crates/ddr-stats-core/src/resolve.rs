//! Player identifier resolution
//!
//! Users name a player either by account id or by display name. A token made
//! only of ASCII digits is tried as an id first and falls back to a name
//! lookup; anything else is looked up by name only.
//!
//! Because of that order, a player whose display name is all digits cannot
//! be reached by name while another player holds that number as their id.

use crate::error::{Error, Result};
use crate::store::{Player, RecordStore};

/// How a user-supplied identifier is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// All-digit token; tried as an account id, then as a name
    Numeric { id: i64, raw: &'a str },
    /// Anything else; looked up by exact name
    Name(&'a str),
}

impl<'a> Token<'a> {
    /// Classify a raw identifier
    pub fn parse(raw: &'a str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            // Too many digits for an id: can only ever be a name
            if let Ok(id) = raw.parse::<i64>() {
                return Token::Numeric { id, raw };
            }
        }
        Token::Name(raw)
    }

    /// The token as typed
    pub fn raw(&self) -> &'a str {
        match self {
            Token::Numeric { raw, .. } => raw,
            Token::Name(raw) => raw,
        }
    }
}

/// Resolves identifiers to players against a record store
pub struct EntityResolver<S> {
    store: S,
}

impl<S: RecordStore> EntityResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolve an identifier to a player.
    ///
    /// Fails with [`Error::NoMatch`] when neither lookup finds anyone.
    pub fn resolve(&self, raw: &str) -> Result<Player> {
        let token = Token::parse(raw);

        if let Token::Numeric { id, .. } = token {
            if let Some(player) = self.store.find_player_by_id(id)? {
                tracing::debug!(token = raw, id = player.id, "Resolved by id");
                return Ok(player);
            }
        }

        match self.store.find_player_by_name(token.raw())? {
            Some(player) => {
                tracing::debug!(token = raw, id = player.id, "Resolved by name");
                Ok(player)
            }
            None => Err(Error::NoMatch(raw.to_string())),
        }
    }
}
