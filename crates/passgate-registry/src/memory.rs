//! # In-Memory Registry
//!
//! Ownership is stored in mint order, so a token's position in `owners` is
//! its global enumeration index and its id is `first + position`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use passgate_core::{Identity, TokenId};

use crate::error::RegistryError;
use crate::registry::{TokenNumbering, TokenRegistry, TransferEvent};

/// A registry held entirely in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InMemoryRegistry {
    numbering: TokenNumbering,
    base_uri: String,
    owners: Vec<Identity>,
    holdings: HashMap<Identity, Vec<TokenId>>,
    transfers: Vec<TransferEvent>,
}

impl InMemoryRegistry {
    /// An empty registry.
    pub fn new(numbering: TokenNumbering, base_uri: impl Into<String>) -> Self {
        Self {
            numbering,
            base_uri: base_uri.into(),
            owners: Vec::new(),
            holdings: HashMap::new(),
            transfers: Vec::new(),
        }
    }

    /// The numbering convention.
    pub fn numbering(&self) -> TokenNumbering {
        self.numbering
    }
}

impl TokenRegistry for InMemoryRegistry {
    fn mint_next(&mut self, to: Identity) -> Result<TokenId, RegistryError> {
        let token_id = self.next_token_id()?;
        self.owners.push(to);
        self.holdings.entry(to).or_default().push(token_id);
        self.transfers.push(TransferEvent {
            from: None,
            to,
            token_id,
        });
        Ok(token_id)
    }

    fn next_token_id(&self) -> Result<TokenId, RegistryError> {
        self.numbering
            .id_at(self.owners.len() as u64)
            .ok_or(RegistryError::IdSpaceExhausted)
    }

    fn owner_of(&self, id: TokenId) -> Result<Identity, RegistryError> {
        self.numbering
            .position_of(id)
            .and_then(|p| usize::try_from(p).ok())
            .and_then(|p| self.owners.get(p))
            .copied()
            .ok_or(RegistryError::NonexistentToken(id))
    }

    fn base_uri(&self) -> &str {
        &self.base_uri
    }

    fn set_base_uri(&mut self, uri: String) {
        self.base_uri = uri;
    }

    fn total_supply(&self) -> u64 {
        self.owners.len() as u64
    }

    fn token_by_index(&self, index: u64) -> Result<TokenId, RegistryError> {
        let total = self.total_supply();
        if index >= total {
            return Err(RegistryError::IndexOutOfBounds { index, total });
        }
        self.numbering
            .id_at(index)
            .ok_or(RegistryError::IndexOutOfBounds { index, total })
    }

    fn token_of_owner_by_index(&self, owner: &Identity, index: u64) -> Result<TokenId, RegistryError> {
        let held = self.holdings.get(owner).map(Vec::as_slice).unwrap_or_default();
        usize::try_from(index)
            .ok()
            .and_then(|i| held.get(i))
            .copied()
            .ok_or(RegistryError::OwnerIndexOutOfBounds {
                owner: *owner,
                index,
                balance: held.len() as u64,
            })
    }

    fn balance_of(&self, owner: &Identity) -> u64 {
        self.holdings.get(owner).map_or(0, |h| h.len() as u64)
    }

    fn transfers(&self) -> &[TransferEvent] {
        &self.transfers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> Identity {
        Identity::from_index(n)
    }

    #[test]
    fn test_one_based_sequence_and_uri() {
        let mut reg = InMemoryRegistry::new(TokenNumbering::OneBased, "ipfs://drop/");
        assert_eq!(reg.next_token_id(), Ok(TokenId(1)));
        assert_eq!(reg.mint_next(id(1)), Ok(TokenId(1)));
        assert_eq!(reg.mint_next(id(2)), Ok(TokenId(2)));
        assert_eq!(reg.token_uri(TokenId(1)).unwrap(), "ipfs://drop/1");
        assert_eq!(reg.owner_of(TokenId(2)), Ok(id(2)));
        assert_eq!(reg.total_supply(), 2);
    }

    #[test]
    fn test_zero_based_sequence() {
        let mut reg = InMemoryRegistry::new(TokenNumbering::ZeroBased, "https://meta/");
        assert_eq!(reg.mint_next(id(5)), Ok(TokenId(0)));
        assert_eq!(reg.token_uri(TokenId(0)).unwrap(), "https://meta/0");
        assert_eq!(reg.token_by_index(0), Ok(TokenId(0)));
    }

    #[test]
    fn test_nonexistent_token() {
        let mut reg = InMemoryRegistry::new(TokenNumbering::OneBased, "");
        reg.mint_next(id(1)).unwrap();
        assert_eq!(reg.owner_of(TokenId(0)), Err(RegistryError::NonexistentToken(TokenId(0))));
        assert_eq!(reg.owner_of(TokenId(2)), Err(RegistryError::NonexistentToken(TokenId(2))));
        assert!(reg.token_uri(TokenId(2)).is_err());
    }

    #[test]
    fn test_enumeration_follows_mint_order() {
        let mut reg = InMemoryRegistry::new(TokenNumbering::OneBased, "");
        for n in [30, 10, 20] {
            reg.mint_next(id(n)).unwrap();
        }
        assert_eq!(reg.token_by_index(0), Ok(TokenId(1)));
        assert_eq!(reg.token_by_index(2), Ok(TokenId(3)));
        assert_eq!(
            reg.token_by_index(3),
            Err(RegistryError::IndexOutOfBounds { index: 3, total: 3 })
        );
        assert_eq!(reg.token_of_owner_by_index(&id(10), 0), Ok(TokenId(2)));
        assert_eq!(reg.balance_of(&id(20)), 1);
        assert_eq!(reg.balance_of(&id(99)), 0);
        assert_eq!(
            reg.token_of_owner_by_index(&id(99), 0),
            Err(RegistryError::OwnerIndexOutOfBounds {
                owner: id(99),
                index: 0,
                balance: 0
            })
        );
    }

    #[test]
    fn test_mints_are_recorded_as_transfers() {
        let mut reg = InMemoryRegistry::new(TokenNumbering::OneBased, "");
        reg.mint_next(id(4)).unwrap();
        assert_eq!(
            reg.transfers(),
            &[TransferEvent {
                from: None,
                to: id(4),
                token_id: TokenId(1)
            }]
        );
        let json = serde_json::to_value(reg.transfers()[0]).unwrap();
        assert_eq!(json["from"], serde_json::Value::Null);
        assert_eq!(json["token_id"], 1);
    }

    #[test]
    fn test_set_base_uri_applies_to_existing_tokens() {
        let mut reg = InMemoryRegistry::new(TokenNumbering::OneBased, "old/");
        reg.mint_next(id(1)).unwrap();
        reg.set_base_uri("new/".to_string());
        assert_eq!(reg.token_uri(TokenId(1)).unwrap(), "new/1");
    }
}
