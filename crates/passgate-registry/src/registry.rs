//! The registry interface the coordinator mints through.

use serde::{Deserialize, Serialize};

use passgate_core::{Identity, TokenId};

use crate::error::RegistryError;

/// Where token numbering starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenNumbering {
    /// The first token is `1`.
    #[default]
    OneBased,
    /// The first token is `0`.
    ZeroBased,
}

impl TokenNumbering {
    /// The id of the first token minted.
    pub fn first(&self) -> TokenId {
        match self {
            Self::OneBased => TokenId(1),
            Self::ZeroBased => TokenId(0),
        }
    }

    /// The id of the token at 0-based mint position `position`.
    pub fn id_at(&self, position: u64) -> Option<TokenId> {
        self.first().value().checked_add(position).map(TokenId)
    }

    /// The 0-based mint position of `id`, if `id` is in range.
    pub fn position_of(&self, id: TokenId) -> Option<u64> {
        id.value().checked_sub(self.first().value())
    }
}

/// A token changing hands. Mints have no `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    /// Previous owner, `None` for a mint.
    pub from: Option<Identity>,
    /// New owner.
    pub to: Identity,
    /// The token.
    pub token_id: TokenId,
}

/// Ownership, metadata location, and enumeration for issued tokens.
pub trait TokenRegistry: Send {
    /// Mint the next sequential token to `to`.
    fn mint_next(&mut self, to: Identity) -> Result<TokenId, RegistryError>;

    /// The id the next mint will assign.
    fn next_token_id(&self) -> Result<TokenId, RegistryError>;

    /// Owner of `id`.
    fn owner_of(&self, id: TokenId) -> Result<Identity, RegistryError>;

    /// Metadata location: base URI followed by the decimal id, unpadded.
    fn token_uri(&self, id: TokenId) -> Result<String, RegistryError> {
        self.owner_of(id)?;
        Ok(format!("{}{}", self.base_uri(), id))
    }

    /// The metadata prefix.
    fn base_uri(&self) -> &str;

    /// Replace the metadata prefix.
    fn set_base_uri(&mut self, uri: String);

    /// Tokens minted.
    fn total_supply(&self) -> u64;

    /// The `index`-th token in mint order.
    fn token_by_index(&self, index: u64) -> Result<TokenId, RegistryError>;

    /// The `index`-th token held by `owner`, in mint order.
    fn token_of_owner_by_index(&self, owner: &Identity, index: u64) -> Result<TokenId, RegistryError>;

    /// Tokens held by `owner`.
    fn balance_of(&self, owner: &Identity) -> u64;

    /// Every transfer recorded, mints included, in order.
    fn transfers(&self) -> &[TransferEvent];
}
