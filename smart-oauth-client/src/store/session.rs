use crate::types::TokenSet;
use serde::{Deserialize, Serialize};
use smart_common::store::{memory::MemoryStore, Store};

/// Everything the client keeps for one user session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// `state` of the authorization request that has not been answered yet.
    pub pending_state: Option<String>,
    pub token_set: Option<TokenSet>,
}

/// Per-user session storage, keyed by the host's session identifier.
pub trait SessionStore: Store<String, Session> {}

pub type MemorySessionStore = MemoryStore<String, Session>;

impl SessionStore for MemorySessionStore {}
