//! Interaction — one turn of a conversation.
//!
//! The store treats the text content as opaque; it neither validates nor
//! interprets what the user or the model said.

use serde::{Deserialize, Serialize};

/// A stored conversation turn. Ids are store-assigned and monotonic, so
/// ascending id order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
  pub interaction_id: i64,
  pub user_input:     String,
  pub llm_output:     String,
}

/// Input to [`append_interaction`](crate::store::SessionStore::append_interaction)
/// and [`amend_last_interaction`](crate::store::SessionStore::amend_last_interaction).
/// The id is always minted by the store; it is not accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInteraction {
  pub user_input: String,
  pub llm_output: String,
}

impl NewInteraction {
  pub fn new(user_input: impl Into<String>, llm_output: impl Into<String>) -> Self {
    Self {
      user_input: user_input.into(),
      llm_output: llm_output.into(),
    }
  }
}
