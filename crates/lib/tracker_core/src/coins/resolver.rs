//! Free text → coin identifier.
//!
//! Tries the static [`AliasTable`] first and only falls through to the
//! remote [`CoinSearch`] on a miss, so at most one network call is made.

use std::sync::Arc;

use tracing::{debug, warn};

use super::AliasTable;
use crate::market::CoinSearch;

/// Resolves free text into a coin identifier understood by the quote service.
#[derive(Clone)]
pub struct CoinResolver {
    aliases: Arc<AliasTable>,
    search: Arc<dyn CoinSearch>,
}

impl CoinResolver {
    pub fn new(aliases: Arc<AliasTable>, search: Arc<dyn CoinSearch>) -> Self {
        Self { aliases, search }
    }

    /// Returns the coin identifier for `text`, or `None` when neither the
    /// alias table nor the search backend produced one.
    ///
    /// Search failures are logged and treated as "not found".
    pub async fn resolve(&self, text: &str) -> Option<String> {
        if let Some(id) = self.aliases.lookup(text) {
            debug!(coin_id = id, "resolved via alias table");
            return Some(id.to_string());
        }

        match self.search.search(text).await {
            Ok(candidates) => {
                let id = candidates
                    .into_iter()
                    .next()
                    .map(|c| c.id)
                    .filter(|id| !id.is_empty());
                debug!(coin_id = ?id, "resolved via search");
                id
            }
            Err(e) => {
                warn!("coin search failed: {e}");
                None
            }
        }
    }
}
