//! Reply pipeline: resolve → quote → fallback.
//!
//! Every collaborator failure is absorbed here and turned into reply text,
//! so [`ReplyService::reply_to`] always produces a string.

use tracing::{debug, info};
use tracker_core::agent::ConversationalFallback;
use tracker_core::coins::CoinResolver;
use tracker_core::price::{PriceFetcher, format_price};

/// Canned reply when the conversational agent is unavailable.
pub const CAPABILITY_REPLY: &str = "🤖 I specialize in live cryptocurrency prices and info — try asking about any coin like Bitcoin or Solana!";

/// Reply for a successfully quoted coin.
pub fn price_reply(coin_id: &str, price: f64) -> String {
    format!(
        "💰 The current price of **{}** is **${} USD**",
        coin_id.to_uppercase(),
        format_price(price)
    )
}

/// Reply when a coin resolved but no quote could be fetched.
pub fn unavailable_reply(coin_id: &str) -> String {
    format!(
        "⚠️ I couldn’t fetch the latest price for {coin_id}. Try again later or ask about another coin."
    )
}

/// Drives one message through the resolver, price fetcher and fallback.
#[derive(Clone)]
pub struct ReplyService {
    resolver: CoinResolver,
    prices: PriceFetcher,
    fallback: ConversationalFallback,
}

impl ReplyService {
    pub fn new(
        resolver: CoinResolver,
        prices: PriceFetcher,
        fallback: ConversationalFallback,
    ) -> Self {
        Self {
            resolver,
            prices,
            fallback,
        }
    }

    /// Build the reply text for a user message.
    pub async fn reply_to(&self, text: &str) -> String {
        let text = text.to_lowercase();

        match self.resolver.resolve(&text).await {
            Some(coin_id) => match self.prices.fetch_price(&coin_id).await {
                Some(price) => {
                    info!(coin_id = %coin_id, price, "quoted coin");
                    price_reply(&coin_id, price)
                }
                None => {
                    info!(coin_id = %coin_id, "price unavailable");
                    unavailable_reply(&coin_id)
                }
            },
            None => {
                debug!("no coin resolved, asking conversational agent");
                self.fallback
                    .converse(&text)
                    .await
                    .unwrap_or_else(|| CAPABILITY_REPLY.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_reply_uppercases_and_formats() {
        let reply = price_reply("bitcoin", 65000.0);
        assert_eq!(reply, "💰 The current price of **BITCOIN** is **$65,000 USD**");
    }

    #[test]
    fn price_reply_keeps_hyphenated_ids() {
        let reply = price_reply("the-open-network", 5.4321);
        assert!(reply.contains("THE-OPEN-NETWORK"));
        assert!(reply.contains("$5.432 USD"));
    }

    #[test]
    fn unavailable_reply_names_coin() {
        let reply = unavailable_reply("solana");
        assert!(reply.contains("solana"));
        assert!(reply.contains("Try again later"));
    }
}
