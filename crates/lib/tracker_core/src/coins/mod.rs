//! Coin identification — alias table and resolver.

pub mod alias;
pub mod resolver;

pub use alias::AliasTable;
pub use resolver::CoinResolver;
