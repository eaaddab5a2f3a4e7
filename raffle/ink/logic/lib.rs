#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub type RaffleId = u32;
pub type EntryIndex = u32;
pub type Balance = u128;
pub type Timestamp = u64;
pub type BlockNumber = u32;
/// Reference to a ciphertext held by the confidential value engine
pub type Handle = [u8; 32];
/// Ethereum style address of an attestation signer
pub type EthAddress = [u8; 20];

pub use openbrush::traits::AccountId;

pub mod confidential;
pub mod draw;
pub mod error;
pub mod raffle;
pub mod strategy;

#[cfg(test)]
mod test_contract;
