use crate::error::{RaffleError, RaffleError::*};
use crate::raffle::Entry;
use crate::strategy::DrawSeed;
use crate::{AccountId, Balance, RaffleId};
use ink::env::hash::{HashOutput, Keccak256};

/// Return the participant with the strictly highest amount.
/// With the same amount, the earliest entry wins.
pub fn highest_amount(entries: &[Entry]) -> Result<Option<(AccountId, Balance)>, RaffleError> {
    let mut best: Option<(AccountId, Balance)> = None;
    for entry in entries {
        let amount = entry.amount.plain().ok_or(UnexpectedAmountForm)?;
        match best {
            Some((_, best_amount)) if amount <= best_amount => {}
            _ => best = Some((entry.participant, amount)),
        }
    }
    Ok(best)
}

/// keccak256 of the block timestamp, the block entropy and the raffle id,
/// each one left-padded to 32 bytes (big endian).
pub fn seed_hash(seed: &DrawSeed, raffle_id: RaffleId) -> [u8; 32] {
    let mut salt = [0u8; 96];
    salt[24..32].copy_from_slice(&seed.timestamp.to_be_bytes());
    salt[60..64].copy_from_slice(&seed.entropy.to_be_bytes());
    salt[92..96].copy_from_slice(&raffle_id.to_be_bytes());

    let mut hash = <Keccak256 as HashOutput>::Type::default();
    ink::env::hash_bytes::<Keccak256>(&salt, &mut hash);
    hash
}

/// Index of the winning entry: the seed hash, read as a 256 bits big endian number,
/// modulo the number of entries.
///
/// Whoever produces the block chooses the timestamp and the entropy,
/// so this selection can be influenced. It must not guard anything valuable.
pub fn pseudo_random_index(
    seed: &DrawSeed,
    raffle_id: RaffleId,
    nb_entries: usize,
) -> Result<usize, RaffleError> {
    if nb_entries == 0 {
        return Err(NoEntries);
    }
    let modulus = nb_entries as u128;
    let hash = seed_hash(seed, raffle_id);

    // acc < modulus <= u64::MAX, so acc * 256 + 255 fits in u128
    let index = hash
        .iter()
        .fold(0u128, |acc, byte| (acc * 256 + *byte as u128) % modulus);

    Ok(index as usize)
}
