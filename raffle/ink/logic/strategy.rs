use crate::draw;
use crate::error::{RaffleError, RaffleError::*};
use crate::raffle::{Entry, EntryAmount, Raffle};
use crate::{Balance, BlockNumber, RaffleId, Timestamp};
use openbrush::traits::AccountId;

/// Who enters, in which contract and when
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct EntryContext {
    pub contract: AccountId,
    pub participant: AccountId,
    pub now: Timestamp,
}

/// Block data used when the winner is drawn
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct DrawSeed {
    pub timestamp: Timestamp,
    pub entropy: BlockNumber,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct Winner {
    pub participant: AccountId,
    /// winning amount, only known when the amounts are public
    pub amount: Option<Balance>,
}

/// How an entry amount is accepted and stored, and how the winner is selected.
/// Implemented by the contract, a deployment keeps one strategy for its whole lifetime.
pub trait EntryStrategy {
    type Input;

    /// Check the submitted input and return the form to store.
    /// Called once the raffle accepts the participant.
    fn admit(
        &mut self,
        ctx: &EntryContext,
        raffle: &Raffle,
        input: Self::Input,
    ) -> Result<EntryAmount, RaffleError>;

    /// Select the winner among the entries (in submission order)
    fn select_winner(
        &self,
        raffle_id: RaffleId,
        entries: &[Entry],
        seed: &DrawSeed,
    ) -> Result<Winner, RaffleError>;
}

/// Public amount: the entry fee is the minimum
pub fn admit_plain(raffle: &Raffle, amount: Balance) -> Result<EntryAmount, RaffleError> {
    if amount < raffle.entry_fee {
        return Err(BelowMinimum);
    }
    Ok(EntryAmount::Plain(amount))
}

/// Public amounts: the highest amount wins
pub fn highest_amount_winner(entries: &[Entry]) -> Result<Winner, RaffleError> {
    let (participant, amount) = draw::highest_amount(entries)?.ok_or(NoEntries)?;
    Ok(Winner {
        participant,
        amount: Some(amount),
    })
}

/// Encrypted amounts: the winner is picked from the block data
pub fn random_winner(
    raffle_id: RaffleId,
    entries: &[Entry],
    seed: &DrawSeed,
) -> Result<Winner, RaffleError> {
    let index = draw::pseudo_random_index(seed, raffle_id, entries.len())?;
    let entry = entries.get(index).ok_or(InvalidIndex)?;
    Ok(Winner {
        participant: entry.participant,
        amount: None,
    })
}
