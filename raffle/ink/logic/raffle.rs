use crate::error::{RaffleError, RaffleError::*, ValidationError};
use crate::strategy::{DrawSeed, EntryContext, EntryStrategy, Winner};
use crate::{Balance, EntryIndex, Handle, RaffleId, Timestamp};
use ink::prelude::{string::String, vec::Vec};
use ink::storage::Mapping;
use openbrush::traits::{AccountId, Storage};

pub const MIN_MAX_ENTRIES: u32 = 2;
pub const MILLIS_PER_HOUR: Timestamp = 3_600_000;

#[derive(Debug, Eq, PartialEq, Clone, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Raffle {
    pub creator: AccountId,
    pub title: String,
    pub description: String,
    pub prize_amount: Balance,
    pub entry_fee: Balance,
    pub max_entries: u32,
    pub current_entries: u32,
    pub expire_at: Timestamp,
    pub is_active: bool,
    pub is_drawn: bool,
    pub winner: Option<AccountId>,
    pub created_at: Timestamp,
}

/// Parameters given by the creator of a raffle
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct RaffleParams {
    pub title: String,
    pub description: String,
    pub prize_amount: Balance,
    pub entry_fee: Balance,
    pub max_entries: u32,
    pub duration_hours: u64,
}

impl RaffleParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_entries < MIN_MAX_ENTRIES {
            return Err(ValidationError::MaxEntriesTooLow);
        }
        if self.duration_hours == 0 {
            return Err(ValidationError::DurationTooShort);
        }
        if self.prize_amount == 0 {
            return Err(ValidationError::PrizeAmountZero);
        }
        if self.entry_fee == 0 {
            return Err(ValidationError::EntryFeeZero);
        }
        Ok(())
    }
}

/// Amount submitted with an entry, in the form chosen by the deployment
#[derive(Debug, Eq, PartialEq, Copy, Clone, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub enum EntryAmount {
    Plain(Balance),
    Encrypted(Handle),
}

impl EntryAmount {
    pub fn plain(&self) -> Option<Balance> {
        match self {
            EntryAmount::Plain(amount) => Some(*amount),
            EntryAmount::Encrypted(_) => None,
        }
    }

    pub fn handle(&self) -> Option<Handle> {
        match self {
            EntryAmount::Encrypted(handle) => Some(*handle),
            EntryAmount::Plain(_) => None,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Entry {
    pub amount: EntryAmount,
    pub participant: AccountId,
    pub created_at: Timestamp,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum RaffleStatus {
    Active,
    ExpiredAwaitingDraw,
    Drawn,
}

impl Raffle {
    /// status of the raffle at the given time
    pub fn status(&self, now: Timestamp) -> RaffleStatus {
        if self.is_drawn {
            RaffleStatus::Drawn
        } else if now < self.expire_at {
            RaffleStatus::Active
        } else {
            RaffleStatus::ExpiredAwaitingDraw
        }
    }
}

#[derive(Default, Debug)]
#[openbrush::storage_item]
pub struct Data {
    raffle_count: RaffleId,
    raffles: Mapping<RaffleId, Raffle>,
    entries: Mapping<(RaffleId, EntryIndex), Entry>,
    members: Mapping<(RaffleId, AccountId), ()>,
}

/// Raffles are stored by id (dense, starting at 0), entries by (raffle id, position)
/// and the membership set by (raffle id, participant).
/// The entry list and the membership set are always written together.
#[openbrush::trait_definition]
pub trait RaffleLedger: Storage<Data> + EntryStrategy {
    /// Create a new raffle and return its id
    fn create_raffle(
        &mut self,
        creator: AccountId,
        now: Timestamp,
        params: RaffleParams,
    ) -> Result<RaffleId, RaffleError> {
        params.validate()?;

        let expire_at = params
            .duration_hours
            .checked_mul(MILLIS_PER_HOUR)
            .and_then(|duration| now.checked_add(duration))
            .ok_or(AddOverFlow)?;

        let raffle_id = self.data::<Data>().raffle_count;
        let next_raffle_id = raffle_id.checked_add(1).ok_or(AddOverFlow)?;

        let raffle = Raffle {
            creator,
            title: params.title,
            description: params.description,
            prize_amount: params.prize_amount,
            entry_fee: params.entry_fee,
            max_entries: params.max_entries,
            current_entries: 0,
            expire_at,
            is_active: true,
            is_drawn: false,
            winner: None,
            created_at: now,
        };

        self.data::<Data>().raffles.insert(raffle_id, &raffle);
        self.data::<Data>().raffle_count = next_raffle_id;

        Ok(raffle_id)
    }

    /// Register the participation of `ctx.participant`.
    /// The strategy is only called when the raffle accepts the participant.
    fn enter_raffle(
        &mut self,
        ctx: &EntryContext,
        raffle_id: RaffleId,
        input: Self::Input,
    ) -> Result<Entry, RaffleError> {
        let mut raffle = self.ensure_raffle(raffle_id)?;

        if !raffle.is_active {
            return Err(NotActive);
        }
        if ctx.now >= raffle.expire_at {
            return Err(Expired);
        }
        if raffle.current_entries >= raffle.max_entries {
            return Err(Full);
        }
        if self
            .data::<Data>()
            .members
            .contains((raffle_id, ctx.participant))
        {
            return Err(DuplicateEntry);
        }

        let entry_index = raffle.current_entries;
        let nb_entries = entry_index.checked_add(1).ok_or(AddOverFlow)?;

        let amount = self.admit(ctx, &raffle, input)?;

        let entry = Entry {
            amount,
            participant: ctx.participant,
            created_at: ctx.now,
        };
        raffle.current_entries = nb_entries;

        self.data::<Data>()
            .entries
            .insert((raffle_id, entry_index), &entry);
        self.data::<Data>()
            .members
            .insert((raffle_id, ctx.participant), &());
        self.data::<Data>().raffles.insert(raffle_id, &raffle);

        Ok(entry)
    }

    /// Select and save the winner. Only the creator can draw, once, after the expiration.
    fn draw_winner(
        &mut self,
        caller: AccountId,
        seed: &DrawSeed,
        raffle_id: RaffleId,
    ) -> Result<Winner, RaffleError> {
        let mut raffle = self.ensure_raffle(raffle_id)?;

        if raffle.creator != caller {
            return Err(Unauthorized);
        }
        if raffle.is_drawn {
            return Err(AlreadyDrawn);
        }
        if !raffle.is_active {
            return Err(NotActive);
        }
        if seed.timestamp < raffle.expire_at {
            return Err(NotExpired);
        }
        if raffle.current_entries == 0 {
            return Err(NoEntries);
        }

        let entries = self.load_entries(raffle_id, raffle.current_entries)?;
        let winner = self.select_winner(raffle_id, &entries, seed)?;

        raffle.winner = Some(winner.participant);
        raffle.is_drawn = true;
        raffle.is_active = false;
        self.data::<Data>().raffles.insert(raffle_id, &raffle);

        Ok(winner)
    }

    fn load_entries(
        &self,
        raffle_id: RaffleId,
        nb_entries: u32,
    ) -> Result<Vec<Entry>, RaffleError> {
        let mut entries = Vec::new();
        for entry_index in 0..nb_entries {
            let entry = self
                .data::<Data>()
                .entries
                .get((raffle_id, entry_index))
                .ok_or(InvalidIndex)?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// return the raffle and throw an error if the id is unknown
    fn ensure_raffle(&self, raffle_id: RaffleId) -> Result<Raffle, RaffleError> {
        if raffle_id >= self.data::<Data>().raffle_count {
            return Err(InvalidId);
        }
        self.data::<Data>().raffles.get(raffle_id).ok_or(InvalidId)
    }

    fn get_raffle_count(&self) -> RaffleId {
        self.data::<Data>().raffle_count
    }

    fn get_prize_amount(&self, raffle_id: RaffleId) -> Result<Balance, RaffleError> {
        Ok(self.ensure_raffle(raffle_id)?.prize_amount)
    }

    fn get_entry_fee(&self, raffle_id: RaffleId) -> Result<Balance, RaffleError> {
        Ok(self.ensure_raffle(raffle_id)?.entry_fee)
    }

    fn get_entry_count(&self, raffle_id: RaffleId) -> Result<u32, RaffleError> {
        Ok(self.ensure_raffle(raffle_id)?.current_entries)
    }

    fn get_entry(
        &self,
        raffle_id: RaffleId,
        entry_index: EntryIndex,
    ) -> Result<Entry, RaffleError> {
        let raffle = self.ensure_raffle(raffle_id)?;
        if entry_index >= raffle.current_entries {
            return Err(InvalidIndex);
        }
        self.data::<Data>()
            .entries
            .get((raffle_id, entry_index))
            .ok_or(InvalidIndex)
    }

    fn has_entered(
        &self,
        raffle_id: RaffleId,
        participant: AccountId,
    ) -> Result<bool, RaffleError> {
        self.ensure_raffle(raffle_id)?;
        Ok(self.data::<Data>().members.contains((raffle_id, participant)))
    }

    fn get_status(
        &self,
        raffle_id: RaffleId,
        now: Timestamp,
    ) -> Result<RaffleStatus, RaffleError> {
        Ok(self.ensure_raffle(raffle_id)?.status(now))
    }
}
