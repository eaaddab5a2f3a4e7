#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// Raffle with public amounts, used for local development
#[openbrush::contract]
pub mod local_raffle {
    use ink::prelude::string::String;
    use openbrush::traits::Storage;
    use raffle_ledger::error::*;
    use raffle_ledger::raffle::{self, *};
    use raffle_ledger::strategy::{self, DrawSeed, EntryContext, EntryStrategy, Winner};
    use raffle_ledger::{EntryIndex, RaffleId};

    /// Event emitted when a raffle is created
    #[ink(event)]
    pub struct RaffleCreated {
        #[ink(topic)]
        raffle_id: RaffleId,
        #[ink(topic)]
        creator: AccountId,
        title: String,
        created_at: Timestamp,
    }

    /// Event emitted when the participation is registered
    #[ink(event)]
    pub struct EntrySubmitted {
        #[ink(topic)]
        raffle_id: RaffleId,
        #[ink(topic)]
        participant: AccountId,
        amount: Balance,
        created_at: Timestamp,
    }

    /// Event emitted when the winner is drawn
    #[ink(event)]
    pub struct RaffleDrawn {
        #[ink(topic)]
        raffle_id: RaffleId,
        #[ink(topic)]
        winner: AccountId,
        /// amount of the winning entry
        total_amount: Balance,
        drawn_at: Timestamp,
    }

    #[derive(Debug, Eq, PartialEq, Clone, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub struct RaffleMeta {
        pub creator: AccountId,
        pub title: String,
        pub description: String,
        pub prize_amount: Balance,
        pub entry_fee: Balance,
        pub max_entries: u32,
        pub expire_at: Timestamp,
        pub current_entries: u32,
        pub is_active: bool,
        pub is_drawn: bool,
        pub winner: Option<AccountId>,
        pub created_at: Timestamp,
    }

    impl From<Raffle> for RaffleMeta {
        fn from(raffle: Raffle) -> Self {
            Self {
                creator: raffle.creator,
                title: raffle.title,
                description: raffle.description,
                prize_amount: raffle.prize_amount,
                entry_fee: raffle.entry_fee,
                max_entries: raffle.max_entries,
                expire_at: raffle.expire_at,
                current_entries: raffle.current_entries,
                is_active: raffle.is_active,
                is_drawn: raffle.is_drawn,
                winner: raffle.winner,
                created_at: raffle.created_at,
            }
        }
    }

    // Contract storage
    #[ink(storage)]
    #[derive(Default, Storage)]
    pub struct Contract {
        #[storage_field]
        ledger: raffle::Data,
    }

    impl RaffleLedger for Contract {}

    /// Amounts are public: the entry fee is the minimum and the highest amount wins
    impl EntryStrategy for Contract {
        type Input = Balance;

        fn admit(
            &mut self,
            _ctx: &EntryContext,
            raffle: &Raffle,
            amount: Balance,
        ) -> Result<EntryAmount, RaffleError> {
            strategy::admit_plain(raffle, amount)
        }

        fn select_winner(
            &self,
            _raffle_id: RaffleId,
            entries: &[Entry],
            _seed: &DrawSeed,
        ) -> Result<Winner, RaffleError> {
            strategy::highest_amount_winner(entries)
        }
    }

    impl Contract {
        #[ink(constructor)]
        pub fn new() -> Self {
            Self::default()
        }

        #[ink(message)]
        pub fn create_raffle(
            &mut self,
            title: String,
            description: String,
            prize_amount: Balance,
            entry_fee: Balance,
            max_entries: u32,
            duration_hours: u64,
        ) -> Result<RaffleId, RaffleError> {
            let creator = self.env().caller();
            let created_at = self.env().block_timestamp();

            let params = RaffleParams {
                title: title.clone(),
                description,
                prize_amount,
                entry_fee,
                max_entries,
                duration_hours,
            };
            let raffle_id = RaffleLedger::create_raffle(self, creator, created_at, params)
                .map_err(|error| {
                    ink::env::debug_println!("Raffle creation rejected: {error:?}");
                    error
                })?;

            self.env().emit_event(RaffleCreated {
                raffle_id,
                creator,
                title,
                created_at,
            });

            Ok(raffle_id)
        }

        /// Enter the raffle with an amount at least equal to the entry fee
        #[ink(message)]
        pub fn enter_raffle(
            &mut self,
            raffle_id: RaffleId,
            amount: Balance,
        ) -> Result<(), RaffleError> {
            let ctx = EntryContext {
                contract: self.env().account_id(),
                participant: self.env().caller(),
                now: self.env().block_timestamp(),
            };

            let entry = RaffleLedger::enter_raffle(self, &ctx, raffle_id, amount).map_err(|error| {
                ink::env::debug_println!("Entry rejected in raffle {raffle_id}: {error:?}");
                error
            })?;

            self.env().emit_event(EntrySubmitted {
                raffle_id,
                participant: entry.participant,
                amount,
                created_at: entry.created_at,
            });

            Ok(())
        }

        #[ink(message)]
        pub fn draw_winner(&mut self, raffle_id: RaffleId) -> Result<(), RaffleError> {
            let caller = self.env().caller();
            let seed = DrawSeed {
                timestamp: self.env().block_timestamp(),
                entropy: self.env().block_number(),
            };

            let winner = RaffleLedger::draw_winner(self, caller, &seed, raffle_id).map_err(|error| {
                ink::env::debug_println!("Draw rejected for raffle {raffle_id}: {error:?}");
                error
            })?;
            let total_amount = winner.amount.ok_or(RaffleError::UnexpectedAmountForm)?;

            let winner = winner.participant;
            ink::env::debug_println!("Raffle {raffle_id} drawn, winner: {winner:?}");
            self.env().emit_event(RaffleDrawn {
                raffle_id,
                winner,
                total_amount,
                drawn_at: seed.timestamp,
            });

            Ok(())
        }

        #[ink(message)]
        pub fn get_raffle_count(&self) -> RaffleId {
            RaffleLedger::get_raffle_count(self)
        }

        #[ink(message)]
        pub fn get_raffle_meta(&self, raffle_id: RaffleId) -> Result<RaffleMeta, RaffleError> {
            RaffleLedger::ensure_raffle(self, raffle_id).map(RaffleMeta::from)
        }

        #[ink(message)]
        pub fn get_prize_amount(&self, raffle_id: RaffleId) -> Result<Balance, RaffleError> {
            RaffleLedger::get_prize_amount(self, raffle_id)
        }

        #[ink(message)]
        pub fn get_entry_fee(&self, raffle_id: RaffleId) -> Result<Balance, RaffleError> {
            RaffleLedger::get_entry_fee(self, raffle_id)
        }

        #[ink(message)]
        pub fn get_entry_count(&self, raffle_id: RaffleId) -> Result<u32, RaffleError> {
            RaffleLedger::get_entry_count(self, raffle_id)
        }

        #[ink(message)]
        pub fn get_entry(
            &self,
            raffle_id: RaffleId,
            entry_index: EntryIndex,
        ) -> Result<(Balance, AccountId, Timestamp), RaffleError> {
            let entry = RaffleLedger::get_entry(self, raffle_id, entry_index)?;
            let amount = entry.amount.plain().ok_or(RaffleError::UnexpectedAmountForm)?;
            Ok((amount, entry.participant, entry.created_at))
        }

        #[ink(message)]
        pub fn has_entered(
            &self,
            raffle_id: RaffleId,
            participant: AccountId,
        ) -> Result<bool, RaffleError> {
            RaffleLedger::has_entered(self, raffle_id, participant)
        }

        #[ink(message)]
        pub fn get_status(&self, raffle_id: RaffleId) -> Result<RaffleStatus, RaffleError> {
            let now = self.env().block_timestamp();
            RaffleLedger::get_status(self, raffle_id, now)
        }
    }

}
