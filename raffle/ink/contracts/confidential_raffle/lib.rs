#![cfg_attr(not(feature = "std"), no_std, no_main)]

#[openbrush::implementation(Ownable)]
#[openbrush::contract]
pub mod confidential_raffle {
    use ink::prelude::{string::String, vec::Vec};
    use openbrush::contracts::ownable::*;
    use openbrush::traits::Storage;
    use raffle_ledger::confidential::{self, ConfidentialEngine, EncryptedInput};
    use raffle_ledger::error::*;
    use raffle_ledger::raffle::{
        self, Entry, EntryAmount, Raffle, RaffleLedger, RaffleParams, RaffleStatus,
    };
    use raffle_ledger::strategy::{self, DrawSeed, EntryContext, EntryStrategy, Winner};
    use raffle_ledger::{EntryIndex, EthAddress, Handle, RaffleId};

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

    /// Event emitted when the participation is registered.
    /// The amount is not disclosed.
    #[ink(event)]
    pub struct EntrySubmitted {
        #[ink(topic)]
        raffle_id: RaffleId,
        #[ink(topic)]
        participant: AccountId,
        created_at: Timestamp,
    }

    /// Event emitted when the winner is drawn
    #[ink(event)]
    pub struct RaffleDrawn {
        #[ink(topic)]
        raffle_id: RaffleId,
        #[ink(topic)]
        winner: AccountId,
        drawn_at: Timestamp,
    }

    /// Event emitted when the input verifier is updated
    #[ink(event)]
    pub struct InputVerifierUpdated {
        input_verifier: EthAddress,
    }

    /// Errors occurred in the contract
    #[derive(Debug, Eq, PartialEq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum ContractError {
        OwnableError(OwnableError),
        RaffleError(RaffleError),
    }

    /// convertor from OwnableError to ContractError
    impl From<OwnableError> for ContractError {
        fn from(error: OwnableError) -> Self {
            ContractError::OwnableError(error)
        }
    }

    /// convertor from RaffleError to ContractError
    impl From<RaffleError> for ContractError {
        fn from(error: RaffleError) -> Self {
            ink::env::debug_println!("Raffle error: {error:?}");
            ContractError::RaffleError(error)
        }
    }

    // Contract storage
    #[ink(storage)]
    #[derive(Default, Storage)]
    pub struct Contract {
        #[storage_field]
        ownable: ownable::Data,
        #[storage_field]
        ledger: raffle::Data,
        #[storage_field]
        engine: confidential::Data,
    }

    impl RaffleLedger for Contract {}
    impl ConfidentialEngine for Contract {}

    /// Amounts are encrypted: the input is attested and the winner is picked from the block data
    impl EntryStrategy for Contract {
        type Input = EncryptedInput;

        fn admit(
            &mut self,
            ctx: &EntryContext,
            _raffle: &Raffle,
            input: EncryptedInput,
        ) -> Result<EntryAmount, RaffleError> {
            ConfidentialEngine::admit_input(self, ctx, &input)
        }

        fn select_winner(
            &self,
            raffle_id: RaffleId,
            entries: &[Entry],
            seed: &DrawSeed,
        ) -> Result<Winner, RaffleError> {
            strategy::random_winner(raffle_id, entries, seed)
        }
    }

    impl Contract {
        /// `input_verifier` is the address of the key attesting the encrypted inputs
        #[ink(constructor)]
        pub fn new(input_verifier: EthAddress) -> Self {
            let mut instance = Self::default();
            let caller = instance.env().caller();
            // set the owner of this contract
            ownable::Internal::_init_with_owner(&mut instance, caller);
            ConfidentialEngine::set_input_verifier(&mut instance, input_verifier);
            instance
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
        ) -> Result<RaffleId, ContractError> {
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
            let raffle_id = RaffleLedger::create_raffle(self, creator, created_at, params)?;

            ink::env::debug_println!("Raffle {raffle_id} created by {creator:?}");
            self.env().emit_event(RaffleCreated {
                raffle_id,
                creator,
                title,
                created_at,
            });

            Ok(raffle_id)
        }

        /// Enter the raffle with an encrypted amount.
        /// `input_proof` is the attestation of the input verifier for this contract and the caller.
        #[ink(message)]
        pub fn enter_raffle(
            &mut self,
            raffle_id: RaffleId,
            encrypted_amount: Handle,
            input_proof: Vec<u8>,
        ) -> Result<(), ContractError> {
            let ctx = EntryContext {
                contract: self.env().account_id(),
                participant: self.env().caller(),
                now: self.env().block_timestamp(),
            };
            let input = EncryptedInput {
                handle: encrypted_amount,
                proof: input_proof,
            };

            let entry = RaffleLedger::enter_raffle(self, &ctx, raffle_id, input)?;

            let participant = entry.participant;
            ink::env::debug_println!("Entry registered in raffle {raffle_id} for {participant:?}");
            self.env().emit_event(EntrySubmitted {
                raffle_id,
                participant,
                created_at: entry.created_at,
            });

            Ok(())
        }

        #[ink(message)]
        pub fn draw_winner(&mut self, raffle_id: RaffleId) -> Result<(), ContractError> {
            let caller = self.env().caller();
            let seed = DrawSeed {
                timestamp: self.env().block_timestamp(),
                entropy: self.env().block_number(),
            };

            let winner = RaffleLedger::draw_winner(self, caller, &seed, raffle_id)?.participant;

            ink::env::debug_println!("Raffle {raffle_id} drawn, winner: {winner:?}");
            self.env().emit_event(RaffleDrawn {
                raffle_id,
                winner,
                drawn_at: seed.timestamp,
            });

            Ok(())
        }

        #[ink(message)]
        pub fn get_raffle_count(&self) -> RaffleId {
            RaffleLedger::get_raffle_count(self)
        }

        #[ink(message)]
        pub fn get_raffle_meta(&self, raffle_id: RaffleId) -> Result<Raffle, ContractError> {
            Ok(RaffleLedger::ensure_raffle(self, raffle_id)?)
        }

        #[ink(message)]
        pub fn get_prize_amount(&self, raffle_id: RaffleId) -> Result<Balance, ContractError> {
            Ok(RaffleLedger::get_prize_amount(self, raffle_id)?)
        }

        #[ink(message)]
        pub fn get_entry_fee(&self, raffle_id: RaffleId) -> Result<Balance, ContractError> {
            Ok(RaffleLedger::get_entry_fee(self, raffle_id)?)
        }

        #[ink(message)]
        pub fn get_entry_count(&self, raffle_id: RaffleId) -> Result<u32, ContractError> {
            Ok(RaffleLedger::get_entry_count(self, raffle_id)?)
        }

        /// Return the encrypted amount, the participant and the time of the entry
        #[ink(message)]
        pub fn get_entry(
            &self,
            raffle_id: RaffleId,
            entry_index: EntryIndex,
        ) -> Result<(Handle, AccountId, Timestamp), ContractError> {
            let entry = RaffleLedger::get_entry(self, raffle_id, entry_index)?;
            let handle = entry
                .amount
                .handle()
                .ok_or(RaffleError::UnexpectedAmountForm)?;
            Ok((handle, entry.participant, entry.created_at))
        }

        #[ink(message)]
        pub fn has_entered(
            &self,
            raffle_id: RaffleId,
            participant: AccountId,
        ) -> Result<bool, ContractError> {
            Ok(RaffleLedger::has_entered(self, raffle_id, participant)?)
        }

        #[ink(message)]
        pub fn get_status(&self, raffle_id: RaffleId) -> Result<RaffleStatus, ContractError> {
            let now = self.env().block_timestamp();
            Ok(RaffleLedger::get_status(self, raffle_id, now)?)
        }

        /// Return true if the account can decrypt the value
        #[ink(message)]
        pub fn is_allowed(&self, handle: Handle, account: AccountId) -> bool {
            ConfidentialEngine::is_allowed(self, handle, account)
        }

        #[ink(message)]
        pub fn get_input_verifier(&self) -> EthAddress {
            ConfidentialEngine::get_input_verifier(self)
        }

        #[ink(message)]
        #[openbrush::modifiers(only_owner)]
        pub fn set_input_verifier(
            &mut self,
            input_verifier: EthAddress,
        ) -> Result<(), ContractError> {
            ConfidentialEngine::set_input_verifier(self, input_verifier);
            self.env().emit_event(InputVerifierUpdated { input_verifier });
            Ok(())
        }
    }

}
