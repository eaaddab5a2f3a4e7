#[openbrush::contract]
pub mod raffle_contract {
    use crate::confidential::{self, ConfidentialEngine, EncryptedInput};
    use crate::error::RaffleError;
    use crate::raffle::{self, Entry, EntryAmount, Raffle, RaffleLedger};
    use crate::strategy::{self, DrawSeed, EntryContext, EntryStrategy, Winner};
    use crate::RaffleId;
    use openbrush::traits::Storage;

    /// Amount given by the tests, public or encrypted
    pub enum TestInput {
        Plain(Balance),
        Encrypted(EncryptedInput),
    }

    // Contract storage
    #[ink(storage)]
    #[derive(Default, Storage)]
    pub struct Contract {
        #[storage_field]
        ledger: raffle::Data,
        #[storage_field]
        engine: confidential::Data,
    }

    impl RaffleLedger for Contract {}
    impl ConfidentialEngine for Contract {}

    impl EntryStrategy for Contract {
        type Input = TestInput;

        fn admit(
            &mut self,
            ctx: &EntryContext,
            raffle: &Raffle,
            input: TestInput,
        ) -> Result<EntryAmount, RaffleError> {
            match input {
                TestInput::Plain(amount) => strategy::admit_plain(raffle, amount),
                TestInput::Encrypted(input) => self.admit_input(ctx, &input),
            }
        }

        fn select_winner(
            &self,
            raffle_id: RaffleId,
            entries: &[Entry],
            seed: &DrawSeed,
        ) -> Result<Winner, RaffleError> {
            match entries.first().map(|entry| entry.amount) {
                Some(EntryAmount::Plain(_)) => strategy::highest_amount_winner(entries),
                _ => strategy::random_winner(raffle_id, entries, seed),
            }
        }
    }

    impl Contract {
        #[ink(constructor)]
        pub fn new() -> Self {
            Self::default()
        }

        #[ink(message)]
        pub fn raffle_count(&self) -> RaffleId {
            RaffleLedger::get_raffle_count(self)
        }
    }
}
