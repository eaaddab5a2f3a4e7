use crate::error::{RaffleError, RaffleError::*};
use crate::raffle::EntryAmount;
use crate::strategy::EntryContext;
use crate::{EthAddress, Handle};
use ink::env::hash::{HashOutput, Keccak256};
use ink::prelude::vec::Vec;
use ink::storage::Mapping;
use openbrush::traits::{AccountId, Storage};

/// Position of the ciphertext type in a handle
pub const HANDLE_TYPE_BYTE: usize = 30;
/// Type tag of an encrypted 32 bits unsigned integer
pub const EUINT32_TYPE: u8 = 4;
/// r (32 bytes), s (32 bytes), v (1 byte)
pub const PROOF_LEN: usize = 65;

/// Ciphertext handle produced client side, with the proof that it can be used
/// by the sender in this contract
#[derive(Debug, Eq, PartialEq, Clone, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub struct EncryptedInput {
    pub handle: Handle,
    pub proof: Vec<u8>,
}

/// Message signed by the input verifier
#[derive(scale::Encode)]
struct InputAttestation {
    handle: Handle,
    contract: AccountId,
    user: AccountId,
}

#[derive(Default, Debug)]
#[openbrush::storage_item]
pub struct Data {
    input_verifier: EthAddress,
    acl: Mapping<(Handle, AccountId), ()>,
}

/// Access to the confidential values stored by the contract.
/// Inputs are accepted when they are attested by the input verifier,
/// and each grant of the access control list is permanent.
#[openbrush::trait_definition]
pub trait ConfidentialEngine: Storage<Data> {
    fn set_input_verifier(&mut self, input_verifier: EthAddress) {
        self.data::<Data>().input_verifier = input_verifier;
    }

    fn get_input_verifier(&self) -> EthAddress {
        self.data::<Data>().input_verifier
    }

    /// Verify that `user` is allowed to submit the ciphertext to `contract`
    /// and return the value usable by the contract
    fn verify_input(
        &self,
        contract: AccountId,
        user: AccountId,
        input: &EncryptedInput,
    ) -> Result<Handle, RaffleError> {
        if input.handle[HANDLE_TYPE_BYTE] != EUINT32_TYPE {
            return Err(InvalidCiphertext);
        }
        // a handle is submitted only once
        if self.is_allowed(input.handle, contract) {
            return Err(InvalidCiphertext);
        }

        let signature: [u8; PROOF_LEN] = input
            .proof
            .as_slice()
            .try_into()
            .map_err(|_| InvalidCiphertext)?;

        let message_hash = attestation_hash(input.handle, contract, user);
        let signer = recover_signer(&signature, &message_hash)?;
        if signer != self.data::<Data>().input_verifier {
            return Err(InvalidCiphertext);
        }

        Ok(input.handle)
    }

    /// Grant `account` the right to decrypt `value`
    fn allow(&mut self, value: Handle, account: AccountId) {
        self.data::<Data>().acl.insert((value, account), &());
    }

    fn is_allowed(&self, value: Handle, account: AccountId) -> bool {
        self.data::<Data>().acl.contains((value, account))
    }

    /// Verify the input, then only the contract and the participant can decrypt it.
    /// The entry fee is not checked: the amount is never seen in clear.
    fn admit_input(
        &mut self,
        ctx: &EntryContext,
        input: &EncryptedInput,
    ) -> Result<EntryAmount, RaffleError> {
        let value = self.verify_input(ctx.contract, ctx.participant, input)?;
        self.allow(value, ctx.contract);
        self.allow(value, ctx.participant);
        Ok(EntryAmount::Encrypted(value))
    }
}

/// Hash signed by the input verifier for a handle submitted by `user` to `contract`
pub fn attestation_hash(handle: Handle, contract: AccountId, user: AccountId) -> [u8; 32] {
    let attestation = InputAttestation {
        handle,
        contract,
        user,
    };
    let mut hash = <Keccak256 as HashOutput>::Type::default();
    ink::env::hash_encoded::<Keccak256, _>(&attestation, &mut hash);
    hash
}

fn recover_signer(
    signature: &[u8; PROOF_LEN],
    message_hash: &[u8; 32],
) -> Result<EthAddress, RaffleError> {
    if !matches!(signature[PROOF_LEN - 1], 0 | 1 | 27 | 28) {
        return Err(InvalidCiphertext);
    }

    let mut public_key = [0u8; 33];
    ink::env::ecdsa_recover(signature, message_hash, &mut public_key)
        .map_err(|_| InvalidCiphertext)?;

    let mut address = EthAddress::default();
    ink::env::ecdsa_to_eth_address(&public_key, &mut address).map_err(|_| InvalidCiphertext)?;

    Ok(address)
}
