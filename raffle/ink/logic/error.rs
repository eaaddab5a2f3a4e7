/// Creation parameter that failed validation
#[derive(Debug, Eq, PartialEq, Copy, Clone, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum ValidationError {
    MaxEntriesTooLow,
    DurationTooShort,
    PrizeAmountZero,
    EntryFeeZero,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum RaffleError {
    ValidationError(ValidationError),
    InvalidId,
    InvalidIndex,
    NotActive,
    Expired,
    Full,
    DuplicateEntry,
    InvalidCiphertext,
    BelowMinimum,
    Unauthorized,
    NotExpired,
    AlreadyDrawn,
    NoEntries,
    AddOverFlow,
    UnexpectedAmountForm,
}

/// convertor from ValidationError to RaffleError
impl From<ValidationError> for RaffleError {
    fn from(error: ValidationError) -> Self {
        RaffleError::ValidationError(error)
    }
}
