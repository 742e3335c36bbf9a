use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    PoolAlreadyExists = 4,
    PoolNotFound = 5,
    IdenticalTokens = 6,
    StartNotInFuture = 7,
    StartNotBeforeEnd = 8,
    PoolEnded = 9,
    PoolAlreadyStarted = 10,
    CapWindowExpired = 11,
    ExceedsUserCap = 12,
    CapCanOnlyIncrease = 13,
    ZeroUserCap = 14,
    InsufficientStake = 15,
    InsufficientRewardReserve = 16,
    NoStakeFound = 17,
    InvalidAmount = 18,
    UnsupportedDecimals = 19,
    ArithmeticOverflow = 20,
    DivideByZero = 21,
    PoolNotStarted = 22,
}

/// Coarse classification of [`ContractError`] codes for off-chain consumers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorCategory {
    /// Caller is not the registered administrator.
    Authorization,
    /// Duplicate registration or conflicting configuration.
    StateConflict,
    /// Referenced pool or position does not exist.
    NotFound,
    /// Malformed input such as a negative amount.
    Validation,
    /// Operation not allowed at the current ledger time.
    TimingViolation,
    /// A per-user cap rule was broken.
    LimitViolation,
    /// Recorded stake or reward reserve cannot cover the request.
    InsufficientBalance,
    /// Fixed-point arithmetic left its domain.
    Arithmetic,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::AlreadyInitialized
            | ContractError::PoolAlreadyExists
            | ContractError::IdenticalTokens => ErrorCategory::StateConflict,
            ContractError::NotInitialized
            | ContractError::PoolNotFound
            | ContractError::NoStakeFound => ErrorCategory::NotFound,
            ContractError::InvalidAmount | ContractError::UnsupportedDecimals => {
                ErrorCategory::Validation
            }
            ContractError::StartNotInFuture
            | ContractError::StartNotBeforeEnd
            | ContractError::PoolEnded
            | ContractError::PoolAlreadyStarted
            | ContractError::PoolNotStarted
            | ContractError::CapWindowExpired => ErrorCategory::TimingViolation,
            ContractError::ExceedsUserCap
            | ContractError::CapCanOnlyIncrease
            | ContractError::ZeroUserCap => ErrorCategory::LimitViolation,
            ContractError::InsufficientStake | ContractError::InsufficientRewardReserve => {
                ErrorCategory::InsufficientBalance
            }
            ContractError::ArithmeticOverflow | ContractError::DivideByZero => {
                ErrorCategory::Arithmetic
            }
        }
    }
}
