use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Stake amount is below the dust floor")]
    StakeBelowMinimum,

    #[msg("Stake amount exceeds the per-account ceiling")]
    StakeAboveMaximum,

    #[msg("Reward duration is outside the allowed range")]
    InvalidDuration,

    #[msg("Scheduled start must be in the future and within the allowed horizon")]
    InvalidStartTime,

    #[msg("Reward amount exceeds the safe maximum")]
    RewardTooLarge,

    #[msg("Reward rate is too low to distribute")]
    RewardRateTooLow,

    #[msg("Pool has been cancelled")]
    PoolCancelled,

    #[msg("Pool reward window has ended")]
    PoolFinished,

    #[msg("Pool is already cancelled")]
    PoolAlreadyCancelled,

    #[msg("Insufficient staked balance")]
    InsufficientStakedBalance,

    #[msg("No rewards to claim")]
    NoRewardsToClaim,

    #[msg("Nothing is staked")]
    NothingStaked,

    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Claim fee exceeds the hard maximum")]
    FeeTooHigh,

    #[msg("Token transfer delivered a different amount than requested")]
    TransferAmountMismatch,

    #[msg("Asset does not belong to a supported token program")]
    UnsupportedAssetKind,

    #[msg("Arithmetic overflow")]
    Overflow,
}
