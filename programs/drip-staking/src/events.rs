use anchor_lang::prelude::*;

/// Emitted when a creator funds a new pool
#[event]
pub struct PoolCreated {
    pub pool_id: u64,
    pub creator: Pubkey,
    pub staking_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_amount: u64,
    pub reward_duration: u32,
    pub reward_starts_at: i64,
    pub timestamp: i64,
}

/// Emitted when a user stakes tokens
#[event]
pub struct Staked {
    pub pool_id: u64,
    pub user: Pubkey,
    pub amount: u64,
    pub new_user_stake: u64,
    pub pool_total_staked: u64,
    pub timestamp: i64,
}

/// Emitted when a user unstakes tokens
#[event]
pub struct Unstaked {
    pub pool_id: u64,
    pub user: Pubkey,
    pub amount: u64,
    pub reward_claimed: bool,
    pub remaining_stake: u64,
    pub timestamp: i64,
}

/// Emitted whenever pending reward is paid out (claim or auto-claim)
#[event]
pub struct RewardClaimed {
    pub pool_id: u64,
    pub user: Pubkey,
    pub gross: u64,
    pub fee: u64,
    pub timestamp: i64,
}

/// Emitted when a user forfeits pending reward for a guaranteed exit
#[event]
pub struct EmergencyUnstaked {
    pub pool_id: u64,
    pub user: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Emitted when the creator cancels a pool
#[event]
pub struct PoolCancelled {
    pub pool_id: u64,
    pub creator: Pubkey,
    pub refund_amount: u64,
    pub timestamp: i64,
}

/// Emitted when the authority updates protocol parameters
#[event]
pub struct ConfigUpdated {
    pub authority: Pubkey,
    pub beneficiary: Pubkey,
    pub claim_fee_bps: u16,
    pub creation_fee_lamports: u64,
    pub timestamp: i64,
}
