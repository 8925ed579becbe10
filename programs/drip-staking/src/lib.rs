use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod utils;

use instructions::*;

declare_id!("Rk5dXQtrZHLh5YUsLZTsD8gaPE1xCbVAHt7NTiX2Pav");

/// Drip Staking Program
///
/// Multi-pool staking with fixed reward budgets released linearly over a
/// bounded window. Anyone can fund a pool; stakers earn a time-weighted
/// proportional share of the budget.
#[program]
pub mod drip_staking {
    use super::*;

    /// Initialize global config (one-time admin setup)
    pub fn initialize(
        ctx: Context<Initialize>,
        claim_fee_bps: u16,
        creation_fee_lamports: u64,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, claim_fee_bps, creation_fee_lamports)
    }

    /// Create and fund a reward pool
    pub fn create_pool(
        ctx: Context<CreatePool>,
        reward_amount: u64,
        reward_duration: u32,
        reward_starts_at: i64,
    ) -> Result<()> {
        instructions::create_pool::handler(ctx, reward_amount, reward_duration, reward_starts_at)
    }

    /// Stake tokens into a pool
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake::handler(ctx, amount)
    }

    /// Unstake tokens from a pool, auto-claiming pending reward
    pub fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
        instructions::unstake::handler(ctx, amount)
    }

    /// Claim accumulated reward
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim::handler(ctx)
    }

    /// Withdraw the full principal, forfeiting pending reward
    pub fn emergency_unstake(ctx: Context<EmergencyUnstake>) -> Result<()> {
        instructions::emergency_unstake::handler(ctx)
    }

    /// Cancel a pool and refund the unallocated budget (creator only)
    pub fn cancel_pool(ctx: Context<CancelPool>) -> Result<()> {
        instructions::cancel_pool::handler(ctx)
    }

    /// Update protocol parameters (authority only)
    pub fn update_config(
        ctx: Context<UpdateConfig>,
        new_beneficiary: Option<Pubkey>,
        new_claim_fee_bps: Option<u16>,
        new_creation_fee_lamports: Option<u64>,
    ) -> Result<()> {
        instructions::update_config::handler(
            ctx,
            new_beneficiary,
            new_claim_fee_bps,
            new_creation_fee_lamports,
        )
    }
}
