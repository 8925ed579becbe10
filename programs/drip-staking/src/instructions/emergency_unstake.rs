use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{POOL_AUTHORITY_SEED, POOL_SEED, STAKING_VAULT_SEED, USER_STAKE_SEED};
use crate::errors::StakingError;
use crate::events::EmergencyUnstaked;
use crate::state::{Pool, UserStake};
use crate::utils::pay_from_vault;

/// Escape hatch: returns the full principal without touching the reward
/// asset, for stakers who prefer a guaranteed exit over reward settlement.
#[derive(Accounts)]
pub struct EmergencyUnstake<'info> {
    #[account(
        mut,
        seeds = [POOL_SEED, pool.pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: PDA that signs vault transfers for this pool
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [USER_STAKE_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = user_stake.bump,
        constraint = user_stake.owner == user.key() @ StakingError::Unauthorized
    )]
    pub user_stake: Account<'info, UserStake>,

    #[account(
        address = pool.staking_mint,
        mint::token_program = staking_token_program
    )]
    pub staking_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [STAKING_VAULT_SEED, pool.key().as_ref()],
        bump
    )]
    pub staking_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = staking_mint,
        token::authority = user,
        token::token_program = staking_token_program
    )]
    pub user_staking_account: InterfaceAccount<'info, TokenAccount>,

    pub user: Signer<'info>,

    pub staking_token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<EmergencyUnstake>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool = &mut ctx.accounts.pool;
    let user_stake = &mut ctx.accounts.user_stake;

    let amount = user_stake.staked_amount;
    require!(amount > 0, StakingError::NothingStaked);

    pool.advance(now)?;

    // No settlement: the snapshot below burns the pending reward for good.
    user_stake.staked_amount = 0;
    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(StakingError::Overflow)?;
    pool.active_staker_count = pool
        .active_staker_count
        .checked_sub(1)
        .ok_or(StakingError::Overflow)?;
    pool.rearm_if_prestart(now);
    user_stake.sync_debt(pool)?;

    let pool_key = pool.key();
    let pool_id = pool.pool_id;

    // State is settled; interactions follow.
    pay_from_vault(
        &ctx.accounts.staking_vault,
        &ctx.accounts.user_staking_account,
        &ctx.accounts.staking_mint,
        &ctx.accounts.pool_authority,
        &ctx.accounts.staking_token_program,
        &pool_key,
        ctx.bumps.pool_authority,
        amount,
    )?;

    emit!(EmergencyUnstaked {
        pool_id,
        user: ctx.accounts.user.key(),
        amount,
        timestamp: now,
    });

    msg!("Emergency unstaked {} tokens, rewards forfeited", amount);

    Ok(())
}
