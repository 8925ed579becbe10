use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{
    CONFIG_SEED, POOL_AUTHORITY_SEED, POOL_SEED, REWARD_VAULT_SEED, STAKING_VAULT_SEED,
    USER_STAKE_SEED,
};
use crate::errors::StakingError;
use crate::events::{RewardClaimed, Unstaked};
use crate::state::{GlobalConfig, Pool, UserStake};
use crate::utils::pay_from_vault;

#[derive(Accounts)]
pub struct Unstake<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = global_config.bump
    )]
    pub global_config: Account<'info, GlobalConfig>,

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
        address = pool.reward_mint,
        mint::token_program = reward_token_program
    )]
    pub reward_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [STAKING_VAULT_SEED, pool.key().as_ref()],
        bump
    )]
    pub staking_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, pool.key().as_ref()],
        bump
    )]
    pub reward_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = staking_mint,
        token::authority = user,
        token::token_program = staking_token_program
    )]
    pub user_staking_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = user,
        token::token_program = reward_token_program
    )]
    pub user_reward_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = reward_mint,
        constraint = beneficiary_reward_account.owner == global_config.beneficiary
            @ StakingError::Unauthorized
    )]
    pub beneficiary_reward_account: InterfaceAccount<'info, TokenAccount>,

    pub user: Signer<'info>,

    pub staking_token_program: Interface<'info, TokenInterface>,
    pub reward_token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<Unstake>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let claim_fee_bps = ctx.accounts.global_config.claim_fee_bps;
    let pool = &mut ctx.accounts.pool;
    let user_stake = &mut ctx.accounts.user_stake;

    require!(amount > 0, StakingError::InvalidAmount);
    require!(
        user_stake.staked_amount >= amount,
        StakingError::InsufficientStakedBalance
    );

    pool.advance(now)?;

    // Auto-claim before the stake shrinks.
    let (gross, fee) = user_stake.settle(pool, claim_fee_bps, now)?;

    user_stake.staked_amount -= amount;
    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(StakingError::Overflow)?;

    if user_stake.staked_amount == 0 {
        pool.active_staker_count = pool
            .active_staker_count
            .checked_sub(1)
            .ok_or(StakingError::Overflow)?;
        pool.rearm_if_prestart(now);
    }
    user_stake.sync_debt(pool)?;

    let pool_key = pool.key();
    let pool_id = pool.pool_id;
    let remaining_stake = user_stake.staked_amount;

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

    if gross > 0 {
        pay_from_vault(
            &ctx.accounts.reward_vault,
            &ctx.accounts.user_reward_account,
            &ctx.accounts.reward_mint,
            &ctx.accounts.pool_authority,
            &ctx.accounts.reward_token_program,
            &pool_key,
            ctx.bumps.pool_authority,
            gross - fee,
        )?;
        if fee > 0 {
            pay_from_vault(
                &ctx.accounts.reward_vault,
                &ctx.accounts.beneficiary_reward_account,
                &ctx.accounts.reward_mint,
                &ctx.accounts.pool_authority,
                &ctx.accounts.reward_token_program,
                &pool_key,
                ctx.bumps.pool_authority,
                fee,
            )?;
        }
        emit!(RewardClaimed {
            pool_id,
            user: ctx.accounts.user.key(),
            gross,
            fee,
            timestamp: now,
        });
    }

    emit!(Unstaked {
        pool_id,
        user: ctx.accounts.user.key(),
        amount,
        reward_claimed: gross > 0,
        remaining_stake,
        timestamp: now,
    });

    msg!("Unstaked {} tokens", amount);
    msg!("Remaining: {}", remaining_stake);

    Ok(())
}
