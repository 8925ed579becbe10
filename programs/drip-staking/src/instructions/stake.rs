use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{
    CONFIG_SEED, MAX_SINGLE_STAKE, MIN_STAKE_AMOUNT, POOL_AUTHORITY_SEED, POOL_SEED,
    REWARD_VAULT_SEED, STAKING_VAULT_SEED, USER_STAKE_SEED,
};
use crate::errors::StakingError;
use crate::events::{RewardClaimed, Staked};
use crate::state::{GlobalConfig, Pool, UserStake};
use crate::utils::{pay_from_vault, pull_into_vault};

#[derive(Accounts)]
pub struct Stake<'info> {
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
        init_if_needed,
        payer = user,
        space = UserStake::SIZE,
        seeds = [USER_STAKE_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
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

    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        constraint = staking_token_program.key() == pool.staking_asset_kind.program_id()
            @ StakingError::UnsupportedAssetKind
    )]
    pub staking_token_program: Interface<'info, TokenInterface>,
    pub reward_token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Stake>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let claim_fee_bps = ctx.accounts.global_config.claim_fee_bps;
    let pool = &mut ctx.accounts.pool;
    let user_stake = &mut ctx.accounts.user_stake;

    require!(amount > 0, StakingError::InvalidAmount);
    require!(amount >= MIN_STAKE_AMOUNT, StakingError::StakeBelowMinimum);
    require!(!pool.is_cancelled(), StakingError::PoolCancelled);
    require!(!pool.is_finished(now), StakingError::PoolFinished);

    let new_user_total = user_stake
        .staked_amount
        .checked_add(amount)
        .ok_or(StakingError::Overflow)?;
    require!(
        new_user_total <= MAX_SINGLE_STAKE,
        StakingError::StakeAboveMaximum
    );

    pool.advance(now)?;

    if user_stake.owner == Pubkey::default() {
        user_stake.owner = ctx.accounts.user.key();
        user_stake.pool = pool.key();
        user_stake.staked_at = now;
        user_stake.bump = ctx.bumps.user_stake;
    }
    if user_stake.staked_amount == 0 {
        pool.active_staker_count = pool
            .active_staker_count
            .checked_add(1)
            .ok_or(StakingError::Overflow)?;
    }

    // Settle what the existing stake earned before the delta applies.
    let (gross, fee) = user_stake.settle(pool, claim_fee_bps, now)?;

    // The very first stake arms the accrual clock.
    if !pool.has_started() {
        pool.arm_reward_clock(now);
    }

    user_stake.staked_amount = new_user_total;
    pool.total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(StakingError::Overflow)?;
    user_stake.sync_debt(pool)?;

    let pool_key = pool.key();
    let pool_id = pool.pool_id;
    let pool_total_staked = pool.total_staked;

    // State is settled; interactions follow.
    pull_into_vault(
        &ctx.accounts.user_staking_account,
        &mut ctx.accounts.staking_vault,
        &ctx.accounts.staking_mint,
        &ctx.accounts.user,
        &ctx.accounts.staking_token_program,
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

    emit!(Staked {
        pool_id,
        user: ctx.accounts.user.key(),
        amount,
        new_user_stake: new_user_total,
        pool_total_staked,
        timestamp: now,
    });

    msg!("Staked {} tokens", amount);
    msg!("User stake: {}, pool total: {}", new_user_total, pool_total_staked);

    Ok(())
}
