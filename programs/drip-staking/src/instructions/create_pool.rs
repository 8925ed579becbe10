use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{
    CONFIG_SEED, MAX_REWARD_AMOUNT, MAX_REWARD_DURATION, MAX_START_DELAY, MIN_REWARD_DURATION,
    MIN_REWARD_PER_SECOND, POOL_AUTHORITY_SEED, POOL_SEED, REWARD_VAULT_SEED, STAKING_VAULT_SEED,
};
use crate::errors::StakingError;
use crate::events::PoolCreated;
use crate::state::{AssetKind, GlobalConfig, Pool};
use crate::utils::pull_into_vault;

#[derive(Accounts)]
pub struct CreatePool<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = global_config.bump
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        init,
        payer = creator,
        space = Pool::SIZE,
        seeds = [POOL_SEED, global_config.pool_count.to_le_bytes().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: PDA that signs vault transfers for this pool
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(mint::token_program = staking_token_program)]
    pub staking_mint: InterfaceAccount<'info, Mint>,

    #[account(mint::token_program = reward_token_program)]
    pub reward_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = creator,
        seeds = [STAKING_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = pool_authority,
        token::token_program = staking_token_program
    )]
    pub staking_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init,
        payer = creator,
        seeds = [REWARD_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = pool_authority,
        token::token_program = reward_token_program
    )]
    pub reward_vault: InterfaceAccount<'info, TokenAccount>,

    /// Source of the reward budget
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = creator,
        token::token_program = reward_token_program
    )]
    pub creator_reward_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Protocol fee wallet, must match the config
    #[account(
        mut,
        address = global_config.beneficiary @ StakingError::Unauthorized
    )]
    pub beneficiary: UncheckedAccount<'info>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub staking_token_program: Interface<'info, TokenInterface>,
    pub reward_token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreatePool>,
    reward_amount: u64,
    reward_duration: u32,
    reward_starts_at: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    require!(reward_amount > 0, StakingError::InvalidAmount);
    require!(
        reward_amount <= MAX_REWARD_AMOUNT,
        StakingError::RewardTooLarge
    );
    require!(
        (MIN_REWARD_DURATION..=MAX_REWARD_DURATION).contains(&reward_duration),
        StakingError::InvalidDuration
    );
    require!(
        reward_starts_at == 0
            || (reward_starts_at >= now && reward_starts_at <= now + MAX_START_DELAY),
        StakingError::InvalidStartTime
    );
    require!(
        reward_amount / reward_duration as u64 >= MIN_REWARD_PER_SECOND,
        StakingError::RewardRateTooLow
    );

    let staking_asset_kind = AssetKind::from_program_id(ctx.accounts.staking_token_program.key)
        .ok_or(StakingError::UnsupportedAssetKind)?;

    // Flat creation fee in native lamports, paid exactly or the call fails.
    let creation_fee = ctx.accounts.global_config.creation_fee_lamports;
    if creation_fee > 0 {
        let ix = anchor_lang::solana_program::system_instruction::transfer(
            &ctx.accounts.creator.key(),
            &ctx.accounts.beneficiary.key(),
            creation_fee,
        );
        anchor_lang::solana_program::program::invoke(
            &ix,
            &[
                ctx.accounts.creator.to_account_info(),
                ctx.accounts.beneficiary.to_account_info(),
                ctx.accounts.system_program.to_account_info(),
            ],
        )?;
    }

    // The whole budget moves into custody atomically with creation.
    pull_into_vault(
        &ctx.accounts.creator_reward_account,
        &mut ctx.accounts.reward_vault,
        &ctx.accounts.reward_mint,
        &ctx.accounts.creator,
        &ctx.accounts.reward_token_program,
        reward_amount,
    )?;

    let config = &mut ctx.accounts.global_config;
    let pool = &mut ctx.accounts.pool;

    pool.pool_id = config.pool_count;
    pool.staking_mint = ctx.accounts.staking_mint.key();
    pool.reward_mint = ctx.accounts.reward_mint.key();
    pool.staking_asset_kind = staking_asset_kind;
    pool.creator = ctx.accounts.creator.key();
    pool.reward_amount = reward_amount;
    pool.reward_duration = reward_duration;
    pool.reward_starts_at = reward_starts_at;
    pool.reward_started_at = 0;
    pool.cancelled_at = 0;
    pool.total_staked = 0;
    pool.active_staker_count = 0;
    pool.last_reward_updated_at = 0;
    pool.acc_reward_per_share = 0;
    pool.total_allocated_rewards = 0;
    pool.total_skipped_duration = 0;
    pool.bump = ctx.bumps.pool;

    config.pool_count = config
        .pool_count
        .checked_add(1)
        .ok_or(StakingError::Overflow)?;

    emit!(PoolCreated {
        pool_id: pool.pool_id,
        creator: pool.creator,
        staking_mint: pool.staking_mint,
        reward_mint: pool.reward_mint,
        reward_amount,
        reward_duration,
        reward_starts_at,
        timestamp: now,
    });

    msg!("Created pool {} for mint {}", pool.pool_id, pool.staking_mint);
    msg!(
        "Budget: {} over {}s, scheduled start: {}",
        reward_amount,
        reward_duration,
        reward_starts_at
    );

    Ok(())
}
