use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{POOL_AUTHORITY_SEED, POOL_SEED, REWARD_VAULT_SEED};
use crate::errors::StakingError;
use crate::events::PoolCancelled;
use crate::state::Pool;
use crate::utils::pay_from_vault;

#[derive(Accounts)]
pub struct CancelPool<'info> {
    #[account(
        mut,
        seeds = [POOL_SEED, pool.pool_id.to_le_bytes().as_ref()],
        bump = pool.bump,
        has_one = creator @ StakingError::Unauthorized
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: PDA that signs vault transfers for this pool
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        address = pool.reward_mint,
        mint::token_program = reward_token_program
    )]
    pub reward_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, pool.key().as_ref()],
        bump
    )]
    pub reward_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = creator,
        token::token_program = reward_token_program
    )]
    pub creator_reward_account: InterfaceAccount<'info, TokenAccount>,

    pub creator: Signer<'info>,

    pub reward_token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<CancelPool>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool = &mut ctx.accounts.pool;

    // Settles accrual, freezes the accumulator and returns the exact
    // unallocated budget: future reward plus all empty-pool seconds.
    let refund = pool.cancel(now)?;

    let pool_key = pool.key();
    let pool_id = pool.pool_id;

    // State is settled; interactions follow.
    if refund > 0 {
        pay_from_vault(
            &ctx.accounts.reward_vault,
            &ctx.accounts.creator_reward_account,
            &ctx.accounts.reward_mint,
            &ctx.accounts.pool_authority,
            &ctx.accounts.reward_token_program,
            &pool_key,
            ctx.bumps.pool_authority,
            refund,
        )?;
    }

    emit!(PoolCancelled {
        pool_id,
        creator: ctx.accounts.creator.key(),
        refund_amount: refund,
        timestamp: now,
    });

    msg!("Cancelled pool {}, refunded {}", pool_id, refund);

    Ok(())
}
