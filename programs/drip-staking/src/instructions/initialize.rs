use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, MAX_CLAIM_FEE_BPS};
use crate::errors::StakingError;
use crate::state::GlobalConfig;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = authority,
        space = GlobalConfig::SIZE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: Wallet receiving creation and claim fees
    pub beneficiary: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Initialize>,
    claim_fee_bps: u16,
    creation_fee_lamports: u64,
) -> Result<()> {
    require!(claim_fee_bps <= MAX_CLAIM_FEE_BPS, StakingError::FeeTooHigh);

    let config = &mut ctx.accounts.global_config;
    config.authority = ctx.accounts.authority.key();
    config.beneficiary = ctx.accounts.beneficiary.key();
    config.claim_fee_bps = claim_fee_bps;
    config.creation_fee_lamports = creation_fee_lamports;
    config.pool_count = 0;
    config.bump = ctx.bumps.global_config;

    msg!("Initialized global config");
    msg!("Authority: {}", config.authority);
    msg!("Beneficiary: {}", config.beneficiary);

    Ok(())
}
