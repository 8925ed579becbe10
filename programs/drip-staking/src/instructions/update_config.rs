use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, MAX_CLAIM_FEE_BPS};
use crate::errors::StakingError;
use crate::events::ConfigUpdated;
use crate::state::GlobalConfig;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = global_config.bump,
        has_one = authority @ StakingError::Unauthorized
    )]
    pub global_config: Account<'info, GlobalConfig>,

    pub authority: Signer<'info>,
}

pub fn handler(
    ctx: Context<UpdateConfig>,
    new_beneficiary: Option<Pubkey>,
    new_claim_fee_bps: Option<u16>,
    new_creation_fee_lamports: Option<u64>,
) -> Result<()> {
    let config = &mut ctx.accounts.global_config;
    let now = Clock::get()?.unix_timestamp;

    if let Some(beneficiary) = new_beneficiary {
        config.beneficiary = beneficiary;
    }
    if let Some(claim_fee_bps) = new_claim_fee_bps {
        require!(claim_fee_bps <= MAX_CLAIM_FEE_BPS, StakingError::FeeTooHigh);
        config.claim_fee_bps = claim_fee_bps;
    }
    if let Some(creation_fee_lamports) = new_creation_fee_lamports {
        config.creation_fee_lamports = creation_fee_lamports;
    }

    emit!(ConfigUpdated {
        authority: config.authority,
        beneficiary: config.beneficiary,
        claim_fee_bps: config.claim_fee_bps,
        creation_fee_lamports: config.creation_fee_lamports,
        timestamp: now,
    });

    msg!("Config updated");

    Ok(())
}
