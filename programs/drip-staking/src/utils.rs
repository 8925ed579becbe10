use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::constants::POOL_AUTHORITY_SEED;
use crate::errors::StakingError;

/// Pulls `amount` of an asset into a program vault and verifies the vault
/// received exactly that much. Fee-on-transfer and rebasing assets fail here;
/// reward conservation depends on exact custody.
pub fn pull_into_vault<'info>(
    from: &InterfaceAccount<'info, TokenAccount>,
    vault: &mut InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    owner: &Signer<'info>,
    token_program: &Interface<'info, TokenInterface>,
    amount: u64,
) -> Result<()> {
    let balance_before = vault.amount;
    token_interface::transfer_checked(
        CpiContext::new(
            token_program.to_account_info(),
            TransferChecked {
                from: from.to_account_info(),
                mint: mint.to_account_info(),
                to: vault.to_account_info(),
                authority: owner.to_account_info(),
            },
        ),
        amount,
        mint.decimals,
    )?;
    vault.reload()?;
    let received = vault
        .amount
        .checked_sub(balance_before)
        .ok_or(StakingError::Overflow)?;
    require!(received == amount, StakingError::TransferAmountMismatch);
    Ok(())
}

/// Pays `amount` out of a pool vault, signed by the pool authority PDA.
pub fn pay_from_vault<'info>(
    vault: &InterfaceAccount<'info, TokenAccount>,
    to: &InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    pool_authority: &UncheckedAccount<'info>,
    token_program: &Interface<'info, TokenInterface>,
    pool_key: &Pubkey,
    authority_bump: u8,
    amount: u64,
) -> Result<()> {
    let bump = [authority_bump];
    let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &bump];
    let signer_seeds = &[seeds];
    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            TransferChecked {
                from: vault.to_account_info(),
                mint: mint.to_account_info(),
                to: to.to_account_info(),
                authority: pool_authority.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        mint.decimals,
    )
}
