use anchor_lang::prelude::*;

/// Global protocol configuration
/// PDA: ["config"]
#[account]
#[derive(Default)]
pub struct GlobalConfig {
    /// Program authority (can update config)
    pub authority: Pubkey,

    /// Wallet receiving creation fees and claim fees
    pub beneficiary: Pubkey,

    /// Claim fee rate in basis points, bounded by MAX_CLAIM_FEE_BPS
    pub claim_fee_bps: u16,

    /// Flat fee in lamports charged on pool creation
    pub creation_fee_lamports: u64,

    /// Number of pools ever created; doubles as the next pool id
    pub pool_count: u64,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl GlobalConfig {
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        32 + // beneficiary
        2 +  // claim_fee_bps
        8 +  // creation_fee_lamports
        8 +  // pool_count
        1 +  // bump
        32;  // reserved
}
