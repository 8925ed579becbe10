//! Policy constants for the staking program.
//!
//! The stake and reward ceilings bound the worst-case accumulator value so
//! that every reward-debt product stays representable. They are tuned
//! conservative, trading dust-level truncation for overflow headroom.

/// PDA seeds
pub const CONFIG_SEED: &[u8] = b"config";
pub const POOL_SEED: &[u8] = b"pool";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool-authority";
pub const STAKING_VAULT_SEED: &[u8] = b"staking-vault";
pub const REWARD_VAULT_SEED: &[u8] = b"reward-vault";
pub const USER_STAKE_SEED: &[u8] = b"user-stake";

/// Scaling constant for `acc_reward_per_share` (18 decimals).
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Fee rates are expressed in basis points.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Hard ceiling for the claim fee rate (20%).
pub const MAX_CLAIM_FEE_BPS: u16 = 2_000;

/// Reward release window bounds, in seconds.
pub const MIN_REWARD_DURATION: u32 = 3_600; // 1 hour
pub const MAX_REWARD_DURATION: u32 = 157_680_000; // 5 years

/// A scheduled start may be at most this far in the future.
pub const MAX_START_DELAY: i64 = 604_800; // 1 week

/// Dust floor for a single stake call.
pub const MIN_STAKE_AMOUNT: u64 = 1_000;

/// Per-account stake ceiling.
pub const MAX_SINGLE_STAKE: u64 = 1_000_000_000_000_000;

/// Pool reward budget ceiling.
pub const MAX_REWARD_AMOUNT: u64 = 1_000_000_000_000_000;

/// Every pool must release at least this many raw reward units per second,
/// so a pool can never be created whose per-second payout rounds to nothing.
pub const MIN_REWARD_PER_SECOND: u64 = 1;
