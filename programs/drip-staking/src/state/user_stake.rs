use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, PRECISION};
use crate::errors::StakingError;
use crate::math::{fee_amount, mul_div_floor};
use crate::state::Pool;

/// One user's position in a pool
/// PDA: ["user-stake", pool, owner]
#[account]
#[derive(Default)]
pub struct UserStake {
    /// Owner of this position
    pub owner: Pubkey,

    /// The pool this position belongs to
    pub pool: Pubkey,

    /// Amount of staking tokens currently locked
    pub staked_amount: u64,

    /// Snapshot of staked_amount x acc_reward_per_share at last settlement
    pub reward_debt: u128,

    /// Lifetime reward paid out to the owner (net of fees)
    pub claimed_total: u64,

    /// Lifetime claim fees taken from this position
    pub fee_total: u64,

    /// Timestamp of the first stake
    pub staked_at: i64,

    /// Timestamp of the last reward settlement that paid out
    pub last_claim_at: i64,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl UserStake {
    pub const SIZE: usize = 8 + // discriminator
        32 + // owner
        32 + // pool
        8 +  // staked_amount
        16 + // reward_debt
        8 +  // claimed_total
        8 +  // fee_total
        8 +  // staked_at
        8 +  // last_claim_at
        1 +  // bump
        32;  // reserved

    /// Cumulative reward assigned to the current stake, scaled down.
    fn accumulated(&self, pool: &Pool) -> Result<u128> {
        mul_div_floor(
            self.staked_amount as u128,
            pool.acc_reward_per_share,
            PRECISION,
        )
        .ok_or(StakingError::Overflow.into())
    }

    /// Reward earned since the last settlement. Requires the pool to be
    /// advanced to the current timestamp first.
    pub fn pending(&self, pool: &Pool) -> Result<u64> {
        let pending = self
            .accumulated(pool)?
            .checked_sub(self.reward_debt)
            .ok_or(StakingError::Overflow)?;
        u64::try_from(pending).map_err(|_| StakingError::Overflow.into())
    }

    /// `(claimable, fee)` for the current accumulator state.
    pub fn preview_claim(&self, pool: &Pool, claim_fee_bps: u16) -> Result<(u64, u64)> {
        let gross = self.pending(pool)?;
        let fee = fee_amount(gross, claim_fee_bps, BPS_DENOMINATOR).ok_or(StakingError::Overflow)?;
        Ok((gross, fee))
    }

    /// Books the pending reward as claimed and returns `(gross, fee)`.
    /// The caller owes the owner `gross - fee` and the beneficiary `fee`,
    /// and must call [`UserStake::sync_debt`] once stake mutations are done.
    pub fn settle(&mut self, pool: &Pool, claim_fee_bps: u16, now: i64) -> Result<(u64, u64)> {
        let (gross, fee) = self.preview_claim(pool, claim_fee_bps)?;
        if gross > 0 {
            self.claimed_total = self
                .claimed_total
                .checked_add(gross - fee)
                .ok_or(StakingError::Overflow)?;
            self.fee_total = self.fee_total.checked_add(fee).ok_or(StakingError::Overflow)?;
            self.last_claim_at = now;
        }
        Ok((gross, fee))
    }

    /// Re-snapshots the accumulator against the current stake. Every
    /// settlement and every stake mutation ends with this.
    pub fn sync_debt(&mut self, pool: &Pool) -> Result<()> {
        self.reward_debt = self.accumulated(pool)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEE_FREE: u16 = 0;

    fn pool(reward_amount: u64, reward_duration: u32) -> Pool {
        Pool {
            reward_amount,
            reward_duration,
            ..Pool::default()
        }
    }

    fn stake(pool: &mut Pool, user: &mut UserStake, amount: u64, now: i64) -> (u64, u64) {
        pool.advance(now).unwrap();
        let settled = user.settle(pool, FEE_FREE, now).unwrap();
        if !pool.has_started() {
            pool.arm_reward_clock(now);
        }
        user.staked_amount += amount;
        pool.total_staked += amount;
        user.sync_debt(pool).unwrap();
        settled
    }

    fn unstake(pool: &mut Pool, user: &mut UserStake, amount: u64, now: i64) -> (u64, u64) {
        pool.advance(now).unwrap();
        let settled = user.settle(pool, FEE_FREE, now).unwrap();
        user.staked_amount -= amount;
        pool.total_staked -= amount;
        user.sync_debt(pool).unwrap();
        settled
    }

    fn claim(pool: &mut Pool, user: &mut UserStake, fee_bps: u16, now: i64) -> (u64, u64) {
        pool.advance(now).unwrap();
        let settled = user.settle(pool, fee_bps, now).unwrap();
        user.sync_debt(pool).unwrap();
        settled
    }

    #[test]
    fn single_staker_earns_the_full_rate() {
        // 10_000 units over 10_000 seconds: 1 unit per second.
        let mut p = pool(10_000, 10_000);
        let mut alice = UserStake::default();
        stake(&mut p, &mut alice, 100, 1_000);

        p.advance(2_000).unwrap();
        assert_eq!(alice.pending(&p).unwrap(), 1_000);
    }

    #[test]
    fn rewards_split_proportionally_to_stake() {
        let mut p = pool(10_000, 10_000);
        let mut alice = UserStake::default();
        let mut bob = UserStake::default();

        stake(&mut p, &mut alice, 100, 1_000);
        // Alice alone for 1000s, then Bob joins with 3x her stake.
        stake(&mut p, &mut bob, 300, 2_000);
        p.advance(3_000).unwrap();

        // 1000 alone plus 1000 split 100:300.
        assert_eq!(alice.pending(&p).unwrap(), 1_250);
        assert_eq!(bob.pending(&p).unwrap(), 750);
    }

    #[test]
    fn conservation_across_settlements() {
        let mut p = pool(10_000, 10_000);
        let mut alice = UserStake::default();
        let mut bob = UserStake::default();

        stake(&mut p, &mut alice, 123, 1_000);
        stake(&mut p, &mut bob, 456, 1_777);
        claim(&mut p, &mut alice, FEE_FREE, 3_500);
        unstake(&mut p, &mut bob, 400, 5_000);
        claim(&mut p, &mut bob, FEE_FREE, 7_000);
        p.advance(10_000).unwrap();

        let paid_or_claimable = alice.claimed_total
            + alice.fee_total
            + alice.pending(&p).unwrap()
            + bob.claimed_total
            + bob.fee_total
            + bob.pending(&p).unwrap();
        let dust = p.total_allocated_rewards - paid_or_claimable;
        // Rounding dust is bounded by the number of settlements.
        assert!(dust <= 6, "dust {dust} out of bounds");
    }

    #[test]
    fn end_of_window_claim_is_exact() {
        let mut p = pool(10_000, 10_000);
        let mut alice = UserStake::default();
        stake(&mut p, &mut alice, 1_000, 1_500);

        let end = p.end_time();
        p.advance(end).unwrap();
        assert_eq!(alice.pending(&p).unwrap(), 10_000);

        // Nothing more accrues past the end.
        p.advance(end + 12_345).unwrap();
        assert_eq!(alice.pending(&p).unwrap(), 10_000);
    }

    #[test]
    fn unstake_then_idle_then_cancel_refunds_the_rest() {
        let mut p = pool(10_000, 10_000);
        let mut alice = UserStake::default();
        stake(&mut p, &mut alice, 100, 1_000);

        // Full exit after 1000s auto-claims exactly the solo-staker accrual.
        let (gross, fee) = unstake(&mut p, &mut alice, 100, 2_000);
        assert_eq!((gross, fee), (1_000, 0));
        assert_eq!(alice.pending(&p).unwrap(), 0);

        // Pool sits empty for 2000s; the creator cancels and gets the rest.
        let refund = p.cancel(4_000).unwrap();
        assert_eq!(refund, 9_000);
    }

    #[test]
    fn claims_survive_cancellation() {
        let mut p = pool(10_000, 10_000);
        let mut alice = UserStake::default();
        stake(&mut p, &mut alice, 100, 1_000);

        p.cancel(2_000).unwrap();

        // Alice's pre-cancellation share stays claimable, and is frozen.
        assert_eq!(alice.pending(&p).unwrap(), 1_000);
        p.advance(9_000).unwrap();
        let (gross, fee) = claim(&mut p, &mut alice, FEE_FREE, 9_000);
        assert_eq!((gross, fee), (1_000, 0));
        assert_eq!(alice.pending(&p).unwrap(), 0);
    }

    #[test]
    fn claim_fee_is_basis_points_of_gross() {
        let mut p = pool(10_000, 10_000);
        let mut alice = UserStake::default();
        stake(&mut p, &mut alice, 100, 1_000);

        p.advance(2_000).unwrap();
        let (gross, fee) = claim(&mut p, &mut alice, 500, 2_000); // 5%
        assert_eq!((gross, fee), (1_000, 50));
        assert_eq!(alice.claimed_total, 950);
        assert_eq!(alice.fee_total, 50);
    }

    #[test]
    fn settling_twice_at_one_instant_pays_once() {
        let mut p = pool(10_000, 10_000);
        let mut alice = UserStake::default();
        stake(&mut p, &mut alice, 100, 1_000);

        p.advance(2_000).unwrap();
        let (first, _) = claim(&mut p, &mut alice, FEE_FREE, 2_000);
        let (second, _) = claim(&mut p, &mut alice, FEE_FREE, 2_000);
        assert_eq!(first, 1_000);
        assert_eq!(second, 0);
    }

    #[test]
    fn emergency_exit_forfeits_pending() {
        let mut p = pool(10_000, 10_000);
        let mut alice = UserStake::default();
        stake(&mut p, &mut alice, 100, 1_000);

        p.advance(2_000).unwrap();
        assert_eq!(alice.pending(&p).unwrap(), 1_000);

        // The emergency path returns principal without settling.
        p.advance(2_500).unwrap();
        alice.staked_amount = 0;
        p.total_staked = 0;
        alice.sync_debt(&p).unwrap();

        assert_eq!(alice.pending(&p).unwrap(), 0);
        assert_eq!(alice.claimed_total, 0);
        // A later re-stake starts from a clean snapshot.
        stake(&mut p, &mut alice, 50, 3_000);
        p.advance(3_100).unwrap();
        assert_eq!(alice.pending(&p).unwrap(), 100);
    }
}
