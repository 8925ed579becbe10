use anchor_lang::prelude::*;

use crate::constants::PRECISION;
use crate::errors::StakingError;
use crate::math::mul_div_floor;

/// The two token programs a pool asset may live under. Probed once at pool
/// creation from the passed token program id and cached on the pool record;
/// any other program fails account validation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssetKind {
    #[default]
    Token,
    Token2022,
}

impl AssetKind {
    pub fn from_program_id(program_id: &Pubkey) -> Option<Self> {
        if *program_id == anchor_spl::token::ID {
            Some(AssetKind::Token)
        } else if *program_id == anchor_spl::token_2022::ID {
            Some(AssetKind::Token2022)
        } else {
            None
        }
    }

    pub fn program_id(&self) -> Pubkey {
        match self {
            AssetKind::Token => anchor_spl::token::ID,
            AssetKind::Token2022 => anchor_spl::token_2022::ID,
        }
    }
}

/// One reward program: a fixed budget released linearly over a bounded window
/// PDA: ["pool", pool_id]
#[account]
#[derive(Default)]
pub struct Pool {
    /// Index in the pool registry
    pub pool_id: u64,

    /// Token mint locked by stakers
    pub staking_mint: Pubkey,

    /// Token mint paid out as reward
    pub reward_mint: Pubkey,

    /// Which token program the staking mint belongs to
    pub staking_asset_kind: AssetKind,

    /// Account that funded the pool and may cancel it
    pub creator: Pubkey,

    /// Total reward budget committed at creation (immutable)
    pub reward_amount: u64,

    /// Seconds over which reward_amount is released linearly
    pub reward_duration: u32,

    /// Scheduled accrual start; 0 = start on first stake
    pub reward_starts_at: i64,

    /// Timestamp accrual actually began; 0 until the first stake
    pub reward_started_at: i64,

    /// 0 while active; set once when the creator cancels
    pub cancelled_at: i64,

    /// Sum of all users' current stake
    pub total_staked: u64,

    /// Number of distinct accounts with nonzero stake
    pub active_staker_count: u32,

    /// Timestamp through which acc_reward_per_share has been advanced
    pub last_reward_updated_at: i64,

    /// Cumulative reward per unit staked, scaled by PRECISION
    pub acc_reward_per_share: u128,

    /// Reward mathematically assigned to stakers so far; frozen on cancel
    pub total_allocated_rewards: u64,

    /// Seconds the pool sat with zero stakers after accrual started.
    /// These seconds never consume budget and come back to the creator
    /// on cancellation.
    pub total_skipped_duration: u64,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl Pool {
    pub const SIZE: usize = 8 + // discriminator
        8 +  // pool_id
        32 + // staking_mint
        32 + // reward_mint
        1 +  // staking_asset_kind
        32 + // creator
        8 +  // reward_amount
        4 +  // reward_duration
        8 +  // reward_starts_at
        8 +  // reward_started_at
        8 +  // cancelled_at
        8 +  // total_staked
        4 +  // active_staker_count
        8 +  // last_reward_updated_at
        16 + // acc_reward_per_share
        8 +  // total_allocated_rewards
        8 +  // total_skipped_duration
        1 +  // bump
        32;  // reserved

    pub fn is_cancelled(&self) -> bool {
        self.cancelled_at != 0
    }

    pub fn has_started(&self) -> bool {
        self.reward_started_at != 0
    }

    /// Timestamp at which the reward window closes; meaningless before the
    /// clock is armed.
    pub fn end_time(&self) -> i64 {
        self.reward_started_at + self.reward_duration as i64
    }

    /// Staking is rejected at and after the end boundary; claiming is not.
    pub fn is_finished(&self, now: i64) -> bool {
        self.has_started() && now >= self.end_time()
    }

    /// Arms the accrual clock on the first stake. A scheduled start that has
    /// not elapsed yet defers the clock to it.
    pub fn arm_reward_clock(&mut self, now: i64) {
        let started_at = now.max(self.reward_starts_at);
        self.reward_started_at = started_at;
        self.last_reward_updated_at = started_at;
    }

    /// A pool that loses its last staker before the scheduled start goes back
    /// to the pre-stake state, so the next first stake re-arms the clock.
    pub fn rearm_if_prestart(&mut self, now: i64) {
        if !self.is_cancelled()
            && self.total_staked == 0
            && self.reward_starts_at != 0
            && now < self.reward_starts_at
        {
            self.reward_started_at = 0;
            self.last_reward_updated_at = 0;
        }
    }

    /// Reward-eligible seconds elapsed through `through`: time since the
    /// clock was armed, capped at the window end, minus skipped seconds.
    fn eligible_elapsed(&self, through: i64) -> Result<u64> {
        let capped = through.min(self.end_time());
        let since_start = capped
            .checked_sub(self.reward_started_at)
            .ok_or(StakingError::Overflow)?
            .max(0) as u64;
        since_start
            .checked_sub(self.total_skipped_duration)
            .ok_or(StakingError::Overflow.into())
    }

    /// Brings `acc_reward_per_share`, `total_allocated_rewards` and
    /// `total_skipped_duration` up to date as of `now`. Idempotent: a second
    /// call at the same `now` changes nothing. No-op while cancelled or
    /// before the clock is armed.
    pub fn advance(&mut self, now: i64) -> Result<()> {
        if self.is_cancelled() || !self.has_started() {
            return Ok(());
        }
        if now <= self.last_reward_updated_at {
            return Ok(());
        }

        if self.total_staked == 0 {
            // Unstaked seconds never mint reward; only the portion inside
            // the window counts as skipped.
            let capped = now.min(self.end_time());
            if capped > self.last_reward_updated_at {
                let skipped = (capped - self.last_reward_updated_at) as u64;
                self.total_skipped_duration = self
                    .total_skipped_duration
                    .checked_add(skipped)
                    .ok_or(StakingError::Overflow)?;
            }
            self.last_reward_updated_at = now;
            return Ok(());
        }

        // Cumulative-target form: the allocation through `now` is computed
        // from scratch and the step delta is the difference, so per-step
        // truncation never compounds and a call at exactly the window end
        // allocates exactly reward_amount (less skipped time).
        let eligible = self.eligible_elapsed(now)?;
        let target = mul_div_floor(
            self.reward_amount as u128,
            eligible as u128,
            self.reward_duration as u128,
        )
        .ok_or(StakingError::Overflow)?;
        let target = u64::try_from(target).map_err(|_| StakingError::Overflow)?;
        let delta = target
            .checked_sub(self.total_allocated_rewards)
            .ok_or(StakingError::Overflow)?;

        if delta > 0 {
            self.total_allocated_rewards = target;
            let per_share = mul_div_floor(delta as u128, PRECISION, self.total_staked as u128)
                .ok_or(StakingError::Overflow)?;
            self.acc_reward_per_share = self
                .acc_reward_per_share
                .checked_add(per_share)
                .ok_or(StakingError::Overflow)?;
        }
        self.last_reward_updated_at = now;
        Ok(())
    }

    /// Settles accrual through `now`, freezes the pool and returns the exact
    /// unallocated budget: un-elapsed future reward plus every second the
    /// pool sat empty.
    pub fn cancel(&mut self, now: i64) -> Result<u64> {
        require!(!self.is_cancelled(), StakingError::PoolAlreadyCancelled);
        self.advance(now)?;
        let refund = self
            .reward_amount
            .checked_sub(self.total_allocated_rewards)
            .ok_or(StakingError::Overflow)?;
        self.cancelled_at = now;
        Ok(refund)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(reward_amount: u64, reward_duration: u32) -> Pool {
        Pool {
            reward_amount,
            reward_duration,
            ..Pool::default()
        }
    }

    #[test]
    fn advance_is_noop_before_clock_is_armed() {
        let mut p = pool(10_000, 10_000);
        p.advance(5_000).unwrap();
        assert_eq!(p.acc_reward_per_share, 0);
        assert_eq!(p.total_allocated_rewards, 0);
        assert_eq!(p.last_reward_updated_at, 0);
    }

    #[test]
    fn advance_allocates_linearly() {
        let mut p = pool(10_000, 10_000);
        p.total_staked = 100;
        p.arm_reward_clock(1_000);
        p.advance(2_000).unwrap();
        assert_eq!(p.total_allocated_rewards, 1_000);
        assert_eq!(p.acc_reward_per_share, 1_000 * PRECISION / 100);
    }

    #[test]
    fn advance_is_idempotent_at_equal_now() {
        let mut p = pool(10_000, 10_000);
        p.total_staked = 250;
        p.arm_reward_clock(1_000);
        p.advance(4_333).unwrap();
        let (acc, allocated, skipped) = (
            p.acc_reward_per_share,
            p.total_allocated_rewards,
            p.total_skipped_duration,
        );
        p.advance(4_333).unwrap();
        assert_eq!(p.acc_reward_per_share, acc);
        assert_eq!(p.total_allocated_rewards, allocated);
        assert_eq!(p.total_skipped_duration, skipped);
    }

    #[test]
    fn allocation_is_exact_at_the_window_end() {
        // Awkward numbers so that per-step floor division would lose units
        // if deltas were computed piecewise.
        let mut p = pool(9_999, 7_001);
        p.total_staked = 7;
        p.arm_reward_clock(100);
        let end = p.end_time();
        let mut t = 100;
        while t < end {
            t = (t + 13).min(end);
            p.advance(t).unwrap();
        }
        assert_eq!(p.total_allocated_rewards, 9_999);
        // And it never increases afterwards.
        p.advance(end + 50_000).unwrap();
        assert_eq!(p.total_allocated_rewards, 9_999);
    }

    #[test]
    fn empty_pool_seconds_are_skipped_not_allocated() {
        let mut p = pool(10_000, 10_000);
        p.total_staked = 100;
        p.arm_reward_clock(1_000);
        p.advance(2_000).unwrap();
        assert_eq!(p.total_allocated_rewards, 1_000);

        // Everyone leaves; two thousand empty seconds follow.
        p.total_staked = 0;
        p.advance(4_000).unwrap();
        assert_eq!(p.total_allocated_rewards, 1_000);
        assert_eq!(p.total_skipped_duration, 2_000);

        // A staker returns and accrual resumes at the same rate.
        p.total_staked = 100;
        p.advance(5_000).unwrap();
        assert_eq!(p.total_allocated_rewards, 2_000);
    }

    #[test]
    fn skipped_time_stops_at_the_window_end() {
        let mut p = pool(10_000, 10_000);
        p.total_staked = 100;
        p.arm_reward_clock(1_000);
        p.advance(10_000).unwrap();
        p.total_staked = 0;
        p.advance(50_000).unwrap();
        assert_eq!(p.total_skipped_duration, 1_000);
    }

    #[test]
    fn cancel_refunds_unallocated_budget() {
        let mut p = pool(10_000, 10_000);
        p.total_staked = 100;
        p.arm_reward_clock(1_000);
        p.advance(2_000).unwrap();
        p.total_staked = 0;
        // Pool sits empty for 2000s, then the creator cancels.
        let refund = p.cancel(4_000).unwrap();
        assert_eq!(refund, 9_000);
        assert_eq!(p.cancelled_at, 4_000);
    }

    #[test]
    fn cancelled_pool_is_frozen() {
        let mut p = pool(10_000, 10_000);
        p.total_staked = 100;
        p.arm_reward_clock(1_000);
        p.cancel(2_000).unwrap();
        let acc = p.acc_reward_per_share;
        let allocated = p.total_allocated_rewards;
        p.advance(10_999).unwrap();
        assert_eq!(p.acc_reward_per_share, acc);
        assert_eq!(p.total_allocated_rewards, allocated);
        assert!(p.cancel(10_999).is_err());
    }

    #[test]
    fn scheduled_start_defers_the_clock() {
        let mut p = pool(10_000, 10_000);
        p.reward_starts_at = 5_000;
        p.total_staked = 100;
        p.arm_reward_clock(1_000);
        assert_eq!(p.reward_started_at, 5_000);
        // Nothing accrues before the scheduled start.
        p.advance(4_000).unwrap();
        assert_eq!(p.total_allocated_rewards, 0);
        p.advance(6_000).unwrap();
        assert_eq!(p.total_allocated_rewards, 1_000);
    }

    #[test]
    fn elapsed_scheduled_start_arms_immediately() {
        let mut p = pool(10_000, 10_000);
        p.reward_starts_at = 5_000;
        p.arm_reward_clock(8_000);
        assert_eq!(p.reward_started_at, 8_000);
    }

    #[test]
    fn losing_all_stakers_before_the_start_rearms() {
        let mut p = pool(10_000, 10_000);
        p.reward_starts_at = 5_000;
        p.total_staked = 100;
        p.arm_reward_clock(1_000);

        p.total_staked = 0;
        p.rearm_if_prestart(2_000);
        assert_eq!(p.reward_started_at, 0);
        assert_eq!(p.last_reward_updated_at, 0);
    }

    #[test]
    fn no_rearm_once_distribution_began() {
        let mut p = pool(10_000, 10_000);
        p.reward_starts_at = 5_000;
        p.total_staked = 100;
        p.arm_reward_clock(1_000);
        p.advance(6_000).unwrap();
        p.total_staked = 0;
        p.rearm_if_prestart(6_000);
        assert_eq!(p.reward_started_at, 5_000);
    }

    #[test]
    fn finish_boundary_is_closed_open() {
        let mut p = pool(10_000, 10_000);
        p.arm_reward_clock(1_000);
        assert!(!p.is_finished(10_999));
        assert!(p.is_finished(11_000));
        assert!(p.is_finished(11_001));
    }

    #[test]
    fn asset_kind_probe_accepts_exactly_two_programs() {
        assert_eq!(
            AssetKind::from_program_id(&anchor_spl::token::ID),
            Some(AssetKind::Token)
        );
        assert_eq!(
            AssetKind::from_program_id(&anchor_spl::token_2022::ID),
            Some(AssetKind::Token2022)
        );
        assert_eq!(AssetKind::from_program_id(&Pubkey::new_unique()), None);
    }
}
