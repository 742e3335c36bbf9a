use soroban_sdk::Env;

use crate::errors::ContractError;
use crate::math;
use crate::storage::{PoolInfo, UserInfo};

/// Stake decimals plus the precision exponent always add up to this.
pub const PRECISION_DECIMALS: u32 = 9;

/// Scaling factor for `acc_reward_per_share`: `10^(9 - stake_decimals)`.
pub fn precision_factor(stake_decimals: u32) -> Result<i128, ContractError> {
    if stake_decimals > PRECISION_DECIMALS {
        return Err(ContractError::UnsupportedDecimals);
    }
    Ok(math::power_of_ten(PRECISION_DECIMALS - stake_decimals) as i128)
}

/// Seconds of `[from, to)` that fall before `end`.
pub fn get_multiplier(from: u64, to: u64, end: u64) -> u64 {
    math::min(to, end).saturating_sub(from)
}

/// Advance the accumulator of `pool` to `now`. Never moves time backward.
///
/// Intervals with nothing staked are skipped: their emission is not
/// distributed to anyone.
pub fn advance(env: &Env, pool: &mut PoolInfo, now: u64) -> Result<(), ContractError> {
    if now <= pool.last_update_time {
        return Ok(());
    }

    if pool.total_staked == 0 {
        pool.last_update_time = now;
        return Ok(());
    }

    let elapsed = get_multiplier(pool.last_update_time, now, pool.end_time);
    if elapsed == 0 {
        return Ok(());
    }

    let reward = pool
        .reward_rate
        .checked_mul(elapsed as i128)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let increment = math::mul_div(env, reward, pool.precision_factor, pool.total_staked)?;
    let new_acc = pool
        .acc_reward_per_share
        .checked_add(increment)
        .ok_or(ContractError::ArithmeticOverflow)?;

    // A zero increment leaves last_update_time in place so the
    // rounding dust keeps accumulating toward the next call.
    if new_acc == pool.acc_reward_per_share {
        return Ok(());
    }

    pool.acc_reward_per_share = new_acc;
    pool.last_update_time = now;
    Ok(())
}

/// View-only: the pool as it would look after `advance(now)`, without
/// touching storage.
pub fn projected(env: &Env, pool: &PoolInfo, now: u64) -> Result<PoolInfo, ContractError> {
    let now = math::max(now, pool.last_update_time);
    let mut pool = pool.clone();
    advance(env, &mut pool, now)?;
    Ok(pool)
}

/// Reward earned by `amount` of stake at the pool's current accumulator.
/// This is also the reward_debt a position must carry after settlement.
pub fn accrued(env: &Env, pool: &PoolInfo, amount: i128) -> Result<i128, ContractError> {
    math::mul_div(env, amount, pool.acc_reward_per_share, pool.precision_factor)
}

/// Unpaid reward of `user`. Only meaningful right after `advance`.
pub fn pending(env: &Env, pool: &PoolInfo, user: &UserInfo) -> Result<i128, ContractError> {
    accrued(env, pool, user.amount)?
        .checked_sub(user.reward_debt)
        .ok_or(ContractError::ArithmeticOverflow)
}
