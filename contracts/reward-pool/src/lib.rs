#![no_std]

mod errors;
mod events;
pub mod math;
mod rewards;
mod storage;


pub use errors::{ContractError, ErrorCategory};
pub use storage::{PoolInfo, PoolKey, PoolSummary, UserInfo};

use soroban_sdk::{contract, contractimpl, token, Address, Env};

#[contract]
pub struct RewardPoolContract;

#[contractimpl]
impl RewardPoolContract {
    // ========== Admin Functions ==========

    /// One-time initialization.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if storage::has_admin(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        storage::set_admin(&env, &admin);
        storage::extend_instance_ttl(&env);

        events::publish_initialized(&env, admin);
        Ok(())
    }

    /// Transfer admin role to a new address.
    pub fn set_admin(env: Env, admin: Address, new_admin: Address) -> Result<(), ContractError> {
        Self::require_admin(&env, &admin)?;
        storage::extend_instance_ttl(&env);
        storage::set_admin(&env, &new_admin);

        events::publish_admin_changed(&env, admin, new_admin);
        Ok(())
    }

    /// Register a pool distributing `reward_token` to stakers of `stake_token`.
    ///
    /// The accumulator precision is derived from the stake token's decimals.
    /// A non-zero `user_cap_window` caps every position at `per_user_cap`
    /// until `start_time + user_cap_window`.
    #[allow(clippy::too_many_arguments)]
    pub fn create_pool(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
        reward_rate: i128,
        start_time: u64,
        end_time: u64,
        per_user_cap: i128,
        user_cap_window: u64,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &admin)?;
        storage::extend_instance_ttl(&env);

        if stake_token == reward_token {
            return Err(ContractError::IdenticalTokens);
        }
        let key = PoolKey {
            stake_token,
            reward_token,
        };
        if storage::has_pool(&env, &key) {
            return Err(ContractError::PoolAlreadyExists);
        }

        Self::require_valid_window(&env, start_time, end_time)?;
        if reward_rate < 0 || per_user_cap < 0 {
            return Err(ContractError::InvalidAmount);
        }
        if user_cap_window > 0 && per_user_cap == 0 {
            return Err(ContractError::ZeroUserCap);
        }

        let decimals = token::Client::new(&env, &key.stake_token).decimals();
        let precision_factor = rewards::precision_factor(decimals)?;

        let pool = PoolInfo {
            total_staked: 0,
            total_reward_reserve: 0,
            reward_rate,
            start_time,
            end_time,
            last_update_time: start_time,
            acc_reward_per_share: 0,
            precision_factor,
            user_cap_window,
            per_user_cap: if user_cap_window > 0 { per_user_cap } else { 0 },
        };
        storage::set_pool(&env, &key, &pool);

        events::publish_pool_created(&env, key, &pool);
        Ok(())
    }

    /// Transfer reward tokens from the admin into the pool's reserve.
    pub fn add_reward(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &admin)?;
        storage::extend_instance_ttl(&env);

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let key = PoolKey {
            stake_token,
            reward_token,
        };
        let mut pool = Self::load_pool(&env, &key)?;

        pool.total_reward_reserve = pool
            .total_reward_reserve
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        token::Client::new(&env, &key.reward_token).transfer(
            &admin,
            &env.current_contract_address(),
            &amount,
        );
        storage::set_pool(&env, &key, &pool);

        events::publish_reward_added(&env, key, amount, pool.total_reward_reserve);
        Ok(())
    }

    /// End emission now. Accrual up to this moment is kept.
    pub fn stop_reward(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &admin)?;
        storage::extend_instance_ttl(&env);

        let key = PoolKey {
            stake_token,
            reward_token,
        };
        let mut pool = Self::load_pool(&env, &key)?;
        let now = env.ledger().timestamp();

        // end_time must stay after start_time; before that, use set_time_window.
        if now <= pool.start_time {
            return Err(ContractError::PoolNotStarted);
        }
        // Stopping an ended pool would move end_time forward.
        if now >= pool.end_time {
            return Err(ContractError::PoolEnded);
        }
        pool.end_time = now;
        storage::set_pool(&env, &key, &pool);

        events::publish_reward_stopped(&env, key, now);
        Ok(())
    }

    /// Raise the per-user cap, or lift it entirely with `enable = false`.
    /// Only possible while the cap window is still running.
    pub fn set_user_cap(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
        enable: bool,
        new_cap: i128,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &admin)?;
        storage::extend_instance_ttl(&env);

        let key = PoolKey {
            stake_token,
            reward_token,
        };
        let mut pool = Self::load_pool(&env, &key)?;
        let now = env.ledger().timestamp();

        if !pool.cap_active(now) {
            return Err(ContractError::CapWindowExpired);
        }

        if enable {
            if new_cap <= pool.per_user_cap {
                return Err(ContractError::CapCanOnlyIncrease);
            }
            pool.per_user_cap = new_cap;
        } else {
            pool.user_cap_window = 0;
            pool.per_user_cap = 0;
        }
        storage::set_pool(&env, &key, &pool);

        events::publish_user_cap_changed(&env, key, enable, pool.per_user_cap);
        Ok(())
    }

    /// Change the emission rate. Only before emission starts.
    pub fn set_reward_rate(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
        reward_rate: i128,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &admin)?;
        storage::extend_instance_ttl(&env);

        let key = PoolKey {
            stake_token,
            reward_token,
        };
        let mut pool = Self::load_pool(&env, &key)?;

        if env.ledger().timestamp() >= pool.start_time {
            return Err(ContractError::PoolAlreadyStarted);
        }
        if reward_rate < 0 {
            return Err(ContractError::InvalidAmount);
        }
        pool.reward_rate = reward_rate;
        storage::set_pool(&env, &key, &pool);

        events::publish_reward_rate_changed(&env, key, reward_rate);
        Ok(())
    }

    /// Move the emission window. Only before the current window starts.
    pub fn set_time_window(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
        start_time: u64,
        end_time: u64,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &admin)?;
        storage::extend_instance_ttl(&env);

        let key = PoolKey {
            stake_token,
            reward_token,
        };
        let mut pool = Self::load_pool(&env, &key)?;

        if env.ledger().timestamp() >= pool.start_time {
            return Err(ContractError::PoolAlreadyStarted);
        }
        Self::require_valid_window(&env, start_time, end_time)?;

        pool.start_time = start_time;
        pool.end_time = end_time;
        pool.last_update_time = start_time;
        storage::set_pool(&env, &key, &pool);

        events::publish_time_window_changed(&env, key, start_time, end_time);
        Ok(())
    }

    /// Drain the whole reward reserve to the admin. Returns the amount drained.
    pub fn emergency_reward_withdraw(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
    ) -> Result<i128, ContractError> {
        Self::require_admin(&env, &admin)?;
        storage::extend_instance_ttl(&env);

        let key = PoolKey {
            stake_token,
            reward_token,
        };
        let mut pool = Self::load_pool(&env, &key)?;

        let amount = pool.total_reward_reserve;
        if amount <= 0 {
            return Err(ContractError::InsufficientRewardReserve);
        }
        pool.total_reward_reserve = 0;

        token::Client::new(&env, &key.reward_token).transfer(
            &env.current_contract_address(),
            &admin,
            &amount,
        );
        storage::set_pool(&env, &key, &pool);

        events::publish_emergency_reward_withdraw(&env, key, admin, amount);
        Ok(amount)
    }

    // ========== User Functions ==========

    /// Stake `amount` and collect pending reward on the existing position.
    /// Returns the reward paid. `amount = 0` only harvests.
    pub fn deposit(
        env: Env,
        user: Address,
        stake_token: Address,
        reward_token: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        user.require_auth();
        storage::extend_instance_ttl(&env);

        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        let key = PoolKey {
            stake_token,
            reward_token,
        };
        let mut pool = Self::load_pool(&env, &key)?;
        let now = env.ledger().timestamp();

        if now >= pool.end_time {
            return Err(ContractError::PoolEnded);
        }

        rewards::advance(&env, &mut pool, now)?;
        let mut info = storage::get_user(&env, &key, &user).unwrap_or_default();

        let new_amount = info
            .amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if pool.cap_active(now) && new_amount > pool.per_user_cap {
            return Err(ContractError::ExceedsUserCap);
        }

        let reward = if info.amount > 0 {
            rewards::pending(&env, &pool, &info)?
        } else {
            0
        };
        Self::pay_reward(&env, &key, &mut pool, &mut info, &user, reward)?;

        if amount > 0 {
            token::Client::new(&env, &key.stake_token).transfer(
                &user,
                &env.current_contract_address(),
                &amount,
            );
        }

        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        info.amount = new_amount;
        info.reward_debt = rewards::accrued(&env, &pool, info.amount)?;

        storage::set_pool(&env, &key, &pool);
        storage::set_user(&env, &key, &user, &info);

        events::publish_deposit(&env, key, user, amount, reward, pool.total_staked);
        Ok(reward)
    }

    /// Unstake `amount` and collect all pending reward. Returns the reward paid.
    pub fn withdraw(
        env: Env,
        user: Address,
        stake_token: Address,
        reward_token: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        user.require_auth();
        storage::extend_instance_ttl(&env);

        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        let key = PoolKey {
            stake_token,
            reward_token,
        };
        let mut pool = Self::load_pool(&env, &key)?;
        let mut info = storage::get_user(&env, &key, &user).ok_or(ContractError::NoStakeFound)?;

        if amount > info.amount {
            return Err(ContractError::InsufficientStake);
        }

        rewards::advance(&env, &mut pool, env.ledger().timestamp())?;

        let reward = rewards::pending(&env, &pool, &info)?;
        Self::pay_reward(&env, &key, &mut pool, &mut info, &user, reward)?;

        info.amount -= amount;
        pool.total_staked -= amount;
        if amount > 0 {
            token::Client::new(&env, &key.stake_token).transfer(
                &env.current_contract_address(),
                &user,
                &amount,
            );
        }
        info.reward_debt = rewards::accrued(&env, &pool, info.amount)?;

        storage::set_pool(&env, &key, &pool);
        storage::set_user(&env, &key, &user, &info);

        events::publish_withdraw(&env, key, user, amount, reward, pool.total_staked);
        Ok(reward)
    }

    /// Return the whole stake without settling. Reward accrued since the
    /// last settlement is forfeited. Returns the stake returned.
    pub fn emergency_withdraw(
        env: Env,
        user: Address,
        stake_token: Address,
        reward_token: Address,
    ) -> Result<i128, ContractError> {
        user.require_auth();
        storage::extend_instance_ttl(&env);

        let key = PoolKey {
            stake_token,
            reward_token,
        };
        let mut pool = Self::load_pool(&env, &key)?;
        let mut info = storage::get_user(&env, &key, &user).ok_or(ContractError::NoStakeFound)?;

        let amount = info.amount;
        if amount <= 0 {
            return Err(ContractError::InsufficientStake);
        }

        info.amount = 0;
        info.reward_debt = 0;
        pool.total_staked -= amount;

        token::Client::new(&env, &key.stake_token).transfer(
            &env.current_contract_address(),
            &user,
            &amount,
        );
        storage::set_pool(&env, &key, &pool);
        storage::set_user(&env, &key, &user, &info);

        events::publish_emergency_withdraw(&env, key, user, amount);
        Ok(amount)
    }

    // ========== View Functions ==========

    /// Balances and configuration of a pool.
    pub fn pool_summary(
        env: Env,
        stake_token: Address,
        reward_token: Address,
    ) -> Result<PoolSummary, ContractError> {
        let key = PoolKey {
            stake_token,
            reward_token,
        };
        let pool = Self::load_pool(&env, &key)?;
        Ok(PoolSummary::from(&pool))
    }

    /// Full pool record, accumulator included.
    pub fn get_pool_info(
        env: Env,
        stake_token: Address,
        reward_token: Address,
    ) -> Result<PoolInfo, ContractError> {
        let key = PoolKey {
            stake_token,
            reward_token,
        };
        Self::load_pool(&env, &key)
    }

    pub fn has_pool(env: Env, stake_token: Address, reward_token: Address) -> bool {
        storage::has_pool(
            &env,
            &PoolKey {
                stake_token,
                reward_token,
            },
        )
    }

    /// Staked balance of `user`; 0 if the user never staked.
    pub fn get_user_stake(
        env: Env,
        stake_token: Address,
        reward_token: Address,
        user: Address,
    ) -> i128 {
        let key = PoolKey {
            stake_token,
            reward_token,
        };
        storage::get_user(&env, &key, &user)
            .map(|info| info.amount)
            .unwrap_or(0)
    }

    pub fn get_user_info(
        env: Env,
        stake_token: Address,
        reward_token: Address,
        user: Address,
    ) -> Option<UserInfo> {
        let key = PoolKey {
            stake_token,
            reward_token,
        };
        storage::get_user(&env, &key, &user)
    }

    /// Query unclaimed reward for a user at the current ledger time.
    /// Simulates the accumulator advance; stored state is not touched.
    pub fn get_pending_reward(
        env: Env,
        stake_token: Address,
        reward_token: Address,
        user: Address,
    ) -> Result<i128, ContractError> {
        let key = PoolKey {
            stake_token,
            reward_token,
        };
        let (pool, info) = match (
            storage::get_pool(&env, &key),
            storage::get_user(&env, &key, &user),
        ) {
            (Some(pool), Some(info)) => (pool, info),
            _ => return Ok(0),
        };

        let pool = rewards::projected(&env, &pool, env.ledger().timestamp())?;
        rewards::pending(&env, &pool, &info)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        storage::get_admin(&env).ok_or(ContractError::NotInitialized)
    }

    // ========== Internal Helpers ==========

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        caller.require_auth();
        let admin = storage::get_admin(env).ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn load_pool(env: &Env, key: &PoolKey) -> Result<PoolInfo, ContractError> {
        storage::get_pool(env, key).ok_or(ContractError::PoolNotFound)
    }

    fn require_valid_window(env: &Env, start_time: u64, end_time: u64) -> Result<(), ContractError> {
        if start_time <= env.ledger().timestamp() {
            return Err(ContractError::StartNotInFuture);
        }
        if start_time >= end_time {
            return Err(ContractError::StartNotBeforeEnd);
        }
        Ok(())
    }

    /// Move `amount` of reward from the pool reserve to `user`.
    fn pay_reward(
        env: &Env,
        key: &PoolKey,
        pool: &mut PoolInfo,
        info: &mut UserInfo,
        user: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        if amount <= 0 {
            return Ok(());
        }
        if pool.total_reward_reserve < amount {
            return Err(ContractError::InsufficientRewardReserve);
        }

        pool.total_reward_reserve -= amount;
        info.lifetime_rewards_paid = info
            .lifetime_rewards_paid
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        token::Client::new(env, &key.reward_token).transfer(
            &env.current_contract_address(),
            user,
            &amount,
        );
        Ok(())
    }
}
