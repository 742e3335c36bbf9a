use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::storage::{PoolInfo, PoolKey};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChangedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a pool is registered for a stake/reward pair.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreatedEvent {
    pub pool: PoolKey,
    pub reward_rate: i128,
    pub start_time: u64,
    pub end_time: u64,
    pub per_user_cap: i128,
    pub user_cap_window: u64,
    pub precision_factor: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardAddedEvent {
    pub pool: PoolKey,
    pub amount: i128,
    pub total_reward_reserve: i128,
    pub timestamp: u64,
}

/// Fired on deposit. `reward_paid` is the reward settled before the deposit.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub pool: PoolKey,
    pub user: Address,
    pub amount: i128,
    pub reward_paid: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub pool: PoolKey,
    pub user: Address,
    pub amount: i128,
    pub reward_paid: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a user exits without settling. Pending reward is forfeited.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub pool: PoolKey,
    pub user: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyRewardWithdrawEvent {
    pub pool: PoolKey,
    pub admin: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardStoppedEvent {
    pub pool: PoolKey,
    pub end_time: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserCapChangedEvent {
    pub pool: PoolKey,
    pub enabled: bool,
    pub per_user_cap: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateChangedEvent {
    pub pool: PoolKey,
    pub reward_rate: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeWindowChangedEvent {
    pub pool: PoolKey,
    pub start_time: u64,
    pub end_time: u64,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_changed(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_SET"), new_admin.clone()),
        AdminChangedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_created(env: &Env, pool: PoolKey, info: &PoolInfo) {
    env.events().publish(
        (symbol_short!("POOL_NEW"), pool.stake_token.clone()),
        PoolCreatedEvent {
            pool,
            reward_rate: info.reward_rate,
            start_time: info.start_time,
            end_time: info.end_time,
            per_user_cap: info.per_user_cap,
            user_cap_window: info.user_cap_window,
            precision_factor: info.precision_factor,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_added(env: &Env, pool: PoolKey, amount: i128, total_reward_reserve: i128) {
    env.events().publish(
        (symbol_short!("RWD_ADD"), pool.stake_token.clone()),
        RewardAddedEvent {
            pool,
            amount,
            total_reward_reserve,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit(
    env: &Env,
    pool: PoolKey,
    user: Address,
    amount: i128,
    reward_paid: i128,
    total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), user.clone()),
        DepositEvent {
            pool,
            user,
            amount,
            reward_paid,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw(
    env: &Env,
    pool: PoolKey,
    user: Address,
    amount: i128,
    reward_paid: i128,
    total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), user.clone()),
        WithdrawEvent {
            pool,
            user,
            amount,
            reward_paid,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdraw(env: &Env, pool: PoolKey, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("EMRG_WD"), user.clone()),
        EmergencyWithdrawEvent {
            pool,
            user,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_reward_withdraw(env: &Env, pool: PoolKey, admin: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("EMRG_RWD"), admin.clone()),
        EmergencyRewardWithdrawEvent {
            pool,
            admin,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_stopped(env: &Env, pool: PoolKey, end_time: u64) {
    env.events().publish(
        (symbol_short!("RWD_STOP"), pool.stake_token.clone()),
        RewardStoppedEvent {
            pool,
            end_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_user_cap_changed(env: &Env, pool: PoolKey, enabled: bool, per_user_cap: i128) {
    env.events().publish(
        (symbol_short!("CAP_SET"), pool.stake_token.clone()),
        UserCapChangedEvent {
            pool,
            enabled,
            per_user_cap,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_rate_changed(env: &Env, pool: PoolKey, reward_rate: i128) {
    env.events().publish(
        (symbol_short!("RATE_SET"), pool.stake_token.clone()),
        RewardRateChangedEvent {
            pool,
            reward_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_time_window_changed(env: &Env, pool: PoolKey, start_time: u64, end_time: u64) {
    env.events().publish(
        (symbol_short!("WIN_SET"), pool.stake_token.clone()),
        TimeWindowChangedEvent {
            pool,
            start_time,
            end_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}
