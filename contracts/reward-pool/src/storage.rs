use soroban_sdk::{contracttype, Address, Env};

// Storage TTL constants (in ledgers, ~5 seconds each)
const INSTANCE_TTL_THRESHOLD: u32 = 17_280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518_400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17_280; // ~1 day
const PERSISTENT_TTL_EXTEND: u32 = 518_400; // ~30 days

/// A pool exists at most once per (stake asset, reward asset) pair.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolKey {
    pub stake_token: Address,
    pub reward_token: Address,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Pool(PoolKey),
    User(PoolKey, Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub total_staked: i128,
    pub total_reward_reserve: i128,
    pub reward_rate: i128,
    pub start_time: u64,
    pub end_time: u64,
    pub last_update_time: u64,
    pub acc_reward_per_share: i128, // scaled by precision_factor
    pub precision_factor: i128,
    pub user_cap_window: u64, // 0 = no per-user cap
    pub per_user_cap: i128,
}

impl PoolInfo {
    /// Per-user cap applies until `start_time + user_cap_window`.
    pub fn cap_active(&self, now: u64) -> bool {
        self.user_cap_window > 0 && now < self.start_time.saturating_add(self.user_cap_window)
    }
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserInfo {
    pub amount: i128,
    pub reward_debt: i128,
    pub lifetime_rewards_paid: i128,
}

/// Read-only projection of a pool's configuration and balances.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSummary {
    pub total_staked: i128,
    pub total_reward_reserve: i128,
    pub reward_rate: i128,
    pub start_time: u64,
    pub end_time: u64,
    pub user_cap_window: u64,
    pub per_user_cap: i128,
}

impl From<&PoolInfo> for PoolSummary {
    fn from(pool: &PoolInfo) -> Self {
        PoolSummary {
            total_staked: pool.total_staked,
            total_reward_reserve: pool.total_reward_reserve,
            reward_rate: pool.reward_rate,
            start_time: pool.start_time,
            end_time: pool.end_time,
            user_cap_window: pool.user_cap_window,
            per_user_cap: pool.per_user_cap,
        }
    }
}

// --- Instance storage helpers (Admin) ---

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

// --- Persistent storage helpers (Pool, User) ---

pub fn has_pool(env: &Env, key: &PoolKey) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Pool(key.clone()))
}

pub fn get_pool(env: &Env, key: &PoolKey) -> Option<PoolInfo> {
    let key = DataKey::Pool(key.clone());
    let pool: Option<PoolInfo> = env.storage().persistent().get(&key);
    if pool.is_some() {
        extend_persistent(env, &key);
    }
    pool
}

pub fn set_pool(env: &Env, key: &PoolKey, pool: &PoolInfo) {
    let key = DataKey::Pool(key.clone());
    env.storage().persistent().set(&key, pool);
    extend_persistent(env, &key);
}

pub fn get_user(env: &Env, key: &PoolKey, user: &Address) -> Option<UserInfo> {
    let key = DataKey::User(key.clone(), user.clone());
    let info: Option<UserInfo> = env.storage().persistent().get(&key);
    if info.is_some() {
        extend_persistent(env, &key);
    }
    info
}

pub fn set_user(env: &Env, key: &PoolKey, user: &Address, info: &UserInfo) {
    let key = DataKey::User(key.clone(), user.clone());
    env.storage().persistent().set(&key, info);
    extend_persistent(env, &key);
}

fn extend_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
