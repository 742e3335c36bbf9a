#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the reward accounting.
//!
//! Invariants tested:
//! - `total_staked` always equals the sum of every user's stake
//! - the accumulator and its timestamp never decrease
//! - rewards paid plus the remaining reserve never exceed what was funded
//! - reading pending reward twice gives the same answer
//! - the serial order of unrelated users' calls does not change the books

use proptest::prelude::*;
use reward_pool::{RewardPoolContract, RewardPoolContractClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{token, Address, Env};

const START: u64 = 1000;
const END: u64 = 2000;
const RATE: i128 = 7;
const RESERVE: i128 = 10_000_000;

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Setup {
    env: Env,
    contract_id: Address,
    stake_token: Address,
    reward_token: Address,
    users: [Address; 3],
}

impl Setup {
    fn client(&self) -> RewardPoolContractClient<'_> {
        RewardPoolContractClient::new(&self.env, &self.contract_id)
    }
}

fn setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = 900);

    let contract_id = env.register(RewardPoolContract, ());
    let client = RewardPoolContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let stake_token = env
        .register_stellar_asset_contract_v2(token_admin.clone())
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(token_admin)
        .address();

    client.initialize(&admin);
    client.create_pool(
        &admin,
        &stake_token,
        &reward_token,
        &RATE,
        &START,
        &END,
        &0,
        &0,
    );
    token::StellarAssetClient::new(&env, &reward_token).mint(&admin, &RESERVE);
    client.add_reward(&admin, &stake_token, &reward_token, &RESERVE);

    let users = [
        Address::generate(&env),
        Address::generate(&env),
        Address::generate(&env),
    ];
    let stake = token::StellarAssetClient::new(&env, &stake_token);
    for user in users.iter() {
        stake.mint(user, &1_000_000);
    }

    Setup {
        env,
        contract_id,
        stake_token,
        reward_token,
        users,
    }
}

fn set_time(env: &Env, timestamp: u64) {
    env.ledger().with_mut(|li| li.timestamp = timestamp);
}

#[derive(Clone, Debug)]
enum Op {
    Deposit(usize, i128),
    Withdraw(usize, i128),
    EmergencyWithdraw(usize),
}

fn op_strategy() -> impl Strategy<Value = (Op, u64)> {
    let op = prop_oneof![
        3 => (0usize..3, 0i128..5_000).prop_map(|(u, a)| Op::Deposit(u, a)),
        2 => (0usize..3, 0i128..5_000).prop_map(|(u, a)| Op::Withdraw(u, a)),
        1 => (0usize..3).prop_map(Op::EmergencyWithdraw),
    ];
    (op, 0u64..150)
}

fn apply(s: &Setup, op: &Op) {
    let client = s.client();
    // Rejected calls roll back; they are part of the sequence on purpose.
    match op {
        Op::Deposit(u, amount) => {
            let _ = client.try_deposit(&s.users[*u], &s.stake_token, &s.reward_token, amount);
        }
        Op::Withdraw(u, amount) => {
            let _ = client.try_withdraw(&s.users[*u], &s.stake_token, &s.reward_token, amount);
        }
        Op::EmergencyWithdraw(u) => {
            let _ = client.try_emergency_withdraw(&s.users[*u], &s.stake_token, &s.reward_token);
        }
    }
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Pool totals, accumulator and reserve stay consistent after every call.
    #[test]
    fn prop_ledger_invariants(ops in prop::collection::vec(op_strategy(), 1..20)) {
        let s = setup();
        let client = s.client();
        let reward = token::Client::new(&s.env, &s.reward_token);

        let mut now = 950u64;
        let mut last_acc = 0i128;
        let mut last_update = 0u64;

        for (op, dt) in ops.iter() {
            now += dt;
            set_time(&s.env, now);
            apply(&s, op);

            let info = client.get_pool_info(&s.stake_token, &s.reward_token);
            let staked: i128 = s
                .users
                .iter()
                .map(|u| client.get_user_stake(&s.stake_token, &s.reward_token, u))
                .sum();
            prop_assert_eq!(info.total_staked, staked);

            prop_assert!(info.acc_reward_per_share >= last_acc);
            prop_assert!(info.last_update_time >= last_update);
            last_acc = info.acc_reward_per_share;
            last_update = info.last_update_time;

            let paid: i128 = s.users.iter().map(|u| reward.balance(u)).sum();
            prop_assert!(paid + info.total_reward_reserve <= RESERVE);
            prop_assert_eq!(reward.balance(&s.contract_id), info.total_reward_reserve);
        }
    }

    /// Querying pending reward is a pure projection.
    #[test]
    fn prop_pending_reward_idempotent(
        amount in 1i128..100_000,
        deposit_at in 900u64..1900,
        query_after in 0u64..2000,
    ) {
        let s = setup();
        let client = s.client();
        let user = &s.users[0];

        set_time(&s.env, deposit_at);
        client.deposit(user, &s.stake_token, &s.reward_token, &amount);

        set_time(&s.env, deposit_at + query_after);
        let before = client.get_pool_info(&s.stake_token, &s.reward_token);
        let first = client.get_pending_reward(&s.stake_token, &s.reward_token, user);
        let second = client.get_pending_reward(&s.stake_token, &s.reward_token, user);
        let after = client.get_pool_info(&s.stake_token, &s.reward_token);

        prop_assert_eq!(first, second);
        prop_assert_eq!(before, after);
        prop_assert!(first <= RATE * (END - START) as i128);
    }

    /// Two users acting at the same instants end with the same books
    /// whichever of them goes first.
    #[test]
    fn prop_order_independent(
        a in 1i128..10_000,
        b in 1i128..10_000,
        a_out in 0i128..10_000,
        b_in in 0i128..10_000,
        t1 in 1000u64..1500,
        t2 in 1500u64..2500,
    ) {
        let a_out = a_out.min(a);
        let run = |a_first: bool| {
            let s = setup();
            let client = s.client();
            let (ua, ub) = (&s.users[0], &s.users[1]);

            set_time(&s.env, t1);
            if a_first {
                client.deposit(ua, &s.stake_token, &s.reward_token, &a);
                client.deposit(ub, &s.stake_token, &s.reward_token, &b);
            } else {
                client.deposit(ub, &s.stake_token, &s.reward_token, &b);
                client.deposit(ua, &s.stake_token, &s.reward_token, &a);
            }

            set_time(&s.env, t2);
            if a_first {
                client.withdraw(ua, &s.stake_token, &s.reward_token, &a_out);
                let _ = client.try_deposit(ub, &s.stake_token, &s.reward_token, &b_in);
            } else {
                let _ = client.try_deposit(ub, &s.stake_token, &s.reward_token, &b_in);
                client.withdraw(ua, &s.stake_token, &s.reward_token, &a_out);
            }

            (
                client.get_pool_info(&s.stake_token, &s.reward_token).total_staked,
                client.get_user_info(&s.stake_token, &s.reward_token, ua).unwrap(),
                client.get_user_info(&s.stake_token, &s.reward_token, ub).unwrap(),
            )
        };

        let (total_1, a_1, b_1) = run(true);
        let (total_2, a_2, b_2) = run(false);
        prop_assert_eq!(total_1, total_2);
        prop_assert_eq!(a_1.amount, a_2.amount);
        prop_assert_eq!(a_1.reward_debt, a_2.reward_debt);
        prop_assert_eq!(b_1.amount, b_2.amount);
        prop_assert_eq!(b_1.reward_debt, b_2.reward_debt);
    }
}
