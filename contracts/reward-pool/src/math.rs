use soroban_sdk::{Env, I256};

use crate::errors::ContractError;

pub fn min<T: Ord>(a: T, b: T) -> T {
    if a < b {
        a
    } else {
        b
    }
}

pub fn max<T: Ord>(a: T, b: T) -> T {
    if a > b {
        a
    } else {
        b
    }
}

/// Integer square root, bit by bit. Returns the largest `r` with `r * r <= x`.
pub fn sqrt(x: u128) -> u128 {
    if x < 2 {
        return x;
    }

    let mut rem = x;
    let mut res: u128 = 0;
    let mut bit: u128 = 1 << 126;
    while bit > rem {
        bit >>= 2;
    }

    while bit != 0 {
        if rem >= res + bit {
            rem -= res + bit;
            res = (res >> 1) + bit;
        } else {
            res >>= 1;
        }
        bit >>= 2;
    }
    res
}

/// Exponentiation by squaring. Callers keep the result inside `u128`.
pub fn pow(base: u128, exponent: u32) -> u128 {
    let mut result: u128 = 1;
    let mut base = base;
    let mut exponent = exponent;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result *= base;
        }
        exponent >>= 1;
        if exponent > 0 {
            base *= base;
        }
    }
    result
}

pub fn power_of_ten(n: u32) -> u128 {
    pow(10, n)
}

/// `x * y / z` with a 256-bit intermediate product, truncated toward zero.
pub fn mul_div(env: &Env, x: i128, y: i128, z: i128) -> Result<i128, ContractError> {
    if z == 0 {
        return Err(ContractError::DivideByZero);
    }

    let product = I256::from_i128(env, x).mul(&I256::from_i128(env, y));
    product
        .div(&I256::from_i128(env, z))
        .to_i128()
        .ok_or(ContractError::ArithmeticOverflow)
}
