use rand::Rng;
use rand::seq::SliceRandom;

const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijkmnpqrstuvwxyz";
const DIGITS: &[u8] = b"23456789";

/// 生成满足密码策略的临时密码（去掉易混淆字符）
pub fn generate_temporary_password(len: usize) -> String {
    let len = len.max(8);
    let mut rng = rand::rng();
    let all: Vec<u8> = [UPPER, LOWER, DIGITS].concat();

    // 每类字符至少一个
    let mut chars: Vec<u8> = vec![
        UPPER[rng.random_range(0..UPPER.len())],
        LOWER[rng.random_range(0..LOWER.len())],
        DIGITS[rng.random_range(0..DIGITS.len())],
    ];
    while chars.len() < len {
        chars.push(all[rng.random_range(0..all.len())]);
    }
    chars.shuffle(&mut rng);

    chars.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_password;

    #[test]
    fn test_temporary_password_meets_policy() {
        for _ in 0..50 {
            let password = generate_temporary_password(12);
            assert_eq!(password.len(), 12);
            assert!(validate_password(&password).is_valid, "{password}");
        }
    }

    #[test]
    fn test_minimum_length() {
        assert_eq!(generate_temporary_password(3).len(), 8);
    }
}
