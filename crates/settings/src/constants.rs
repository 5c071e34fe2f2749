//! Portal-wide setting defaults and option catalogs.

use seri_arcade_core::Gp;

pub const SETTINGS_STORAGE_KEY: &str = "seri-arcade-settings";

pub const DEFAULT_NICKNAME: &str = "Guest";
pub const MAX_NICKNAME_LEN: usize = 20;

pub const DEFAULT_AVATAR: &str = "1001";

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;
pub const DEFAULT_DIFFICULTY: u8 = 3;

pub const DEFAULT_DAILY_GP: Gp = Gp::new(300);
pub const DAILY_GP_OPTIONS: [Gp; 5] = [
    Gp::new(100),
    Gp::new(200),
    Gp::new(300),
    Gp::new(500),
    Gp::new(1000),
];

/// Avatar ids come in two sheets of 64: `1001..=1064` and `2000..=2063`.
pub fn is_known_avatar(avatar: &str) -> bool {
    if avatar.starts_with('0') || !avatar.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match avatar.parse::<u32>() {
        Ok(id) => (1001..=1064).contains(&id) || (2000..=2063).contains(&id),
        Err(_) => false,
    }
}

pub fn is_daily_gp_option(amount: Gp) -> bool {
    DAILY_GP_OPTIONS.contains(&amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_catalog_bounds() {
        assert!(is_known_avatar("1001"));
        assert!(is_known_avatar("1064"));
        assert!(is_known_avatar("2000"));
        assert!(is_known_avatar("2063"));

        assert!(!is_known_avatar("1000"));
        assert!(!is_known_avatar("1065"));
        assert!(!is_known_avatar("2064"));
        assert!(!is_known_avatar("01001"));
        assert!(!is_known_avatar("+1001"));
        assert!(!is_known_avatar("cat"));
    }
}
