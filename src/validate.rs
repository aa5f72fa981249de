//! Input predicates for the "new game" form. The game model never calls these.

use crate::config::{MAX_BOARD_SIZE, MIN_BOARD_SIZE, USERNAME_MAX_LEN, USERNAME_MIN_LEN};

pub fn is_valid_battlefield_size(size: usize) -> bool {
    (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size)
}

/// 3 to 25 characters out of ASCII letters, digits, `.`, `-`, space and `@`.
pub fn is_valid_username(name: &str) -> bool {
    let len = name.chars().count();
    (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len)
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ' ' | '@'))
}
