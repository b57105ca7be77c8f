use crate::domain::UserId;

/// Exact match against the configured owner. An unset owner (0) matches nobody.
pub fn is_owner(user_id: Option<UserId>, owner_id: i64) -> bool {
    let Some(user_id) = user_id else {
        return false;
    };
    owner_id != 0 && user_id.0 == owner_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_check() {
        assert!(is_owner(Some(UserId(42)), 42));
        assert!(!is_owner(Some(UserId(43)), 42));
        assert!(!is_owner(None, 42));
        assert!(!is_owner(Some(UserId(0)), 0));
    }
}
