//! Options of the user filter.

use evcs_model::dataset::ALL_USERS;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserOption {
    pub value: String,
    pub label: String,
}

/// Trailing decimal digits of an id: `User_10` -> 10.
pub fn numeric_suffix(id: &str) -> Option<u64> {
    let digits = id.len() - id.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    id[id.len() - digits..].parse().ok()
}

/// Sort ids by numeric suffix so `User_3` precedes `User_10`.
///
/// Ids without a suffix go last, alphabetically. Duplicates are removed.
pub fn sort_users(mut users: Vec<String>) -> Vec<String> {
    users.sort_by(|a, b| {
        let (na, nb) = (numeric_suffix(a), numeric_suffix(b));
        na.is_none()
            .cmp(&nb.is_none())
            .then(na.cmp(&nb))
            .then_with(|| a.cmp(b))
    });
    users.dedup();
    users
}

/// "All users" followed by every user in suffix order.
pub fn user_options(users: &[String]) -> Vec<UserOption> {
    std::iter::once(UserOption {
        value: ALL_USERS.to_string(),
        label: "All users".to_string(),
    })
    .chain(sort_users(users.to_vec()).into_iter().map(|id| UserOption {
        label: id.clone(),
        value: id,
    }))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn suffix_extraction() {
        assert_eq!(numeric_suffix("User_10"), Some(10));
        assert_eq!(numeric_suffix("42"), Some(42));
        assert_eq!(numeric_suffix("admin"), None);
        assert_eq!(numeric_suffix(""), None);
    }

    #[test]
    fn sorts_by_numeric_suffix_not_lexically() {
        let sorted = sort_users(ids(&["User_10", "User_3", "User_1", "User_22", "User_3"]));
        assert_eq!(sorted, ids(&["User_1", "User_3", "User_10", "User_22"]));
    }

    #[test]
    fn ids_without_suffix_go_last() {
        let sorted = sort_users(ids(&["guest", "User_2", "admin"]));
        assert_eq!(sorted, ids(&["User_2", "admin", "guest"]));
    }

    #[test]
    fn options_start_with_all_users() {
        let options = user_options(&ids(&["User_10", "User_3"]));
        assert_eq!(options[0].value, ALL_USERS);
        assert_eq!(options[0].label, "All users");
        assert_eq!(options[1].value, "User_3");
        assert_eq!(options[2].value, "User_10");
    }
}
