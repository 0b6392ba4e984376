//! Authorization checks over user records.

use crate::models::users::User;

/// A user may edit their own record; admins may edit anyone.
pub fn can_update(actor: &User, subject: &User) -> bool {
    actor.id == subject.id || actor.is_admin
}

/// Admins may delete any user except themselves.
pub fn can_destroy(actor: &User, subject: &User) -> bool {
    actor.is_admin && actor.id != subject.id
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    fn user(is_admin: bool) -> User {
        User {
            id: Uuid::new_v4(),
            name: "someone".to_string(),
            email: format!("{}@example.com", Uuid::new_v4()),
            is_admin,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(false, false, false)]
    #[case(false, true, false)]
    #[case(true, false, true)]
    #[case(true, true, true)]
    fn test_can_update_other(
        #[case] actor_admin: bool,
        #[case] subject_admin: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(
            can_update(&user(actor_admin), &user(subject_admin)),
            expected
        );
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_can_update_self(#[case] is_admin: bool) {
        let me = user(is_admin);
        assert!(can_update(&me, &me));
    }

    #[rstest]
    #[case(false, false)]
    #[case(true, true)]
    fn test_can_destroy_other(#[case] actor_admin: bool, #[case] expected: bool) {
        assert_eq!(can_destroy(&user(actor_admin), &user(false)), expected);
    }

    #[test]
    fn test_admin_cannot_destroy_self() {
        let admin = user(true);
        assert!(!can_destroy(&admin, &admin));
    }
}
