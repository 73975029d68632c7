use kernel::id::Id;

pub struct UserMarker;
pub type UserId = Id<UserMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_from_raw() {
        let user_id = UserId::from_raw(42);
        assert_eq!(user_id.get(), 42);
        assert!(user_id.is_assigned());
    }

    #[test]
    fn test_unassigned_ids() {
        assert!(!UserId::from_raw(0).is_assigned());
        assert!(!UserId::from_raw(-1).is_assigned());
    }
}
