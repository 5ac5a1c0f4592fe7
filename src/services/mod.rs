//! Use cases behind each screen.
//!
//! Every function takes the repository as a generic trait bound, checks the
//! caller's role first, and never touches the store when validation fails.

pub mod api;
pub mod appointments;
pub mod catalog;
pub mod clients;
pub mod errors;
pub mod main;

pub use errors::{ServiceError, ServiceResult};

use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::types::OwnerId;

/// Owner reference stamped on created records; `None` for a blank subject.
pub(crate) fn owner_of(user: &AuthenticatedUser) -> Option<OwnerId> {
    OwnerId::new(user.sub.as_str()).ok()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::staff;

    #[test]
    fn owner_is_taken_from_the_subject() {
        assert_eq!(owner_of(&staff()).unwrap().as_str(), "staff-1");

        let anonymous = AuthenticatedUser {
            sub: "  ".to_string(),
            ..staff()
        };
        assert!(owner_of(&anonymous).is_none());
    }
}
