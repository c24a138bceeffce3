mod error;
mod operations;
mod requests;
mod types;

pub use error::ProfileError;
pub use operations::validate_profile_input;
pub use requests::{ListProfilesQuery, ProfileInput};
pub use types::Profile;
