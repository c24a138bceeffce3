use super::error::ProfileError;
use super::requests::ProfileInput;

/// Validates a profile form before it is sent to the server.
///
/// Only the two fields the server requires are checked; uniqueness of the
/// email is enforced server-side.
pub fn validate_profile_input(input: &ProfileInput) -> Result<(), ProfileError> {
    if input.full_name.trim().is_empty() {
        return Err(ProfileError::EmptyFullName);
    }
    if input.email.trim().is_empty() {
        return Err(ProfileError::EmptyEmail);
    }
    Ok(())
}
