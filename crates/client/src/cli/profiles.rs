//! Profile CLI commands.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use profiledeck_core::profile::ProfileInput;

/// Profile management commands.
#[derive(Debug, Parser)]
pub struct ProfilesCommand {
    #[command(subcommand)]
    pub action: ProfilesAction,
}

/// Available profile actions.
#[derive(Debug, Subcommand)]
pub enum ProfilesAction {
    /// List one page of profiles.
    List {
        /// Page number (1-based).
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Filter by name or email.
        #[arg(long)]
        search: Option<String>,
    },
    /// List every profile without pagination.
    All,
    /// Get profile by ID.
    Get {
        /// Profile ID.
        id: String,
    },
    /// Create a new profile.
    Create {
        #[command(flatten)]
        fields: ProfileFields,
    },
    /// Update a profile. Omitted fields keep their current value.
    Update {
        /// Profile ID.
        id: String,
        #[command(flatten)]
        fields: ProfilePatch,
    },
    /// Delete profile by ID.
    Delete {
        /// Profile ID.
        id: String,
    },
}

/// Fields of a new profile.
#[derive(Debug, Clone, Args)]
pub struct ProfileFields {
    /// Full name.
    #[arg(long)]
    pub full_name: String,
    /// Email address.
    #[arg(long)]
    pub email: String,
    #[command(flatten)]
    pub optional: OptionalFields,
}

/// Fields to change on an existing profile.
#[derive(Debug, Clone, Args)]
pub struct ProfilePatch {
    /// Full name.
    #[arg(long)]
    pub full_name: Option<String>,
    /// Email address.
    #[arg(long)]
    pub email: Option<String>,
    #[command(flatten)]
    pub optional: OptionalFields,
}

#[derive(Debug, Clone, Default, Args)]
pub struct OptionalFields {
    /// Phone number.
    #[arg(long)]
    pub phone_number: Option<String>,
    /// Short biography.
    #[arg(long)]
    pub bio: Option<String>,
    /// Avatar image URL.
    #[arg(long)]
    pub avatar_url: Option<String>,
    /// Date of birth (YYYY-MM-DD).
    #[arg(long)]
    pub date_of_birth: Option<NaiveDate>,
    /// Location.
    #[arg(long)]
    pub location: Option<String>,
}

impl OptionalFields {
    fn apply(self, input: &mut ProfileInput) {
        if let Some(phone_number) = self.phone_number {
            input.phone_number = Some(phone_number);
        }
        if let Some(bio) = self.bio {
            input.bio = Some(bio);
        }
        if let Some(avatar_url) = self.avatar_url {
            input.avatar_url = Some(avatar_url);
        }
        if let Some(date_of_birth) = self.date_of_birth {
            input.date_of_birth = Some(date_of_birth);
        }
        if let Some(location) = self.location {
            input.location = Some(location);
        }
    }
}

impl ProfileFields {
    pub fn into_input(self) -> ProfileInput {
        let mut input = ProfileInput::new(self.full_name, self.email);
        self.optional.apply(&mut input);
        input
    }
}

impl ProfilePatch {
    /// Applies the given fields on top of `current`.
    pub fn apply_to(self, mut current: ProfileInput) -> ProfileInput {
        if let Some(full_name) = self.full_name {
            current.full_name = full_name;
        }
        if let Some(email) = self.email {
            current.email = email;
        }
        self.optional.apply(&mut current);
        current
    }
}
