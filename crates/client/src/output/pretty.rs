//! Pretty output formatting.

use profiledeck_core::api::PageDescriptor;
use profiledeck_core::profile::{Profile, ProfileInput};

use crate::cache::CacheStats;
use crate::coordinator::ViewState;

/// Format a profile for display.
pub fn format_profile(profile: &Profile) -> String {
    let mut output = format!(
        "{}\n  ID: {}\n  Email: {}",
        profile.full_name, profile.id, profile.email
    );
    push_optional(&mut output, "Phone", profile.phone_number.as_deref());
    push_optional(&mut output, "Location", profile.location.as_deref());
    if let Some(dob) = profile.date_of_birth {
        output.push_str(&format!("\n  Born: {}", dob.format("%Y-%m-%d")));
    }
    push_optional(&mut output, "Avatar", profile.avatar_url.as_deref());
    push_optional(&mut output, "Bio", profile.bio.as_deref());
    output
}

/// Format profiles for display.
pub fn format_profiles(profiles: &[Profile]) -> String {
    if profiles.is_empty() {
        return "No profiles found.".to_string();
    }
    let mut output = format!("PROFILES ({})\n", profiles.len());
    output.push_str(&"-".repeat(40));
    for profile in profiles {
        output.push_str(&format!("\n{}", format_profile(profile)));
        output.push('\n');
    }
    output
}

/// Format one page of the list view with its navigation footer.
pub fn format_view(view: &ViewState) -> String {
    let mut output = String::new();
    if !view.search.is_empty() {
        output.push_str(&format!("Search: \"{}\"\n", view.search));
    }
    output.push_str(&format_profiles(&view.profiles));
    output.push('\n');
    output.push_str(&format_page(&view.page));
    output
}

/// Format a page descriptor as a one-line footer.
pub fn format_page(page: &PageDescriptor) -> String {
    let mut output = format!(
        "Page {} of {} ({} total)",
        page.current_page(),
        page.total_pages(),
        page.total_count()
    );
    match (page.has_previous(), page.has_next()) {
        (true, true) => output.push_str(" [< prev | next >]"),
        (true, false) => output.push_str(" [< prev]"),
        (false, true) => output.push_str(" [next >]"),
        (false, false) => {}
    }
    output
}

/// Format a decoded profile form.
pub fn format_input(input: &ProfileInput) -> String {
    let mut output = format!("{}\n  Email: {}", input.full_name, input.email);
    push_optional(&mut output, "Phone", input.phone_number.as_deref());
    push_optional(&mut output, "Location", input.location.as_deref());
    if let Some(dob) = input.date_of_birth {
        output.push_str(&format!("\n  Born: {}", dob.format("%Y-%m-%d")));
    }
    push_optional(&mut output, "Avatar", input.avatar_url.as_deref());
    push_optional(&mut output, "Bio", input.bio.as_deref());
    output
}

/// Format cache statistics.
pub fn format_stats(stats: &CacheStats) -> String {
    format!(
        "Cache:\n  Entries: {}/{}\n  Persistent: {}",
        stats.entries,
        stats.capacity,
        if stats.persistent { "yes" } else { "no" }
    )
}

fn push_optional(output: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        output.push_str(&format!("\n  {label}: {value}"));
    }
}
