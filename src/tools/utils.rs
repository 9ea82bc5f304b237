/// The signed-in user's own profile page
pub const OWN_PROFILE_URL: &str = "https://www.linkedin.com/in/me/";

/// Base for profile URLs given as a bare handle
const PROFILE_BASE: &str = "https://www.linkedin.com/in/";

/// Normalize an incomplete profile URL by adding missing protocol and
/// handling common input patterns
pub fn normalize_profile_url(url: &str) -> String {
    let trimmed = url.trim();

    // If already has a protocol, return as-is
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return trimmed.to_string();
    }

    // Path fragment like "in/jane-doe" - complete the host
    if let Some(rest) = trimmed.strip_prefix("in/") {
        return format!("{}{}", PROFILE_BASE, rest);
    }

    // Looks like a domain - add https://
    if trimmed.contains('.') {
        return format!("https://{}", trimmed);
    }

    // Bare handle - assume a profile slug
    // This handles cases like "jane-doe" -> "https://www.linkedin.com/in/jane-doe/"
    format!("{}{}/", PROFILE_BASE, trimmed)
}
