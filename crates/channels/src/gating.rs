/// Check whether a sender matches an admin allow-list.
///
/// Unlike an open-by-default peer allowlist, an empty admin list grants
/// nobody elevated access.
pub fn is_privileged(sender_id: &str, admins: &[String]) -> bool {
    !admins.is_empty() && matches_any(sender_id, admins)
}

/// Match a sender against a list of patterns.
///
/// Entries are matched case-insensitively against the sender ID.
/// Supports exact match and glob-style `*` wildcards.
pub fn matches_any(sender_id: &str, patterns: &[String]) -> bool {
    let sender_lower = sender_id.to_lowercase();
    patterns.iter().any(|pattern| {
        let pat = pattern.trim().to_lowercase();
        if pat.contains('*') {
            glob_match(&pat, &sender_lower)
        } else {
            pat == sender_lower
        }
    })
}

/// Simple glob matching supporting `*` as a wildcard for any sequence of chars.
fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == text;
    }

    let mut pos = 0;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        match text[pos..].find(part) {
            Some(idx) => {
                // First segment must match at start
                if i == 0 && idx != 0 {
                    return false;
                }
                pos += idx + part.len();
            },
            None => return false,
        }
    }
    // Last segment must match at end (unless pattern ends with *)
    if !parts.last().unwrap_or(&"").is_empty() {
        pos == text.len()
    } else {
        true
    }
}
