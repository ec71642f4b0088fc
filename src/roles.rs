//! Key-role extraction from normalized titles.
//!
//! Scans a title for tokens from a fixed vocabulary of senior roles, longest
//! token first so 总经理 never matches inside 副总经理. A candidate match is
//! rejected when the following characters mark a diminished variant (总经理助理
//! is an assistant, not a 总经理) or the preceding characters mark a
//! department name rather than a person's role (人事部总经理 is a department
//! post). Accepted spans are blanked before the scan continues so overlapping
//! tokens cannot double-match the same text.

use once_cell::sync::Lazy;

/// Curated vocabulary of senior executive and governance roles.
pub const KEY_ROLES: &[&str] = &[
    "董事长",
    "总裁",
    "总经理",
    "联席总裁",
    "副董事长",
    "副总裁",
    "副总经理",
    "监事长",
    "总精算师",
    "总会计师",
    "首席执行官",
    "首席风险官",
    "首席财务官",
    "首席投资官",
    "CEO",
    "CFO",
    "CRO",
    "CIO",
    "董事总经理",
    "党委书记",
    "党委副书记",
];

/// Characters that, immediately after a match, mark a diminished variant.
const INVALID_SUFFIXES: &[&str] = &["助理", "级", "助"];

/// Characters that, immediately before a match, mark a department/unit name.
const INVALID_PREFIXES: &[char] = &['部', '室', '组', '处'];

const BLANK: char = '〇';

/// Role vocabulary sorted by descending char length, computed once.
static ROLES_BY_LENGTH: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut roles = KEY_ROLES.to_vec();
    roles.sort_by_key(|r| std::cmp::Reverse(r.chars().count()));
    roles
});

/// Extract every canonical senior-role token present in a title, in the
/// order the scan discovers them. Each role token is reported at most once.
/// Empty input yields an empty result; there are no error conditions.
pub fn extract_key_roles(title: &str) -> Vec<&'static str> {
    if title.is_empty() {
        return Vec::new();
    }
    let mut remaining: Vec<char> = title.chars().collect();
    let mut found = Vec::new();

    for role in ROLES_BY_LENGTH.iter() {
        let role_chars: Vec<char> = role.chars().collect();
        let mut from = 0;
        while let Some(idx) = find_from(&remaining, &role_chars, from) {
            let end = idx + role_chars.len();
            if has_invalid_suffix(&remaining, end) {
                from = idx + 1;
                continue;
            }
            if has_invalid_prefix(&remaining, idx) {
                from = idx + 1;
                continue;
            }
            found.push(*role);
            for c in &mut remaining[idx..end] {
                *c = BLANK;
            }
            break;
        }
    }
    found
}

fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// The 1-2 characters after the match start with a diminished-variant marker.
fn has_invalid_suffix(chars: &[char], end: usize) -> bool {
    let tail: String = chars[end..(end + 2).min(chars.len())].iter().collect();
    INVALID_SUFFIXES.iter().any(|s| tail.starts_with(s))
}

/// Any of the up-to-2 characters before the match is a department particle.
fn has_invalid_prefix(chars: &[char], idx: usize) -> bool {
    if idx == 0 {
        return false;
    }
    chars[idx.saturating_sub(2)..idx]
        .iter()
        .any(|c| INVALID_PREFIXES.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(extract_key_roles("").is_empty());
    }

    #[test]
    fn test_no_role_present() {
        assert!(extract_key_roles("高级顾问").is_empty());
    }

    #[test]
    fn test_single_role() {
        assert_eq!(extract_key_roles("董事长"), vec!["董事长"]);
        assert_eq!(extract_key_roles("总精算师"), vec!["总精算师"]);
    }

    #[test]
    fn test_longest_token_wins() {
        // 副总经理 must not also produce a 总经理 match from its suffix.
        assert_eq!(extract_key_roles("副总经理"), vec!["副总经理"]);
        assert_eq!(extract_key_roles("副董事长"), vec!["副董事长"]);
        assert_eq!(extract_key_roles("党委副书记"), vec!["党委副书记"]);
    }

    #[test]
    fn test_assistant_variant_rejected() {
        // "总经理助理" is an assistant, never a 总经理 match.
        assert!(extract_key_roles("总经理助理").is_empty());
        assert!(extract_key_roles("董事长助理").is_empty());
        assert!(extract_key_roles("总裁助").is_empty());
    }

    #[test]
    fn test_rank_suffix_rejected() {
        assert!(extract_key_roles("总经理级").is_empty());
    }

    #[test]
    fn test_department_prefix_rejected() {
        // A department's 总经理 is not the company's.
        assert!(extract_key_roles("人事部总经理").is_empty());
        assert!(extract_key_roles("investment室总裁").is_empty());
        assert!(extract_key_roles("精算处总精算师").is_empty());
    }

    #[test]
    fn test_multiple_roles_in_one_title() {
        let roles = extract_key_roles("董事长兼总经理");
        assert!(roles.contains(&"董事长"));
        assert!(roles.contains(&"总经理"));
        assert_eq!(roles.len(), 2);
    }

    #[test]
    fn test_blanking_prevents_double_match() {
        // 董事总经理 consumes its span; the shorter 总经理 cannot re-match
        // inside the blanked text.
        let roles = extract_key_roles("董事总经理");
        assert_eq!(roles, vec!["董事总经理"]);
    }

    #[test]
    fn test_each_role_reported_once() {
        let roles = extract_key_roles("总经理兼任子公司总经理");
        assert_eq!(roles.iter().filter(|r| **r == "总经理").count(), 1);
    }

    #[test]
    fn test_rejected_match_retries_later_occurrence() {
        // First 总经理 is an assistant post; the later standalone one counts.
        let roles = extract_key_roles("总经理助理，后升任总经理");
        assert_eq!(roles, vec!["总经理"]);
    }

    #[test]
    fn test_english_abbreviations() {
        let roles = extract_key_roles("CEO兼CFO");
        assert!(roles.contains(&"CEO"));
        assert!(roles.contains(&"CFO"));
    }

    #[test]
    fn test_chief_officer_variants() {
        assert_eq!(extract_key_roles("首席风险官"), vec!["首席风险官"]);
        assert_eq!(extract_key_roles("首席执行官"), vec!["首席执行官"]);
    }
}
