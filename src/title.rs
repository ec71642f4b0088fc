//! Job-title normalization.
//!
//! Raw titles arrive polluted by scraping artifacts: spurious spaces inside
//! CJK text, embedded regulatory approval citations, run-on bio fragments,
//! company-name prefixes, and second concurrent posts appended after a comma.
//! The normalizer is an ordered cascade of string transformations; the order
//! matters because later rules assume earlier cleanup (prefix stripping runs
//! on whitespace-collapsed text, the branch rewrite runs after company
//! prefixes are gone). An all-boilerplate input normalizes to the empty
//! string, which callers treat as "no role", not an error.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Whitespace wrongly inserted between two adjacent CJK characters.
static INNER_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\u{4e00}-\u{9fa5}])\s+([\u{4e00}-\u{9fa5}])").unwrap());

/// Parenthetical regulatory approval citations, e.g. （保监许可〔2015〕12号）.
static APPROVAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"（(?:批复文号|保监许可|[^\u{4e00}-\u{9fa5}（）]{0,4})[^）]*[号〕\d][^）]*）")
        .unwrap()
});

/// Bio text that overflowed into the title field: a sentence boundary
/// followed by a short name fragment and a biography-style verb.
static BIO_OVERFLOW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"。[\u{4e00}-\u{9fa5}]{1,3}(?:先生|女士|曾任|拥有|毕业|持有|出生).+$").unwrap()
});

/// Best-effort "<org-suffix-bearing company name><role text>" shape, used
/// when no known employer name matched as a prefix.
static UNKNOWN_COMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([\u{4e00}-\u{9fa5}]{2,12}(?:保险社|人寿|财产|保险|集团|银行|证券|资产|基金|再保险)(?:股份有限公司|有限公司|有限责任公司|股份公司)?)(.{2,})$",
    )
    .unwrap()
});

/// Regional branch-office qualifier, rewritten to the canonical 分公司 form.
static BRANCH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\u{4e00}-\u{9fa5}]{1,6}(?:省|市|区|地区|自治区)?分公司").unwrap());

/// A trailing comma-separated clause restating a second, unrelated post.
static MULTI_COMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[，,][\u{4e00}-\u{9fa5}]{2,12}(?:保险|集团|公司|银行|资产|基金).+$").unwrap()
});

/// English and honorific title aliases, substituted on exact match.
static EN_TITLE_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Chief Executive Officer", "首席执行官"),
        ("Group Chief Executive Officer", "集团首席执行官"),
        ("Regional CEO", "区域首席执行官"),
        ("Chief Financial Officer", "首席财务官"),
        ("Group Chief Financial Officer", "集团首席财务官"),
        ("Chief Risk Officer", "首席风险官"),
        ("Chief Investment Officer", "首席投资官"),
        ("Chief Information Officer", "首席信息官"),
        ("Chief Operating Officer", "首席运营官"),
        ("Chief Distribution Officer", "首席分销官"),
        ("Chief Compliance Officer", "首席合规官"),
        ("Managing Director", "董事总经理"),
        ("MD", "董事总经理"),
        ("Director", "董事"),
        ("Independent Director", "独立董事"),
        ("Independent Non-Executive Director", "独立非执行董事"),
        ("Non-Executive Director", "非执行董事"),
        ("Executive Director", "执行董事"),
        ("Chairman", "董事长"),
        ("Vice Chairman", "副董事长"),
        ("President", "总裁"),
        ("CEO", "首席执行官"),
        ("CFO", "首席财务官"),
        ("行政總裁", "首席执行官"),
        ("首席財務總監", "首席财务总监"),
        ("先生", ""),
        ("女士", ""),
        ("Singapore", ""),
    ])
});

/// Leading boilerplate before the actual title. First match wins.
const CURRENT_ROLE_PREFIXES: &[&str] = &["现任本公司", "现任公司", "本公司", "现任"];

/// Leading generic org fragments left over after company-prefix stripping.
const GENERIC_PREFIXES: &[&str] = &["公司党委", "集团党委", "公司", "集团"];

/// Concurrent-post marker.
const CONCURRENT_PREFIX: &str = "兼任";

const TRAILING_PUNCT: &[char] = &['。', '！', '？', '，', '.', ',', ' '];

/// Title normalizer bound to a set of known current-employer names, used to
/// strip redundant company prefixes (longest name first).
#[derive(Debug, Clone)]
pub struct TitleNormalizer {
    /// Known employer names sorted by descending char length.
    known_companies: Vec<String>,
}

impl TitleNormalizer {
    pub fn new<I>(known_companies: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut known_companies: Vec<String> = known_companies.into_iter().collect();
        known_companies.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        TitleNormalizer { known_companies }
    }

    /// Reduce a raw title to a clean role label. Deterministic; may return
    /// an empty string for all-boilerplate input.
    pub fn normalize(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }
        let mut t = raw.trim().to_string();

        // 1. Collapse whitespace between adjacent CJK characters. Looped
        //    because non-overlapping replacement can leave "甲 乙 丙"
        //    half-collapsed after one pass.
        while INNER_SPACE_RE.is_match(&t) {
            t = INNER_SPACE_RE.replace_all(&t, "$1$2").into_owned();
        }

        // 2. Exact English/honorific alias: substitute and stop.
        if let Some(canonical) = EN_TITLE_MAP.get(t.as_str()) {
            return canonical.to_string();
        }

        // 3. Embedded regulatory approval citations.
        t = APPROVAL_RE.replace_all(&t, "").into_owned();

        // 4. Trailing bio run-on fragments.
        t = BIO_OVERFLOW_RE.replace(&t, "").into_owned();

        // 5. Trailing punctuation and whitespace.
        t = trim_title(&t);

        // 6. Leading boilerplate, first match wins.
        for prefix in CURRENT_ROLE_PREFIXES {
            if let Some(rest) = t.strip_prefix(prefix) {
                t = rest.trim().to_string();
                break;
            }
        }

        // 7. Concurrent-post marker.
        if let Some(rest) = t.strip_prefix(CONCURRENT_PREFIX) {
            t = rest.trim().to_string();
        }

        // 8. Known employer prefix (longest first); fall back to the generic
        //    org-shape regex when no known name matched.
        let mut stripped = false;
        for company in &self.known_companies {
            if let Some(rest) = t.strip_prefix(company.as_str()) {
                let rest = rest.trim();
                if rest.chars().count() >= 2 {
                    t = rest.to_string();
                    stripped = true;
                }
                break;
            }
        }
        if !stripped {
            if let Some(caps) = UNKNOWN_COMP_RE.captures(&t) {
                let role = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
                if role.chars().count() >= 2 {
                    t = role.to_string();
                }
            }
        }

        // 9. Leftover generic prefixes, when enough trailing text remains.
        for prefix in GENERIC_PREFIXES {
            if t.starts_with(prefix) && t.chars().count() > prefix.chars().count() + 1 {
                t = t[prefix.len()..].trim().to_string();
                break;
            }
        }

        // 10. Trailing second-post clause.
        t = MULTI_COMP_RE.replace(&t, "").into_owned();

        // 11. Branch-office rewrite: regional qualifier collapses to 分公司.
        if let Some(m) = BRANCH_RE.find(&t) {
            t = format!("分公司{}", &t[m.end()..]);
        }

        // 12. Final trim.
        trim_title(&t)
    }
}

fn trim_title(t: &str) -> String {
    t.trim_end_matches(TRAILING_PUNCT).trim().to_string()
}
