use regex::Regex;
use std::sync::LazyLock;

static PUNCTUATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[?!@#$%^&*()_\-+=,./'\\"|:;{}\[\]]"#).expect("valid punctuation pattern")
});

/// "my folder-name" -> "MyFolderName"
pub fn normalize_class_name(name: &str) -> String {
    let spaced = PUNCTUATION_RE.replace_all(name, " ");
    title_case(&spaced).replace(' ', "")
}

/// "Get User (v2)" -> "get_user_v2"
pub fn normalize_func_name(name: &str) -> String {
    let spaced = PUNCTUATION_RE.replace_all(name, " ").to_lowercase();
    spaced.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Upper-case a letter when the character before it is not a letter, lower-case it otherwise.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Best candidate whose similarity to `word` is at least `cutoff` (0.0..=1.0).
pub fn closest_match<'a>(
    word: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    cutoff: f64,
) -> Option<&'a str> {
    candidates
        .into_iter()
        .map(|c| (similarity(word, c), c))
        .filter(|(score, _)| *score >= cutoff)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, c)| c)
}

/// 1.0 for identical strings, 0.0 for nothing in common.
fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / longest as f64
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_class_name() {
        assert_eq!(normalize_class_name("my folder"), "MyFolder");
        assert_eq!(normalize_class_name("user-management/v2"), "UserManagementV2");
        assert_eq!(normalize_class_name("GRAPHQL stuff"), "GraphqlStuff");
        assert_eq!(normalize_class_name("auth2fa"), "Auth2Fa");
    }

    #[test]
    fn test_normalize_func_name() {
        assert_eq!(normalize_func_name("Get User (v2)"), "get_user_v2");
        assert_eq!(normalize_func_name("  list   all items? "), "list_all_items");
        assert_eq!(normalize_func_name("create_user"), "create_user");
        assert_eq!(normalize_func_name("{{host}}/ping"), "host_ping");
    }

    #[test]
    fn test_closest_match() {
        let names = ["get_user", "list_users", "delete_user"];
        assert_eq!(closest_match("get_usr", names, 0.6), Some("get_user"));
        assert_eq!(closest_match("zzz", names, 0.6), None);
        assert!(closest_match("zzz", names, 0.0).is_some());
    }

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", "abc"), 1.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }
}
