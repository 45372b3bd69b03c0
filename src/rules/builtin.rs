#![forbid(unsafe_code)]

//! Mandatory rules every registry starts with

/// Marker token used to flag work that must not be committed
pub const NOCOMMIT_TOKEN: &str = "nocommit";

/// Name of the rule flagging any occurrence of the marker token
pub const NOCOMMIT_RULE: &str = "nocommit";

/// Name of the rule flagging mixed-case spellings of the marker token
pub const NOCOMMIT_CASE_RULE: &str = "nocommit should be all lowercase or all uppercase";

/// Name of the rule flagging horizontal tabs
pub const TAB_RULE: &str = "tab";

/// Returns the mandatory `(name, pattern)` pairs
pub fn baseline_rules() -> Vec<(&'static str, String)> {
    vec![
        (NOCOMMIT_RULE, format!("(?i:{NOCOMMIT_TOKEN})")),
        (NOCOMMIT_CASE_RULE, mixed_case_pattern(NOCOMMIT_TOKEN)),
        (TAB_RULE, "\t".to_string()),
    ]
}

/// Builds a pattern matching `word` spelled neither all-lowercase nor
/// all-uppercase (ASCII letters only).
///
/// A mixed spelling has a first position `k` whose case differs from the
/// first letter. Each alternative fixes the prefix before `k` to one case,
/// position `k` to the other, and leaves the rest free.
pub fn mixed_case_pattern(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let lower = |c: char| regex::escape(&c.to_ascii_lowercase().to_string());
    let upper = |c: char| regex::escape(&c.to_ascii_uppercase().to_string());
    let any = |c: char| {
        if c.is_ascii_alphabetic() {
            format!("[{}{}]", c.to_ascii_lowercase(), c.to_ascii_uppercase())
        } else {
            regex::escape(&c.to_string())
        }
    };

    let mut alternatives = Vec::new();
    for k in 1..chars.len() {
        if !chars[k].is_ascii_alphabetic() {
            continue;
        }
        let rest: String = chars[k + 1..].iter().map(|&c| any(c)).collect();

        let lower_prefix: String = chars[..k].iter().map(|&c| lower(c)).collect();
        alternatives.push(format!("{lower_prefix}{}{rest}", upper(chars[k])));

        let upper_prefix: String = chars[..k].iter().map(|&c| upper(c)).collect();
        alternatives.push(format!("{upper_prefix}{}{rest}", lower(chars[k])));
    }

    format!("(?:{})", alternatives.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn mixed() -> Regex {
        Regex::new(&mixed_case_pattern(NOCOMMIT_TOKEN)).unwrap()
    }

    #[test]
    fn test_baseline_names() {
        let names: Vec<&str> = baseline_rules().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec![NOCOMMIT_RULE, NOCOMMIT_CASE_RULE, TAB_RULE]);
    }

    #[test]
    fn test_baseline_patterns_compile() {
        for (name, pattern) in baseline_rules() {
            assert!(Regex::new(&pattern).is_ok(), "{name} should compile");
        }
    }

    #[test]
    fn test_mixed_case_matches_mixed_spellings() {
        let re = mixed();
        for text in ["NoCommit", "noCommit", "nocommiT", "Nocommit", "NOCOMMIt", "nOcOmMiT"] {
            assert!(re.is_match(text), "{text} should match");
        }
    }

    #[test]
    fn test_mixed_case_ignores_consistent_spellings() {
        let re = mixed();
        for text in ["nocommit", "NOCOMMIT", "// nocommit here", "NOCOMMIT!", "commit", "no commit"] {
            assert!(!re.is_match(text), "{text} should not match");
        }
    }

    #[test]
    fn test_mixed_case_finds_occurrence_after_clean_one() {
        assert!(mixed().is_match("nocommit and then NoCommit"));
    }

    #[test]
    fn test_nocommit_rule_is_case_insensitive() {
        let (_, pattern) = &baseline_rules()[0];
        let re = Regex::new(pattern).unwrap();
        assert!(re.is_match("nocommit"));
        assert!(re.is_match("NOCOMMIT"));
        assert!(re.is_match("NoCommit"));
        assert!(!re.is_match("commit"));
    }

    #[test]
    fn test_tab_rule() {
        let (_, pattern) = &baseline_rules()[2];
        let re = Regex::new(pattern).unwrap();
        assert!(re.is_match("a\tb"));
        assert!(!re.is_match("a    b"));
    }
}
