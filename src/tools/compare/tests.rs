#[cfg(test)]
mod tests {
    use crate::tools::compare::*;

    #[test]
    fn test_case_insensitive_difference() {
        assert_eq!(
            non_followers(&["Alice", "bob", "CAROL"], &["alice", "carol"]),
            vec!["bob"]
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert!(non_followers(&["  Bob  "], &["bob"]).is_empty());
        assert!(non_followers(&["bob"], &["\tBOB\n"]).is_empty());
    }

    #[test]
    fn test_internal_whitespace_and_punctuation_matter() {
        assert_eq!(
            non_followers(&["bob smith", "bob.smith"], &["bobsmith", "bob_smith"]),
            vec!["bob smith", "bob.smith"]
        );
    }

    #[test]
    fn test_result_keeps_original_spelling_and_order() {
        assert_eq!(
            non_followers(&[" Zed ", "amy", "Mia"], &["AMY"]),
            vec![" Zed ", "Mia"]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(
            non_followers(&["bob", "Bob", "alice", "bob"], &["alice"]),
            vec!["bob", "Bob", "bob"]
        );
    }

    #[test]
    fn test_empty_following() {
        let empty: [&str; 0] = [];
        assert!(non_followers(&empty, &["alice"]).is_empty());
        assert!(non_followers(&empty, &empty).is_empty());
    }

    #[test]
    fn test_empty_followers_returns_following() {
        let empty: [&str; 0] = [];
        assert_eq!(
            non_followers(&["b", "a", "b"], &empty),
            vec!["b", "a", "b"]
        );
    }

    #[test]
    fn test_accepts_owned_strings() {
        let following = vec!["alice".to_string(), "bob".to_string()];
        let followers = vec!["ALICE".to_string()];
        assert_eq!(non_followers(&following, &followers), vec!["bob"]);
    }

    #[test]
    fn test_non_followers_is_idempotent() {
        let following = ["a", "B", "c"];
        let followers = ["b"];
        assert_eq!(
            non_followers(&following, &followers),
            non_followers(&following, &followers)
        );
    }

    #[test]
    fn test_unicode_case_folding() {
        assert!(non_followers(&["ÉLODIE"], &["élodie"]).is_empty());
    }

    #[test]
    fn test_comparison_key() {
        assert_eq!(comparison_key("  MiXeD Case "), "mixed case");
    }
}
