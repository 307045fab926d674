#[cfg(test)]
mod tests {
    use crate::tools::normalize::utils::*;
    use crate::tools::normalize::*;
    use serde_json::json;

    fn object(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), Err(NormalizeError::EmptyInput));
        assert_eq!(normalize("   \n\t "), Err(NormalizeError::EmptyInput));
    }

    #[test]
    fn test_syntax_error_surfaces_parser_message() {
        for text in ["not json", "[\"a\",", "{oops}", "'single'"] {
            let expected = serde_json::from_str::<serde_json::Value>(text)
                .unwrap_err()
                .to_string();
            assert_eq!(normalize(text), Err(NormalizeError::Syntax(expected)));
        }
    }

    #[test]
    fn test_flat_array_keeps_order_and_duplicates() {
        assert_eq!(normalize(r#"["a","b","a"]"#).unwrap(), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_flat_array_strings_are_not_trimmed() {
        assert_eq!(
            normalize(r#"["  Bob  ", "carol"]"#).unwrap(),
            vec!["  Bob  ", "carol"]
        );
    }

    #[test]
    fn test_followers_export_value() {
        let text = r#"{"relationships_followers":[{"string_list_data":[{"value":"alice"}]}]}"#;
        assert_eq!(normalize(text).unwrap(), vec!["alice"]);
    }

    #[test]
    fn test_following_export_title() {
        let text = r#"{"relationships_following":[{"title":"bob"}]}"#;
        assert_eq!(normalize(text).unwrap(), vec!["bob"]);
    }

    #[test]
    fn test_export_skips_entries_without_username() {
        let text = r#"{"relationships_following":[
            {"title":"bob"},
            {"string_list_data":[]},
            42,
            {"title":"   "},
            {"string_list_data":[{"href":"https://www.instagram.com/_u/carol"}]}
        ]}"#;
        assert_eq!(normalize(text).unwrap(), vec!["bob", "carol"]);
    }

    #[test]
    fn test_export_ignores_other_keys() {
        let text = r#"{"relationships_followers":[{"title":"alice"}],"extra":["zed"]}"#;
        assert_eq!(normalize(text).unwrap(), vec!["alice"]);
    }

    #[test]
    fn test_followers_key_wins_over_following_key() {
        let text = r#"{
            "relationships_following":[{"title":"bob"}],
            "relationships_followers":[{"title":"alice"}]
        }"#;
        assert_eq!(normalize(text).unwrap(), vec!["alice"]);
    }

    // A present-but-empty export list is not treated as an error of its own:
    // normalization falls through to the generic handling, which rejects the
    // object as an unsupported shape.
    #[test]
    fn test_empty_export_falls_through() {
        assert_eq!(
            normalize(r#"{"relationships_following":[]}"#),
            Err(NormalizeError::UnsupportedShape)
        );
        assert_eq!(
            normalize(r#"{"relationships_followers":[{"string_list_data":[]}]}"#),
            Err(NormalizeError::UnsupportedShape)
        );
    }

    // The followers list is used on its own even when it yields nothing; a
    // following list next to it is never consulted.
    #[test]
    fn test_empty_followers_list_does_not_fall_back_to_following() {
        assert_eq!(
            normalize(r#"{"relationships_followers":[],"relationships_following":[{"title":"bob"}]}"#),
            Err(NormalizeError::UnsupportedShape)
        );
    }

    #[test]
    fn test_export_key_that_is_not_an_array() {
        assert_eq!(
            normalize(r#"{"relationships_followers":"alice"}"#),
            Err(NormalizeError::UnsupportedShape)
        );
    }

    #[test]
    fn test_array_of_export_entries() {
        let text = r#"[
            {"title":"alice","string_list_data":[{"value":"ignored"}]},
            {"string_list_data":[{"value":" bob "}]},
            {"string_list_data":[{"href":"https://www.instagram.com/carol?igsh=1"}]}
        ]"#;
        assert_eq!(normalize(text).unwrap(), vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_array_of_alias_objects() {
        let text = r#"[{"username":"alice"},{"name":"bob"},{"value":"carol"},{"name":"","value":"dave"}]"#;
        assert_eq!(
            normalize(text).unwrap(),
            vec!["alice", "bob", "carol", "dave"]
        );
    }

    #[test]
    fn test_export_strategies_beat_alias_keys() {
        let text = r#"[{"username":"alias","title":"label"}]"#;
        assert_eq!(normalize(text).unwrap(), vec!["label"]);
    }

    #[test]
    fn test_array_skips_unusable_entries() {
        let text = r#"["alice", 1, null, true, {}, [], {"username": 7}, ""]"#;
        assert_eq!(normalize(text).unwrap(), vec!["alice"]);
    }

    #[test]
    fn test_no_usernames_found() {
        assert_eq!(
            normalize(r#"[{"foo":1}]"#),
            Err(NormalizeError::NoUsernamesFound)
        );
        assert_eq!(normalize("[]"), Err(NormalizeError::NoUsernamesFound));
    }

    #[test]
    fn test_unsupported_shapes() {
        for text in ["42", "\"alice\"", "true", "null", r#"{"users":["a"]}"#] {
            assert_eq!(normalize(text), Err(NormalizeError::UnsupportedShape), "{text}");
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let text = r#"{"relationships_followers":[{"title":"a"},{"title":"B"}]}"#;
        assert_eq!(normalize(text), normalize(text));
        assert_eq!(normalize("nope"), normalize("nope"));
    }

    #[test]
    fn test_extractor_priority_order() {
        let entry = object(json!({
            "title": "from-title",
            "string_list_data": [{"value": "from-value", "href": "https://www.instagram.com/from-href"}]
        }));
        assert_eq!(from_title(&entry).as_deref(), Some("from-title"));
        assert_eq!(from_link_value(&entry).as_deref(), Some("from-value"));
        assert_eq!(from_link_href(&entry).as_deref(), Some("from-href"));
        assert_eq!(extract_entry(&entry).as_deref(), Some("from-title"));
    }

    #[test]
    fn test_link_value_scans_all_records() {
        let entry = object(json!({
            "string_list_data": [{"href": "https://example.com/x"}, {"value": "second"}]
        }));
        assert_eq!(from_link_value(&entry).as_deref(), Some("second"));
        assert_eq!(from_link_href(&entry), None);
        assert_eq!(extract_entry(&entry).as_deref(), Some("second"));
    }

    // Each strategy scans every record before the next strategy runs, so a
    // `value` in a later record beats a profile `href` in an earlier one.
    #[test]
    fn test_link_value_beats_earlier_profile_href() {
        let entry = object(json!({
            "string_list_data": [{"href": "https://www.instagram.com/x"}, {"value": "y"}]
        }));
        assert_eq!(from_link_href(&entry).as_deref(), Some("x"));
        assert_eq!(extract_entry(&entry).as_deref(), Some("y"));

        let text = r#"[{"string_list_data":[{"href":"https://www.instagram.com/x"},{"value":"y"}]}]"#;
        assert_eq!(normalize(text).unwrap(), vec!["y"]);
    }

    #[test]
    fn test_empty_array_strings_are_skipped() {
        assert_eq!(normalize(r#"[""]"#), Err(NormalizeError::NoUsernamesFound));
        assert_eq!(normalize(r#"["", " ", "a"]"#).unwrap(), vec![" ", "a"]);
    }

    #[test]
    fn test_entry_username() {
        assert_eq!(
            entry_username(&json!({"title": " alice "})).as_deref(),
            Some("alice")
        );
        assert_eq!(entry_username(&json!("alice")), None);
        assert_eq!(entry_username(&json!({"username": "alice"})), None);
    }

    #[test]
    fn test_username_from_profile_url() {
        assert_eq!(
            username_from_profile_url("https://www.instagram.com/alice").as_deref(),
            Some("alice")
        );
        assert_eq!(
            username_from_profile_url("https://www.instagram.com/_u/bob/").as_deref(),
            Some("bob")
        );
        assert_eq!(
            username_from_profile_url("https://instagram.com/carol?hl=en").as_deref(),
            Some("carol")
        );
        assert_eq!(
            username_from_profile_url("https://www.instagram.com/_underscore").as_deref(),
            Some("_underscore")
        );
        assert_eq!(username_from_profile_url("https://example.com/alice"), None);
        assert_eq!(username_from_profile_url("https://www.instagram.com/"), None);
    }
}
