//! Compare Tools

mod tests;

use std::collections::HashSet;

/// Key two usernames are compared by: surrounding whitespace dropped,
/// lowercased. Internal whitespace and punctuation are kept.
pub fn comparison_key(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Accounts in `following` that are absent from `followers`.
///
/// Keeps the order of `following`, and each duplicate entry in it is judged
/// on its own.
///
/// # Examples
/// ```
/// use followback::tools::compare::non_followers;
///
/// let result = non_followers(&["Alice", "bob", "CAROL"], &["alice", "carol"]);
/// assert_eq!(result, vec!["bob"]);
/// ```
pub fn non_followers<A, B>(following: &[A], followers: &[B]) -> Vec<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let followed_back: HashSet<String> = followers
        .iter()
        .map(|user| comparison_key(user.as_ref()))
        .collect();

    following
        .iter()
        .map(|user| user.as_ref())
        .filter(|user| !followed_back.contains(&comparison_key(user)))
        .map(str::to_string)
        .collect()
}
