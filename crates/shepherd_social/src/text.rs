//! Post length handling.

/// Longest post body the platform accepts, in characters.
pub const MAX_POST_CHARS: usize = 280;

const ELLIPSIS: &str = "...";

/// Shorten `text` to fit in a post.
///
/// Bodies over [`MAX_POST_CHARS`] keep their first 277 characters followed by
/// `...`. Characters are counted as Unicode scalar values.
///
/// # Examples
///
/// ```
/// use shepherd_social::truncate_for_post;
///
/// assert_eq!(truncate_for_post("short"), "short");
///
/// let long = "a".repeat(300);
/// let cut = truncate_for_post(&long);
/// assert_eq!(cut.chars().count(), 280);
/// assert!(cut.ends_with("..."));
/// ```
pub fn truncate_for_post(text: &str) -> String {
    if text.chars().count() <= MAX_POST_CHARS {
        return text.to_string();
    }
    let keep = MAX_POST_CHARS - ELLIPSIS.len();
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str(ELLIPSIS);
    cut
}
