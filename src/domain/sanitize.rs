//! Free-text sanitization for user-supplied fields.

/// Strip unsafe markup using a user-generated-content policy.
///
/// Script and style elements are removed together with their content,
/// unknown tags and event-handler attributes are dropped, and the remaining
/// text is HTML-escaped.
pub fn sanitize_input(input: &str) -> String {
    ammonia::clean(input)
}
