/// Number of questions on one page of `GET /questions`.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Return the 1-based `page` of `items`.
///
/// Pages before the first or past the end come back empty; callers decide
/// whether that is an error.
pub fn paginate<T: Clone>(page: i64, items: &[T]) -> Vec<T> {
    if page < 1 {
        return Vec::new();
    }

    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE))
        .unwrap_or(usize::MAX);
    if start >= items.len() {
        return Vec::new();
    }
    let end = (start + QUESTIONS_PER_PAGE).min(items.len());

    items[start..end].to_vec()
}
