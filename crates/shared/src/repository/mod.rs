mod cart;
mod cart_item;
mod category;
mod customer;
mod order;
mod product;
mod refresh_token;
mod review;
mod user;

pub use self::cart::CartRepository;
pub use self::cart_item::CartItemRepository;
pub use self::category::CategoryRepository;
pub use self::customer::CustomerRepository;
pub use self::order::OrderRepository;
pub use self::product::ProductRepository;
pub use self::refresh_token::RefreshTokenRepository;
pub use self::review::ReviewRepository;
pub use self::user::UserRepository;

/// `LIMIT`/`OFFSET` for a 1-based page.
pub(crate) fn limit_offset(page: i32, page_size: i32) -> (i64, i64) {
    let limit = page_size as i64;
    let offset = ((page - 1).max(0) as i64) * limit;
    (limit, offset)
}

/// `ILIKE` pattern matching the trimmed term anywhere, with `\`, `%` and `_`
/// escaped so they match literally. `None` for a blank term.
pub(crate) fn search_pattern(search: &str) -> Option<String> {
    let trimmed = search.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(trimmed.len() + 2);
    pattern.push('%');
    for c in trimmed.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_starts_at_zero_for_first_page() {
        assert_eq!(limit_offset(1, 10), (10, 0));
        assert_eq!(limit_offset(3, 25), (25, 50));
        assert_eq!(limit_offset(0, 10), (10, 0));
    }

    #[test]
    fn blank_search_is_ignored() {
        assert_eq!(search_pattern("   "), None);
        assert_eq!(search_pattern(" tea "), Some("%tea%".to_string()));
    }

    #[test]
    fn wildcards_in_search_match_literally() {
        assert_eq!(search_pattern("50%"), Some(r"%50\%%".to_string()));
        assert_eq!(search_pattern("a_b"), Some(r"%a\_b%".to_string()));
        assert_eq!(search_pattern(r"c:\x"), Some(r"%c:\\x%".to_string()));
    }
}
