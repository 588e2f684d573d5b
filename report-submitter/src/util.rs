pub fn mask_secret(s: &str, left: usize, right: usize) -> String {
    if s.len() <= left + right { return "*".repeat(s.len()); }
    format!("{}{}{}", &s[..left], "*".repeat(s.len()-left-right), &s[s.len()-right..])
}

pub fn truncate_body(s: &str) -> String {
    const MAX: usize = 512;
    if s.len() <= MAX {
        return s.to_string();
    }
    // Back off to a char boundary so multibyte text cannot panic the slice.
    let mut end = MAX;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdefghij", 2, 2), "ab******ij");
        assert_eq!(mask_secret("abc", 2, 2), "***");
    }

    #[test]
    fn test_truncate_body_short_passthrough() {
        assert_eq!(truncate_body("ok"), "ok");
        assert!(truncate_body(&"x".repeat(600)).ends_with("..."));
    }

    #[test]
    fn test_truncate_body_multibyte_at_cut_point() {
        // 'á' is two bytes and straddles the 512-byte cut.
        let body = format!("{}á{}", "a".repeat(511), "b".repeat(100));
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert_eq!(out, format!("{}...", "a".repeat(511)));
    }

    #[test]
    fn test_truncate_body_all_multibyte() {
        let body = "ã".repeat(600);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 515);
    }
}
