/// Product id carried by a URL fragment, with or without its leading `#`.
pub fn parse(fragment: &str) -> Option<&str> {
    let id = fragment.strip_prefix('#').unwrap_or(fragment).trim();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments() {
        assert_eq!(parse("#3"), Some("3"));
        assert_eq!(parse("3"), Some("3"));
        assert_eq!(parse("#engine-oil "), Some("engine-oil"));
        assert_eq!(parse("#"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("#  "), None);
    }
}
