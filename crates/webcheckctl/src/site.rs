//! Page sets for a GitHub Pages course site.

/// Pages validated for every student site, relative to the user's Pages root
pub const SITE_PAGES: [&str; 4] = [
    "wdd130/wwr/",
    "wdd130/wwr/about.html",
    "wdd130/wwr/trips.html",
    "wdd130/wwr/contact.html",
];

/// Expand a GitHub username into the page URLs to validate.
///
/// A blank username yields no URLs.
pub fn site_urls(username: &str) -> Vec<String> {
    let username = username.trim();
    if username.is_empty() {
        return Vec::new();
    }

    SITE_PAGES
        .iter()
        .map(|page| format!("https://{}.github.io/{}", username, page))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_urls_in_order() {
        assert_eq!(
            site_urls("octocat"),
            vec![
                "https://octocat.github.io/wdd130/wwr/",
                "https://octocat.github.io/wdd130/wwr/about.html",
                "https://octocat.github.io/wdd130/wwr/trips.html",
                "https://octocat.github.io/wdd130/wwr/contact.html",
            ]
        );
    }

    #[test]
    fn test_blank_username() {
        assert!(site_urls("").is_empty());
        assert!(site_urls("   ").is_empty());
    }
}
