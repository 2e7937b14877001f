//! Slug minting and public link construction.

use rand::RngCore;

/// Mint an unguessable public slug for a menu. Random hex, never
/// sequential, so other vendors' menus cannot be enumerated.
pub fn mint_slug() -> String {
    let mut bytes = [0u8; 6];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Resolve the public origin: a configured `BASE_URL` wins, otherwise the
/// inbound request's Host header so links work unconfigured in development.
pub fn public_base(configured: Option<&str>, request_host: Option<&str>) -> String {
    if let Some(base) = configured {
        return base.trim_end_matches('/').to_string();
    }
    match request_host {
        Some(host) => format!("http://{host}"),
        None => "http://localhost".to_string(),
    }
}

/// Canonical shareable URL for a menu slug. The dashboard link and the QR
/// code both go through here.
pub fn menu_url(base: &str, slug: &str) -> String {
    format!("{}/menu/{}", base.trim_end_matches('/'), slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_random_hex() {
        let a = mint_slug();
        let b = mint_slug();

        assert_eq!(a.len(), 12);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn configured_base_wins_over_request_host() {
        let base = public_base(Some("https://menus.example.com/"), Some("localhost:8080"));
        assert_eq!(base, "https://menus.example.com");
    }

    #[test]
    fn host_fallback_builds_an_http_origin() {
        assert_eq!(
            public_base(None, Some("localhost:8080")),
            "http://localhost:8080"
        );
    }

    #[test]
    fn menu_urls_share_one_shape() {
        let base = public_base(None, Some("127.0.0.1:3000"));
        assert_eq!(menu_url(&base, "abc123"), "http://127.0.0.1:3000/menu/abc123");
        assert_eq!(
            menu_url("https://menus.example.com", "abc123"),
            "https://menus.example.com/menu/abc123"
        );
    }
}
