//! Avatar resolution

use payfeed_config::AvatarConfig;

/// Resolve the image reference for an avatar.
///
/// A non-blank custom `image_url` wins; otherwise a generated avatar keyed
/// by `initials` is referenced. No network access happens here.
pub fn resolve_avatar(initials: &str, image_url: Option<&str>, config: &AvatarConfig) -> String {
    match image_url.map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => generated_avatar_url(initials, config),
    }
}

/// Deterministic generated-avatar URL for a set of initials
pub fn generated_avatar_url(initials: &str, config: &AvatarConfig) -> String {
    format!(
        "{}?name={}&background={}&color={}&size={}&bold={}",
        config.base_url,
        urlencoding::encode(initials),
        config.background,
        config.color,
        config.size,
        config.bold
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_avatar_url() {
        let url = resolve_avatar("AB", None, &AvatarConfig::default());
        assert_eq!(
            url,
            "https://ui-avatars.com/api/?name=AB&background=00D26A&color=fff&size=128&bold=true"
        );
    }

    #[test]
    fn test_custom_image_wins() {
        let config = AvatarConfig::default();
        assert_eq!(
            resolve_avatar("AB", Some("https://img.test/ann.png"), &config),
            "https://img.test/ann.png"
        );
        assert_eq!(
            resolve_avatar("AB", Some("data:image/png;base64,AAAA"), &config),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_blank_image_falls_back() {
        let config = AvatarConfig::default();
        assert_eq!(
            resolve_avatar("CL", Some("   "), &config),
            generated_avatar_url("CL", &config)
        );
    }

    #[test]
    fn test_initials_are_encoded() {
        let config = AvatarConfig::default();
        assert!(generated_avatar_url("ÉÑ", &config).contains("name=%C3%89%C3%91&"));
    }
}
