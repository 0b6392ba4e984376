use md5::{Digest, Md5};

pub const DEFAULT_AVATAR_SIZE: u32 = 100;

/// Builds the Gravatar URL for an email address.
///
/// The hash is taken over the trimmed, lower-cased address, as Gravatar expects.
pub fn gravatar_url(email: &str, size: u32) -> String {
    let normalized = email.trim().to_lowercase();
    let hash = Md5::digest(normalized.as_bytes());
    format!("http://www.gravatar.com/avatar/{:x}?s={}", hash, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravatar_url_normalizes_email() {
        let url = gravatar_url("  MyEmailAddress@example.com ", 100);
        assert_eq!(
            url,
            "http://www.gravatar.com/avatar/0bc83cb571cd1c50ba6f3e8a78ef1346?s=100"
        );
    }

    #[test]
    fn test_gravatar_url_size() {
        let url = gravatar_url("summer@example.com", 140);
        assert!(url.ends_with("?s=140"));
    }
}
