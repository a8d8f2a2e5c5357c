//! Length-bounded names derived from arbitrary input.
//!
//! Derived resource names must fit a DNS label. Cutting a long name down is
//! not enough on its own since two long names sharing a prefix would collide,
//! so truncated names embed a short hash of the full input.

/// Maximum length of a DNS-1123 label.
pub const DNS1123_LABEL_MAX_LENGTH: usize = 63;

/// Width of the hash segment in truncated names, in hex digits.
pub const HASH_WIDTH: usize = 8;

/// Build `base-suffix`, shortened to at most `max_len` bytes.
///
/// If `base-suffix` fits it is returned unchanged. Otherwise `base` is cut so
/// that `prefix-hash-suffix` is exactly `max_len` long, where `hash` is
/// [`short_hash`] of the whole `base`.
///
/// When even `-hash-suffix` does not fit, the suffix is dropped and the result
/// is `prefix-hash` with the hash taken over `base-suffix`, cut to `max_len`.
pub fn bounded_name(base: &str, suffix: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    let name = format!("{}-{}", base, suffix);
    if name.len() <= max_len {
        return name;
    }

    match max_len.checked_sub(HASH_WIDTH + 2 + suffix.len()) {
        Some(prefix_len) => {
            let bounded = format!(
                "{}-{}-{}",
                truncate(base, prefix_len),
                short_hash(base),
                suffix
            );
            tracing::debug!(name = %name, bounded = %bounded, "truncated name");
            bounded
        }
        None => {
            let prefix = truncate(base, max_len.saturating_sub(HASH_WIDTH + 1));
            let short = format!("{}-{}", prefix, short_hash(&name));
            tracing::debug!(
                name = %name,
                max_len,
                "suffix does not fit, dropping it"
            );
            truncate(&short, max_len).to_string()
        }
    }
}

/// 32-bit FNV-1a hash of `value`, as 8 lowercase hex digits.
pub fn short_hash(value: &str) -> String {
    const FNV_OFFSET: u32 = 0x811c_9dc5;
    const FNV_PRIME: u32 = 0x0100_0193;

    let mut hash = FNV_OFFSET;
    for byte in value.as_bytes() {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    format!("{:08x}", hash)
}

/// Check whether `name` is a valid DNS-1123 label.
///
/// Rules:
/// - Length: 1..=63 characters
/// - Allowed characters: lowercase ASCII letters, digits, hyphen (-)
/// - Must start and end with a letter or digit
pub fn is_dns1123_label(name: &str) -> bool {
    let bytes = name.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };

    if name.len() > DNS1123_LABEL_MAX_LENGTH {
        return false;
    }

    let alnum = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    alnum(first) && alnum(last) && bytes.iter().all(|b| alnum(b) || *b == b'-')
}

/// Cut `s` to at most `max_bytes`, backing off to a char boundary.
fn truncate(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUFFIX: &str = "user-build-volume";

    #[test]
    fn test_short_hash() {
        assert_eq!(
            short_hash("build-volume-larger-than-47-characters-but-less-than-63"),
            "8c2b6813"
        );
        assert_eq!(short_hash("secret-one"), "d4552f88");
        // offset basis, zero padded width
        assert_eq!(short_hash(""), "811c9dc5");
        assert_eq!(short_hash("a").len(), HASH_WIDTH);
    }

    #[test]
    fn test_bounded_name_fits() {
        assert_eq!(
            bounded_name("secret-one", SUFFIX, DNS1123_LABEL_MAX_LENGTH),
            "secret-one-user-build-volume"
        );
        assert_eq!(bounded_name("", SUFFIX, 63), "-user-build-volume");
    }

    #[test]
    fn test_bounded_name_truncates_with_hash() {
        let name = bounded_name(
            "build-volume-larger-than-47-characters-but-less-than-63",
            SUFFIX,
            DNS1123_LABEL_MAX_LENGTH,
        );
        assert_eq!(
            name,
            "build-volume-larger-than-47-characte-8c2b6813-user-build-volume"
        );
        assert_eq!(name.len(), DNS1123_LABEL_MAX_LENGTH);
    }

    #[test]
    fn test_bounded_name_length_boundary() {
        // 45 + 1 + 17 == 63: untouched
        let base = "a".repeat(45);
        assert_eq!(
            bounded_name(&base, SUFFIX, 63),
            format!("{}-{}", base, SUFFIX)
        );

        // one more character forces truncation
        let base = "a".repeat(46);
        let name = bounded_name(&base, SUFFIX, 63);
        assert_eq!(name.len(), 63);
        assert_eq!(name, format!("{}-03b58553-{}", "a".repeat(36), SUFFIX));
    }

    #[test]
    fn test_bounded_name_distinguishes_shared_prefix() {
        let a = bounded_name(&format!("{}-first", "x".repeat(60)), SUFFIX, 63);
        let b = bounded_name(&format!("{}-second", "x".repeat(60)), SUFFIX, 63);
        assert_eq!(a.len(), 63);
        assert_eq!(b.len(), 63);
        assert_ne!(a, b);
    }

    #[test]
    fn test_bounded_name_suffix_too_long() {
        let name = bounded_name("abcdefghij", "a-very-long-suffix", 12);
        assert_eq!(name, "abc-43405822");

        // budget smaller than the hash itself
        let name = bounded_name("abcdefghij", "a-very-long-suffix", 5);
        assert_eq!(name, "-4340");
    }

    #[test]
    fn test_bounded_name_zero_length() {
        assert_eq!(bounded_name("anything", SUFFIX, 0), "");
    }

    #[test]
    fn test_bounded_name_never_splits_chars() {
        let base = "é".repeat(40);
        let name = bounded_name(&base, SUFFIX, 63);
        assert!(name.len() <= 63);
        assert!(name.ends_with(SUFFIX));
    }

    #[test]
    fn test_bounded_name_max_length_property() {
        for len in 0..120 {
            let base = "b".repeat(len);
            for max_len in [1, 9, 10, 27, 28, 40, 63] {
                let name = bounded_name(&base, SUFFIX, max_len);
                assert!(
                    name.len() <= max_len,
                    "len {} > {} for base of {}",
                    name.len(),
                    max_len,
                    len
                );
            }
        }
    }

    #[test]
    fn test_is_dns1123_label() {
        let longest = "a".repeat(63);
        let valid = ["a", "secret-one", "abc123", "1-2-3", longest.as_str()];
        for name in valid {
            assert!(is_dns1123_label(name), "expected '{}' to be valid", name);
        }

        let invalid = [
            ("", "empty"),
            ("-abc", "starts with hyphen"),
            ("abc-", "ends with hyphen"),
            ("Abc", "uppercase"),
            ("a_b", "underscore"),
            ("a.b", "dot"),
            ("a/b", "slash"),
        ];
        for (name, desc) in invalid {
            assert!(
                !is_dns1123_label(name),
                "expected '{}' ({}) to be invalid",
                name,
                desc
            );
        }
        assert!(!is_dns1123_label(&"a".repeat(64)));
    }
}
