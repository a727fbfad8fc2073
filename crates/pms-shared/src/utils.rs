//! Utility functions

/// Masks the local part of an email address for log output.
pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        match local.chars().count() {
            0 => format!("***{}", domain),
            1 | 2 => format!("{}***{}", local.chars().next().unwrap_or('*'), domain),
            _ => format!("{}***{}", local.chars().take(2).collect::<String>(), domain),
        }
    } else {
        "***".to_string()
    }
}

/// Lower-cases a `Host` header value and drops the port and any trailing dot.
///
/// Bracketed IPv6 literals keep their brackets stripped as well.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().to_ascii_lowercase();

    let without_port = if let Some(rest) = host.strip_prefix('[') {
        rest.split(']').next().unwrap_or_default().to_string()
    } else {
        match host.rsplit_once(':') {
            Some((name, port)) if !name.contains(':') && port.chars().all(|c| c.is_ascii_digit()) => {
                name.to_string()
            }
            _ => host,
        }
    };

    without_port.trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "al***@example.com");
        assert_eq!(mask_email("a@example.com"), "a***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_normalize_host_strips_port_and_case() {
        assert_eq!(normalize_host("Acme.DarManager.net:8443"), "acme.darmanager.net");
        assert_eq!(normalize_host("localhost:3000"), "localhost");
        assert_eq!(normalize_host("acme.localhost."), "acme.localhost");
    }

    #[test]
    fn test_normalize_host_ipv6() {
        assert_eq!(normalize_host("[::1]:8080"), "::1");
        assert_eq!(normalize_host("::1"), "::1");
    }
}
