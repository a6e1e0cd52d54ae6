/// CWE → OWASP Top 10 (2021) category labels.
const OWASP_TOP10: &[(&str, &str)] = &[
    // A01: Broken Access Control
    ("CWE-200", "A01:2021 - Broken Access Control"),
    ("CWE-284", "A01:2021 - Broken Access Control"),
    ("CWE-285", "A01:2021 - Broken Access Control"),
    // A02: Cryptographic Failures
    ("CWE-310", "A02:2021 - Cryptographic Failures"),
    ("CWE-327", "A02:2021 - Cryptographic Failures"),
    ("CWE-329", "A02:2021 - Cryptographic Failures"),
    ("CWE-330", "A02:2021 - Cryptographic Failures"),
    ("CWE-295", "A02:2021 - Cryptographic Failures"),
    ("CWE-798", "A02:2021 - Cryptographic Failures"),
    // A03: Injection
    ("CWE-78", "A03:2021 - Injection"),
    ("CWE-79", "A03:2021 - Injection"),
    ("CWE-89", "A03:2021 - Injection"),
    ("CWE-94", "A03:2021 - Injection"),
    ("CWE-95", "A03:2021 - Injection"),
    ("CWE-20", "A03:2021 - Injection"),
    ("CWE-134", "A03:2021 - Injection"),
    ("CWE-242", "A03:2021 - Injection"),
    // A04: Insecure Design
    ("CWE-362", "A04:2021 - Insecure Design"),
    ("CWE-269", "A04:2021 - Insecure Design"),
    // A05: Security Misconfiguration
    ("CWE-16", "A05:2021 - Security Misconfiguration"),
    ("CWE-22", "A05:2021 - Security Misconfiguration"),
    ("CWE-276", "A05:2021 - Security Misconfiguration"),
    ("CWE-611", "A05:2021 - Security Misconfiguration"),
    ("CWE-377", "A05:2021 - Security Misconfiguration"),
    ("CWE-352", "A05:2021 - Security Misconfiguration"),
    ("CWE-120", "A05:2021 - Security Misconfiguration"),
    // A06: Vulnerable and Outdated Components
    ("CWE-400", "A06:2021 - Vulnerable and Outdated Components"),
    ("CWE-125", "A06:2021 - Vulnerable and Outdated Components"),
    // A07: Identification and Authentication Failures
    ("CWE-287", "A07:2021 - Identification and Authentication Failures"),
    // A08: Software and Data Integrity Failures
    ("CWE-502", "A08:2021 - Software and Data Integrity Failures"),
    ("CWE-434", "A08:2021 - Software and Data Integrity Failures"),
    // A09: Security Logging and Monitoring Failures
    ("CWE-209", "A09:2021 - Security Logging and Monitoring Failures"),
    ("CWE-703", "A09:2021 - Security Logging and Monitoring Failures"),
    // A10: Server-Side Request Forgery (SSRF)
    ("CWE-918", "A10:2021 - Server-Side Request Forgery (SSRF)"),
];

/// Look up the OWASP Top 10 category for a classification identifier.
pub fn risk_category_for(cwe_id: &str) -> Option<&'static str> {
    OWASP_TOP10
        .iter()
        .find(|(id, _)| *id == cwe_id)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_mappings() {
        assert_eq!(risk_category_for("CWE-89"), Some("A03:2021 - Injection"));
        assert_eq!(
            risk_category_for("CWE-798"),
            Some("A02:2021 - Cryptographic Failures")
        );
        assert_eq!(
            risk_category_for("CWE-918"),
            Some("A10:2021 - Server-Side Request Forgery (SSRF)")
        );
    }

    #[test]
    fn test_unknown_cwe_has_no_category() {
        assert_eq!(risk_category_for("CWE-9999"), None);
    }
}
