/// Static keyword → CWE table used as the last resolution fallback when no
/// explicit identifier is present anywhere in the finding.
///
/// Multi-word phrases coexist with single-word fallbacks ("sql injection"
/// vs "injection"); [`KeywordTable`] orders lookups longest-key-first so the
/// specific phrase always wins.
const CWE_KEYWORDS: &[(&str, &str)] = &[
    ("hardcoded password", "CWE-798"),
    ("sql injection", "CWE-89"),
    ("sql string", "CWE-89"),
    ("manual sql", "CWE-89"),
    ("formatted sql query", "CWE-89"),
    ("unparameterized query", "CWE-89"),
    ("unsafe sql", "CWE-89"),
    ("query concatenation", "CWE-89"),
    ("raw sql", "CWE-89"),
    ("execute query", "CWE-89"),
    ("command injection", "CWE-78"),
    ("shell", "CWE-78"),
    ("os.system", "CWE-78"),
    ("insecure deserialization", "CWE-502"),
    ("path traversal", "CWE-22"),
    ("directory traversal", "CWE-22"),
    ("use of eval", "CWE-95"),
    ("unsafe yaml load", "CWE-20"),
    ("no timeout", "CWE-400"),
    ("request timeout", "CWE-400"),
    ("missing raise_for_status", "CWE-703"),
    ("insecure random", "CWE-330"),
    ("injection", "CWE-78"),
    ("password", "CWE-798"),
    ("secret", "CWE-798"),
    ("api key", "CWE-798"),
    ("timeout", "CWE-400"),
    ("xss", "CWE-79"),
    ("cross site scripting", "CWE-79"),
    ("csrf", "CWE-352"),
    ("cross site request forgery", "CWE-352"),
    ("ssrf", "CWE-918"),
    ("server side request forgery", "CWE-918"),
    ("xxe", "CWE-611"),
    ("xml external entity", "CWE-611"),
    ("file inclusion", "CWE-98"),
    ("insecure configuration", "CWE-16"),
    ("insecure config", "CWE-16"),
    ("denial of service", "CWE-400"),
    ("resource exhaustion", "CWE-400"),
    ("race condition", "CWE-362"),
    ("unvalidated redirect", "CWE-601"),
    ("open redirect", "CWE-601"),
    ("unsafe reflection", "CWE-470"),
    ("weak crypto", "CWE-327"),
    ("cryptographically weak", "CWE-327"),
    ("weak encryption", "CWE-327"),
    ("broken crypto", "CWE-327"),
    ("crypto misuse", "CWE-327"),
    ("weak key", "CWE-327"),
    ("md5", "CWE-327"),
    ("weak hash", "CWE-327"),
    ("weak hashing", "CWE-327"),
    ("verify=false", "CWE-295"),
    ("disable ssl verification", "CWE-295"),
    ("ssl verification", "CWE-295"),
    ("certificate verification", "CWE-295"),
    ("improper ssl", "CWE-295"),
    ("unrestricted file upload", "CWE-434"),
    ("file upload", "CWE-434"),
    ("broken authentication", "CWE-287"),
    ("information disclosure", "CWE-200"),
    ("leak", "CWE-200"),
    ("out of bounds", "CWE-787"),
    ("buffer overflow", "CWE-120"),
    ("format string", "CWE-134"),
    ("input validation", "CWE-20"),
    ("unsafe input", "CWE-20"),
    ("access control", "CWE-284"),
    ("authorization", "CWE-284"),
    ("temp file", "CWE-377"),
    ("temporary file", "CWE-377"),
    ("error message", "CWE-209"),
    ("verbose error", "CWE-209"),
    ("gets(", "CWE-242"),
    ("strcpy(", "CWE-242"),
    ("template injection", "CWE-94"),
    ("jinja", "CWE-94"),
    ("improper permission", "CWE-276"),
];

/// Keyword lookup table with deterministic longest-key-first matching.
pub struct KeywordTable {
    // (keyword, cwe) sorted by descending keyword length, then keyword.
    ordered: Vec<(&'static str, &'static str)>,
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::from_entries(CWE_KEYWORDS)
    }

    pub fn from_entries(entries: &[(&'static str, &'static str)]) -> Self {
        let mut ordered: Vec<(&'static str, &'static str)> = entries.to_vec();
        ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));
        Self { ordered }
    }

    /// Match the issue text against the table. The text is lowercased before
    /// matching; keys are tried longest first so multi-word phrases take
    /// precedence over their single-word fallbacks.
    pub fn lookup(&self, issue_text: &str) -> Option<&'static str> {
        let lowered = issue_text.to_lowercase();
        self.ordered
            .iter()
            .find(|(key, _)| lowered.contains(key))
            .map(|(_, cwe)| *cwe)
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new()
    }
}
