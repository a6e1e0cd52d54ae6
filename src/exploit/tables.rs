/// Static CWE → known-CVE table consulted before any live lookup.
/// Entry order is irrelevant; selection always applies the most-recent rule.
const CVES_BY_CWE: &[(&str, &[&str])] = &[
    (
        "CWE-89",
        &[
            "CVE-2022-21661",
            "CVE-2012-1823",
            "CVE-2019-11043",
            "CVE-2023-34362",
            "CVE-2018-10933",
            "CVE-2017-5941",
        ],
    ),
    (
        "CWE-78",
        &[
            "CVE-2014-6271",
            "CVE-2021-3156",
            "CVE-2019-5736",
            "CVE-2016-4437",
        ],
    ),
    (
        "CWE-502",
        &["CVE-2021-44228", "CVE-2022-22965", "CVE-2015-4852"],
    ),
    ("CWE-22", &["CVE-2021-41773", "CVE-2018-9206"]),
    (
        "CWE-79",
        &["CVE-2020-11023", "CVE-2019-11358", "CVE-2018-3721"],
    ),
    ("CWE-918", &["CVE-2021-26855", "CVE-2019-5418"]),
    ("CWE-611", &["CVE-2017-12629", "CVE-2019-9670"]),
    ("CWE-400", &["CVE-2021-3449", "CVE-2016-10195"]),
    ("CWE-287", &["CVE-2019-0708", "CVE-2018-10933"]),
    ("CWE-787", &["CVE-2020-0796", "CVE-2017-1000253"]),
    ("CWE-125", &["CVE-2014-0160", "CVE-2016-2107"]),
    ("CWE-434", &["CVE-2015-7501", "CVE-2019-6340"]),
    ("CWE-601", &["CVE-2015-2080", "CVE-2018-1000525"]),
    ("CWE-16", &["CVE-2017-9805", "CVE-2019-5420"]),
    ("CWE-352", &["CVE-2018-1000525", "CVE-2019-6339"]),
    ("CWE-95", &["CVE-2019-5418", "CVE-2017-5941"]),
    ("CWE-703", &["CVE-2017-3735"]),
    ("CWE-330", &["CVE-2019-1552"]),
    ("CWE-295", &["CVE-2020-0601", "CVE-2016-2107"]),
    ("CWE-269", &["CVE-2021-34527", "CVE-2018-8897"]),
    ("CWE-200", &["CVE-2018-1002105"]),
    ("CWE-327", &["CVE-2015-4000", "CVE-2016-2183"]),
    ("CWE-362", &["CVE-2017-1000112"]),
    ("CWE-470", &["CVE-2017-7525"]),
    ("CWE-98", &["CVE-2017-9841"]),
    ("CWE-120", &["CVE-2017-1000253"]),
    ("CWE-134", &["CVE-2017-16943"]),
    (
        "CWE-20",
        &[
            "CVE-2018-7600",
            "CVE-2017-5638",
            "CVE-2017-9805",
            "CVE-2019-5418",
            "CVE-2018-1000656",
        ],
    ),
    ("CWE-284", &["CVE-2021-40539", "CVE-2019-11043"]),
    ("CWE-377", &["CVE-2022-34918"]),
    ("CWE-209", &["CVE-2021-21300"]),
    ("CWE-276", &["CVE-2017-12635"]),
    ("CWE-242", &["CVE-2016-0638"]),
    (
        "CWE-94",
        &["CVE-2022-22963", "CVE-2017-5941", "CVE-2023-29491"],
    ),
];

/// Known CVE identifiers for a classification, empty when unmapped.
pub fn cves_for(cwe_id: &str) -> &'static [&'static str] {
    CVES_BY_CWE
        .iter()
        .find(|(id, _)| *id == cwe_id)
        .map(|(_, cves)| *cves)
        .unwrap_or(&[])
}
