//! Static vocabularies used by the entity extractors.
//!
//! Both tables are ordered: when a question mentions several entries the
//! first one listed wins.

/// Department synonym to canonical department code.
pub const DEPARTMENT_SYNONYMS: &[(&str, &str)] = &[
    ("cse", "CSE"),
    ("computer science", "CSE"),
    ("ece", "ECE"),
    ("electronics", "ECE"),
    ("mech", "MECH"),
    ("mechanical", "MECH"),
];

/// Product keywords recognised in sales questions.
pub const PRODUCT_KEYWORDS: &[&str] = &[
    "laptop",
    "phone",
    "mobile",
    "tablet",
    "headphone",
    "headphones",
    "camera",
    "monitor",
    "keyboard",
    "mouse",
    "printer",
];
