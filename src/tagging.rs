//! Keyword-based tag inference for records that no source tagged.
//!
//! Matching is plain substring search over lower-cased text, so short
//! keywords also fire inside longer words ("car" in "care", "ride" in
//! "pride"). That is accepted: the tagger is a best-effort fallback.

/// Ordered (tag, keywords) table. Output follows this order.
pub const KEYWORD_TAGS: &[(&str, &[&str])] = &[
    (
        "Veterans",
        &[
            "veteran", "military", "soldier", "armed force", "navy", "army", "air force",
            "marine", "va benefit", "va health", "va service",
        ],
    ),
    (
        "Food",
        &[
            "food", "nutrition", "meal", "pantry", "snap", "hunger", "grocery", "wic",
            "food bank", "food shelf", "feeding",
        ],
    ),
    (
        "Housing",
        &[
            "housing", "shelter", "homeless", "apartment", "rent", "evict", "lodging",
            "transitional living", "sober living", "residential",
        ],
    ),
    (
        "Medical",
        &[
            "medical", "health", "clinic", "doctor", "hospital", "therapy", "counseling",
            "treatment", "substance", "addiction", "recovery", "rehab", "dental", "pharmacy",
            "prescription", "mental health", "psychiatric", "behavioral", "medication",
        ],
    ),
    (
        "Education",
        &[
            "education", "school", "college", "training", "ged", "learn", "degree", "class",
            "academic", "literacy", "tutor",
        ],
    ),
    (
        "Employment",
        &[
            "employ", "job", "work", "career", "resume", "hire", "labor", "vocational",
            "workforce", "occupation",
        ],
    ),
    (
        "Legal",
        &[
            "legal", "attorney", "lawyer", "court", " law ", "criminal", "arrest", "custody",
            "rights", "domestic violence", "advocacy", "paralegal",
        ],
    ),
    (
        "Benefits",
        &[
            "benefit", "medicaid", "medicare", "ssi", "ssdi", "financial assistance", "tanf",
            "government assistance", "cash assistance", "insurance",
        ],
    ),
    (
        "Youth-and-Family",
        &[
            "youth", "child", "family", "parent", "kid", "teen", "adolescent", "foster",
            "juvenile", "newborn", "infant", "baby", "parenting",
        ],
    ),
    (
        "Elderly",
        &[
            "elder", "senior", "aging", "older adult", "geriatric", "assisted living",
            "long-term care", "memory care",
        ],
    ),
    (
        "LGBTQ",
        &[
            "lgbt", "gay", "lesbian", "transgender", "bisexual", "queer", "non-binary",
            "nonbinary",
        ],
    ),
    (
        "Native-Indigenous",
        &["native", "indigenous", "tribal", "indian tribe", "first nation"],
    ),
    (
        "Transportation",
        &["transport", "bus", "ride", "car", "vehicle", "drive", "transit", "mobility"],
    ),
    ("Rural", &["rural", "frontier county"]),
    (
        "SO",
        &["sex offender", "sex offense", "registry", "so list", "sexual offense"],
    ),
];

/// Returns every tag whose keyword list has a match in `text`, in table
/// order.
pub fn infer_tags(text: &str) -> Vec<&'static str> {
    let text = text.to_lowercase();
    KEYWORD_TAGS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(tag, _)| *tag)
        .collect()
}
