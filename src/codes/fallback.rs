//! Constant cause-of-death dictionaries
//!
//! Last-resort descriptions for when the code table cannot be read or its
//! columns cannot be guessed, plus manual corrections for codes the published
//! table describes poorly.

/// Description returned for codes absent from every mapping
pub const UNSPECIFIED_CAUSE: &str = "Causa no especificada";

/// Minimal fallback catalog covering the most frequent causes
pub const FALLBACK_DESCRIPTIONS: &[(&str, &str)] = &[
    ("I219", "Infarto agudo del miocardio"),
    ("J449", "Enfermedad pulmonar obstructiva crónica"),
    ("C349", "Cáncer de pulmón"),
    ("I64", "Accidente cerebrovascular"),
    ("I10", "Hipertensión esencial"),
    ("C509", "Cáncer de mama"),
    ("C61", "Cáncer de próstata"),
    ("E149", "Diabetes mellitus no especificada"),
    ("K729", "Enfermedad hepática"),
    ("X95", "Homicidio"),
];

/// Manual corrections that take precedence over any resolved mapping
pub const MANUAL_OVERRIDES: &[(&str, &str)] = &[
    (
        "J440",
        "Enfermedad pulmonar obstructiva crónica con exacerbación aguda",
    ),
    ("J189", "Neumonía, no especificada"),
    ("C169", "Cáncer de estómago, parte no especificada"),
    (
        "X954",
        "Homicidio y lesiones por intervención legal, no especificadas",
    ),
];
