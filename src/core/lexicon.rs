//! Keyword lexicon
//!
//! French-tuned keyword tables. Matching is a plain substring test on the
//! normalized (lowercased, typographic apostrophes folded) text, so entries
//! are chosen to avoid accidental hits inside common words.

use crate::types::{CrisisCategory, RpsDimension};

/// Risk-direction buckets for one dimension
#[derive(Debug)]
pub struct DimensionLexicon {
    /// +8 each
    pub high: &'static [&'static str],
    /// +4 each
    pub medium: &'static [&'static str],
    /// -5 each (protective factors)
    pub low: &'static [&'static str],
}

// =============================================================================
// RPS DIMENSIONS
// =============================================================================

static INTENSITY_WORK: DimensionLexicon = DimensionLexicon {
    high: &[
        "surcharge",
        "débordé",
        "urgence",
        "deadline",
        "heures sup",
        "pas le temps",
        "trop de travail",
        "épuisant",
        "rythme infernal",
        "sous l'eau",
    ],
    medium: &[
        "la pression",
        "sous pression",
        "de pression",
        "beaucoup de travail",
        "chargé",
        "objectifs",
        "cadence",
    ],
    low: &["équilibre", "rythme tranquille", "temps pour moi", "bien organisé"],
};

static EMOTIONAL_DEMANDS: DimensionLexicon = DimensionLexicon {
    high: &[
        "agressé",
        "insulté",
        "violence verbale",
        "client difficile",
        "cacher mes émotions",
        "masquer",
        "souffrance des autres",
        "détresse",
    ],
    medium: &["tension", "patients", "plaintes", "émotionnellement", "sourire forcé"],
    low: &["reconnaissance", "soutenu", "apaisé"],
};

static AUTONOMY: DimensionLexicon = DimensionLexicon {
    high: &[
        "micromanagement",
        "aucune marge",
        "imposé",
        "pas le choix",
        "contrôlé",
        "surveillé",
        "pas mon mot à dire",
    ],
    medium: &["procédures", "validation", "rigide", "peu de latitude"],
    low: &["autonomie", "liberté", "je décide", "marge de manœuvre", "flexibilité"],
};

static SOCIAL_RELATIONS: DimensionLexicon = DimensionLexicon {
    high: &[
        "isolé",
        "tout seul",
        "toute seule",
        "me sens seul",
        "harcèlement",
        "conflit",
        "suis exclu",
        "sens exclu",
        "ignoré",
        "personne ne m'aide",
        "mis à l'écart",
    ],
    medium: &[
        "tendu avec",
        "relations tendues",
        "distant",
        "peu d'échanges",
        "mauvaise ambiance",
    ],
    low: &["équipe soudée", "bonne ambiance", "entraide", "collègues sympas", "soutien"],
};

static VALUE_CONFLICTS: DimensionLexicon = DimensionLexicon {
    high: &[
        "contre mes valeurs",
        "pas d'éthique",
        "travail bâclé",
        "aucun sens",
        "inutile",
        "honte",
        "qualité empêchée",
        "mentir",
    ],
    medium: &["doute", "frustré", "à contrecœur", "compromis"],
    low: &["fierté", "je me sens utile", "sens à mon travail", "valeurs partagées"],
};

static JOB_INSECURITY: DimensionLexicon = DimensionLexicon {
    high: &[
        "licenciement",
        "plan social",
        "restructuration",
        "peur de perdre",
        "cdd",
        "précaire",
        "chômage",
        "fermeture",
    ],
    medium: &["incertain", "rumeurs", "réorganisation", "changements"],
    low: &["cdi", "poste stable", "sécurité de l'emploi", "confiance en l'avenir"],
};

/// Keyword buckets for a dimension
pub fn dimension_lexicon(dimension: RpsDimension) -> &'static DimensionLexicon {
    match dimension {
        RpsDimension::IntensityWork => &INTENSITY_WORK,
        RpsDimension::EmotionalDemands => &EMOTIONAL_DEMANDS,
        RpsDimension::Autonomy => &AUTONOMY,
        RpsDimension::SocialRelations => &SOCIAL_RELATIONS,
        RpsDimension::ValueConflicts => &VALUE_CONFLICTS,
        RpsDimension::JobInsecurity => &JOB_INSECURITY,
    }
}

// =============================================================================
// BURNOUT SUB-DIMENSIONS
// =============================================================================

pub const EMOTIONAL_EXHAUSTION: &[&str] = &[
    "épuisé",
    "je suis vidé",
    "à bout",
    "plus d'énergie",
    "fatigué",
    "exténué",
    "crevé",
    "lessivé",
    "je n'en peux plus",
    "à plat",
];

pub const DEPERSONALIZATION: &[&str] = &[
    "je m'en fiche",
    "indifférent",
    "cynique",
    "détaché",
    "plus envie",
    "les clients m'énervent",
    "distance",
    "je m'en moque",
    "blasé",
    "robot",
];

pub const REDUCED_ACCOMPLISHMENT: &[&str] = &[
    "inefficace",
    "je suis nul",
    "échec",
    "rien ne marche",
    "incompétent",
    "je n'avance pas",
    "sert à rien",
    "pas à la hauteur",
    "inutile",
    "raté",
];

// =============================================================================
// MOTIVATION
// =============================================================================

pub const MOTIVATION_POSITIVE: &[&str] = &[
    "je suis motivé",
    "passionné",
    "je suis content",
    "je suis heureux",
    "je suis heureuse",
    "fier de",
    "enthousiaste",
    "progresser",
    "j'aime mon travail",
    "stimulant",
    "j'ai hâte",
];

pub const MOTIVATION_NEGATIVE: &[&str] = &[
    "démotivé",
    "aucune motivation",
    "ennui",
    "plus envie",
    "à quoi bon",
    "lassé",
    "désintérêt",
    "corvée",
    "démissionner",
    "subir",
];

// =============================================================================
// CONVERSATIONAL SIGNALS
// =============================================================================

pub const STRESS: &[&str] = &[
    "stress",
    "angoisse",
    "anxieux",
    "anxieuse",
    "la pression",
    "sous pression",
    "de pression",
    "inquiet",
    "inquiète",
    "nerveux",
    "je suis tendu",
    "très tendu",
];

pub const FATIGUE: &[&str] = &[
    "fatigué",
    "épuisé",
    "crevé",
    "à bout",
    "je suis vidé",
    "pas d'énergie",
    "mal dormi",
    "insomnie",
];

pub const ISOLATION: &[&str] = &[
    "tout seul",
    "toute seule",
    "me sens seul",
    "isolé",
    "abandonné",
    "rejeté",
    "suis exclu",
    "sens exclu",
    "personne ne me comprend",
    "pas d'amis",
];

pub const ANGER: &[&str] = &[
    "colère",
    "énervé",
    "furieux",
    "furieuse",
    "enragé",
    "injuste",
    "ras le bol",
    "en ai marre",
];

pub const LOSS_OF_MEANING: &[&str] = &[
    "à quoi bon",
    "aucun sens",
    "sert à rien",
    "vide de sens",
    "pourquoi continuer",
];

/// Raise energy
pub const ENERGY_POSITIVE: &[&str] = &[
    "en forme",
    "reposé",
    "je suis motivé",
    "plein d'énergie",
    "ça va bien",
    "je suis content",
];

// =============================================================================
// ROLE CONTEXT
// =============================================================================

pub const TEEN_CONTEXT: &[&str] = &[
    "lycée",
    "collège",
    "mes parents",
    "mon prof",
    "ma prof",
    "les profs",
    "le bac",
    "brevet",
    "en classe",
];

pub const PARENT_CONTEXT: &[&str] = &[
    "mon fils",
    "ma fille",
    "mes enfants",
    "mon enfant",
    "mon ado",
    "parentalité",
];

pub const EMPLOYEE_CONTEXT: &[&str] = &[
    "travail",
    "boulot",
    "bureau",
    "collègue",
    "manager",
    "patron",
    "réunion",
    "entreprise",
    "chef",
];

// =============================================================================
// CRISIS PHRASES
// =============================================================================

pub const CRISIS_PHRASES: &[(&str, CrisisCategory)] = &[
    ("je vais en finir", CrisisCategory::SuicidalIdeation),
    ("en finir avec la vie", CrisisCategory::SuicidalIdeation),
    ("me suicider", CrisisCategory::SuicidalIdeation),
    ("suicide", CrisisCategory::SuicidalIdeation),
    ("envie de mourir", CrisisCategory::SuicidalIdeation),
    ("je veux mourir", CrisisCategory::SuicidalIdeation),
    ("plus envie de vivre", CrisisCategory::SuicidalIdeation),
    ("mettre fin à mes jours", CrisisCategory::SuicidalIdeation),
    ("me faire du mal", CrisisCategory::SelfHarm),
    ("me scarifier", CrisisCategory::SelfHarm),
    ("me blesser", CrisisCategory::SelfHarm),
    ("le tuer", CrisisCategory::Violence),
    ("la tuer", CrisisCategory::Violence),
    ("les tuer", CrisisCategory::Violence),
    ("frapper quelqu'un", CrisisCategory::Violence),
    ("lui faire du mal", CrisisCategory::Violence),
    ("crise de panique", CrisisCategory::Panic),
    ("crise d'angoisse", CrisisCategory::Panic),
    ("je n'arrive plus à respirer", CrisisCategory::Panic),
];

// =============================================================================
// MATCHING
// =============================================================================

/// Lowercase and fold typographic apostrophes
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

/// Keywords of `list` present in already-normalized text, in list order.
/// Presence only: a keyword repeated in the text is returned once.
pub fn find_keywords(normalized: &str, list: &'static [&'static str]) -> Vec<&'static str> {
    list.iter()
        .copied()
        .filter(|keyword| normalized.contains(keyword))
        .collect()
}

/// Number of keywords of `list` present in already-normalized text
pub fn count_keywords(normalized: &str, list: &[&str]) -> usize {
    list.iter().filter(|keyword| normalized.contains(*keyword)).count()
}
