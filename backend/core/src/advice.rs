//! Treatment advice for each disease label.
//!
//! The table is compiled in. `DiseaseLabel::advice` is an exhaustive match, so
//! adding a label without advice does not build; `resolve` accepts arbitrary
//! strings and falls back to [`DEFAULT_ADVICE`].

use serde::{Deserialize, Serialize};

use crate::label::DiseaseLabel;

/// How soon the grower should act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    None,
    Medium,
    High,
}

impl Urgency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Urgency::None => "none",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

/// What the grower is told to do.
///
/// Serialized flattened into the record: either a `message` key, or
/// `steps` + `prevention` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Guidance {
    Message {
        message: &'static str,
    },
    Treatment {
        steps: &'static [&'static str],
        prevention: &'static str,
    },
}

/// Advice attached to a disease label.
///
/// Healthy records carry `Urgency::None` and a message; every other record
/// carries a non-empty list of steps and a prevention note. The constructors
/// are private so the table below is the only source of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdviceRecord {
    urgency: Urgency,
    #[serde(flatten)]
    guidance: Guidance,
}

impl AdviceRecord {
    const fn healthy(message: &'static str) -> Self {
        Self {
            urgency: Urgency::None,
            guidance: Guidance::Message { message },
        }
    }

    const fn treatment(
        urgency: Urgency,
        steps: &'static [&'static str],
        prevention: &'static str,
    ) -> Self {
        assert!(!matches!(urgency, Urgency::None), "treatment advice needs an urgency");
        assert!(!steps.is_empty(), "treatment advice needs at least one step");
        Self {
            urgency,
            guidance: Guidance::Treatment { steps, prevention },
        }
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn guidance(&self) -> &Guidance {
        &self.guidance
    }

    /// The reassurance message of a healthy record.
    pub fn message(&self) -> Option<&'static str> {
        match self.guidance {
            Guidance::Message { message } => Some(message),
            Guidance::Treatment { .. } => None,
        }
    }

    /// Treatment steps in the order they should be carried out. Empty for healthy records.
    pub fn steps(&self) -> &'static [&'static str] {
        match self.guidance {
            Guidance::Message { .. } => &[],
            Guidance::Treatment { steps, .. } => steps,
        }
    }

    pub fn prevention(&self) -> Option<&'static str> {
        match self.guidance {
            Guidance::Message { .. } => None,
            Guidance::Treatment { prevention, .. } => Some(prevention),
        }
    }
}

/// Returned for any label outside the known set.
pub static DEFAULT_ADVICE: AdviceRecord = AdviceRecord::treatment(
    Urgency::Medium,
    &["Consult agricultural expert for specific treatment"],
    "Practice crop rotation and maintain field hygiene",
);

/// Look up advice by label name. Never fails: unknown names get [`DEFAULT_ADVICE`].
pub fn resolve(label: &str) -> &'static AdviceRecord {
    match label.parse::<DiseaseLabel>() {
        Ok(label) => label.advice(),
        Err(_) => &DEFAULT_ADVICE,
    }
}

impl DiseaseLabel {
    pub fn advice(self) -> &'static AdviceRecord {
        match self {
            DiseaseLabel::PepperBacterialSpot => &PEPPER_BACTERIAL_SPOT,
            DiseaseLabel::PepperHealthy => &PEPPER_HEALTHY,
            DiseaseLabel::PotatoEarlyBlight => &POTATO_EARLY_BLIGHT,
            DiseaseLabel::PotatoLateBlight => &POTATO_LATE_BLIGHT,
            DiseaseLabel::PotatoHealthy => &POTATO_HEALTHY,
            DiseaseLabel::TomatoBacterialSpot => &TOMATO_BACTERIAL_SPOT,
            DiseaseLabel::TomatoEarlyBlight => &TOMATO_EARLY_BLIGHT,
            DiseaseLabel::TomatoLateBlight => &TOMATO_LATE_BLIGHT,
            DiseaseLabel::TomatoLeafMold => &TOMATO_LEAF_MOLD,
            DiseaseLabel::TomatoSeptoriaLeafSpot => &TOMATO_SEPTORIA_LEAF_SPOT,
            DiseaseLabel::TomatoSpiderMites => &TOMATO_SPIDER_MITES,
            DiseaseLabel::TomatoTargetSpot => &TOMATO_TARGET_SPOT,
            DiseaseLabel::TomatoYellowLeafCurlVirus => &TOMATO_YELLOW_LEAF_CURL_VIRUS,
            DiseaseLabel::TomatoMosaicVirus => &TOMATO_MOSAIC_VIRUS,
            DiseaseLabel::TomatoHealthy => &TOMATO_HEALTHY,
        }
    }
}

// ---------------------------------------------------------------------------
// Pepper
// ---------------------------------------------------------------------------

static PEPPER_BACTERIAL_SPOT: AdviceRecord = AdviceRecord::treatment(
    Urgency::High,
    &[
        "Apply copper-based bactericides every 7-10 days",
        "Remove and destroy severely infected plants",
        "Avoid overhead watering to prevent spread",
        "Use disease-free seeds and transplants",
        "Practice 2-3 year crop rotation",
    ],
    "Use resistant varieties and avoid working with plants when wet",
);

static PEPPER_HEALTHY: AdviceRecord = AdviceRecord::healthy(
    "Your pepper plants are healthy! Maintain good spacing and watering practices.",
);

// ---------------------------------------------------------------------------
// Potato
// ---------------------------------------------------------------------------

static POTATO_EARLY_BLIGHT: AdviceRecord = AdviceRecord::treatment(
    Urgency::Medium,
    &[
        "Apply fungicides containing chlorothalonil or mancozeb",
        "Remove infected lower leaves",
        "Water at base of plants (avoid wetting foliage)",
        "Apply mulch to prevent soil splashing",
        "Ensure proper plant spacing for air circulation",
    ],
    "Use certified disease-free seed potatoes",
);

static POTATO_LATE_BLIGHT: AdviceRecord = AdviceRecord::treatment(
    Urgency::High,
    &[
        "Apply copper-based fungicides immediately",
        "Remove and destroy all infected plants",
        "Do not compost infected plant material",
        "Avoid overhead irrigation",
        "Harvest potatoes carefully to avoid bruising",
    ],
    "Plant resistant varieties and practice crop rotation",
);

static POTATO_HEALTHY: AdviceRecord = AdviceRecord::healthy(
    "Your potato plants are healthy! Continue proper hilling and watering practices.",
);

// ---------------------------------------------------------------------------
// Tomato
// ---------------------------------------------------------------------------

static TOMATO_BACTERIAL_SPOT: AdviceRecord = AdviceRecord::treatment(
    Urgency::High,
    &[
        "Apply copper sprays every 7-10 days",
        "Remove severely infected plants",
        "Avoid working with plants when wet",
        "Use drip irrigation instead of overhead watering",
        "Sterilize tools between plants",
    ],
    "Use disease-free seeds and resistant varieties",
);

static TOMATO_EARLY_BLIGHT: AdviceRecord = AdviceRecord::treatment(
    Urgency::Medium,
    &[
        "Apply fungicides containing chlorothalonil",
        "Remove lower infected leaves",
        "Water at base of plants (avoid wetting leaves)",
        "Apply organic mulch around plants",
        "Improve air circulation through proper spacing",
    ],
    "Rotate crops and remove plant debris after harvest",
);

static TOMATO_LATE_BLIGHT: AdviceRecord = AdviceRecord::treatment(
    Urgency::High,
    &[
        "Apply copper-based fungicides immediately",
        "Remove and destroy all infected plants",
        "Avoid overhead watering",
        "Improve air circulation around plants",
        "Do not compost infected plant material",
    ],
    "Use resistant varieties and practice crop rotation",
);

static TOMATO_LEAF_MOLD: AdviceRecord = AdviceRecord::treatment(
    Urgency::Medium,
    &[
        "Apply fungicides containing chlorothalonil",
        "Remove infected leaves promptly",
        "Reduce humidity in greenhouse environments",
        "Improve air circulation around plants",
        "Water plants in the morning only",
    ],
    "Use resistant varieties and avoid overcrowding",
);

static TOMATO_SEPTORIA_LEAF_SPOT: AdviceRecord = AdviceRecord::treatment(
    Urgency::Medium,
    &[
        "Apply copper-based fungicides",
        "Remove infected lower leaves",
        "Avoid overhead watering",
        "Apply mulch to prevent soil splashing",
        "Sterilize tools between plants",
    ],
    "Practice crop rotation and remove plant debris",
);

static TOMATO_SPIDER_MITES: AdviceRecord = AdviceRecord::treatment(
    Urgency::Medium,
    &[
        "Apply insecticidal soap or neem oil",
        "Spray plants with strong water jet to dislodge mites",
        "Introduce predatory mites for biological control",
        "Remove severely infested leaves",
        "Increase humidity around plants",
    ],
    "Monitor plants regularly and maintain plant health",
);

static TOMATO_TARGET_SPOT: AdviceRecord = AdviceRecord::treatment(
    Urgency::Medium,
    &[
        "Apply fungicides containing chlorothalonil",
        "Remove infected leaves and fruits",
        "Improve air circulation",
        "Avoid overhead watering",
        "Practice proper sanitation",
    ],
    "Use resistant varieties and rotate crops",
);

static TOMATO_YELLOW_LEAF_CURL_VIRUS: AdviceRecord = AdviceRecord::treatment(
    Urgency::High,
    &[
        "Remove and destroy infected plants immediately",
        "Control whitefly populations with insecticides",
        "Use yellow sticky traps to monitor whiteflies",
        "Plant virus-free transplants",
        "Use reflective mulches to deter whiteflies",
    ],
    "Use resistant varieties and practice good sanitation",
);

static TOMATO_MOSAIC_VIRUS: AdviceRecord = AdviceRecord::treatment(
    Urgency::High,
    &[
        "Remove and destroy infected plants",
        "Wash hands thoroughly after handling plants",
        "Sterilize tools with bleach solution",
        "Control aphid populations",
        "Do not smoke around tomato plants",
    ],
    "Use virus-free seeds and resistant varieties",
);

static TOMATO_HEALTHY: AdviceRecord = AdviceRecord::healthy(
    "Your tomato plants are healthy! Continue good practices like regular watering, proper spacing, and balanced fertilization.",
);
