use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A plant health category emitted by the leaf classifier.
///
/// Variant order is the classifier's output order: the score at index `i` of
/// the model's probability vector belongs to `DiseaseLabel::ALL[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiseaseLabel {
    PepperBacterialSpot,
    PepperHealthy,
    PotatoEarlyBlight,
    PotatoLateBlight,
    PotatoHealthy,
    TomatoBacterialSpot,
    TomatoEarlyBlight,
    TomatoLateBlight,
    TomatoLeafMold,
    TomatoSeptoriaLeafSpot,
    TomatoSpiderMites,
    TomatoTargetSpot,
    TomatoYellowLeafCurlVirus,
    TomatoMosaicVirus,
    TomatoHealthy,
}

/// Returned when a string is not one of the fifteen known labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown disease label: {0:?}")]
pub struct ParseLabelError(pub String);

impl DiseaseLabel {
    pub const COUNT: usize = 15;

    /// Every label, in classifier output order.
    pub const ALL: [DiseaseLabel; Self::COUNT] = [
        DiseaseLabel::PepperBacterialSpot,
        DiseaseLabel::PepperHealthy,
        DiseaseLabel::PotatoEarlyBlight,
        DiseaseLabel::PotatoLateBlight,
        DiseaseLabel::PotatoHealthy,
        DiseaseLabel::TomatoBacterialSpot,
        DiseaseLabel::TomatoEarlyBlight,
        DiseaseLabel::TomatoLateBlight,
        DiseaseLabel::TomatoLeafMold,
        DiseaseLabel::TomatoSeptoriaLeafSpot,
        DiseaseLabel::TomatoSpiderMites,
        DiseaseLabel::TomatoTargetSpot,
        DiseaseLabel::TomatoYellowLeafCurlVirus,
        DiseaseLabel::TomatoMosaicVirus,
        DiseaseLabel::TomatoHealthy,
    ];

    /// Display name, as used on the wire and by the model's class list.
    pub const fn as_str(self) -> &'static str {
        match self {
            DiseaseLabel::PepperBacterialSpot => "Pepper Bacterial Spot",
            DiseaseLabel::PepperHealthy => "Pepper Healthy",
            DiseaseLabel::PotatoEarlyBlight => "Potato Early Blight",
            DiseaseLabel::PotatoLateBlight => "Potato Late Blight",
            DiseaseLabel::PotatoHealthy => "Potato Healthy",
            DiseaseLabel::TomatoBacterialSpot => "Tomato Bacterial Spot",
            DiseaseLabel::TomatoEarlyBlight => "Tomato Early Blight",
            DiseaseLabel::TomatoLateBlight => "Tomato Late Blight",
            DiseaseLabel::TomatoLeafMold => "Tomato Leaf Mold",
            DiseaseLabel::TomatoSeptoriaLeafSpot => "Tomato Septoria Leaf Spot",
            DiseaseLabel::TomatoSpiderMites => "Tomato Spider Mites",
            DiseaseLabel::TomatoTargetSpot => "Tomato Target Spot",
            DiseaseLabel::TomatoYellowLeafCurlVirus => "Tomato Yellow Leaf Curl Virus",
            DiseaseLabel::TomatoMosaicVirus => "Tomato Mosaic Virus",
            DiseaseLabel::TomatoHealthy => "Tomato Healthy",
        }
    }

    /// Position of this label in the classifier's output vector.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Label for a position in the classifier's output vector.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn is_healthy(self) -> bool {
        matches!(
            self,
            DiseaseLabel::PepperHealthy | DiseaseLabel::PotatoHealthy | DiseaseLabel::TomatoHealthy
        )
    }
}

impl fmt::Display for DiseaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiseaseLabel {
    type Err = ParseLabelError;

    /// Exact, case-sensitive match on the display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| ParseLabelError(s.to_string()))
    }
}

impl Serialize for DiseaseLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DiseaseLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
