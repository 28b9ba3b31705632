//! Crop rotation planner.
//!
//! A static table keyed by soil type. Crops the farmer grew last season are
//! listed as avoided and never recommended again.

use crate::dto::{RecommendedCrop, RotationPlan, SoilInfo};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoilType {
    Loamy,
    Sandy,
    Clay,
    Silty,
}

struct CropAdvice {
    name: &'static str,
    reason: &'static str,
    emoji: &'static str,
}

const fn crop(name: &'static str, reason: &'static str, emoji: &'static str) -> CropAdvice {
    CropAdvice { name, reason, emoji }
}

static LOAMY: [CropAdvice; 4] = [
    crop("Tomatoes", "Thrive in well-balanced loamy soil", "🍅"),
    crop("Carrots", "Develop straight roots in loose loam", "🥕"),
    crop("Lettuce", "Grows quickly in fertile loam", "🥬"),
    crop("Beans", "Fix nitrogen in loamy soil", "🫘"),
];

static SANDY: [CropAdvice; 4] = [
    crop("Carrots", "Roots develop well in loose sand", "🥕"),
    crop("Radishes", "Quick-growing in warm sandy soils", "🌶️"),
    crop("Potatoes", "Tuber development in well-drained sand", "🥔"),
    crop("Asparagus", "Performs well in sandy conditions", "🌱"),
];

static CLAY: [CropAdvice; 4] = [
    crop("Cabbage", "Handles heavy clay soils well", "🥬"),
    crop("Brussels Sprouts", "Anchors well in clay", "🥦"),
    crop("Kale", "Tolerates dense clay soil", "🥬"),
    crop("Broccoli", "Grows well in moisture-retentive clay", "🥦"),
];

static SILTY: [CropAdvice; 4] = [
    crop("Spinach", "Loves moisture-retentive silt", "🍃"),
    crop("Onions", "Bulbs develop well in silty soil", "🧅"),
    crop("Peas", "Early crop for fertile silt", "🫛"),
    crop("Strawberries", "Thrive in rich silty loam", "🍓"),
];

const GENERAL_TIP: &str = "📅 Keep records of your planting history for better rotation planning";

impl SoilType {
    pub const ALL: [SoilType; 4] = [SoilType::Loamy, SoilType::Sandy, SoilType::Clay, SoilType::Silty];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Loamy => "loamy",
            SoilType::Sandy => "sandy",
            SoilType::Clay => "clay",
            SoilType::Silty => "silty",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SoilType::Loamy => "🌱",
            SoilType::Sandy => "🏖️",
            SoilType::Clay => "🧱",
            SoilType::Silty => "💧",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SoilType::Loamy => "Best all-around",
            SoilType::Sandy => "Fast-draining",
            SoilType::Clay => "Heavy and dense",
            SoilType::Silty => "Moisture-retentive",
        }
    }

    fn recommended(&self) -> &'static [CropAdvice; 4] {
        match self {
            SoilType::Loamy => &LOAMY,
            SoilType::Sandy => &SANDY,
            SoilType::Clay => &CLAY,
            SoilType::Silty => &SILTY,
        }
    }

    fn avoided(&self) -> &'static [&'static str] {
        match self {
            SoilType::Loamy => &["Watermelon", "Pumpkin"],
            SoilType::Sandy => &["Celery", "Cauliflower"],
            SoilType::Clay => &["Carrots", "Parsnips"],
            SoilType::Silty => &["Sweet Potatoes", "Artichokes"],
        }
    }

    fn tips(&self) -> &'static [&'static str] {
        match self {
            SoilType::Loamy => &[
                "🔄 Rotate between heavy feeders (tomatoes), light feeders (onions), and soil builders (beans)",
                "🌱 Follow nitrogen-loving crops with nitrogen-fixing legumes",
            ],
            SoilType::Sandy => &[
                "💧 Water more frequently as sandy soil drains quickly",
                "🌿 Add organic matter annually to improve water retention",
                "🔄 Rotate deep-rooted crops with shallow-rooted ones",
            ],
            SoilType::Clay => &[
                "🪴 Add compost to improve drainage in heavy clay",
                "🔄 Rotate crops that break up soil (daikon radish) with leafy greens",
                "⏳ Plant later in spring as clay warms slowly",
            ],
            SoilType::Silty => &[
                "🚫 Avoid compaction by not working soil when wet",
                "🔄 Rotate between root crops and leafy vegetables",
                "🌾 Take advantage of silty soil's fertility for quick-growing crops",
            ],
        }
    }

    pub fn info(&self) -> SoilInfo {
        let label = self.as_str();
        let mut chars = label.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };

        SoilInfo {
            id: label.to_string(),
            label: capitalized,
            emoji: self.emoji().to_string(),
            description: self.description().to_string(),
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SoilType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "loamy" => Ok(SoilType::Loamy),
            "sandy" => Ok(SoilType::Sandy),
            "clay" => Ok(SoilType::Clay),
            "silty" => Ok(SoilType::Silty),
            _ => Err(format!(
                "Unsupported soil type '{}'; expected one of: loamy, sandy, clay, silty",
                s.trim()
            )),
        }
    }
}

/// Build the rotation plan for `soil` given last season's crops.
///
/// `previous_crops` must already be trimmed with empties removed.
pub fn plan_rotation(soil: SoilType, previous_crops: &[String]) -> RotationPlan {
    let recommended = soil
        .recommended()
        .iter()
        .filter(|advice| !previous_crops.iter().any(|prev| same_crop(prev, advice.name)))
        .map(|advice| RecommendedCrop {
            name: advice.name.to_string(),
            reason: advice.reason.to_string(),
            emoji: advice.emoji.to_string(),
        })
        .collect();

    let mut seen = HashSet::new();
    let avoided = previous_crops
        .iter()
        .map(String::as_str)
        .chain(soil.avoided().iter().copied())
        .filter(|crop| seen.insert(crop.to_lowercase()))
        .map(str::to_string)
        .collect();

    let tips = soil
        .tips()
        .iter()
        .chain(std::iter::once(&GENERAL_TIP))
        .map(|tip| tip.to_string())
        .collect();

    RotationPlan {
        soil_type: soil.as_str().to_string(),
        recommended,
        avoided,
        tips,
    }
}

/// Case-insensitive comparison that treats simple plurals as the same crop,
/// so `tomato` matches `Tomatoes`.
fn same_crop(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    let forms = |s: &str| -> Vec<String> {
        let mut forms = vec![s.to_string()];
        if let Some(stem) = s.strip_suffix("es") {
            forms.push(stem.to_string());
        }
        if let Some(stem) = s.strip_suffix('s') {
            forms.push(stem.to_string());
        }
        forms
    };
    let a_forms = forms(&a);
    forms(&b).iter().any(|f| a_forms.contains(f))
}
