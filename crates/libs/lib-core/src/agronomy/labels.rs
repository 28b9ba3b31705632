//! PlantVillage class labels as produced by the disease classifier.
//!
//! Labels have the form `Plant___Disease`, e.g. `Tomato___Early_blight`.

/// Class table, indexed by the classifier's output position.
pub const CLASS_LABELS: [&str; 38] = [
    "Apple___Apple_scab",
    "Apple___Black_rot",
    "Apple___Cedar_apple_rust",
    "Apple___healthy",
    "Blueberry___healthy",
    "Cherry_(including_sour)___Powdery_mildew",
    "Cherry_(including_sour)___healthy",
    "Corn_(maize)___Cercospora_leaf_spot Gray_leaf_spot",
    "Corn_(maize)___Common_rust_",
    "Corn_(maize)___Northern_Leaf_Blight",
    "Corn_(maize)___healthy",
    "Grape___Black_rot",
    "Grape___Esca_(Black_Measles)",
    "Grape___Leaf_blight_(Isariopsis_Leaf_Spot)",
    "Grape___healthy",
    "Orange___Haunglongbing_(Citrus_greening)",
    "Peach___Bacterial_spot",
    "Peach___healthy",
    "Pepper_bell___Bacterial_spot",
    "Pepper_bell___healthy",
    "Potato___Early_blight",
    "Potato___Late_blight",
    "Potato___healthy",
    "Raspberry___healthy",
    "Soybean___healthy",
    "Squash___Powdery_mildew",
    "Strawberry___Leaf_scorch",
    "Strawberry___healthy",
    "Tomato___Bacterial_spot",
    "Tomato___Early_blight",
    "Tomato___Late_blight",
    "Tomato___Leaf_Mold",
    "Tomato___Septoria_leaf_spot",
    "Tomato___Spider_mites Two-spotted_spider_mite",
    "Tomato___Target_Spot",
    "Tomato___Tomato_Yellow_Leaf_Curl_Virus",
    "Tomato___Tomato_mosaic_virus",
    "Tomato___healthy",
];

const SEPARATOR: &str = "___";

/// Human-readable plant and disease names taken from a class label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLabel {
    pub plant: String,
    pub disease: String,
}

impl ParsedLabel {
    pub fn is_healthy(&self) -> bool {
        self.disease.to_lowercase().contains("healthy")
    }
}

/// Split `Plant___Disease`, turning underscores into spaces.
///
/// A label without a disease part yields `Unknown` as the disease.
pub fn parse_label(label: &str) -> ParsedLabel {
    let (plant, disease) = match label.split_once(SEPARATOR) {
        Some((plant, disease)) => (humanize(plant), humanize(disease)),
        None => (humanize(label), String::new()),
    };

    ParsedLabel {
        plant,
        disease: if disease.is_empty() { "Unknown".to_string() } else { disease },
    }
}

fn humanize(part: &str) -> String {
    part.replace('_', " ").trim().to_string()
}

pub fn label_for_index(index: usize) -> Option<&'static str> {
    CLASS_LABELS.get(index).copied()
}

/// Index and value of the largest finite probability.
pub fn argmax(probabilities: &[f64]) -> Option<(usize, f64)> {
    probabilities
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, p)| p.is_finite())
        .fold(None, |best, (i, p)| match best {
            Some((_, max)) if max >= p => best,
            _ => Some((i, p)),
        })
}

/// Probability as a percentage rounded to two decimals.
pub fn confidence_percent(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}
