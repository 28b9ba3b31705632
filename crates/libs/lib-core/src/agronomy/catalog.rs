//! Built-in agronomy knowledge used when the database has nothing better.

use crate::dto::PesticideRecommendation;
use crate::model::store::disease_repository::disease_key;
use crate::model::store::models::DiseaseRecord;

/// Symptoms, treatment and prevention text for a diagnosis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseInfo {
    pub symptoms: String,
    pub treatment: String,
    pub prevention: String,
}

impl From<DiseaseRecord> for DiseaseInfo {
    fn from(record: DiseaseRecord) -> Self {
        Self {
            symptoms: record.symptoms.unwrap_or_default(),
            treatment: record.treatment.unwrap_or_default(),
            prevention: record.prevention.unwrap_or_default(),
        }
    }
}

/// Built-in info for well-known diseases, keyed by disease alone.
pub fn builtin_disease_info(disease: &str) -> Option<DiseaseInfo> {
    let (_, key) = disease_key("", disease);
    let (symptoms, treatment, prevention) = match key.as_str() {
        "early_blight" => (
            "Brown spots with concentric rings on leaves",
            "Apply fungicides containing chlorothalonil or mancozeb",
            "Ensure proper plant spacing and avoid overhead watering",
        ),
        "late_blight" => (
            "Dark water-soaked lesions on leaves and stems",
            "Apply systemic fungicides like metalaxyl",
            "Plant resistant varieties and ensure good drainage",
        ),
        "apple_scab" => (
            "Olive-green to black spots on leaves and fruit",
            "Apply fungicides during wet weather periods",
            "Remove fallen leaves and improve air circulation",
        ),
        k if k.contains("healthy") => (
            "Plant appears healthy with no visible disease symptoms",
            "No treatment needed - continue regular care",
            "Maintain good plant hygiene and proper watering",
        ),
        _ => return None,
    };

    Some(DiseaseInfo {
        symptoms: symptoms.to_string(),
        treatment: treatment.to_string(),
        prevention: prevention.to_string(),
    })
}

/// Last-resort text when nothing is known about a disease.
pub fn generic_disease_info(plant: &str, disease: &str) -> DiseaseInfo {
    DiseaseInfo {
        symptoms: format!("Symptoms of {} detected on {}", disease, plant),
        treatment: "Consult with agricultural expert for specific treatment".to_string(),
        prevention: "Follow good agricultural practices".to_string(),
    }
}

/// Fallback treatments when the pesticide catalogue has no match.
pub fn default_pesticides(disease: &str) -> Vec<PesticideRecommendation> {
    let (_, key) = disease_key("", disease);
    let entries: &[(&str, &str, &str, &str, f64, &str)] = match key.as_str() {
        "bacterial_spot" => &[(
            "Copper Hydroxide",
            "Bactericide",
            "Copper Hydroxide 53.8%",
            "2-3 grams per liter",
            250.0,
            "Effective against bacterial diseases",
        )],
        "early_blight" => &[(
            "Mancozeb 75% WP",
            "Fungicide",
            "Mancozeb 75%",
            "2-2.5 grams per liter",
            180.0,
            "Broad spectrum contact fungicide effective against early blight",
        )],
        "late_blight" => &[(
            "Metalaxyl + Mancozeb",
            "Systemic Fungicide",
            "Metalaxyl 8% + Mancozeb 64%",
            "2.5 grams per liter",
            320.0,
            "Systemic and contact fungicide for late blight",
        )],
        "apple_scab" => &[(
            "Myclobutanil 10% WP",
            "Systemic Fungicide",
            "Myclobutanil 10%",
            "1 gram per liter",
            280.0,
            "Systemic fungicide for apple scab control",
        )],
        _ => &[],
    };

    entries
        .iter()
        .map(|(name, kind, ingredient, rate, price, description)| PesticideRecommendation {
            name: name.to_string(),
            kind: kind.to_string(),
            active_ingredient: Some(ingredient.to_string()),
            application_rate: Some(rate.to_string()),
            price: Some(*price),
            description: Some(description.to_string()),
        })
        .collect()
}

/// Binomial name for the plants in the class table, `<plant> species` otherwise.
pub fn scientific_name(plant: &str) -> String {
    let lower = plant.trim().to_lowercase();
    let name = match lower.as_str() {
        "apple" => "Malus domestica",
        "blueberry" => "Vaccinium corymbosum",
        "cherry (including sour)" | "cherry" => "Prunus avium",
        "corn (maize)" | "corn" => "Zea mays",
        "grape" => "Vitis vinifera",
        "orange" => "Citrus sinensis",
        "peach" => "Prunus persica",
        "pepper bell" | "pepper" => "Capsicum annuum",
        "potato" => "Solanum tuberosum",
        "raspberry" => "Rubus idaeus",
        "soybean" => "Glycine max",
        "squash" => "Cucurbita pepo",
        "strawberry" => "Fragaria ananassa",
        "tomato" => "Solanum lycopersicum",
        _ => return format!("{} species", plant.trim()),
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_disease_info() {
        let info = builtin_disease_info("Early blight").unwrap();
        assert!(info.symptoms.contains("concentric rings"));
        assert!(builtin_disease_info("healthy").is_some());
        assert!(builtin_disease_info("Leaf Mold").is_none());
    }

    #[test]
    fn test_generic_disease_info() {
        let info = generic_disease_info("Tomato", "Leaf Mold");
        assert_eq!(info.symptoms, "Symptoms of Leaf Mold detected on Tomato");
    }

    #[test]
    fn test_default_pesticides() {
        let pesticides = default_pesticides("Bacterial spot");
        assert_eq!(pesticides.len(), 1);
        assert_eq!(pesticides[0].name, "Copper Hydroxide");
        assert_eq!(default_pesticides("Apple scab")[0].price, Some(280.0));
        assert!(default_pesticides("Leaf Mold").is_empty());
    }

    #[test]
    fn test_scientific_name() {
        assert_eq!(scientific_name("Tomato"), "Solanum lycopersicum");
        assert_eq!(scientific_name("Corn (maize)"), "Zea mays");
        assert_eq!(scientific_name("Kiwi"), "Kiwi species");
    }
}
