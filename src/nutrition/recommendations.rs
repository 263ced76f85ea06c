//! Diet recommendations
//!
//! Static display content per diet preference.

use serde::Serialize;

use crate::models::DietPreference;

/// Protein sources, tips, and considerations for a diet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DietRecommendations {
    pub protein_sources: &'static [&'static str],
    pub tips: &'static [&'static str],
    pub considerations: &'static [&'static str],
}

const VEGAN: DietRecommendations = DietRecommendations {
    protein_sources: &[
        "Legumes (lentils, chickpeas, black beans)",
        "Quinoa and other whole grains",
        "Nuts and seeds (hemp, chia, pumpkin)",
        "Tofu, tempeh, and seitan",
        "Nutritional yeast",
        "Plant-based protein powders",
    ],
    tips: &[
        "Combine different protein sources throughout the day",
        "Focus on B12, iron, and omega-3 supplementation",
        "Include vitamin C with iron-rich foods for better absorption",
    ],
    considerations: &[
        "May need higher protein intake due to lower bioavailability",
        "Ensure adequate B12, vitamin D, and omega-3 fatty acids",
        "Monitor iron and zinc levels",
    ],
};

const VEGETARIAN: DietRecommendations = DietRecommendations {
    protein_sources: &[
        "Eggs and dairy products",
        "Greek yogurt and cottage cheese",
        "Legumes and beans",
        "Quinoa and whole grains",
        "Nuts and seeds",
        "Plant-based proteins",
    ],
    tips: &[
        "Include eggs and dairy for complete proteins",
        "Vary protein sources throughout the week",
        "Consider omega-3 supplements if not eating fish",
    ],
    considerations: &[
        "Easier to meet protein needs than vegan diet",
        "Monitor B12 and iron intake",
        "Include variety of colorful vegetables",
    ],
};

const PESCATARIAN: DietRecommendations = DietRecommendations {
    protein_sources: &[
        "Fish and seafood (salmon, tuna, sardines)",
        "Eggs and dairy products",
        "Legumes and beans",
        "Quinoa and whole grains",
        "Nuts and seeds",
    ],
    tips: &[
        "Include fatty fish 2-3 times per week for omega-3s",
        "Choose low-mercury fish options",
        "Vary between fish and plant proteins",
    ],
    considerations: &[
        "Excellent source of omega-3 fatty acids",
        "Generally easier to meet all nutrient needs",
        "Be mindful of mercury in larger fish",
    ],
};

const CLASSIC: DietRecommendations = DietRecommendations {
    protein_sources: &[
        "Lean meats (chicken, turkey, lean beef)",
        "Fish and seafood",
        "Eggs and dairy products",
        "Legumes and beans",
        "Nuts and seeds",
    ],
    tips: &[
        "Choose lean cuts of meat",
        "Include fish 2-3 times per week",
        "Balance animal and plant proteins",
    ],
    considerations: &[
        "Easiest to meet all macronutrient needs",
        "Focus on lean protein sources",
        "Include plenty of vegetables and whole grains",
    ],
};

pub fn get_diet_recommendations(diet: DietPreference) -> DietRecommendations {
    match diet {
        DietPreference::Vegan => VEGAN,
        DietPreference::Vegetarian => VEGETARIAN,
        DietPreference::Pescatarian => PESCATARIAN,
        DietPreference::Classic => CLASSIC,
    }
}

/// Look up by raw preference string; unknown values get the classic entry
pub fn get_diet_recommendations_for(diet: &str) -> DietRecommendations {
    get_diet_recommendations(DietPreference::from_str(diet))
}
