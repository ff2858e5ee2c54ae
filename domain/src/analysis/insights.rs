//! Free-text insights and categorized recommendations

use serde::{Deserialize, Serialize};

/// Explanations for each analysis category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HairInsights {
    pub texture: String,
    pub thickness: String,
    pub porosity: String,
    pub moisture: String,
    pub shine: String,
    pub damage: String,
    pub scalp: String,
}

/// Insight categories, paired with the keywords that signal them in free text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightCategory {
    Texture,
    Thickness,
    Porosity,
    Moisture,
    Shine,
    Damage,
    Scalp,
}

impl InsightCategory {
    pub fn all() -> [InsightCategory; 7] {
        [
            InsightCategory::Texture,
            InsightCategory::Thickness,
            InsightCategory::Porosity,
            InsightCategory::Moisture,
            InsightCategory::Shine,
            InsightCategory::Damage,
            InsightCategory::Scalp,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            InsightCategory::Texture => "Texture",
            InsightCategory::Thickness => "Thickness",
            InsightCategory::Porosity => "Porosity",
            InsightCategory::Moisture => "Moisture",
            InsightCategory::Shine => "Shine",
            InsightCategory::Damage => "Damage",
            InsightCategory::Scalp => "Scalp",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            InsightCategory::Texture => &["texture", "fine", "coarse", "curl", "wave", "straight"],
            InsightCategory::Thickness => &["thick", "thin", "density", "volume", "strand"],
            InsightCategory::Porosity => &["porosity", "porous", "absorb", "cuticle"],
            InsightCategory::Moisture => &["moisture", "moisturized", "hydrat", "dry", "oily"],
            InsightCategory::Shine => &["shine", "shiny", "lustre", "luster", "dull", "gloss"],
            InsightCategory::Damage => &["damage", "split end", "breakage", "broken", "frayed"],
            InsightCategory::Scalp => &["scalp", "dandruff", "flak", "follicle", "root"],
        }
    }
}

impl HairInsights {
    pub fn set(&mut self, category: InsightCategory, text: impl Into<String>) {
        let text = text.into();
        match category {
            InsightCategory::Texture => self.texture = text,
            InsightCategory::Thickness => self.thickness = text,
            InsightCategory::Porosity => self.porosity = text,
            InsightCategory::Moisture => self.moisture = text,
            InsightCategory::Shine => self.shine = text,
            InsightCategory::Damage => self.damage = text,
            InsightCategory::Scalp => self.scalp = text,
        }
    }

    pub fn get(&self, category: InsightCategory) -> &str {
        match category {
            InsightCategory::Texture => &self.texture,
            InsightCategory::Thickness => &self.thickness,
            InsightCategory::Porosity => &self.porosity,
            InsightCategory::Moisture => &self.moisture,
            InsightCategory::Shine => &self.shine,
            InsightCategory::Damage => &self.damage,
            InsightCategory::Scalp => &self.scalp,
        }
    }
}

/// Categorized care recommendations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recommendations {
    pub products: Vec<String>,
    pub treatments: Vec<String>,
    pub routine: Vec<String>,
    pub styling: Vec<String>,
    pub lifestyle: Vec<String>,
    pub avoid: Vec<String>,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
            && self.treatments.is_empty()
            && self.routine.is_empty()
            && self.styling.is_empty()
            && self.lifestyle.is_empty()
            && self.avoid.is_empty()
    }

    /// Iterate over `(label, items)` pairs in display order
    pub fn sections(&self) -> [(&'static str, &[String]); 6] {
        [
            ("Products", &self.products),
            ("Treatments", &self.treatments),
            ("Routine", &self.routine),
            ("Styling", &self.styling),
            ("Lifestyle", &self.lifestyle),
            ("Avoid", &self.avoid),
        ]
    }
}
