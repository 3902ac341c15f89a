use crate::Error;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Advice domain selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Plant,
    Closet,
    Fridge,
    Kitchen,
    Bathroom,
    Bedroom,
    Other,
}

impl Scenario {
    pub const ALL: [Scenario; 7] = [
        Scenario::Plant,
        Scenario::Closet,
        Scenario::Fridge,
        Scenario::Kitchen,
        Scenario::Bathroom,
        Scenario::Bedroom,
        Scenario::Other,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plant => "plant",
            Self::Closet => "closet",
            Self::Fridge => "fridge",
            Self::Kitchen => "kitchen",
            Self::Bathroom => "bathroom",
            Self::Bedroom => "bedroom",
            Self::Other => "other",
        }
    }

    pub fn allowed_values() -> Vec<&'static str> {
        Self::ALL.iter().map(Scenario::as_str).collect()
    }

    /// Expert-role opening line of the prompt.
    pub fn preamble(&self) -> &'static str {
        match self {
            Self::Plant => {
                "You are a plant care expert. Based on the analysis of an image, provide \
                 practical, specific care advice for the plants shown."
            }
            Self::Closet => {
                "You are a professional organizer specializing in closets and storage. Based on \
                 the analysis of an image, provide practical, specific organizing advice."
            }
            Self::Fridge => {
                "You are an expert in food management and refrigerator organization. Based on \
                 the analysis of an image, provide practical, specific food storage advice."
            }
            Self::Kitchen => {
                "You are an expert kitchen housekeeping advisor. Based on the analysis of an \
                 image, provide practical, specific cleaning, organizing or cooking tips."
            }
            Self::Bathroom => {
                "You are an expert bathroom housekeeping advisor. Based on the analysis of an \
                 image, provide practical, specific cleaning and hygiene tips."
            }
            Self::Bedroom => {
                "You are an expert bedroom housekeeping advisor. Based on the analysis of an \
                 image, provide practical, specific tidying and comfort tips."
            }
            Self::Other => {
                "You are an expert housekeeping advisor. Based on the analysis of an image, \
                 provide practical, specific housekeeping advice (cleaning, organizing, or \
                 cooking tips) for the user."
            }
        }
    }

    pub fn focus_areas(&self) -> [&'static str; 4] {
        match self {
            Self::Plant => [
                "Plant type and condition (health, growth stage)",
                "Watering, sunlight and fertilizer",
                "Visible problems such as yellow leaves or pests, and how to fix them",
                "Seasonal care and placement",
            ],
            Self::Closet => [
                "Making efficient use of the available space",
                "Sorting systems for clothing and accessories",
                "Seasonal rotation of stored items",
                "Habits that keep the space organized",
            ],
            Self::Fridge => [
                "Proper placement and storage of food",
                "Keeping food fresh for longer",
                "Reducing food waste",
                "Simple recipe ideas using the detected ingredients",
            ],
            Self::Kitchen => [
                "Food safety and hygiene",
                "Efficient organization of kitchen tools and appliances",
                "Cleaning techniques for different surfaces",
                "Meal preparation tips based on visible ingredients",
            ],
            Self::Bathroom => [
                "Hygiene and sanitation",
                "Mold and mildew prevention",
                "Efficient organization of toiletries",
                "Water conservation tips",
            ],
            Self::Bedroom => [
                "Organization and decluttering",
                "Bedding hygiene and maintenance",
                "Creating a restful environment",
                "Storage solutions",
            ],
            Self::Other => [
                "Dust control and air quality",
                "Furniture arrangement and care",
                "Decluttering common areas",
                "Creating a welcoming space",
            ],
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.as_str() == s)
            .ok_or_else(|| Error::UnknownScenario(s.to_string()))
    }
}
