use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Hiking,
    #[default]
    Scenic,
    Food,
    Photo,
    Culture,
    Adventure,
    Relax,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Hiking,
        Mood::Scenic,
        Mood::Food,
        Mood::Photo,
        Mood::Culture,
        Mood::Adventure,
        Mood::Relax,
    ];

    /// Resolve a user-supplied mood, falling back to [`Mood::Scenic`] when
    /// absent or unrecognized.
    pub fn resolve(raw: Option<&str>) -> Mood {
        match raw {
            None => Mood::default(),
            Some(s) => s.parse().unwrap_or_else(|_| {
                tracing::debug!(mood = s, "Unrecognized mood, using default");
                Mood::default()
            }),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mood::Hiking => "hiking",
            Mood::Scenic => "scenic",
            Mood::Food => "food",
            Mood::Photo => "photo",
            Mood::Culture => "culture",
            Mood::Adventure => "adventure",
            Mood::Relax => "relax",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hiking" => Ok(Mood::Hiking),
            "scenic" => Ok(Mood::Scenic),
            "food" => Ok(Mood::Food),
            "photo" | "photography" => Ok(Mood::Photo),
            "culture" => Ok(Mood::Culture),
            "adventure" => Ok(Mood::Adventure),
            "relax" => Ok(Mood::Relax),
            _ => Err(format!("Invalid mood: '{}'", s)),
        }
    }
}

/// Mood -> place search categories.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodTable {
    categories: HashMap<Mood, Vec<String>>,
}

impl MoodTable {
    pub fn new(categories: HashMap<Mood, Vec<String>>) -> Self {
        MoodTable { categories }
    }

    /// The first `cap` distinct categories for `mood`, in table order.
    ///
    /// A mood missing from a custom table uses the scenic entry.
    pub fn categories_for(&self, mood: Mood, cap: usize) -> Vec<String> {
        let listed = self
            .categories
            .get(&mood)
            .or_else(|| self.categories.get(&Mood::Scenic))
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut out: Vec<String> = Vec::with_capacity(cap);
        for category in listed {
            if out.len() >= cap {
                break;
            }
            if !out.contains(category) {
                out.push(category.clone());
            }
        }
        out
    }
}

impl Default for MoodTable {
    fn default() -> Self {
        let table = [
            (Mood::Hiking, ["park", "campground", "tourist_attraction"]),
            (Mood::Scenic, ["tourist_attraction", "park", "point_of_interest"]),
            (Mood::Food, ["restaurant", "cafe", "bakery"]),
            (Mood::Photo, ["tourist_attraction", "park", "museum"]),
            (Mood::Culture, ["museum", "art_gallery", "tourist_attraction"]),
            (Mood::Adventure, ["amusement_park", "tourist_attraction", "park"]),
            (Mood::Relax, ["spa", "park", "tourist_attraction"]),
        ];

        MoodTable::new(
            table
                .into_iter()
                .map(|(mood, cats)| (mood, cats.iter().map(|c| c.to_string()).collect()))
                .collect(),
        )
    }
}
