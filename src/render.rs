//! Display model for a generated planet and alien
//!
//! Turns wire records into labelled rows. Values are shown verbatim with the
//! unit suffix each measurement always carries.

use bioverse_protocol::common::{Alien, Planet, Reading};

use crate::session::CreationResult;

/// One labelled planet measurement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanetCard {
    pub name: String,
    pub description: String,
    /// Always the seven measurements, in display order
    pub traits: Vec<TraitRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlienCard {
    pub name: String,
    pub scientific_name: String,
    pub description: String,
    pub image: String,
    pub physical_traits: Vec<String>,
    pub abilities: Vec<String>,
}

fn row(label: &'static str, reading: &Reading, unit: &str) -> TraitRow {
    TraitRow {
        label,
        value: format!("{}{}", reading, unit),
    }
}

impl PlanetCard {
    pub fn from_planet(planet: &Planet) -> Self {
        Self {
            name: planet.name.clone(),
            description: planet.description.clone(),
            traits: vec![
                row("Gravity", &planet.gravity, "g"),
                row("Atmosphere", &planet.atmosphere, ""),
                row("Temperature", &planet.temperature, "°C"),
                row("Radiation", &planet.radiation, ""),
                row("Water", &planet.water, ""),
                row("Day Length", &planet.day_length, "h"),
                row("Year Length", &planet.year_length, "d"),
            ],
        }
    }
}

impl AlienCard {
    pub fn from_alien(alien: &Alien, image: &str) -> Self {
        Self {
            name: alien.name.clone(),
            scientific_name: alien.scientific_name.clone(),
            description: alien.description.clone(),
            image: image.to_string(),
            physical_traits: alien.physical_traits.clone(),
            abilities: alien.abilities.clone(),
        }
    }
}

/// Cards for a creation result
pub fn cards(result: &CreationResult) -> (PlanetCard, AlienCard) {
    (
        PlanetCard::from_planet(&result.planet),
        AlienCard::from_alien(&result.alien, &result.image),
    )
}
