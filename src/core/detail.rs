use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::Category;

/// Treat an explicit JSON `null` the same as a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// A character from `GET {base}/people/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Height in centimetres
    #[serde(deserialize_with = "nullable")]
    pub height: String,
    /// Mass in kilograms
    #[serde(deserialize_with = "nullable")]
    pub mass: String,
    #[serde(deserialize_with = "nullable")]
    pub hair_color: String,
    #[serde(deserialize_with = "nullable")]
    pub skin_color: String,
    #[serde(deserialize_with = "nullable")]
    pub eye_color: String,
    /// BBY/ABY notation, e.g. `19BBY`
    #[serde(deserialize_with = "nullable")]
    pub birth_year: String,
    #[serde(deserialize_with = "nullable")]
    pub gender: String,
    /// Planet resource URL
    #[serde(deserialize_with = "nullable")]
    pub homeworld: String,
    #[serde(deserialize_with = "nullable")]
    pub films: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub species: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub vehicles: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub starships: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub created: String,
    #[serde(deserialize_with = "nullable")]
    pub edited: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
}

/// A planet from `GET {base}/planets/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Planet {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Diameter in kilometres
    #[serde(deserialize_with = "nullable")]
    pub diameter: String,
    /// Standard hours per day
    #[serde(deserialize_with = "nullable")]
    pub rotation_period: String,
    /// Standard days per year
    #[serde(deserialize_with = "nullable")]
    pub orbital_period: String,
    #[serde(deserialize_with = "nullable")]
    pub gravity: String,
    #[serde(deserialize_with = "nullable")]
    pub population: String,
    #[serde(deserialize_with = "nullable")]
    pub climate: String,
    #[serde(deserialize_with = "nullable")]
    pub terrain: String,
    /// Percentage of the surface covered by water
    #[serde(deserialize_with = "nullable")]
    pub surface_water: String,
    #[serde(deserialize_with = "nullable")]
    pub residents: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub films: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub created: String,
    #[serde(deserialize_with = "nullable")]
    pub edited: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
}

/// A starship from `GET {base}/starships/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Starship {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub model: String,
    #[serde(deserialize_with = "nullable")]
    pub manufacturer: String,
    #[serde(deserialize_with = "nullable")]
    pub cost_in_credits: String,
    /// Length in metres
    #[serde(deserialize_with = "nullable")]
    pub length: String,
    #[serde(deserialize_with = "nullable")]
    pub max_atmosphering_speed: String,
    #[serde(deserialize_with = "nullable")]
    pub crew: String,
    #[serde(deserialize_with = "nullable")]
    pub passengers: String,
    /// Cargo capacity in kilograms
    #[serde(deserialize_with = "nullable")]
    pub cargo_capacity: String,
    #[serde(deserialize_with = "nullable")]
    pub consumables: String,
    #[serde(deserialize_with = "nullable")]
    pub hyperdrive_rating: String,
    /// Megalights per hour
    #[serde(rename = "MGLT", deserialize_with = "nullable")]
    pub mglt: String,
    #[serde(deserialize_with = "nullable")]
    pub starship_class: String,
    #[serde(deserialize_with = "nullable")]
    pub pilots: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub films: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub created: String,
    #[serde(deserialize_with = "nullable")]
    pub edited: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
}

/// Schema fetched for exactly one [`Category`].
pub trait Resource: DeserializeOwned + Into<DetailRecord> + Send + 'static {
    const CATEGORY: Category;
}

impl Resource for Person {
    const CATEGORY: Category = Category::People;
}

impl Resource for Planet {
    const CATEGORY: Category = Category::Planets;
}

impl Resource for Starship {
    const CATEGORY: Category = Category::Starships;
}

impl From<Person> for DetailRecord {
    fn from(person: Person) -> Self {
        DetailRecord::Person(person)
    }
}

impl From<Planet> for DetailRecord {
    fn from(planet: Planet) -> Self {
        DetailRecord::Planet(planet)
    }
}

impl From<Starship> for DetailRecord {
    fn from(starship: Starship) -> Self {
        DetailRecord::Starship(starship)
    }
}

/// Fully decoded detail record of any category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum DetailRecord {
    Person(Person),
    Planet(Planet),
    Starship(Starship),
}

/// Value shown next to a label in a detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

/// One labelled line (or bullet list) of a detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: FieldValue,
}

const MISSING: &str = "N/A";

fn text(label: &'static str, value: &str) -> DetailField {
    let value = if value.is_empty() { MISSING } else { value };
    DetailField {
        label,
        value: FieldValue::Text(value.to_string()),
    }
}

/// Unit suffix is only attached to values that carry a measurement
fn measured(label: &'static str, value: &str, unit: &str) -> DetailField {
    match value {
        "" => text(label, value),
        "unknown" | "n/a" | "none" | "indefinite" => text(label, value),
        _ => text(label, &format!("{} {}", value, unit)),
    }
}

fn list(fields: &mut Vec<DetailField>, label: &'static str, items: &[String]) {
    if !items.is_empty() {
        fields.push(DetailField {
            label,
            value: FieldValue::List(items.to_vec()),
        });
    }
}

impl DetailRecord {
    pub fn category(&self) -> Category {
        match self {
            DetailRecord::Person(_) => Category::People,
            DetailRecord::Planet(_) => Category::Planets,
            DetailRecord::Starship(_) => Category::Starships,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DetailRecord::Person(p) => &p.name,
            DetailRecord::Planet(p) => &p.name,
            DetailRecord::Starship(s) => &s.name,
        }
    }

    fn created(&self) -> &str {
        match self {
            DetailRecord::Person(p) => &p.created,
            DetailRecord::Planet(p) => &p.created,
            DetailRecord::Starship(s) => &s.created,
        }
    }

    fn edited(&self) -> &str {
        match self {
            DetailRecord::Person(p) => &p.edited,
            DetailRecord::Planet(p) => &p.edited,
            DetailRecord::Starship(s) => &s.edited,
        }
    }

    /// Creation timestamp, when present and well-formed
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created())
    }

    /// Last edit timestamp, when present and well-formed
    pub fn edited_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.edited())
    }

    /// Window title, e.g. `Person: Luke Skywalker`
    pub fn title(&self) -> String {
        let kind = match self {
            DetailRecord::Person(_) => "Person",
            DetailRecord::Planet(_) => "Planet",
            DetailRecord::Starship(_) => "Starship",
        };
        format!("{}: {}", kind, self.name())
    }

    /// Labelled fields for a detail view. Empty lists are left out.
    pub fn fields(&self) -> Vec<DetailField> {
        let mut fields = Vec::new();
        match self {
            DetailRecord::Person(p) => {
                fields.push(text("Name", &p.name));
                fields.push(measured("Height", &p.height, "cm"));
                fields.push(measured("Mass", &p.mass, "kg"));
                fields.push(text("Hair color", &p.hair_color));
                fields.push(text("Skin color", &p.skin_color));
                fields.push(text("Eye color", &p.eye_color));
                fields.push(text("Birth year", &p.birth_year));
                fields.push(text("Gender", &p.gender));
                fields.push(text("Homeworld", &p.homeworld));
                list(&mut fields, "Films", &p.films);
                list(&mut fields, "Species", &p.species);
                list(&mut fields, "Vehicles", &p.vehicles);
                list(&mut fields, "Starships", &p.starships);
            }
            DetailRecord::Planet(p) => {
                fields.push(text("Name", &p.name));
                fields.push(measured("Diameter", &p.diameter, "km"));
                fields.push(measured("Rotation period", &p.rotation_period, "hours"));
                fields.push(measured("Orbital period", &p.orbital_period, "days"));
                fields.push(text("Gravity", &p.gravity));
                fields.push(text("Population", &p.population));
                fields.push(text("Climate", &p.climate));
                fields.push(text("Terrain", &p.terrain));
                fields.push(measured("Surface water", &p.surface_water, "%"));
                list(&mut fields, "Residents", &p.residents);
                list(&mut fields, "Films", &p.films);
            }
            DetailRecord::Starship(s) => {
                fields.push(text("Name", &s.name));
                fields.push(text("Model", &s.model));
                fields.push(text("Manufacturer", &s.manufacturer));
                fields.push(measured("Cost", &s.cost_in_credits, "credits"));
                fields.push(measured("Length", &s.length, "m"));
                fields.push(text("Max atmosphering speed", &s.max_atmosphering_speed));
                fields.push(text("Crew", &s.crew));
                fields.push(text("Passengers", &s.passengers));
                fields.push(measured("Cargo capacity", &s.cargo_capacity, "kg"));
                fields.push(text("Consumables", &s.consumables));
                fields.push(text("Hyperdrive rating", &s.hyperdrive_rating));
                fields.push(text("MGLT", &s.mglt));
                fields.push(text("Starship class", &s.starship_class));
                list(&mut fields, "Pilots", &s.pilots);
                list(&mut fields, "Films", &s.films);
            }
        }
        fields
    }
}
