pub mod category;
pub mod detail;
pub mod ranked_entry;
pub mod search_response;

pub use category::Category;
pub use detail::{DetailField, DetailRecord, FieldValue, Person, Planet, Resource, Starship};
pub use ranked_entry::RankedEntry;
pub use search_response::{CategoryResults, FetchOutcome, SearchResponse, Selection};
