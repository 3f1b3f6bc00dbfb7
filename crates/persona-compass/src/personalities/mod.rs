//! Personality descriptions keyed by combined code, plus the tags staff attach to them.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{
    Language, PersonalityDescription, PersonalityFilter, PersonalityId, PersonalityView, Tag,
    TagId,
};
pub use repository::PersonalityCatalog;
pub use router::personality_router;
pub use service::{PersonalityError, PersonalityService};
