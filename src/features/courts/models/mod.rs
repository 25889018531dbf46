mod court_station;

pub use court_station::{CourtLevel, CourtStation};
