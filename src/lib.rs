pub mod demographics;
pub mod error;
pub mod geo;
pub mod gravity;
pub mod pipeline;
pub mod profile;
pub mod region;
pub mod series;
pub mod virus;
pub mod world;
pub mod writer;

pub use error::{Result, WorldError};
pub use profile::{BuildProfile, ProfileLoader};
pub use world::{WorldBuilder, WorldDocument, WorldEdge, WorldNode};
