// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod calendar;
pub mod filter;
pub mod ids;
pub mod model;
pub mod selection;
pub mod source;
pub mod state;
pub mod views;

#[cfg(test)]
mod test_fixtures;

pub use calendar::{DateWindow, Granularity, NavDirection};
pub use filter::Record;
pub use ids::*;
pub use model::*;
pub use selection::{Selection, SelectionView};
pub use source::{ClinicData, ClinicSnapshot};
pub use state::*;
