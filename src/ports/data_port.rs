//! Bar acquisition port trait.
//!
//! Market-data acquisition is an external collaborator; the engine only ever
//! consumes an already-validated [`PriceSeries`].

use crate::domain::error::SigbenchError;
use crate::domain::series::PriceSeries;

pub trait BarSource {
    fn load(&self) -> Result<PriceSeries, SigbenchError>;
}
