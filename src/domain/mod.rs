pub mod price;
pub mod product;
pub mod subject;

pub use price::{AnalysisReport, PriceObservation};
pub use product::{CardVariant, ProductRecord, UNAVAILABLE};
pub use subject::SearchSubject;
