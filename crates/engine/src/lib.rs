pub use allocations::Allocation;
pub use claims::{Claims, Identity};
pub use error::EngineError;
pub use fr_config::{CloseoutFigures, DeliveryEvent, FundraiserConfig, PriceBreak, Product};
pub use neighborhoods::Neighborhood;
pub use ops::{Engine, EngineBuilder, OrderFilter};
pub use orders::{Customer, MoneyCollected, Order, ProductSale};
pub use selection::SelectionShape;
pub use summaries::{GroupTotal, NeighborhoodCount, OwnerSummary, TopSeller, TroopSummary};
pub use timecards::Timecard;
pub use users::User;

mod allocations;
mod claims;
mod error;
mod fields;
mod fr_config;
mod neighborhoods;
mod ops;
mod orders;
mod query;
mod selection;
mod summaries;
mod timecards;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
