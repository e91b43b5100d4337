pub mod account;
pub mod instrument;
pub mod order;
pub mod position;
pub mod pricing;
pub mod primitives;
pub mod request;
pub mod response;
pub mod trade;
pub mod transaction;

pub use account::*;
pub use instrument::*;
pub use order::*;
pub use position::*;
pub use pricing::*;
pub use primitives::*;
pub use request::*;
pub use response::*;
pub use trade::*;
pub use transaction::*;
