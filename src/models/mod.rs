pub mod record;
pub mod request;
pub mod response;
pub mod stats;
pub mod view;

pub use record::*;
pub use request::*;
pub use response::*;
pub use stats::*;
pub use view::*;
