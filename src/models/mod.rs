pub mod user;
pub mod tier;
pub mod score;
pub mod analysis;

pub use user::*;
pub use tier::*;
pub use score::*;
pub use analysis::*;
