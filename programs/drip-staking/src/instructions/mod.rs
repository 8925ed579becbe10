pub mod initialize;
pub mod create_pool;
pub mod stake;
pub mod unstake;
pub mod claim;
pub mod emergency_unstake;
pub mod cancel_pool;
pub mod update_config;

pub use initialize::*;
pub use create_pool::*;
pub use stake::*;
pub use unstake::*;
pub use claim::*;
pub use emergency_unstake::*;
pub use cancel_pool::*;
pub use update_config::*;
