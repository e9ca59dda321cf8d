pub mod listing;
pub mod money;
pub mod mortgage;
pub mod pipeline;
