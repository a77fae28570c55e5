pub mod fusion;
pub mod landcover;
pub mod outlook;
pub mod pipeline;
pub mod statistics;
