pub mod name_resolve;
pub mod planner;
