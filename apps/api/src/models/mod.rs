pub mod investor;
pub mod startup;
pub mod task;
