mod priority;
mod task;

pub use priority::Priority;
pub use task::{parse_due_date, parse_due_time, Task};
