mod pot;
mod rect;
mod shelf;

pub use pot::round_up_power_of_two;
pub use rect::Rect;
pub use shelf::{Placement, Plan, Point, ShelfPlanner};
