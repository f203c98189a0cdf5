pub mod funnel;
pub mod teos10;
