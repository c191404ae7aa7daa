pub mod navigation;
pub mod store;
pub mod views;
