pub mod event;
pub mod frame;
pub mod step;
pub mod world;
