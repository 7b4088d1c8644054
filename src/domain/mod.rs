pub mod canvas;
pub mod geom;
pub mod score;
pub mod snake;
pub mod wall;
pub mod window;
