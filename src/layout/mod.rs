pub mod branch;
pub mod roots;
pub mod scene;
