pub mod block;
pub mod element;
pub mod group;
pub mod page;
