pub mod band;
pub mod bbox;
