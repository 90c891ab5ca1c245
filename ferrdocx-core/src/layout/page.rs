use serde::Serialize;

use crate::layout::block::Block;

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub blocks: Vec<Block>,
    pub page_no: usize,
}
