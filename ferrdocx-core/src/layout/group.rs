//! Rebuilds text blocks from the flat list of positioned text runs pdfium
//! reports for a page: runs on the same baseline become a line, lines close
//! enough to each other become a block.

use std::cmp::Ordering;

use crate::{
    analysis::bbox::Bbox,
    consts::{BLOCK_GAP_FACTOR, LINE_OVERLAP_RATIO},
    layout::block::{Line, Span, TextBlock},
};

/// Spans further apart horizontally than this many line heights start a new line.
const LINE_MAX_GAP_FACTOR: f32 = 4.0;

fn by_position(a: &Bbox, b: &Bbox) -> Ordering {
    a.top()
        .partial_cmp(&b.top())
        .unwrap_or(Ordering::Equal)
        .then(a.left().partial_cmp(&b.left()).unwrap_or(Ordering::Equal))
}

/// Clusters spans into lines, top to bottom, each line left to right.
pub fn group_lines(mut spans: Vec<Span>) -> Vec<Line> {
    spans.retain(|span| !span.text.trim().is_empty());
    spans.sort_by(|a, b| by_position(&a.bbox, &b.bbox));

    let mut lines: Vec<(Bbox, Vec<Span>)> = Vec::new();
    for span in spans {
        let found = lines.iter().rposition(|(bbox, _)| {
            let max_gap = bbox.height().max(span.bbox.height()) * LINE_MAX_GAP_FACTOR;
            let gap = span.bbox.left() - bbox.right();
            bbox.vertical_overlap_ratio(&span.bbox) >= LINE_OVERLAP_RATIO && gap <= max_gap
        });

        match found {
            Some(idx) => {
                let (bbox, members) = &mut lines[idx];
                *bbox = bbox.union(&span.bbox);
                members.push(span);
            }
            None => lines.push((span.bbox, vec![span])),
        }
    }

    let mut lines = lines
        .into_iter()
        .map(|(_, mut members)| {
            members.sort_by(|a, b| {
                a.bbox
                    .left()
                    .partial_cmp(&b.bbox.left())
                    .unwrap_or(Ordering::Equal)
            });
            Line::new(members)
        })
        .collect::<Vec<_>>();
    lines.sort_by(|a, b| by_position(&a.bbox, &b.bbox));

    lines
}

/// Clusters lines into blocks: a line joins the latest block it overlaps
/// horizontally when the vertical gap above it is small.
pub fn group_blocks(lines: Vec<Line>) -> Vec<TextBlock> {
    let mut blocks: Vec<(Bbox, Vec<Line>)> = Vec::new();

    for line in lines {
        let max_gap = line.bbox.height() * BLOCK_GAP_FACTOR;
        let found = blocks.iter().rposition(|(bbox, _)| {
            bbox.overlaps_x(&line.bbox) && line.bbox.top() - bbox.bottom() <= max_gap
        });

        match found {
            Some(idx) => {
                let (bbox, members) = &mut blocks[idx];
                *bbox = bbox.union(&line.bbox);
                members.push(line);
            }
            None => blocks.push((line.bbox, vec![line])),
        }
    }

    blocks
        .into_iter()
        .map(|(_, members)| TextBlock::new(members))
        .collect()
}

pub fn group_text_blocks(spans: Vec<Span>) -> Vec<TextBlock> {
    group_blocks(group_lines(spans))
}
