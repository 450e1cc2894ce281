//! Reading order
//!
//! A "precedes" relation is evaluated for every ordered pair of lines and
//! linearized with a depth-first topological sort. The relation is not
//! guaranteed to be acyclic; the sort skips edges that would close a
//! cycle, so every input yields a permutation.
//!
//! Two relations are available:
//!
//! - [`OrderMode::Overlap`]: lines sharing a row (vertical overlap of at
//!   least `overlap_fraction` of the shorter line) are read left to right,
//!   all others top to bottom.
//! - [`OrderMode::Columns`]: horizontally overlapping lines are read top
//!   to bottom; a line left of another comes first unless some third line
//!   sits between them vertically and spans the horizontal gap.

use crate::lines::Line;
use crate::options::{OrderMode, OrderOptions};
use pageseg_core::Box;

/// Overlap relation: does `a` come before `b`?
pub fn precedes_overlap(a: &Box, b: &Box, overlap_fraction: f32) -> bool {
    let min_h = a.h.min(b.h);
    let shared = min_h > 0 && a.vertical_overlap(b) as f32 / min_h as f32 >= overlap_fraction;
    if shared {
        a.x < b.x
    } else {
        a.center_y() < b.center_y()
    }
}

/// Does `w` lie between `u` and `v` vertically while spanning the gap
/// from the right edge of `u` to the left edge of `v`?
fn separates(w: &Box, u: &Box, v: &Box) -> bool {
    if w.bottom() <= u.y.min(v.y) || w.y >= u.bottom().max(v.bottom()) {
        return false;
    }
    w.x < u.right() && w.right() > v.x
}

/// Column relation: does `a` come before `b`, given all lines `all`?
pub fn precedes_columns(a: &Box, b: &Box, all: &[Box]) -> bool {
    if a.horizontal_overlap(b) > 0 {
        return a.y < b.y;
    }
    if a.right() > b.x {
        return false;
    }
    !all.iter().any(|w| separates(w, a, b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Active,
    Done,
}

/// Linearize the relation `precedes` over `0..n`
///
/// Nodes are visited in index order and each node's predecessors are
/// emitted before it, also in index order. A predecessor that is still
/// being visited closes a cycle; that edge is ignored.
pub fn topsort(n: usize, precedes: impl Fn(usize, usize) -> bool) -> Vec<usize> {
    let mut state = vec![Visit::New; n];
    let mut out = Vec::with_capacity(n);
    let mut broken = 0usize;
    // (node, next predecessor candidate)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if state[root] != Visit::New {
            continue;
        }
        state[root] = Visit::Active;
        stack.push((root, 0));
        while let Some(top) = stack.last_mut() {
            let k = top.0;
            match (top.1..n).find(|&l| l != k && precedes(l, k)) {
                Some(l) => {
                    top.1 = l + 1;
                    match state[l] {
                        Visit::New => {
                            state[l] = Visit::Active;
                            stack.push((l, 0));
                        }
                        Visit::Active => broken += 1,
                        Visit::Done => {}
                    }
                }
                None => {
                    stack.pop();
                    state[k] = Visit::Done;
                    out.push(k);
                }
            }
        }
    }
    if broken > 0 {
        log::debug!("reading order: ignored {} cyclic edges", broken);
    }
    out
}

/// Reading order of a set of line bounds, as a permutation of indices
pub fn order_bounds(bounds: &[Box], options: &OrderOptions) -> Vec<usize> {
    let n = bounds.len();
    let mut before = vec![false; n * n];
    for (i, a) in bounds.iter().enumerate() {
        for (j, b) in bounds.iter().enumerate() {
            if i == j {
                continue;
            }
            before[i * n + j] = match options.mode {
                OrderMode::Overlap => precedes_overlap(a, b, options.overlap_fraction),
                OrderMode::Columns => precedes_columns(a, b, bounds),
            };
        }
    }
    topsort(n, |l, k| before[l * n + k])
}

/// Reading order of `lines`, as a permutation of indices into `lines`
pub fn reading_order(lines: &[Line], options: &OrderOptions) -> Vec<usize> {
    let bounds: Vec<Box> = lines.iter().map(|l| l.bounds).collect();
    order_bounds(&bounds, options)
}
