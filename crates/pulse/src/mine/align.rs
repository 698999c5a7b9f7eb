//! Alignment matrix builder.
//!
//! Every exact token match seeds a backward walk along its diagonal. Each
//! cell visited by the walk becomes a [`Vertex`] whose run length is the
//! number of matching cells from it down to the seed, so the first cell of a
//! diagonal run ends up carrying the length of the whole run.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::Level;

use super::error::AlignError;
use super::model::Vertex;

/// Matched cells keyed by `(x, y)`, valued by run length.
///
/// Iteration order is `x` then `y`, which the path selector relies on for
/// deterministic tie-breaking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexSet {
    cells: BTreeMap<(usize, usize), usize>,
}

impl VertexSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex, or raise the run length of an existing one.
    pub fn upsert(&mut self, x: usize, y: usize, run_length: usize) {
        self.cells
            .entry((x, y))
            .and_modify(|r| *r = (*r).max(run_length))
            .or_insert(run_length);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Vertex> {
        self.cells
            .get(&(x, y))
            .map(|&run_length| Vertex::new(x, y, run_length))
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells.contains_key(&(x, y))
    }

    pub fn remove(&mut self, x: usize, y: usize) -> Option<Vertex> {
        self.cells
            .remove(&(x, y))
            .map(|run_length| Vertex::new(x, y, run_length))
    }

    pub fn iter(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.cells
            .iter()
            .map(|(&(x, y), &run_length)| Vertex::new(x, y, run_length))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Result of aligning two token sequences.
#[derive(Debug, Clone)]
pub struct Alignment {
    /// Length of the short sequence.
    pub rows: usize,
    /// Length of the long sequence.
    pub cols: usize,
    /// Row-major; a cell holds the walk length seeded there, 0 where tokens differ.
    matrix: Vec<usize>,
    pub vertices: VertexSet,
}

impl Alignment {
    pub fn cell(&self, x: usize, y: usize) -> usize {
        self.matrix[x * self.cols + y]
    }

    /// One text row per long token, one column per short token.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for y in 0..self.cols {
            for x in 0..self.rows {
                let _ = write!(out, "{} ", self.cell(x, y));
            }
            out.push('\n');
        }
        out
    }
}

/// Build the match matrix and vertex set for `short` against `long`.
///
/// Requires both sequences non-empty and `short.len() <= long.len()`.
pub fn build_alignment<S, L>(short: &[S], long: &[L]) -> Result<Alignment, AlignError>
where
    S: AsRef<str>,
    L: AsRef<str>,
{
    if short.is_empty() || long.is_empty() {
        return Err(AlignError::EmptySequence);
    }
    if short.len() > long.len() {
        return Err(AlignError::InvalidInput {
            short: short.len(),
            long: long.len(),
        });
    }

    let rows = short.len();
    let cols = long.len();
    let mut matrix = vec![0usize; rows * cols];
    let mut vertices = VertexSet::new();
    let same = |x: usize, y: usize| short[x].as_ref() == long[y].as_ref();

    for x in 0..rows {
        for y in 0..cols {
            if !same(x, y) {
                continue;
            }

            let mut run = 1;
            vertices.upsert(x, y, run);

            let (mut px, mut py) = (x, y);
            while px > 0 && py > 0 {
                px -= 1;
                py -= 1;
                if !same(px, py) {
                    break;
                }
                run += 1;
                vertices.upsert(px, py, run);
            }

            matrix[x * cols + y] = run;
        }
    }

    let alignment = Alignment {
        rows,
        cols,
        matrix,
        vertices,
    };

    if tracing::enabled!(Level::TRACE) {
        tracing::trace!(rows, cols, "alignment matrix:\n{}", alignment.render());
        for v in alignment.vertices.iter() {
            tracing::trace!(x = v.x, y = v.y, run_length = v.run_length, "vertex");
        }
    }

    Ok(alignment)
}
