// Probability-based targeting for the computer opponent.

use crate::{config::NUM_SHIPS, grid::BB, grid::Grid, ship::Orientation};
use rand::Rng;

const GRID_SIZE: usize = Grid::SIZE;

/// Placements covering this many observed hits get `HIT_BIAS^n` weight, so
/// cells next to confirmed hits dominate the density.
const HIT_BIAS: f64 = 10.0;

/// Density matrix indexed `[y][x]`.
pub type Pdf = [[f64; GRID_SIZE]; GRID_SIZE];

/// Compute a probability density over all unguessed cells from the known hits
/// and misses and the lengths of enemy ships still afloat. Each entry sums the
/// weight of every legal placement covering that cell.
pub fn calc_pdf(hits: &BB, misses: &BB, remaining_lengths: &[usize; NUM_SHIPS]) -> Pdf {
    let mut matrix = [[0.0f64; GRID_SIZE]; GRID_SIZE];

    for &len in remaining_lengths.iter() {
        if len == 0 || len > GRID_SIZE {
            continue;
        }
        for orient in [Orientation::Horizontal, Orientation::Vertical] {
            let (max_x, max_y) = match orient {
                Orientation::Horizontal => (GRID_SIZE - len + 1, GRID_SIZE),
                Orientation::Vertical => (GRID_SIZE, GRID_SIZE - len + 1),
            };
            let cell = |x: usize, y: usize, k: usize| match orient {
                Orientation::Horizontal => (x + k, y),
                Orientation::Vertical => (x, y + k),
            };
            for y in 0..max_y {
                for x in 0..max_x {
                    let mut n_hits = 0i32;
                    let blocked = (0..len).any(|k| {
                        let (cx, cy) = cell(x, y, k);
                        if hits.get(cx, cy).unwrap_or(false) {
                            n_hits += 1;
                        }
                        misses.get(cx, cy).unwrap_or(false)
                    });
                    if blocked {
                        continue;
                    }
                    let weight = HIT_BIAS.powi(n_hits);
                    for k in 0..len {
                        let (cx, cy) = cell(x, y, k);
                        if !hits.get(cx, cy).unwrap_or(false) {
                            matrix[cy][cx] += weight;
                        }
                    }
                }
            }
        }
    }

    normalize(matrix)
}

fn normalize(mut matrix: Pdf) -> Pdf {
    let total: f64 = matrix.iter().flatten().sum();
    if total == 0.0 {
        let uniform = 1.0 / (GRID_SIZE * GRID_SIZE) as f64;
        return [[uniform; GRID_SIZE]; GRID_SIZE];
    }
    for v in matrix.iter_mut().flatten() {
        *v /= total;
    }
    matrix
}

/// Sample an `(x, y)` from a density using a temperature parameter. Lower
/// temperatures concentrate on the most likely cells.
pub fn sample_pdf<R: Rng + ?Sized>(pdf: &Pdf, temperature: f64, rng: &mut R) -> (usize, usize) {
    let mut adjusted = [[0.0f64; GRID_SIZE]; GRID_SIZE];
    let mut total = 0.0;
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let v = pdf[y][x].powf(1.0 / temperature);
            adjusted[y][x] = v;
            total += v;
        }
    }
    if !(total > 0.0) {
        return random_cell(rng);
    }
    let threshold: f64 = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            cumulative += adjusted[y][x];
            if threshold < cumulative {
                return (x, y);
            }
        }
    }
    (GRID_SIZE - 1, GRID_SIZE - 1)
}

/// Calculate the density and immediately pick a target.
pub fn calc_pdf_and_guess<R: Rng + ?Sized>(
    hits: &BB,
    misses: &BB,
    lengths: &[usize; NUM_SHIPS],
    rng: &mut R,
) -> (usize, usize) {
    let pdf = calc_pdf(hits, misses, lengths);
    sample_pdf(&pdf, 0.5, rng)
}

/// Any cell, uniformly.
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> (usize, usize) {
    (rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE))
}
