/// Trigonometry backends for the matrix and projection builders
///
/// Builders take a `&impl Trig` in their `*_with` forms. `ExactTrig` calls the
/// platform transcendentals; `TrigTable` trades a little accuracy for table
/// lookups and is only used when a caller constructs one explicitly.
use std::f32::consts::TAU;

/// Source of sine, cosine and tangent for angles in radians.
pub trait Trig {
    fn sin(&self, radians: f32) -> f32;
    fn cos(&self, radians: f32) -> f32;
    fn tan(&self, radians: f32) -> f32;
}

/// Direct `f32` transcendental calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactTrig;

impl Trig for ExactTrig {
    fn sin(&self, radians: f32) -> f32 {
        radians.sin()
    }

    fn cos(&self, radians: f32) -> f32 {
        radians.cos()
    }

    fn tan(&self, radians: f32) -> f32 {
        radians.tan()
    }
}

const SAMPLES_PER_TURN: usize = 360;

/// Per-degree sin/cos/tan tables with linear interpolation between samples.
///
/// Tangent is sampled the same way, so accuracy degrades sharply next to the
/// asymptotes at 90 and 270 degrees.
#[derive(Debug, Clone)]
pub struct TrigTable {
    sin: Vec<f32>,
    cos: Vec<f32>,
    tan: Vec<f32>,
}

impl TrigTable {
    pub fn new() -> Self {
        let mut sin = Vec::with_capacity(SAMPLES_PER_TURN);
        let mut cos = Vec::with_capacity(SAMPLES_PER_TURN);
        let mut tan = Vec::with_capacity(SAMPLES_PER_TURN);

        for degree in 0..SAMPLES_PER_TURN {
            let radians = (degree as f64).to_radians();
            sin.push(radians.sin() as f32);
            cos.push(radians.cos() as f32);
            tan.push(radians.tan() as f32);
        }

        Self { sin, cos, tan }
    }

    /// Look up `table` at `radians`, wrapping into one turn first.
    fn interpolate(table: &[f32], radians: f32) -> f32 {
        let degrees = radians.rem_euclid(TAU).to_degrees();
        let index = (degrees.floor() as usize) % SAMPLES_PER_TURN;
        let frac = degrees - degrees.floor();
        let next = (index + 1) % SAMPLES_PER_TURN;

        table[index] + frac * (table[next] - table[index])
    }
}

impl Default for TrigTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Trig for TrigTable {
    fn sin(&self, radians: f32) -> f32 {
        Self::interpolate(&self.sin, radians)
    }

    fn cos(&self, radians: f32) -> f32 {
        Self::interpolate(&self.cos, radians)
    }

    fn tan(&self, radians: f32) -> f32 {
        Self::interpolate(&self.tan, radians)
    }
}
