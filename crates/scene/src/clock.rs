use std::f32::consts::TAU;

/// Drives the spin of every glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    angle: f32,
    spin_rate: f32,
}

impl AnimationClock {
    /// `spin_rate` in radians per second. Non-finite rates stop the clock.
    pub fn new(spin_rate: f32) -> Self {
        Self {
            angle: 0.0,
            spin_rate: if spin_rate.is_finite() { spin_rate } else { 0.0 },
        }
    }

    /// Current angle, kept in `[0, TAU)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn spin_rate(&self) -> f32 {
        self.spin_rate
    }

    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.angle = (self.angle + self.spin_rate * dt).rem_euclid(TAU);
    }
}
