/// Logistic function scaled by `amp`, its image is `(0, amp)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sigmoid {
    amp: f32,
}

impl Sigmoid {
    pub fn new(amp: f32) -> Self {
        Self { amp }
    }

    pub fn amp(&self) -> f32 {
        self.amp
    }

    pub fn f(&self, z: f32) -> f32 {
        self.amp / (1. + (-z).exp())
    }

    /// Derivative at the point whose image is `a`.
    pub fn df(&self, a: f32) -> f32 {
        a * (self.amp - a) / self.amp
    }
}

impl Default for Sigmoid {
    fn default() -> Self {
        Self::new(1.)
    }
}
