/// Hyperbolic tangent, its image is `(-1, 1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tanh;

impl Tanh {
    pub fn new() -> Self {
        Self
    }

    pub fn f(&self, z: f32) -> f32 {
        z.tanh()
    }

    /// Derivative at the point whose image is `a`.
    pub fn df(&self, a: f32) -> f32 {
        1. - a * a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivative_peaks_at_the_origin() {
        let tanh = Tanh::new();
        assert_eq!(tanh.f(0.), 0.);
        assert_eq!(tanh.df(tanh.f(0.)), 1.);
        assert!(tanh.df(tanh.f(2.)) < 0.1);
    }
}
