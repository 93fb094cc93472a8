/// Transient record of a ray hitting a primitive.
///
/// `t` is the parametric distance along the ray. It is reported exactly as
/// the intersection math produces it: a primitive behind the ray origin can
/// yield a negative value, and a degenerate plane hit an infinite one. The
/// nearest-hit search compares raw values and filters nothing.
#[derive(Copy, Clone, Debug)]
pub struct Intersection {
    pub t: f64,
}

impl Intersection {
    pub fn new(t: f64) -> Self {
        Self { t }
    }
}
