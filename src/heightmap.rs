use ndarray::Array2;

/// Scalar height field indexed as `[[x, y]]`.
pub struct HeightMap(pub Array2<f32>);

impl HeightMap {
    pub fn height_at(&self, x: usize, y: usize) -> f32 {
        self.0[[x, y]]
    }

    pub fn dim(&self) -> (usize, usize) {
        self.0.dim()
    }

    pub fn min_max(&self) -> (f32, f32) {
        self.0
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            })
    }
}
