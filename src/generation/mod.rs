use super::heightmap::HeightMap;

use ndarray::prelude::*;
use noise::{NoiseFn, Perlin};
use rand::Rng;

#[derive(Clone, Debug)]
pub struct NoiseSettings {
    pub size: (usize, usize),
    /// Plane region sampled along x, lower bound inclusive.
    pub x_bounds: (f64, f64),
    /// Plane region sampled along z, lower bound inclusive.
    pub z_bounds: (f64, f64),
    pub octaves: usize,
    pub lacunarity: f64,
    pub persistence: f64,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            size: (64, 64),
            x_bounds: (0., 2.),
            z_bounds: (0., 2.),
            octaves: 6,
            lacunarity: 2.,
            persistence: 0.5,
        }
    }
}

/// Samples fractal Perlin noise over a flat plane at `y = 0`.
///
/// The seed is drawn from `rng`, so the same generator state always yields the
/// same terrain. Values are normalised into `-1..=1`.
pub fn perlin_terrain(noise_settings: &NoiseSettings, rng: &mut impl Rng) -> HeightMap {
    let (width, height) = noise_settings.size;
    let (x0, x1) = noise_settings.x_bounds;
    let (z0, z1) = noise_settings.z_bounds;

    let perlin = Perlin::new(rng.gen());

    let mut data = Array::zeros((width, height));

    for y in 0..height {
        let pz = z0 + (z1 - z0) * y as f64 / height as f64;
        for x in 0..width {
            let px = x0 + (x1 - x0) * x as f64 / width as f64;
            let mut amplitude = 1.;
            let mut frequency = 1.;

            for i in 0..noise_settings.octaves {
                // Shift each octave so they don't share lattice points
                data[[x, y]] += amplitude
                    * perlin.get([i as f64 * 1000. + px * frequency, 0., pz * frequency]) as f32;
                amplitude *= noise_settings.persistence as f32;
                frequency *= noise_settings.lacunarity;
            }
        }
    }

    let (max_magnitude, _) = (0..noise_settings.octaves)
        .fold((0.0, 1.0), |(max_magnitude, amplitude), _| {
            (
                max_magnitude + amplitude,
                amplitude * noise_settings.persistence as f32,
            )
        });

    let mut terrain = if max_magnitude > 0. {
        HeightMap(data / max_magnitude)
    } else {
        HeightMap(data)
    };
    terrain.clamp(-1., 1.);
    terrain
}

impl HeightMap {
    pub fn clamp(&mut self, min: f32, max: f32) {
        self.0.map_inplace(|v| *v = v.clamp(min, max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn same_seed_same_terrain() {
        let settings = NoiseSettings::default();

        let a = perlin_terrain(&settings, &mut StdRng::seed_from_u64(7));
        let b = perlin_terrain(&settings, &mut StdRng::seed_from_u64(7));

        assert_eq!(a.0, b.0);
    }

    #[test]
    fn values_stay_in_unit_range() {
        let settings = NoiseSettings {
            size: (32, 16),
            ..Default::default()
        };
        let terrain = perlin_terrain(&settings, &mut StdRng::seed_from_u64(42));

        assert_eq!(terrain.dim(), (32, 16));
        let (min, max) = terrain.min_max();
        assert!(min >= -1. && max <= 1., "range was {min}..{max}");
    }

    #[test]
    fn zero_octaves_is_flat() {
        let settings = NoiseSettings {
            size: (4, 4),
            octaves: 0,
            ..Default::default()
        };
        let terrain = perlin_terrain(&settings, &mut StdRng::seed_from_u64(1));

        assert!(terrain.0.iter().all(|&v| v == 0.));
    }
}
