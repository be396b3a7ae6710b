use fssr_core::prelude::*;

use rand::prelude::*;

/// Half the edge length of the cube that `random_samples` draws positions from.
pub const RANDOM_SAMPLES_EXTENT: f64 = 10.0;

/// `n` samples with positions uniformly distributed in a cube centered at the origin and scales spread over two orders
/// of magnitude, so that they end up at many different levels of an octree. The same `seed` gives the same samples.
pub fn random_samples(n: usize, seed: u64) -> SampleList {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..n)
        .map(|_| {
            let pos = PointN([
                rng.gen_range(-RANDOM_SAMPLES_EXTENT..RANDOM_SAMPLES_EXTENT),
                rng.gen_range(-RANDOM_SAMPLES_EXTENT..RANDOM_SAMPLES_EXTENT),
                rng.gen_range(-RANDOM_SAMPLES_EXTENT..RANDOM_SAMPLES_EXTENT),
            ]);
            let scale = 2f64.powf(rng.gen_range(-4.5..1.0));

            Sample::new(pos, scale)
                .with_normal(random_unit_vector(&mut rng))
                .with_confidence(rng.gen_range(0.5..1.0))
        })
        .collect()
}

/// Samples scattered around the surface of a sphere, like the output of a scan of a round object. The scale of every
/// sample is proportional to `radius`.
pub fn sphere_samples(n: usize, radius: f64, seed: u64) -> SampleList {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..n)
        .map(|_| {
            let normal = random_unit_vector(&mut rng);
            let noise = rng.gen_range(-0.01..0.01) * radius;
            let pos = Point3d::from(normal) * (radius + noise);
            let scale = radius * rng.gen_range(0.02..0.05);

            Sample::new(pos, scale).with_normal(normal)
        })
        .collect()
}

fn random_unit_vector(rng: &mut impl Rng) -> Point3f {
    loop {
        let v: Point3f = PointN([
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        ]);
        let norm = v.norm();
        if norm > 1e-3 && norm <= 1.0 {
            return v / norm;
        }
    }
}
