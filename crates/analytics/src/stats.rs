//! Small deterministic statistics helpers.

fn sum(xs: &[f64]) -> f64 {
    xs.iter().sum()
}

/// Arithmetic mean; an empty slice has mean 0.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    sum(xs) / (xs.len() as f64)
}

/// Sample standard deviation (n-1), deterministic.
///
/// Fewer than two observations yield 0.
pub fn stddev_sample(xs: &[f64], mean: f64) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let var = xs
        .iter()
        .map(|x| {
            let d = x - mean;
            d * d
        })
        .sum::<f64>()
        / ((xs.len() - 1) as f64);
    var.sqrt()
}

// Acklam's rational approximation, relative error below 1.2e-9.
const A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_690e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];
const P_LOW: f64 = 0.024_25;

fn tail(q: f64) -> f64 {
    (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
        / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
}

/// Quantile function of the standard normal distribution.
///
/// Returns `None` unless `0 < p < 1`.
pub fn inverse_normal_cdf(p: f64) -> Option<f64> {
    if !(p > 0.0 && p < 1.0) {
        return None;
    }
    let z = if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    };
    Some(z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0]), 3.0);
    }

    #[test]
    fn stddev_uses_n_minus_one() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&xs);
        assert_eq!(m, 5.0);
        // Population std is 2.0; the sample std is sqrt(32/7).
        assert!(close(stddev_sample(&xs, m), (32.0f64 / 7.0).sqrt(), 1e-12));
        assert_eq!(stddev_sample(&[3.0], 3.0), 0.0);
    }

    #[test]
    fn inverse_normal_matches_reference_quantiles() {
        let cases = [
            (0.5, 0.0),
            (0.90, 1.281_551_565_5),
            (0.95, 1.644_853_626_9),
            (0.97, 1.880_793_608_2),
            (0.975, 1.959_963_985_0),
            (0.99, 2.326_347_874_0),
            (0.01, -2.326_347_874_0),
            (0.001, -3.090_232_306_2),
        ];
        for (p, expected) in cases {
            let z = inverse_normal_cdf(p).unwrap();
            assert!(close(z, expected, 1e-6), "p={p}: {z} vs {expected}");
        }
    }

    #[test]
    fn inverse_normal_rejects_out_of_domain() {
        assert_eq!(inverse_normal_cdf(0.0), None);
        assert_eq!(inverse_normal_cdf(1.0), None);
        assert_eq!(inverse_normal_cdf(f64::NAN), None);
        assert_eq!(inverse_normal_cdf(-0.2), None);
    }
}
