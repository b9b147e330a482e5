use rand::distributions::Distribution;
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tdigests::naive_quantile;
use tdigests::TDigest;

const QUANTILES: [f64; 7] = [0.001, 0.01, 0.1, 0.5, 0.9, 0.99, 0.999];

fn main() {
    // Exponential-ish latencies: most requests are fast, a few are very slow
    let mut rng = StdRng::seed_from_u64(42);
    let uniform = Uniform::new(0.0f64, 1.0);
    let mut values: Vec<f64> = (0..100000)
        .map(|_| -10.0 * (1.0 - uniform.sample(&mut rng)).ln())
        .collect();
    values.sort_by(f64::total_cmp);

    for compression in [10.0, 50.0, 200.0, 1000.0] {
        let mut digest = TDigest::new(compression).unwrap();
        digest.extend(values.iter().copied());

        println!(
            "compression {} -> {} centroids",
            compression,
            digest.centroids().len()
        );
        for q in QUANTILES {
            let estimated = digest.quantile(q);
            let expected = naive_quantile(&values, q);
            let rank_error = (digest.cdf(expected) - q).abs();
            println!(
                "  q: {:.3}, estimated: {:.3}, expected: {:.3}, rank error: {:.5}",
                q, estimated, expected, rank_error
            );
        }
    }
}
