use tdigests::QueryError;
use tdigests::TDigest;

fn main() {
    let mut digest = TDigest::builder()
        .compression(20.0)
        .max_unprocessed(64)
        .build()
        .unwrap();

    // Nothing has been observed yet
    assert_eq!(digest.try_quantile(0.5), Err(QueryError::Empty));
    println!("empty digest: quantile(0.5) = {}", digest.quantile(0.5));

    // Observations are staged until the buffer fills up
    for i in 0..50 {
        digest.add(i as f64, 1.0);
    }
    println!(
        "after 50 values: {} pending, {} centroids",
        digest.pending(),
        digest.centroid_count()
    );

    // The 65th staged value triggers a compaction
    digest.extend((50..1000).map(|i| i as f64));
    println!(
        "after 1000 values: {} pending, {} centroids",
        digest.pending(),
        digest.centroid_count()
    );

    // Weighted latency buckets, e.g. from a pre-aggregated histogram
    digest.add_centroids([(2000.0, 10.0), (5000.0, 2.0)]);

    for q in [0.5, 0.9, 0.99, 0.999] {
        println!("p{}: {:.1}", q * 100.0, digest.quantile(q));
    }
    println!("rank of 500.0: {:.3}", digest.cdf(500.0));

    match digest.try_quantile(1.5) {
        Err(err) => println!("quantile(1.5): {err}"),
        Ok(value) => println!("quantile(1.5) unexpectedly returned {value}"),
    }

    let snapshot = digest.export();
    println!(
        "exported {} centroids, total weight {}",
        snapshot.len(),
        snapshot.iter().map(|c| c.weight).sum::<f64>()
    );
}
