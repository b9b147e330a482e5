//! # T-Digest Rust Library
//!
//! This library provides an implementation of the [t-digest algorithm](https://github.com/tdunning/t-digest) in Rust.
//! The t-digest algorithm is a data structure for accurate on-line accumulation of rank-based
//! statistics such as quantiles and cumulative distribution values, using bounded memory.
//!
//! ## Features
//!
//! - Streaming ingestion of weighted observations into a staging buffer.
//! - Lazy compaction: the buffer is folded into a small, sorted set of centroids whenever a
//!   query needs a consistent view, or eagerly once the buffer fills up.
//! - An arcsine scale function that keeps resolution highest near the tails.
//! - Quantile (rank to value) and CDF (value to rank) estimation.
//!
//! ## Example
//!
//! ```rust
//! use tdigests::TDigest;
//!
//! let mut digest = TDigest::new(1000.0).unwrap();
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     digest.add(value, 1.0);
//! }
//!
//! // Estimate quantiles
//! let median = digest.quantile(0.5);
//! assert_eq!(median, 3.0);
//!
//! // Compute the relative rank of a value
//! let rank = digest.cdf(3.0);
//! assert_eq!(rank, 0.5);
//! ```
//!
//! ## Thread Safety
//!
//! The digest carries no internal synchronization. Every ingestion and query method takes
//! `&mut self`; callers sharing a digest across threads should wrap it in a `Mutex`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

use std::f64::consts::PI;
use std::fmt;

use thiserror::Error;
use tracing::debug;
use tracing::trace;

/// Compression used by [`TDigest::default`].
pub const DEFAULT_COMPRESSION: f64 = 1000.0;

/// Errors raised while configuring a [`TDigest`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TDigestError {
    /// The compression parameter must be finite and strictly positive.
    #[error("invalid compression {0}: must be finite and greater than zero")]
    InvalidCompression(f64),

    /// An explicit buffer bound must be at least one.
    #[error("invalid {name} size {size}: must be at least 1")]
    InvalidBufferSize {
        /// Which buffer bound was rejected.
        name: &'static str,
        /// The rejected size.
        size: usize,
    },
}

/// Errors returned by the strict query variants [`TDigest::try_quantile`] and
/// [`TDigest::try_cdf`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QueryError {
    /// The digest has not received any observation.
    #[error("digest is empty")]
    Empty,

    /// The query argument is outside its domain (`q` outside `[0, 1]`, or NaN).
    #[error("query argument {0} is out of range")]
    OutOfRange(f64),
}

/// Represents a centroid in the t-digest, which holds a mean value and an associated weight.
///
/// # Examples
///
/// ```rust
/// use tdigests::Centroid;
///
/// let centroid = Centroid::new(10.0, 5.0);
/// assert_eq!(centroid.mean, 10.0);
/// assert_eq!(centroid.weight, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    /// The mean value of the centroid.
    pub mean: f64,
    /// The weight (number of observations) associated with the centroid.
    pub weight: f64,
}

impl Centroid {
    /// Creates a new centroid with the given mean and weight.
    pub fn new(mean: f64, weight: f64) -> Self {
        Self { mean, weight }
    }

    /// Adds another centroid to this one, updating the mean and weight.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tdigests::Centroid;
    ///
    /// let mut c1 = Centroid::new(10.0, 2.0);
    /// let c2 = Centroid::new(20.0, 3.0);
    /// c1.add(&c2);
    /// assert_eq!(c1.mean, 16.0);
    /// assert_eq!(c1.weight, 5.0);
    /// ```
    pub fn add(&mut self, other: &Centroid) {
        let total_weight = self.weight + other.weight;
        if self.weight == 0.0 {
            self.mean = other.mean;
        } else if total_weight != 0.0 {
            self.mean += other.weight * (other.mean - self.mean) / total_weight;
        }
        self.weight = total_weight;
    }
}

impl From<(f64, f64)> for Centroid {
    fn from((mean, weight): (f64, f64)) -> Self {
        Self::new(mean, weight)
    }
}

impl fmt::Display for Centroid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.mean, self.weight)
    }
}

/// Maps a normalized centroid index `k` in `[0, compression]` to a target quantile.
fn scale(k: f64, compression: f64) -> f64 {
    ((k.min(compression) * PI / compression - PI / 2.0).sin() + 1.0) / 2.0
}

/// Inverse of [`scale`]: maps a quantile back to a normalized centroid index.
fn inverse_scale(q: f64, compression: f64) -> f64 {
    compression * ((2.0 * q - 1.0).clamp(-1.0, 1.0).asin() + PI / 2.0) / PI
}

/// Interpolates between `x1` and `x2`, the result always lying between the two.
fn weighted_average(x1: f64, w1: f64, x2: f64, w2: f64) -> f64 {
    if x1 <= x2 {
        weighted_average_sorted(x1, w1, x2, w2)
    } else {
        weighted_average_sorted(x2, w2, x1, w1)
    }
}

fn weighted_average_sorted(x1: f64, w1: f64, x2: f64, w2: f64) -> f64 {
    let total_weight = w1 + w2;
    if total_weight == 0.0 {
        return x1;
    }
    let x = (x1 * w1 + x2 * w2) / total_weight;
    x.min(x2).max(x1)
}

/// Configures and builds a [`TDigest`].
///
/// The buffer bounds default to `ceil(2 × compression)` processed centroids and
/// `ceil(8 × compression)` unprocessed centroids.
///
/// # Examples
///
/// ```rust
/// use tdigests::TDigest;
///
/// let digest = TDigest::builder()
///     .compression(100.0)
///     .max_unprocessed(64)
///     .build()
///     .unwrap();
/// assert_eq!(digest.max_processed(), 200);
/// assert_eq!(digest.max_unprocessed(), 64);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TDigestBuilder {
    compression: f64,
    max_processed: Option<usize>,
    max_unprocessed: Option<usize>,
}

impl Default for TDigestBuilder {
    fn default() -> Self {
        Self {
            compression: DEFAULT_COMPRESSION,
            max_processed: None,
            max_unprocessed: None,
        }
    }
}

impl TDigestBuilder {
    /// Sets the compression parameter. Higher values keep more centroids.
    pub fn compression(mut self, compression: f64) -> Self {
        self.compression = compression;
        self
    }

    /// Overrides the soft bound on the number of processed centroids.
    pub fn max_processed(mut self, size: usize) -> Self {
        self.max_processed = Some(size);
        self
    }

    /// Overrides the soft bound on the number of buffered, unprocessed centroids.
    pub fn max_unprocessed(mut self, size: usize) -> Self {
        self.max_unprocessed = Some(size);
        self
    }

    /// Validates the configuration and builds an empty digest.
    pub fn build(self) -> Result<TDigest, TDigestError> {
        if !self.compression.is_finite() || self.compression <= 0.0 {
            return Err(TDigestError::InvalidCompression(self.compression));
        }
        check_buffer_size("max_processed", self.max_processed)?;
        check_buffer_size("max_unprocessed", self.max_unprocessed)?;

        Ok(self.finish())
    }

    // Callers validate first; the default configuration is always valid.
    fn finish(self) -> TDigest {
        let compression = self.compression;
        let max_processed = self
            .max_processed
            .unwrap_or_else(|| derived_size(2.0 * compression));
        let max_unprocessed = self
            .max_unprocessed
            .unwrap_or_else(|| derived_size(8.0 * compression));

        debug!(compression, max_processed, max_unprocessed, "created t-digest");

        TDigest::with_bounds(compression, max_processed, max_unprocessed)
    }
}

fn check_buffer_size(name: &'static str, explicit: Option<usize>) -> Result<(), TDigestError> {
    match explicit {
        Some(0) => Err(TDigestError::InvalidBufferSize { name, size: 0 }),
        _ => Ok(()),
    }
}

fn derived_size(bound: f64) -> usize {
    (bound.ceil() as usize).max(1)
}

/// The main struct representing a t-digest.
///
/// Observations are staged in an unprocessed buffer and folded into a sorted sequence of
/// processed centroids by [`TDigest::compact`]. Queries compact first, so they always
/// reflect every observation added so far.
///
/// # Examples
///
/// ```rust
/// use tdigests::TDigest;
///
/// let mut digest = TDigest::default();
/// digest.extend([1.0, 2.0, 3.0]);
///
/// let q = digest.quantile(0.5);
/// assert_eq!(q, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TDigest {
    compression: f64,
    max_processed: usize,
    max_unprocessed: usize,
    processed: Vec<Centroid>,
    unprocessed: Vec<Centroid>,
    // cumulative[i] is the weight before processed[i] plus half its own weight;
    // the trailing entry is the total processed weight.
    cumulative: Vec<f64>,
    processed_weight: f64,
    unprocessed_weight: f64,
    min: f64,
    max: f64,
}

impl Default for TDigest {
    fn default() -> Self {
        TDigestBuilder::default().finish()
    }
}

impl TDigest {
    /// Creates an empty t-digest with the given compression.
    ///
    /// # Errors
    ///
    /// Returns [`TDigestError::InvalidCompression`] if `compression` is not finite or not
    /// strictly positive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tdigests::TDigest;
    ///
    /// assert!(TDigest::new(100.0).is_ok());
    /// assert!(TDigest::new(0.0).is_err());
    /// ```
    pub fn new(compression: f64) -> Result<Self, TDigestError> {
        Self::builder().compression(compression).build()
    }

    fn with_bounds(compression: f64, max_processed: usize, max_unprocessed: usize) -> Self {
        Self {
            compression,
            max_processed,
            max_unprocessed,
            processed: Vec::new(),
            unprocessed: Vec::new(),
            cumulative: Vec::new(),
            processed_weight: 0.0,
            unprocessed_weight: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Returns a builder for a digest with non-default buffer bounds.
    pub fn builder() -> TDigestBuilder {
        TDigestBuilder::default()
    }

    /// Returns the compression parameter.
    pub fn compression(&self) -> f64 {
        self.compression
    }

    /// Returns the soft bound on the number of processed centroids.
    pub fn max_processed(&self) -> usize {
        self.max_processed
    }

    /// Returns the soft bound on the number of buffered centroids.
    pub fn max_unprocessed(&self) -> usize {
        self.max_unprocessed
    }

    /// Returns the total weight added so far, processed or not.
    pub fn total_weight(&self) -> f64 {
        self.processed_weight + self.unprocessed_weight
    }

    /// Returns the weight already folded into the processed centroids.
    pub fn processed_weight(&self) -> f64 {
        self.processed_weight
    }

    /// Returns `true` if no observation has been added.
    pub fn is_empty(&self) -> bool {
        self.processed.is_empty() && self.unprocessed.is_empty()
    }

    /// Returns the number of processed centroids, as of the last compaction.
    pub fn centroid_count(&self) -> usize {
        self.processed.len()
    }

    /// Returns the number of centroids waiting in the unprocessed buffer.
    pub fn pending(&self) -> usize {
        self.unprocessed.len()
    }

    /// Returns the smallest value observed, or `None` for an empty digest.
    pub fn min(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.min)
    }

    /// Returns the largest value observed, or `None` for an empty digest.
    pub fn max(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.max)
    }

    /// Evaluates the scale function, mapping a centroid index in `[0, compression]` to a
    /// quantile in `[0, 1]`.
    pub fn scale_function(&self, k: f64) -> f64 {
        scale(k, self.compression)
    }

    /// Evaluates the inverse of [`TDigest::scale_function`].
    pub fn inverse_scale_function(&self, q: f64) -> f64 {
        inverse_scale(q, self.compression)
    }

    /// Adds an observation with the given weight.
    ///
    /// Values that are not finite are ignored, as are weights that are not finite and positive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tdigests::TDigest;
    ///
    /// let mut digest = TDigest::default();
    /// digest.add(1.0, 2.0);
    /// digest.add(f64::NAN, 1.0);
    /// assert_eq!(digest.total_weight(), 2.0);
    /// ```
    pub fn add(&mut self, value: f64, weight: f64) {
        if value.is_nan() {
            trace!(weight, "ignoring NaN observation");
            return;
        }
        self.add_centroid(Centroid::new(value, weight));
    }

    /// Adds a single observation with unit weight.
    pub fn add_value(&mut self, value: f64) {
        self.add(value, 1.0);
    }

    /// Stages a centroid for the next compaction.
    ///
    /// Compacts immediately once either buffer has grown past its bound.
    pub fn add_centroid(&mut self, centroid: Centroid) {
        if !centroid.mean.is_finite() || !centroid.weight.is_finite() || centroid.weight <= 0.0 {
            trace!(%centroid, "ignoring degenerate centroid");
            return;
        }

        self.unprocessed.push(centroid);
        self.unprocessed_weight += centroid.weight;
        self.min = self.min.min(centroid.mean);
        self.max = self.max.max(centroid.mean);

        if self.processed.len() > self.max_processed
            || self.unprocessed.len() > self.max_unprocessed
        {
            self.compact();
        }
    }

    /// Adds every centroid of `centroids`, in order.
    ///
    /// Large batches are compacted as the buffer fills, exactly as repeated calls to
    /// [`TDigest::add_centroid`] would.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tdigests::TDigest;
    ///
    /// let mut digest = TDigest::new(5.0).unwrap();
    /// digest.add_centroids((0..100).map(|i| (i as f64, 2.0)));
    /// assert_eq!(digest.total_weight(), 200.0);
    /// ```
    pub fn add_centroids<I>(&mut self, centroids: I)
    where
        I: IntoIterator,
        I::Item: Into<Centroid>,
    {
        for centroid in centroids {
            self.add_centroid(centroid.into());
        }
    }

    /// Compacts and returns an owned copy of the centroids, sorted by ascending mean.
    ///
    /// The snapshot does not change when the digest is updated later.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tdigests::TDigest;
    ///
    /// let mut digest = TDigest::default();
    /// digest.extend([3.0, 1.0, 2.0]);
    ///
    /// let centroids = digest.export();
    /// assert_eq!(centroids.len(), 3);
    /// assert_eq!(centroids[0].mean, 1.0);
    /// ```
    pub fn export(&mut self) -> Vec<Centroid> {
        self.compact();
        self.processed.clone()
    }

    /// Compacts and returns the processed centroids.
    pub fn centroids(&mut self) -> &[Centroid] {
        self.compact();
        &self.processed
    }

    /// Folds the unprocessed buffer into the processed centroids.
    ///
    /// Adjacent centroids are merged as long as the merged weight stays within the budget
    /// given by the scale function, which is small near the tails and large around the
    /// median. Does nothing if the buffer is empty and the processed centroids are within
    /// bound.
    pub fn compact(&mut self) {
        if self.unprocessed.is_empty() && self.processed.len() <= self.max_processed {
            return;
        }

        let incoming = self.unprocessed.len();
        let mut sorted = std::mem::take(&mut self.unprocessed);
        sorted.append(&mut self.processed);
        sorted.sort_by(|a, b| a.mean.total_cmp(&b.mean));

        self.processed_weight += self.unprocessed_weight;
        self.unprocessed_weight = 0.0;

        if let Some((first, rest)) = sorted.split_first() {
            let compression = self.compression;
            let total_weight = self.processed_weight;
            let mut so_far = first.weight;
            let mut limit = total_weight * scale(1.0, compression);

            self.processed.push(*first);
            for centroid in rest {
                let projected = so_far + centroid.weight;
                if projected <= limit {
                    so_far = projected;
                    self.merge_into_last(centroid);
                } else {
                    let k1 = inverse_scale(so_far / total_weight, compression);
                    limit = total_weight * scale(k1 + 1.0, compression);
                    so_far = projected;
                    self.processed.push(*centroid);
                }
            }
        }

        if let (Some(first), Some(last)) = (self.processed.first(), self.processed.last()) {
            self.min = self.min.min(first.mean);
            self.max = self.max.max(last.mean);
        }
        self.update_cumulative();

        sorted.clear();
        self.unprocessed = sorted;

        debug!(
            incoming,
            centroids = self.processed.len(),
            weight = self.processed_weight,
            "compacted t-digest"
        );
    }

    fn merge_into_last(&mut self, centroid: &Centroid) {
        match self.processed.last_mut() {
            Some(last) => last.add(centroid),
            None => self.processed.push(*centroid),
        }
    }

    fn update_cumulative(&mut self) {
        self.cumulative.clear();
        self.cumulative.reserve(self.processed.len() + 1);
        let mut prev = 0.0;
        for centroid in &self.processed {
            self.cumulative.push(prev + centroid.weight / 2.0);
            prev += centroid.weight;
        }
        self.cumulative.push(prev);
    }

    /// Estimates the value at quantile `q`.
    ///
    /// Returns `NaN` if `q` is outside `[0, 1]` or the digest is empty. Use
    /// [`TDigest::try_quantile`] to tell the two apart.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tdigests::TDigest;
    ///
    /// let mut digest = TDigest::default();
    /// digest.extend((0..=100).map(|i| i as f64));
    /// assert_eq!(digest.quantile(0.5), 50.0);
    /// assert!(digest.quantile(1.5).is_nan());
    /// ```
    pub fn quantile(&mut self, q: f64) -> f64 {
        self.try_quantile(q).unwrap_or(f64::NAN)
    }

    /// Estimates the value at quantile `q`, reporting invalid queries as errors.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::OutOfRange`] if `q` is outside `[0, 1]` and
    /// [`QueryError::Empty`] if no observation has been added.
    pub fn try_quantile(&mut self, q: f64) -> Result<f64, QueryError> {
        self.compact();

        if !(0.0..=1.0).contains(&q) {
            return Err(QueryError::OutOfRange(q));
        }

        let processed = &self.processed;
        let n = processed.len();
        match n {
            0 => return Err(QueryError::Empty),
            1 => return Ok(processed[0].mean),
            _ => {}
        }

        let index = q * self.processed_weight;

        // Left tail, between the minimum and the first centroid.
        let first = &processed[0];
        if index <= first.weight / 2.0 {
            return Ok(self.min + 2.0 * index / first.weight * (first.mean - self.min));
        }

        // cumulative[0] < index, so lower >= 1.
        let lower = self
            .cumulative
            .partition_point(|&cumulative| cumulative < index)
            .min(n);
        if lower < n {
            let z1 = index - self.cumulative[lower - 1];
            let z2 = self.cumulative[lower] - index;
            let (left, right) = (&processed[lower - 1], &processed[lower]);
            return Ok(weighted_average(left.mean, z2, right.mean, z1));
        }

        // Right tail, between the last centroid and the maximum.
        let z1 = index - self.cumulative[n - 1];
        let z2 = (self.processed_weight - index).max(0.0);
        Ok(weighted_average(processed[n - 1].mean, z2, self.max, z1))
    }

    /// Estimates the fraction of the total weight at or below `x`.
    ///
    /// Returns `0.0` for an empty digest and `NaN` if `x` is `NaN`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tdigests::TDigest;
    ///
    /// let mut digest = TDigest::default();
    /// digest.extend((0..=100).map(|i| i as f64));
    /// assert_eq!(digest.cdf(-1.0), 0.0);
    /// assert_eq!(digest.cdf(50.0), 0.5);
    /// assert_eq!(digest.cdf(100.0), 1.0);
    /// ```
    pub fn cdf(&mut self, x: f64) -> f64 {
        match self.try_cdf(x) {
            Ok(rank) => rank,
            Err(QueryError::Empty) => 0.0,
            Err(QueryError::OutOfRange(_)) => f64::NAN,
        }
    }

    /// Estimates the fraction of the total weight at or below `x`, reporting invalid queries
    /// as errors.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::OutOfRange`] if `x` is `NaN` and [`QueryError::Empty`] if no
    /// observation has been added.
    pub fn try_cdf(&mut self, x: f64) -> Result<f64, QueryError> {
        self.compact();

        if x.is_nan() {
            return Err(QueryError::OutOfRange(x));
        }

        let processed = &self.processed;
        let n = processed.len();
        match n {
            0 => return Err(QueryError::Empty),
            1 if x <= self.min => return Ok(0.0),
            1 if x >= self.max => return Ok(1.0),
            1 => return Ok((x - self.min) / (self.max - self.min)),
            _ => {}
        }

        if x <= self.min {
            return Ok(0.0);
        }
        if x >= self.max {
            return Ok(1.0);
        }

        // Past the early returns, first.mean > min and last.mean < max.
        let first = &processed[0];
        if x <= first.mean {
            let fraction = (x - self.min) / (first.mean - self.min);
            return Ok(fraction * first.weight / self.processed_weight / 2.0);
        }

        let last = &processed[n - 1];
        if x >= last.mean {
            let fraction = (self.max - x) / (self.max - last.mean);
            return Ok(1.0 - fraction * last.weight / self.processed_weight / 2.0);
        }

        // first.mean < x < last.mean, so 1 <= upper < n.
        let upper = processed.partition_point(|centroid| centroid.mean <= x);
        let z1 = x - processed[upper - 1].mean;
        let z2 = processed[upper].mean - x;
        let rank = weighted_average(self.cumulative[upper - 1], z2, self.cumulative[upper], z1);
        Ok(rank / self.processed_weight)
    }
}

impl Extend<f64> for TDigest {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, values: T) {
        for value in values {
            self.add_value(value);
        }
    }
}

impl Extend<Centroid> for TDigest {
    fn extend<T: IntoIterator<Item = Centroid>>(&mut self, centroids: T) {
        self.add_centroids(centroids);
    }
}

impl FromIterator<f64> for TDigest {
    fn from_iter<T: IntoIterator<Item = f64>>(values: T) -> Self {
        let mut digest = TDigest::default();
        digest.extend(values);
        digest
    }
}

impl fmt::Display for TDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, centroids: &[Centroid]) -> fmt::Result {
            write!(f, "[")?;
            for (i, centroid) in centroids.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{centroid}")?;
            }
            write!(f, "]")
        }

        write!(f, "{{processed: ")?;
        list(f, &self.processed)?;
        write!(f, ", unprocessed: ")?;
        list(f, &self.unprocessed)?;
        write!(f, "}}")
    }
}

/// Computes the empirical quantile from data.
#[doc(hidden)]
pub fn naive_quantile(data: &[f64], q: f64) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let pos = (n as f64 - 1.0) * q;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = pos - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

/// Computes the empirical rank from data.
#[doc(hidden)]
pub fn naive_rank(data: &[f64], x: f64) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let pos = sorted.iter().filter(|&&v| v <= x).count();
    if pos == 0 {
        return 0.0;
    }
    if pos == sorted.len() {
        return 1.0;
    }
    let lower = pos - 1;
    let upper = pos;
    let fraction = (x - sorted[lower]) / (sorted[upper] - sorted[lower]);
    let lower_q = lower as f64 / (sorted.len() - 1) as f64;
    let upper_q = upper as f64 / (sorted.len() - 1) as f64;
    lower_q + fraction * (upper_q - lower_q)
}
