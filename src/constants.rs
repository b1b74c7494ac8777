//! Centralized constants for the hwrng-stats crate
//!
//! Values shared between the entropy sources and the test engines.

/// Sample word layout
pub mod word {
    /// Bytes consumed from the entropy stream per sampled value
    pub const BYTES: usize = std::mem::size_of::<u32>();

    /// Bin boundary for the runs test: 2^32 / 2
    ///
    /// Values strictly greater than this land in the upper bin.
    pub const MIDPOINT: u32 = 1 << 31;
}

/// Entropy device defaults
pub mod device {
    /// Linux hardware RNG character device
    pub const HWRNG_PATH: &str = "/dev/hwrng";
}
