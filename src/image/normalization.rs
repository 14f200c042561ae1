use crate::types::SAMPLE_MAX;

/// Samples processed per iteration of the lane kernel
pub const LANES: usize = 8;

#[inline(always)]
#[must_use]
// Hot path: called for every sample during conversion
pub fn normalize_sample(sample: u8) -> f64 {
    f64::from(sample) / SAMPLE_MAX
}

/// Reference kernel: one sample at a time
#[inline]
pub fn normalize_scalar_into(samples: &[u8], out: &mut [f64]) {
    for (dst, &src) in out.iter_mut().zip(samples) {
        *dst = normalize_sample(src);
    }
}

/// Fixed-width lane kernel with a scalar tail
///
/// Each lane performs the same single division as [`normalize_sample`], so the
/// result is bit-identical to [`normalize_scalar_into`]; the fixed chunk width only
/// lets the compiler emit packed conversions and divisions.
#[inline]
pub fn normalize_lanes_into(samples: &[u8], out: &mut [f64]) {
    let mut src_chunks = samples.chunks_exact(LANES);
    let mut dst_chunks = out.chunks_exact_mut(LANES);

    for (dst, src) in (&mut dst_chunks).zip(&mut src_chunks) {
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = f64::from(s) / SAMPLE_MAX;
        }
    }

    normalize_scalar_into(src_chunks.remainder(), dst_chunks.into_remainder());
}
