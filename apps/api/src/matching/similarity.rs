/// Cosine similarity of two equal-length vectors.
///
/// Returns 0.0 when either vector has zero magnitude (no shared direction to measure)
/// instead of dividing by zero. Mismatched lengths compare over the shorter prefix.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0) as f32
}

/// Maps a raw cosine into the `[0, 1]` score range shared by every matcher.
/// Anti-correlated pairs score the same as unrelated ones.
pub fn unit_score(raw: f32) -> f32 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 1.0)
}
