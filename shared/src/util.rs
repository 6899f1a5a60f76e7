/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at booking scale)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Human-readable booking number derived from a snowflake ID.
///
/// Format: `MQ-` followed by the ID in uppercase base36, e.g. `MQ-1KTX9A40R`.
/// Unique as long as the underlying ID is.
pub fn booking_number(id: i64) -> String {
    const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut n = id as u64;
    let mut digits = Vec::new();
    loop {
        digits.push(ALPHABET[(n % 36) as usize] as char);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    let encoded: String = digits.into_iter().rev().collect();
    format!("MQ-{encoded}")
}
