use rand::{distributions::Alphanumeric, Rng};

/// Random alphanumeric string, used for stored upload filenames.
pub fn generate_random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
