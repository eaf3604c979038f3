use crate::domain::value_objects::Password;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand::Rng;
use rand::rngs::OsRng;

const PASSWORD_BYTES: usize = 12;

/// Generates a temporary console password.
///
/// Twelve random printable ASCII characters, base64 encoded.
pub fn generate_password() -> Password {
    let mut rng = OsRng;
    let raw: Vec<u8> = (0..PASSWORD_BYTES)
        .map(|_| rng.gen_range(b'!'..=b'~'))
        .collect();
    Password::new(STANDARD.encode(raw))
}
