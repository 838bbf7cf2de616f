use chrono::{DateTime, Utc};
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Número en base 36 (minúsculas), como `Number.prototype.toString(36)`
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn random_from<R: Rng + ?Sized>(rng: &mut R, alphabet: &[u8], length: usize) -> String {
    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// Id de registro: timestamp en base 36 + 11 caracteres aleatorios
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    format!("{}{}", to_base36(millis), random_from(rng, BASE36, 11))
}

/// Id de sesión del log de depuración
pub fn session_id<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    format!("session_{}{}", to_base36(millis), random_from(rng, BASE36, 5))
}

/// Cadena alfanumérica aleatoria
pub fn random_id<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    random_from(rng, ALPHANUMERIC, length)
}

/// Entero aleatorio en `[min, max]` (ambos incluidos)
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}
