//! Answer string generation.

use rand::Rng;
use warpcha_common::constants::ANSWER_ALPHABET;
use warpcha_common::{Result, WarpchaError};

/// The default answer alphabet as a slice of characters
pub fn letters() -> Vec<char> {
    ANSWER_ALPHABET.chars().collect()
}

/// Draw `length` characters uniformly (with replacement) from `alphabet`
pub fn generate_string<R: Rng + ?Sized>(
    rng: &mut R,
    length: usize,
    alphabet: &[char],
) -> Result<String> {
    if length == 0 {
        return Err(WarpchaError::InvalidLength(length));
    }
    if alphabet.is_empty() {
        return Err(WarpchaError::InvalidConfiguration(
            "answer alphabet must not be empty".to_string(),
        ));
    }

    Ok((0..length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generate_string_length_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        let alphabet = letters();
        for length in [1, 5, 32] {
            let answer = generate_string(&mut rng, length, &alphabet).unwrap();
            assert_eq!(answer.chars().count(), length);
            assert!(answer.chars().all(|c| c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn test_zero_length_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = generate_string(&mut rng, 0, &letters()).unwrap_err();
        assert!(matches!(err, WarpchaError::InvalidLength(0)));
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = generate_string(&mut rng, 4, &[]).unwrap_err();
        assert!(matches!(err, WarpchaError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_single_symbol_alphabet() {
        let mut rng = rand::rng();
        assert_eq!(generate_string(&mut rng, 3, &['q']).unwrap(), "qqq");
    }

    #[test]
    fn test_letters_alphabet() {
        let alphabet = letters();
        assert_eq!(alphabet.len(), 52);
        assert_eq!(alphabet[0], 'A');
        assert_eq!(alphabet[51], 'z');
    }

    #[test]
    fn test_draws_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let alphabet = letters();
        let per_symbol = 400;
        let answer = generate_string(&mut rng, alphabet.len() * per_symbol, &alphabet).unwrap();

        for symbol in &alphabet {
            let count = answer.chars().filter(|c| c == symbol).count();
            assert!(
                (250..550).contains(&count),
                "symbol {} drawn {} times",
                symbol,
                count
            );
        }
    }
}
