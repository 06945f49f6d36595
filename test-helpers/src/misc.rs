//! Miscellaneous test helpers

use rand::{distributions::Alphanumeric, Rng};

/// The length of the random suffix appended to generated descriptions
const DESCRIPTION_SUFFIX_LEN: usize = 12;

/// Generate a proposal description that is unique with overwhelming probability
pub fn random_description(prefix: &str, rng: &mut impl Rng) -> String {
    let suffix: String = rng
        .sample_iter(&Alphanumeric)
        .take(DESCRIPTION_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{prefix}-{suffix}")
}

/// Assert that two values are equal, returning an `eyre` error instead of panicking
#[macro_export]
macro_rules! assert_eq_result {
    ($left:expr, $right:expr) => {{
        let (left, right) = (&$left, &$right);
        if left == right {
            Ok(())
        } else {
            Err($crate::eyre::eyre!(
                "assertion failed: `{}` == `{}`\n  left: {:?}\n right: {:?}",
                stringify!($left),
                stringify!($right),
                left,
                right
            ))
        }
    }};
}

/// Assert that a condition holds, returning an `eyre` error instead of panicking
#[macro_export]
macro_rules! assert_true_result {
    ($cond:expr) => {{
        if $cond {
            Ok(())
        } else {
            Err($crate::eyre::eyre!("assertion failed: {}", stringify!($cond)))
        }
    }};
}

#[cfg(test)]
mod tests {
    use rand::thread_rng;

    use super::*;

    #[test]
    fn test_random_descriptions_differ() {
        let mut rng = thread_rng();
        let a = random_description("proposal", &mut rng);
        let b = random_description("proposal", &mut rng);
        assert!(a.starts_with("proposal-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_assert_eq_result() {
        let ok: eyre::Result<()> = assert_eq_result!(1 + 1, 2);
        assert!(ok.is_ok());

        let err: eyre::Result<()> = assert_eq_result!(1 + 1, 3);
        assert!(err.is_err());
    }
}
