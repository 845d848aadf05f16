//! Factorial number system arithmetic.
//!
//! A zero-based index `i < n!` is written with `n` digits where the digit at position `p`
//! (counting from the most significant end, starting at 0) lies in `0..n - p`. Read as positions
//! into a shrinking pool of sorted symbols, these digits are the Lehmer code of the `i`-th
//! permutation in lexicographic order.

/// Largest number of symbols whose permutation count fits in a `u64` (`20! < 2^64 < 21!`).
pub const MAX_SYMBOLS: usize = 20;

/// Compute `n!`, or `None` if it overflows a `u64`.
pub fn factorial(n: usize) -> Option<u64> {
    (1..=n as u64).try_fold(1u64, |acc, i| acc.checked_mul(i))
}

/// Compute the table `[0!, 1!, ..., (n-1)!]`, or `None` if `(n-1)!` overflows.
pub fn factorial_table(n: usize) -> Option<Vec<u64>> {
    let mut table = Vec::with_capacity(n);
    let mut current = 1u64;
    for i in 0..n {
        if i > 0 {
            current = current.checked_mul(i as u64)?;
        }
        table.push(current);
    }
    Some(table)
}

/// Decompose the zero-based `index` into factorial-base digits, most significant first.
///
/// `table` must be the output of [`factorial_table`] for the number of digits wanted, and
/// `index` must be smaller than `table.len()!`, otherwise the leading digit is out of range.
pub fn lehmer_digits(index: u64, table: &[u64]) -> Vec<usize> {
    let mut remaining = index;
    table
        .iter()
        .rev()
        .map(|&place| {
            let digit = remaining / place;
            remaining %= place;
            digit as usize
        })
        .collect()
}

/// Inverse of [`lehmer_digits`].
pub fn lehmer_index(digits: &[usize], table: &[u64]) -> u64 {
    digits
        .iter()
        .zip(table.iter().rev())
        .map(|(&digit, &place)| digit as u64 * place)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), Some(1));
        assert_eq!(factorial(1), Some(1));
        assert_eq!(factorial(5), Some(120));
        assert_eq!(factorial(10), Some(3628800));
        assert_eq!(factorial(20), Some(2_432_902_008_176_640_000));
        assert_eq!(factorial(MAX_SYMBOLS + 1), None);
    }

    #[test]
    fn test_factorial_table() {
        assert_eq!(factorial_table(0), Some(vec![]));
        assert_eq!(factorial_table(4), Some(vec![1, 1, 2, 6]));
        assert_eq!(factorial_table(MAX_SYMBOLS + 1).map(|t| t.len()), Some(MAX_SYMBOLS + 1));
        assert_eq!(factorial_table(MAX_SYMBOLS + 2), None);
    }

    #[test]
    fn test_lehmer_digits() {
        let table = factorial_table(3).unwrap();
        // 2 1 0 selects the last symbol each time: the reversed permutation
        assert_eq!(lehmer_digits(5, &table), vec![2, 1, 0]);
        assert_eq!(lehmer_digits(3, &table), vec![1, 1, 0]);
        assert_eq!(lehmer_digits(0, &table), vec![0, 0, 0]);

        let table = factorial_table(10).unwrap();
        assert_eq!(
            lehmer_digits(999_999, &table),
            vec![2, 6, 6, 2, 5, 1, 2, 1, 1, 0]
        );
    }

    #[test]
    fn test_lehmer_index_inverts_digits() {
        let table = factorial_table(6).unwrap();
        for index in 0..720 {
            assert_eq!(lehmer_index(&lehmer_digits(index, &table), &table), index);
        }
    }
}
