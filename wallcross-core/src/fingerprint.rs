use num_bigint::BigInt;
use std::fmt;

/// Positionless rendering of a wall normal: negate every entry, sort
/// non-increasing.
///
/// Distinct directions may share a fingerprint; it is a matching key, not a
/// geometric invariant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint(Vec<BigInt>);

impl Fingerprint {
    pub fn of(normal: &[BigInt]) -> Self {
        let mut entries: Vec<BigInt> = normal.iter().map(|x| -x).collect();
        entries.sort_by(|a, b| b.cmp(a));
        Self(entries)
    }

    pub fn entries(&self) -> &[BigInt] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|x| x.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Render fingerprints as a list, e.g. `[[5, 3, 2, 1, -1, -4, -6]]`.
pub fn render_fingerprints<'a, I>(fingerprints: I) -> String
where
    I: IntoIterator<Item = &'a Fingerprint>,
{
    let parts: Vec<String> = fingerprints.into_iter().map(|fp| fp.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(v: &[i64]) -> Vec<BigInt> {
        v.iter().map(|&a| BigInt::from(a)).collect()
    }

    #[test]
    fn negates_then_sorts_descending() {
        let fp = Fingerprint::of(&ints(&[6, 4, 1, -1, -2, -3, -5]));
        assert_eq!(fp.entries(), ints(&[5, 3, 2, 1, -1, -4, -6]).as_slice());
        assert_eq!(fp.to_string(), "[5, 3, 2, 1, -1, -4, -6]");
    }

    #[test]
    fn forgets_coordinate_positions() {
        let a = Fingerprint::of(&ints(&[2, 2, 2, 0, -1, -1, -4]));
        let b = Fingerprint::of(&ints(&[0, 2, -4, -1, -1, 2, 2]));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "[4, 1, 1, 0, -2, -2, -2]");
    }

    #[test]
    fn renders_lists() {
        let fps = [
            Fingerprint::of(&ints(&[6, 4, 1, -1, -2, -3, -5])),
            Fingerprint::of(&ints(&[1, -1])),
        ];
        assert_eq!(
            render_fingerprints(&fps),
            "[[5, 3, 2, 1, -1, -4, -6], [1, -1]]"
        );
        assert_eq!(render_fingerprints(&[]), "[]");
    }
}
