//! The `vector!` construction macro.

/// Build a [`Vector`](crate::Vector) from a list of values or a repeated value.
///
/// ```
/// use vessel_vec::vector;
///
/// let listed = vector![1, 2, 3];
/// assert_eq!(listed.capacity(), 3);
///
/// let repeated = vector!["x"; 2];
/// assert_eq!(repeated, ["x", "x"]);
///
/// let empty: vessel_vec::Vector<u8> = vector![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! vector {
    () => {
        $crate::Vector::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::Vector::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::Vector::from([$($x),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::Vector;

    #[test]
    fn list_form_is_tight() {
        let v = vector![1, 2, 3, 4];
        assert_eq!(v, [1, 2, 3, 4]);
        assert_eq!(v.capacity(), 4);
    }

    #[test]
    fn repeat_form_clones() {
        let v = vector![String::from("ab"); 3];
        assert_eq!(v.len(), 3);
        assert!(v.iter().all(|s| s == "ab"));
    }

    #[test]
    fn trailing_comma_accepted() {
        let v: Vector<char> = vector!['a', 'b',];
        assert_eq!(v.len(), 2);
    }
}
