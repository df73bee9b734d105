//! Polynomial interpolation
use num_traits::Float;

/// Evaluates, at offset zero, the unique polynomial of degree n-1
/// passing through the n nodes `(x[i], y[i])`, using Neville's algorithm.
///
/// The nodes do not need to be sorted nor evenly spaced, but they must be distinct:
/// two identical offsets lead to a division by zero.
/// Typical use case is `x[i] = t_i - t`, where `t` is the desired instant.
///
/// Returns None when no node is provided or when both slices differ in size.
pub fn neville<T: Float>(x: &[T], y: &[T]) -> Option<T> {
    let n = x.len();
    if n == 0 || n != y.len() {
        return None;
    }

    let mut p = y.to_vec();

    for j in 1..n {
        for i in 0..n - j {
            p[i] = (x[i + j] * p[i] - x[i] * p[i + 1]) / (x[i + j] - x[i]);
        }
    }

    Some(p[0])
}

#[cfg(test)]
mod test {
    use super::neville;
    use rstest::*;

    fn cubic(t: f64) -> f64 {
        1.5 - 0.25 * t + 3.0E-3 * t.powi(2) - 1.0E-5 * t.powi(3)
    }

    #[test]
    fn invalid_input() {
        assert!(neville::<f64>(&[], &[]).is_none());
        assert!(neville(&[0.0, 1.0], &[1.0]).is_none());
    }

    #[test]
    fn single_node() {
        assert_eq!(neville(&[12.0], &[-3.0]), Some(-3.0));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    fn polynomial_nodes(#[case] node: usize) {
        let t = [-30.0, -12.0, 0.5, 17.0, 45.0];
        let x = t.iter().map(|t_i| t_i - t[node]).collect::<Vec<_>>();
        let y = t.iter().map(|t_i| cubic(*t_i)).collect::<Vec<_>>();

        let value = neville(&x, &y).unwrap();
        assert!(
            (value - cubic(t[node])).abs() < 1.0E-9,
            "node #{} not reproduced: {} expected {}",
            node,
            value,
            cubic(t[node])
        );
    }

    #[test]
    fn polynomial_between_nodes() {
        let t = [-900.0, -600.0, -300.0, 0.0, 300.0, 600.0];
        let t_query = 123.0;
        let x = t.iter().map(|t_i| t_i - t_query).collect::<Vec<_>>();
        let y = t.iter().map(|t_i| cubic(*t_i)).collect::<Vec<_>>();

        let value = neville(&x, &y).unwrap();
        assert!((value - cubic(t_query)).abs() < 1.0E-6);
    }

    #[test]
    fn ramp() {
        // y = 10 + 2x, evaluated at x=0
        let x = [-2.0_f64, -1.0, 1.0, 3.0];
        let y = x.iter().map(|x_i| 10.0 + 2.0 * x_i).collect::<Vec<_>>();
        let value = neville(&x, &y).unwrap();
        assert!((value - 10.0_f64).abs() < 1.0E-12);
    }

    #[test]
    fn unsorted_nodes() {
        let x = [3.0_f32, -1.0, 2.0];
        let y = x.iter().map(|x_i| 1.0 + x_i * x_i).collect::<Vec<_>>();
        let value = neville(&x, &y).unwrap();
        assert!((value - 1.0).abs() < 1.0E-5);
    }
}
