//! Tests for transposition, cast-copies, and boundary-format conversions

use nuyale::{eqeq, from_csmat, to_csmat, YaleStorage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_matrix(rows: usize, cols: usize, density: f64, seed: u64) -> YaleStorage<f64, u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut m = YaleStorage::zeros(rows, cols);

    for r in 0..rows {
        for c in 0..cols {
            if rng.gen::<f64>() < density {
                m.set(r, c, rng.gen_range(-2.0..2.0)).unwrap();
            }
        }
    }
    m
}

#[test]
fn test_transpose_moves_entries() {
    let mut m = YaleStorage::<f64, u32>::zeros(3, 3);
    m.set(0, 0, 1.0).unwrap();
    m.set(1, 1, 2.0).unwrap();
    m.set(2, 2, 3.0).unwrap();
    m.set(0, 2, 7.0).unwrap();
    m.set(0, 1, 5.0).unwrap();

    let t = m.transpose();

    assert_eq!(t.get(1, 0), 5.0);
    assert_eq!(t.get(2, 0), 7.0);
    assert_eq!(t.get(0, 1), 0.0);
    assert_eq!(t.diagonal().to_vec(), vec![1.0, 2.0, 3.0]);
    assert_eq!(t.size(), m.size());
    assert_eq!(t.ndnz(), m.ndnz());
}

#[test]
fn test_transpose_involution() {
    for seed in 0..4 {
        let m = random_matrix(9, 9, 0.3, seed);
        let back = m.transpose().transpose();

        assert!(eqeq::<f64, f64, f64, u32>(&m, &back));
    }
}

#[test]
fn test_transpose_rectangular_shapes() {
    let m = random_matrix(4, 7, 0.4, 21);
    let t = m.transpose();

    assert_eq!(t.shape(), [7, 4]);
    for r in 0..4 {
        for c in 0..7 {
            assert_eq!(m.get(r, c), t.get(c, r), "cell ({}, {})", r, c);
        }
    }
    assert!(eqeq::<f64, f64, f64, u32>(&m, &t.transpose()));
}

#[test]
fn test_cast_copy_round_trip_widening() {
    let mut m = YaleStorage::<f32, u32>::zeros(4, 4);
    m.set(0, 0, 1.5).unwrap();
    m.set(1, 3, -2.25).unwrap();
    m.set(3, 0, 4.0).unwrap();

    let wide: YaleStorage<f64, u32> = m.cast_copy();
    let back: YaleStorage<f32, u32> = wide.cast_copy();

    assert_eq!(back, m);
    assert_eq!(wide.get(1, 3), -2.25);
}

#[test]
fn test_cast_copy_integer_round_trip() {
    let mut m = YaleStorage::<i32, u32>::zeros(3, 3);
    m.set(0, 1, 1000).unwrap();
    m.set(2, 2, -7).unwrap();

    let wide: YaleStorage<i64, u32> = m.cast_copy();
    let back: YaleStorage<i32, u32> = wide.cast_copy();

    assert_eq!(back, m);
}

#[test]
fn test_cast_copy_cross_type_equality() {
    let mut a = YaleStorage::<i32, u32>::zeros(3, 3);
    a.set(0, 0, 2).unwrap();
    a.set(1, 2, 5).unwrap();

    let b: YaleStorage<f64, u32> = a.cast_copy();

    assert!(eqeq::<f64, i32, f64, u32>(&a, &b));
}

#[test]
fn test_old_yale_import_scenarios() {
    // [[0, 5, 0], [0, 2, 0], [8, 0, 3]]
    let ia = [0u32, 1, 2, 4];
    let ja = [1u32, 1, 0, 2];
    let vals = [5.0f64, 2.0, 8.0, 3.0];

    let m = YaleStorage::<f64, u32>::from_old_yale(&[3, 3], &ia, &ja, &vals).unwrap();

    assert_eq!(m.diagonal().to_vec(), vec![0.0, 2.0, 3.0]);
    assert_eq!(m.ndnz(), 2);
    assert_eq!(m.get(0, 1), 5.0);
    assert_eq!(m.get(2, 0), 8.0);
}

#[test]
fn test_old_yale_round_trip_random() {
    for seed in 0..3 {
        let m = random_matrix(6, 6, 0.35, seed + 50);
        let (ia, ja, vals) = m.to_old_yale();

        let back = YaleStorage::<f64, u32>::from_old_yale(&[6, 6], &ia, &ja, &vals).unwrap();

        assert!(eqeq::<f64, f64, f64, u32>(&m, &back));
    }
}

#[test]
fn test_sprs_round_trip() {
    let m = random_matrix(8, 5, 0.3, 77);

    let cs = to_csmat(&m);
    let back: YaleStorage<f64, u32> = from_csmat(cs).unwrap();

    assert!(eqeq::<f64, f64, f64, u32>(&m, &back));
}

#[test]
fn test_multiply_agrees_with_sprs() {
    let a = random_matrix(7, 7, 0.3, 5);
    let b = random_matrix(7, 7, 0.3, 6);

    let ours = nuyale::matrix_multiply(&a, &b).unwrap();

    let sprs_product = &to_csmat(&a) * &to_csmat(&b);
    let theirs: YaleStorage<f64, u32> = from_csmat(sprs_product.to_owned()).unwrap();

    for r in 0..7 {
        for c in 0..7 {
            let diff = (ours.get(r, c) - theirs.get(r, c)).abs();
            assert!(diff < 1e-10, "cell ({}, {})", r, c);
        }
    }
}
