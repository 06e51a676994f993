//! Integration tests for the readers.

use num_bigint::BigInt;
use polyread::prelude::*;
use polyread::{read_basic_map, read_basic_set, read_map, read_set, read_vector};
use std::collections::BTreeSet;

fn ints(values: &[i64]) -> Vec<BigInt> {
    values.iter().map(|&v| BigInt::from(v)).collect()
}

fn kind_of<T: std::fmt::Debug>(result: PolyResult<T>) -> ParseErrorKind {
    result.unwrap_err().parse_kind().expect("expected a parse error")
}

/// Every constraint and div row has the length the dimensions call for.
fn assert_uniform_rows(bmap: &BasicMap) {
    let total = bmap.total_dim();
    assert_eq!(bmap.row_len(), 1 + total);
    for row in bmap.equalities().iter().chain(bmap.inequalities()) {
        assert_eq!(row.len(), 1 + total);
    }
    assert_eq!(bmap.divs().len(), bmap.n_div());
    for div in bmap.divs() {
        assert_eq!(div.len(), 2 + total);
        assert!(div.iter().all(|c| *c == BigInt::from(0)));
    }
}

fn row_set(bmap: &BasicMap) -> BTreeSet<Constraint> {
    bmap.constraints().into_iter().collect()
}

// ============================================================
// Set/map notation
// ============================================================

#[test]
fn test_quadrant() {
    let bset = read_basic_set("{[i,j] : i >= 0 and j >= 0}", Some(0)).expect("Failed to read");
    assert_eq!(bset.n_param(), 0);
    assert_eq!(bset.dim(), 2);
    assert_eq!(bset.n_div(), 0);
    assert_eq!(bset.n_eq(), 0);
    assert_eq!(bset.inequalities(), &[ints(&[0, 1, 0]), ints(&[0, 0, 1])]);
    assert_uniform_rows(&bset);
}

#[test]
fn test_parametric_map_with_existential() {
    let bmap = read_basic_map("[n] -> {[i] -> [j] : exists k : j = 2k and i <= n}", None)
        .expect("Failed to read");
    assert_eq!(bmap.n_param(), 1);
    assert_eq!(bmap.n_in(), 1);
    assert_eq!(bmap.n_out(), 1);
    assert_eq!(bmap.n_div(), 1);
    assert_eq!(bmap.row_len(), 5);
    assert_eq!(bmap.equalities(), &[ints(&[0, 0, 0, 1, -2])]);
    assert_eq!(bmap.inequalities(), &[ints(&[0, 1, -1, 0, 0])]);
    assert_uniform_rows(&bmap);
    assert!(bmap.is_finalized());
}

#[test]
fn test_existential_introduced_after_rows() {
    // the first row is written before `k` exists and must be widened
    let bmap = read_basic_map("{[i] : i >= 0 and exists k : i = 3k + 1}", None).expect("Failed to read");
    assert_eq!(bmap.n_div(), 1);
    assert_eq!(bmap.inequalities(), &[ints(&[0, 1, 0])]);
    assert_eq!(bmap.equalities(), &[ints(&[-1, 1, -3])]);
    assert_uniform_rows(&bmap);
}

#[test]
fn test_existentials_accumulate() {
    let bmap = read_basic_map(
        "{[i] : exists a : i = 2a and exists (b : i = 3b) and exists c, d : c + d = i}",
        None,
    )
    .expect("Failed to read");
    assert_eq!(bmap.n_div(), 4);
    assert_eq!(bmap.n_eq(), 3);
    assert_uniform_rows(&bmap);
}

#[test]
fn test_existential_name_stays_visible() {
    let bmap = read_basic_map("{[i] : exists (k : i = 2k) and k >= 1}", None).expect("Failed to read");
    assert_eq!(bmap.inequalities(), &[ints(&[-1, 0, 1])]);
}

#[test]
fn test_comments_and_layout() {
    let source = "# a triangle\n[n] -> {\n  [i, j] :   # indices\n  0 <= i and i <= j and j <= n\n}\n";
    let bset = read_basic_set(source, Some(1)).expect("Failed to read");
    assert_eq!(bset.n_ineq(), 3);
}

#[test]
fn test_duplicate_names_rejected() {
    assert_eq!(kind_of(read_map("{[i, j, i]}", None)), ParseErrorKind::DuplicateIdentifier);
    assert_eq!(kind_of(read_map("[n] -> {[n]}", None)), ParseErrorKind::DuplicateIdentifier);
}

#[test]
fn test_unknown_name_rejected() {
    let err = read_map("{[i] : i <= m}", None).unwrap_err();
    assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnknownIdentifier));
    let Some(span) = err.span() else { panic!("error without span") };
    assert_eq!((span.start.line, span.start.column), (1, 13));
}

#[test]
fn test_subtraction_needs_negative_literal() {
    // only `-` directly before a digit is understood
    assert!(read_map("[n] -> {[i] : i <= n -1}", None).is_ok());
    assert!(read_map("[n] -> {[i] : i <= n - 1}", None).is_err());
}

#[test]
fn test_operator_errors() {
    assert_eq!(kind_of(read_map("{[i] : i}", None)), ParseErrorKind::MissingOperator);
    assert_eq!(kind_of(read_map("{[i] : i >= 0 = 1}", None)), ParseErrorKind::TooManyOperators);
    assert_eq!(kind_of(read_map("{[i] : i = 0 = 1}", None)), ParseErrorKind::TooManyOperators);
}

#[test]
fn test_parameter_count_checks() {
    assert!(read_map("[n] -> {[i]}", Some(1)).is_ok());
    assert_eq!(kind_of(read_map("[n] -> {[i]}", Some(2))), ParseErrorKind::ParameterMismatch);
    assert_eq!(kind_of(read_map("{[i]}", Some(3))), ParseErrorKind::ParameterMismatch);
}

#[test]
fn test_set_readers_reject_maps() {
    assert_eq!(kind_of(read_set("{[i] -> [j]}", None)), ParseErrorKind::NotASet);
    assert_eq!(kind_of(read_basic_set("{[i] -> [j]}", None)), ParseErrorKind::NotASet);
}

#[test]
fn test_infeasible_system() {
    let map = read_map("{[i] : i >= 1 and 0 >= 1}", None).expect("Failed to read");
    assert!(map.is_empty());

    let bmap = read_basic_map("{[i] : 2i = 1}", None).expect("Failed to read");
    assert!(bmap.is_empty());
    assert_eq!(bmap.equalities(), &[ints(&[1, 0])]);
    assert!(bmap.inequalities().is_empty());
}

#[test]
fn test_unsimplified_rows_kept() {
    let ctx = Context::new(ReadConfig::default().with_simplify(false));
    let bmap = ctx
        .read_basic_map_from_str("{[i] : 2i >= 2 and 2i >= 2}", None)
        .expect("Failed to read");
    assert_eq!(bmap.inequalities(), &[ints(&[-2, 2]), ints(&[-2, 2])]);

    let bmap = read_basic_map("{[i] : 2i >= 2 and 2i >= 2}", None).expect("Failed to read");
    assert_eq!(bmap.inequalities(), &[ints(&[-1, 1])]);
}

// ============================================================
// Printing
// ============================================================

#[test]
fn test_display() {
    let bmap = read_basic_map("[n] -> {[i] -> [j] : exists k : j = 2k and i <= n}", None)
        .expect("Failed to read");
    assert_eq!(bmap.to_string(), "[n] -> { [i] -> [j] : exists (e0 : j = 2e0 and n >= i) }");
}

#[test]
fn test_round_trip() {
    let sources = [
        "{[i,j] : i >= 0 and j >= 0}",
        "[n] -> {[i] -> [j] : exists k : j = 2k and i <= n}",
        "[n, m] -> {[i, j] : 0 <= i and i <= -1 + n and -3 + j >= m}",
        "{[a] -> [b, c] : b = a + 1 and c = -2a + -7}",
        "{ [x] }",
    ];
    for source in sources {
        let first = read_basic_map(source, None)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", source, e));
        let printed = first.to_string();
        let second = read_basic_map(&printed, None)
            .unwrap_or_else(|e| panic!("Failed to reread {}: {}", printed, e));
        assert_eq!(first.space().total_dim(), second.space().total_dim(), "{}", printed);
        assert_eq!(first.n_param(), second.n_param());
        assert_eq!(first.n_in(), second.n_in());
        assert_eq!(first.n_div(), second.n_div());
        assert_eq!(row_set(&first), row_set(&second), "{}", printed);
    }
}

#[test]
fn test_map_round_trip() {
    // infeasible, so the union has no disjuncts
    let empty = read_map("[n] -> {[i, j] : i >= 1 and 0 >= 1}", None).expect("Failed to read");
    assert_eq!(empty.to_string(), "[n] -> { [i, j] : 1 = 0 }");
    let again = read_map(&empty.to_string(), None).expect("Failed to reread");
    assert!(again.is_empty());
    assert!(again.space().is_compatible(empty.space()));

    let single = read_map("1 3\n1 1 -2\n", None).expect("Failed to read");
    let again = read_map(&single.to_string(), None).expect("Failed to reread");
    assert_eq!(again.n(), 1);
    assert_eq!(row_set(&again.basic_maps()[0]), row_set(&single.basic_maps()[0]));
}

#[test]
fn test_union_display_is_not_reread() {
    let union = read_map("2\n1 3\n1 1 0\n1 3\n1 -1 5\n", None).expect("Failed to read");
    let printed = union.to_string();
    assert_eq!(printed, "{ [o0] : o0 >= 0; [o0] : 5 >= o0 }");
    assert_eq!(kind_of(read_map(&printed, None)), ParseErrorKind::UnexpectedToken);
}

// ============================================================
// PolyLib matrices
// ============================================================

#[test]
fn test_polylib_single_matrix() {
    let bmap = read_basic_map("1 4\n1 1 0 5\n", Some(0)).expect("Failed to read");
    // 4 columns: type flag, 2 dimensions, constant
    assert_eq!(bmap.n_out(), 2);
    assert_eq!(bmap.n_in(), 0);
    assert_eq!(bmap.n_param(), 0);
    assert_eq!(bmap.inequalities(), &[ints(&[5, 1, 0])]);
    assert_uniform_rows(&bmap);
}

#[test]
fn test_polylib_with_parameters() {
    // i >= 0, N - i - 1 >= 0 over one dimension and one parameter
    let source = "2 4\n1  1  0  0\n1 -1  1 -1\n";
    let bset = read_basic_set(source, Some(1)).expect("Failed to read");
    assert_eq!(bset.dim(), 1);
    assert_eq!(bset.n_param(), 1);
    assert_eq!(bset.inequalities(), &[ints(&[0, 0, 1]), ints(&[-1, 1, -1])]);
}

#[test]
fn test_polylib_union() {
    let source = "2\n\n1 3\n1 1 0\n\n1 3\n0 1 -4\n";
    let set = read_set(source, None).expect("Failed to read");
    assert_eq!(set.n(), 2);
    assert_eq!(set.dim(), 1);
    assert_eq!(kind_of(read_basic_map(source, None)), ParseErrorKind::MultipleDisjuncts);
}

#[test]
fn test_polylib_errors() {
    assert_eq!(kind_of(read_map("1 3\n3 1 0\n", None)), ParseErrorKind::InvalidTypeFlag);
    assert_eq!(kind_of(read_map("2 3\n1 1 0 1 1 0\n", None)), ParseErrorKind::MisalignedCoefficient);
    assert_eq!(kind_of(read_map("1 3\n1 1\n", None)), ParseErrorKind::ExpectedToken);
    assert_eq!(kind_of(read_map("1 1\n1\n", None)), ParseErrorKind::InvalidCount);
    assert!(read_map("1000000000000000000 3\n1 1 0\n", None).is_err());
    assert!(read_map("1 1000000000000000000\n1 1 0\n", None).is_err());
}

// ============================================================
// Vectors
// ============================================================

#[test]
fn test_vector() {
    let vec = read_vector("3\n1 2 3\n", InputFormat::PolyLib).expect("Failed to read");
    assert_eq!(vec.elements(), ints(&[1, 2, 3]).as_slice());
    assert_eq!(vec.to_string(), "3\n1 2 3");
}

#[test]
fn test_vector_shortfall() {
    assert_eq!(kind_of(read_vector("5\n1 2 3\n", InputFormat::PolyLib)), ParseErrorKind::InvalidCount);
    assert_eq!(
        kind_of(read_vector("1000000000000000000\n1 2\n", InputFormat::PolyLib)),
        ParseErrorKind::InvalidCount
    );
    assert_eq!(kind_of(read_vector("3\n1 2 3\n", InputFormat::Isl)), ParseErrorKind::UnsupportedFormat);
}

// ============================================================
// Serialization and IO
// ============================================================

#[test]
fn test_json_output() {
    let bmap = read_basic_map("{[i] : i >= 0}", None).expect("Failed to read");
    let json = serde_json::to_value(&bmap).expect("Failed to serialize");
    assert_eq!(json["n_div"], 0);
    assert_eq!(json["space"]["n_out"], 1);
    assert_eq!(json["flags"]["finalized"], true);
}

#[test]
fn test_read_from_reader() {
    let ctx = Context::default();
    let input = std::io::Cursor::new(b"[n] -> { [i] : 0 <= i <= n }".to_vec());
    let err = ctx.read_map_from_file(input, None).unwrap_err();
    assert_eq!(err.parse_kind(), Some(ParseErrorKind::TooManyOperators));

    let input = std::io::Cursor::new(b"[n] -> { [i] : 0 <= i and i <= n }".to_vec());
    let set = ctx.read_set_from_file(input, Some(1)).expect("Failed to read");
    assert_eq!(set.n(), 1);
}
