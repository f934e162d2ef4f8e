mod common;
use common::*;

#[test]
fn test_dim_set_get() {
    let mut r = Runner::new();
    r.enter("DIM A(3,4)");
    r.enter("A(2,3)=7");
    r.enter("PRINT A(2,3);A(0,0)");
    assert_eq!(r.output(), " 7  0 \n");
}

#[test]
fn test_string_arrays() {
    let mut r = Runner::new();
    r.enter("DIM A$(5)");
    r.enter(r#"A$(2)="TWO""#);
    r.enter(r#"PRINT A$(2);A$(3);"!""#);
    assert_eq!(r.output(), "TWO!\n");
}

#[test]
fn test_bounds_are_inclusive() {
    let mut r = Runner::new();
    r.enter("DIM A(3)");
    r.enter("A(3)=1");
    assert_eq!(r.output(), "");
    r.enter("A(4)=1");
    assert_eq!(r.output(), "\n?BAD SUBSCRIPT\n");
    r.enter("A(-1)=1");
    assert_eq!(r.output(), "\n?BAD SUBSCRIPT\n");
}

#[test]
fn test_auto_dim_gives_eleven_elements() {
    let mut r = Runner::new();
    r.enter("B(10)=5");
    r.enter("PRINT B(10)");
    assert_eq!(r.output(), " 5 \n");
    r.enter("PRINT B(11)");
    assert_eq!(r.output(), "\n?BAD SUBSCRIPT\n");
}

#[test]
fn test_redim_is_an_error() {
    let mut r = Runner::new();
    r.enter("DIM A(5)");
    r.enter("DIM A(5)");
    assert_eq!(r.output(), "\n?REDIM'D ARRAY\n");
    // auto-dim freezes the shape too
    r.enter("B(0)=1");
    r.enter("DIM B(20)");
    assert_eq!(r.output(), "\n?REDIM'D ARRAY\n");
}

#[test]
fn test_subscript_count_must_match() {
    let mut r = Runner::new();
    r.enter("DIM A(3,3)");
    r.enter("PRINT A(1)");
    assert_eq!(r.output(), "\n?BAD SUBSCRIPT\n");
    r.enter("PRINT A(1,1,1)");
    assert_eq!(r.output(), "\n?BAD SUBSCRIPT\n");
}

#[test]
fn test_array_and_scalar_coexist() {
    let mut r = Runner::new();
    r.enter("A=1");
    r.enter("A(0)=2");
    r.enter("PRINT A;A(0)");
    assert_eq!(r.output(), " 1  2 \n");
}

#[test]
fn test_dim_subscript_limits() {
    let mut r = Runner::new();
    r.enter("DIM A(32767)");
    assert_eq!(r.output(), "");
    r.enter("DIM B(32768)");
    assert_eq!(r.output(), "\n?ILLEGAL QUANTITY\n");
}

#[test]
fn test_clear_unfreezes_dimensions() {
    let mut r = Runner::new();
    r.enter("DIM A(2)");
    r.enter("CLEAR");
    r.enter("DIM A(7)");
    r.enter("A(7)=1");
    r.enter("PRINT A(7)");
    assert_eq!(r.output(), " 1 \n");
}

#[test]
fn test_row_major_independence() {
    let mut r = Runner::new();
    r.enter("5 DIM M(2,2)");
    r.enter("10 FOR I=0 TO 2");
    r.enter("20 FOR J=0 TO 2");
    r.enter("30 M(I,J)=I*10+J");
    r.enter("40 NEXT J");
    r.enter("50 NEXT I");
    r.enter("60 PRINT M(0,2);M(1,1);M(2,0)");
    r.enter("RUN");
    assert_eq!(r.output(), " 2  11  20 \n");
}
