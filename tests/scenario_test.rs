//! End-to-end programs exercising whole-interpreter behaviour.

mod common;
use common::*;

#[test]
fn test_factorial() {
    let mut r = Runner::new();
    r.enter("10 N=5");
    r.enter("20 F=1");
    r.enter("30 FOR I=1 TO N");
    r.enter("40 F=F*I");
    r.enter("50 NEXT I");
    r.enter("60 END");
    r.enter("RUN");
    r.enter("PRINT F;I");
    assert_eq!(r.output(), " 120  6 \n");
}

#[test]
fn test_nested_gosub() {
    let mut r = Runner::new();
    r.enter("10 A=0");
    r.enter("20 GOSUB 100");
    r.enter("30 END");
    r.enter("100 A=A+1");
    r.enter("110 GOSUB 200");
    r.enter("120 A=A+1");
    r.enter("130 RETURN");
    r.enter("200 A=A+10");
    r.enter("210 RETURN");
    r.enter("RUN");
    r.enter("PRINT A");
    assert_eq!(r.output(), " 12 \n");
}

#[test]
fn test_run_twice_is_deterministic() {
    let mut r = Runner::new();
    r.enter("10 T=0");
    r.enter("20 FOR I=1 TO 10");
    r.enter("30 T=T+I*I");
    r.enter("40 NEXT I");
    r.enter("50 PRINT T");
    r.enter("RUN");
    let first = r.output();
    r.enter("RUN");
    assert_eq!(first, r.output());
    assert_eq!(first, " 385 \n");
}

#[test]
fn test_fibonacci() {
    let mut r = Runner::new();
    r.enter("10 A=0: B=1");
    r.enter("20 FOR I=1 TO 10");
    r.enter("30 C=A+B: A=B: B=C");
    r.enter("40 NEXT I");
    r.enter("50 PRINT A");
    r.enter("RUN");
    assert_eq!(r.output(), " 55 \n");
}

#[test]
fn test_sieve_like_array_walk() {
    let mut r = Runner::new();
    r.enter("10 DIM F(30)");
    r.enter("20 FOR I=2 TO 30");
    r.enter("30 IF F(I) THEN 80");
    r.enter("40 PRINT I;");
    r.enter("50 FOR J=I TO 30 STEP I");
    r.enter("60 F(J)=1");
    r.enter("70 NEXT J");
    r.enter("80 NEXT I");
    r.enter("RUN");
    assert_eq!(r.output(), " 2  3  5  7  11  13  17  19  23  29 ");
}

#[test]
fn test_string_building_program() {
    let mut r = Runner::new();
    r.enter(r#"10 W$="STRESSED""#);
    r.enter(r#"20 R$="""#);
    r.enter("30 FOR I=1 TO LEN(W$)");
    r.enter("40 R$=MID$(W$,I,1)+R$");
    r.enter("50 NEXT I");
    r.enter("60 PRINT R$");
    r.enter("RUN");
    assert_eq!(r.output(), "DESSERTS\n");
}

#[test]
fn test_gosub_table_dispatch() {
    let mut r = Runner::new();
    r.enter("10 FOR K=1 TO 3");
    r.enter("20 ON K GOSUB 100,200,300");
    r.enter("30 NEXT K");
    r.enter("40 END");
    r.enter(r#"100 PRINT "FIRST";: RETURN"#);
    r.enter(r#"200 PRINT "-SECOND";: RETURN"#);
    r.enter(r#"300 PRINT "-THIRD": RETURN"#);
    r.enter("RUN");
    assert_eq!(r.output(), "FIRST-SECOND-THIRD\n");
}

#[test]
fn test_data_driven_table() {
    let mut r = Runner::new();
    r.enter("10 READ N");
    r.enter("20 T=0");
    r.enter("30 FOR I=1 TO N");
    r.enter("40 READ V");
    r.enter("50 T=T+V");
    r.enter("60 NEXT I");
    r.enter("70 PRINT T");
    r.enter("80 DATA 4");
    r.enter("90 DATA 10,20,30,40");
    r.enter("RUN");
    assert_eq!(r.output(), " 100 \n");
}

#[test]
fn test_user_function_in_loop() {
    let mut r = Runner::new();
    r.enter("10 DEF FN C(X)=INT(X*X+0.5)");
    r.enter("20 FOR I=1 TO 4");
    r.enter("30 PRINT FN C(I);");
    r.enter("40 NEXT I");
    r.enter("RUN");
    assert_eq!(r.output(), " 1  4  9  16 ");
}

#[test]
fn test_long_string_runs_exhaust_the_heap() {
    // no garbage collection: repeated assignment leaks until CLEAR
    let mut r = Runner::new();
    r.enter("10 FOR I=1 TO 3000");
    r.enter(r#"20 A$="XXXXXXXX""#);
    r.enter("30 NEXT I");
    r.enter("RUN");
    assert_eq!(r.output(), "\n?OUT OF MEMORY IN 20\n");
    r.enter("CLEAR");
    r.enter(r#"A$="OK":PRINT A$"#);
    assert_eq!(r.output(), "OK\n");
}
