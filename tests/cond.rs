use descargo::{eval_condition, value, Value};

fn ctx() -> Value {
    value! {
        TIPO: "semaforo",
        PLAZO: 3,
        MONTO: 3.0,
        NRO: "3",
        FIRMA: "  No ",
        VACIO: "",
        NULO: None,
        LISTA: [],
        MAPA: {},
        PATENTE_LEGIBLE: false,
        cliente: { NOMBRE: "juan", DNI: 30111222, MENOR: "none" },
    }
}

#[test]
fn cond_truthy_values() {
    let ctx = ctx();
    assert!(eval_condition("TIPO", &ctx));
    assert!(eval_condition("PLAZO", &ctx));
    assert!(eval_condition("MONTO", &ctx));
    assert!(eval_condition("LISTA", &ctx));
    assert!(eval_condition("MAPA", &ctx));
    assert!(eval_condition("cliente", &ctx));
    assert!(eval_condition("cliente.NOMBRE", &ctx));
}

#[test]
fn cond_falsy_values() {
    let ctx = ctx();
    assert!(!eval_condition("FIRMA", &ctx));
    assert!(!eval_condition("VACIO", &ctx));
    assert!(!eval_condition("NULO", &ctx));
    assert!(!eval_condition("PATENTE_LEGIBLE", &ctx));
    assert!(!eval_condition("cliente.MENOR", &ctx));
    assert!(!eval_condition("MISSING", &ctx));
    assert!(!eval_condition("cliente.NOMBRE.x", &ctx));
}

#[test]
fn cond_falsy_strings() {
    for s in ["false", "FALSE", "No", "0", "", "  ", "null", "None", " none "] {
        let ctx = value! { x: s };
        assert!(!eval_condition("x", &ctx), "{s:?} should be falsy");
    }
    for s in ["si", "yes", "1", "00", "falso", "0.0"] {
        let ctx = value! { x: s };
        assert!(eval_condition("x", &ctx), "{s:?} should be truthy");
    }
}

#[test]
fn cond_falsy_numbers() {
    assert!(!eval_condition("x", &value! { x: 0 }));
    assert!(!eval_condition("x", &value! { x: 0.0 }));
    assert!(eval_condition("x", &value! { x: -1 }));
    assert!(eval_condition("x", &value! { x: 0.5 }));
}

#[test]
fn cond_negation() {
    let ctx = ctx();
    assert!(eval_condition("!PATENTE_LEGIBLE", &ctx));
    assert!(eval_condition("!MISSING", &ctx));
    assert!(eval_condition("! FIRMA", &ctx));
    assert!(!eval_condition("!TIPO", &ctx));
    assert!(!eval_condition("!cliente.DNI", &ctx));
}

#[test]
fn cond_equal_strings() {
    let ctx = ctx();
    assert!(eval_condition("TIPO == 'semaforo'", &ctx));
    assert!(eval_condition("TIPO == \"semaforo\"", &ctx));
    assert!(eval_condition("TIPO==semaforo", &ctx));
    assert!(!eval_condition("TIPO == 'Semaforo'", &ctx));
    assert!(eval_condition("TIPO != 'velocidad'", &ctx));
    assert!(eval_condition("cliente.NOMBRE == 'juan'", &ctx));
}

#[test]
fn cond_string_never_equals_number() {
    let ctx = ctx();
    assert!(!eval_condition("NRO == 3", &ctx));
    assert!(eval_condition("NRO == '3'", &ctx));
    assert!(!eval_condition("PLAZO == '3'", &ctx));
    assert!(eval_condition("PLAZO != '3'", &ctx));
}

#[test]
fn cond_numbers_compare_numerically() {
    let ctx = ctx();
    assert!(eval_condition("PLAZO == 3", &ctx));
    assert!(eval_condition("PLAZO == 3.0", &ctx));
    assert!(eval_condition("MONTO == 3", &ctx));
    assert!(eval_condition("cliente.DNI == 30111222", &ctx));
    assert!(!eval_condition("PLAZO != 3", &ctx));
}

#[test]
fn cond_large_integers_compare_exactly() {
    let ctx = value! { i: 9_007_199_254_740_993_i64 };
    assert!(!eval_condition("i == 9007199254740992.0", &ctx));
    assert!(eval_condition("i != 9007199254740992.0", &ctx));
    assert!(eval_condition("i == 9007199254740993", &ctx));

    let out = descargo::render("[[IF i == 9007199254740992.0]]EQ[[ELSE]]NE[[/IF]]", &ctx, true).unwrap();
    assert_eq!(out, "NE");
}

#[test]
fn cond_booleans() {
    let ctx = ctx();
    assert!(eval_condition("PATENTE_LEGIBLE == false", &ctx));
    assert!(eval_condition("PATENTE_LEGIBLE == FALSE", &ctx));
    assert!(!eval_condition("PATENTE_LEGIBLE == 'false'", &ctx));
    assert!(!eval_condition("PATENTE_LEGIBLE == 0", &ctx));
}

#[test]
fn cond_null_and_missing() {
    let ctx = ctx();
    assert!(eval_condition("NULO == null", &ctx));
    assert!(eval_condition("MISSING == none", &ctx));
    assert!(eval_condition("MISSING != 'x'", &ctx));
    assert!(!eval_condition("MISSING == ''", &ctx));
    assert!(eval_condition("TIPO != null", &ctx));
}

#[test]
fn cond_malformed_is_false() {
    let ctx = ctx();
    assert!(!eval_condition("", &ctx));
    assert!(!eval_condition("TIPO ==", &ctx));
    assert!(!eval_condition("TIPO semaforo", &ctx));
    assert!(!eval_condition("== 'semaforo'", &ctx));
    assert!(!eval_condition("TIPO > 1", &ctx));
}

#[test]
fn cond_in_template() {
    let ctx = value! { cliente: { MENOR: "no" } };
    let out = descargo::render("[[IF !cliente.MENOR]]mayor[[/IF]]", &ctx, true).unwrap();
    assert_eq!(out, "mayor");
}
