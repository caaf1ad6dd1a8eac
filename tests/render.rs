use std::error::Error as _;
use std::io;

use descargo::{render, substitute, value, Engine, ErrorKind, Value};

#[test]
fn render_if_true() {
    let ctx = value! { x: true, name: "ana" };
    let result = render("[[IF x]]YES[[ELSE]]NO[[/IF]] - {{name|upper}}", &ctx, false).unwrap();
    assert_eq!(result, "YES - ANA");
}

#[test]
fn render_if_false() {
    let ctx = value! { x: false, name: "ana" };
    let result = render("[[IF x]]YES[[ELSE]]NO[[/IF]] - {{name|upper}}", &ctx, false).unwrap();
    assert_eq!(result, "NO - ANA");
}

#[test]
fn render_missing_placeholder() {
    let result = render("{{missing}}", &value! {}, false).unwrap();
    assert_eq!(result, "");
}

#[test]
fn render_collapses_blank_lines() {
    let result = render("lorem\n\n\n\nipsum", &value! {}, false).unwrap();
    assert_eq!(result, "lorem\n\nipsum");
}

#[test]
fn render_path_through_non_map() {
    let ctx = value! { a: { b: "text" } };
    let result = render("[{{a.b.c}}]", &ctx, false).unwrap();
    assert_eq!(result, "[]");
}

#[test]
fn render_if_without_else_not_taken() {
    let result = render("lorem [[IF x]]ipsum[[/IF]]dolor", &value! {}, false).unwrap();
    assert_eq!(result, "lorem dolor");
}

#[test]
fn render_elif_chain_takes_first_true() {
    let ctx = value! { a: false, b: true, c: true };
    let result = render(
        "[[IF a]]A[[ELIF b]]B[[ELIF c]]C[[ELSE]]E[[/IF]]",
        &ctx,
        false,
    )
    .unwrap();
    assert_eq!(result, "B");
}

#[test]
fn render_elif_chain_emits_exactly_one_clause() {
    for n in 0..5 {
        let mut source = String::from("[[IF c0]]b0");
        for i in 1..=n {
            source.push_str(&format!("[[ELIF c{i}]]b{i}"));
        }
        source.push_str("[[ELSE]]else[[/IF]]");

        // no condition true
        let result = render(&source, &value! {}, false).unwrap();
        assert_eq!(result, "else");

        // every suffix of conditions true, the first one wins
        for first in 0..=n {
            let ctx: Value = (first..=n).map(|i| (format!("c{i}"), true)).collect();
            let result = render(&source, &ctx, false).unwrap();
            assert_eq!(result, format!("b{first}"), "source: {source}");
        }
    }
}

#[test]
fn render_else_reached_before_later_elif() {
    let ctx = value! { a: false, b: true };
    let result = render("[[IF a]]A[[ELSE]]E[[ELIF b]]B[[/IF]]", &ctx, false).unwrap();
    assert_eq!(result, "E");
}

#[test]
fn render_second_else_unreachable() {
    let result = render("[[IF a]]A[[ELSE]]E1[[ELSE]]E2[[/IF]]", &value! {}, false).unwrap();
    assert_eq!(result, "E1");
}

#[test]
fn render_nested_depth_five() {
    let source = "\
[[IF l1]]1[[IF l2]]2[[IF l3]]3[[IF l4]]4[[IF l5]]5\
[[ELSE]]E5[[/IF]]\
[[ELSE]]E4[[/IF]]\
[[ELSE]]E3[[/IF]]\
[[ELSE]]E2[[/IF]]\
[[ELSE]]E1[[/IF]]";

    for bits in 0..32u32 {
        let levels: Vec<bool> = (0..5).map(|i| bits & (1 << i) != 0).collect();
        let ctx: Value = levels
            .iter()
            .enumerate()
            .map(|(i, on)| (format!("l{}", i + 1), *on))
            .collect();

        let mut expected = String::new();
        for (i, on) in levels.iter().enumerate() {
            if *on {
                expected.push_str(&(i + 1).to_string());
            } else {
                expected.push_str(&format!("E{}", i + 1));
                break;
            }
        }

        let result = render(source, &ctx, true).unwrap();
        assert_eq!(result, expected, "levels: {levels:?}");
    }
}

#[test]
fn render_outer_true_inner_else() {
    let ctx = value! { outer: true, inner: false };
    let result = render(
        "[[IF outer]]<[[IF inner]]in[[ELSE]]not in[[/IF]]>[[ELSE]]out[[/IF]]",
        &ctx,
        false,
    )
    .unwrap();
    assert_eq!(result, "<not in>");
}

#[test]
fn render_deeply_nested() {
    let depth = 500;
    let source = format!(
        "{}x{{{{ v }}}}{}",
        "[[IF a]]".repeat(depth),
        "[[/IF]]".repeat(depth)
    );
    let result = render(&source, &value! { a: true, v: 1 }, true).unwrap();
    assert_eq!(result, "x1");
}

#[test]
fn render_unclosed_if_keeps_collected_content() {
    let result = render("a[[IF x]]b[[ELSE]]c", &value! { x: true }, false).unwrap();
    assert_eq!(result, "ab");
    let result = render("a[[IF x]]b[[ELSE]]c", &value! { x: false }, false).unwrap();
    assert_eq!(result, "ac");
}

#[test]
fn render_untaken_branch_is_not_substituted() {
    let result = render("[[IF no]]{{ x }}[[/IF]]done", &value! {}, true).unwrap();
    assert_eq!(result, "done");
}

#[test]
fn render_value_is_not_reparsed() {
    let ctx = value! { v: "[[IF x]]y[[/IF]] {{ w }}", x: true, w: "no" };
    let result = render("{{ v }}", &ctx, false).unwrap();
    assert_eq!(result, "[[IF x]]y[[/IF]] {{ w }}");
}

#[test]
fn render_text_without_tags_is_substitution() {
    let ctx = value! { cliente: { NOMBRE: "juan layan", DNI: 30111222 } };
    let sources = [
        "",
        "lorem ipsum",
        "Sr. {{ cliente.NOMBRE | upper }}, DNI {{cliente.DNI}}",
        "{{ missing }} [not a tag] {{ cliente.NOMBRE|title }}",
    ];
    for source in sources {
        let result = render(source, &ctx, false).unwrap();
        assert_eq!(result, substitute(source, &ctx));
    }
}

#[test]
fn render_strict_output_is_stable() {
    let ctx = value! {
        cliente: { NOMBRE: "juan layan" },
        TIPO: "luces",
        AGENTE_IDENTIFICADO: false,
    };
    let source = "\
Sr. {{ cliente.NOMBRE | title }}   \n\
\n\
\n\
\n\
[[IF TIPO == 'semaforo']]Semaforo.[[ELIF TIPO == 'luces']]Luces.[[/IF]]\n\
[[IF !AGENTE_IDENTIFICADO]]El agente no fue identificado.[[/IF]]";

    let once = render(source, &ctx, true).unwrap();
    assert_eq!(
        once,
        "Sr. Juan Layan\n\nLuces.\nEl agente no fue identificado."
    );
    let twice = render(&once, &value! {}, true).unwrap();
    assert_eq!(twice, once);
}

#[test]
fn render_whitespace_around_tags_is_preserved() {
    let result = render("a\n[[IF x]]\nb\n[[/IF]]\nc", &value! { x: 1 }, false).unwrap();
    assert_eq!(result, "a\n\nb\n\nc");
}

#[test]
fn render_err_parse_error() {
    let err = render("lorem [[ELSE]]", &value! {}, false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn render_engine_compile_once_render_many() {
    let engine = Engine::new();
    let template = engine.compile("[[IF ok]]si[[ELSE]]no[[/IF]]").unwrap();
    assert_eq!(template.render(&value! { ok: "yes" }).unwrap(), "si");
    assert_eq!(template.render(&value! { ok: "no" }).unwrap(), "no");
}

#[test]
fn render_resolve_conditionals_only() {
    let engine = Engine::new();
    let template = engine
        .compile("{{ a }}  \n\n\n[[IF x]]{{ b | upper }}[[/IF]]")
        .unwrap();
    let result = template.resolve_conditionals(&value! { x: true });
    assert_eq!(result, "{{ a }}  \n\n\n{{ b | upper }}");
}

#[test]
fn render_to_writer() {
    let engine = Engine::new();
    let template = engine.compile("Acta {{ NRO_ACTA }}").unwrap();
    let mut buf = Vec::new();
    template
        .render_to_writer(&mut buf, &value! { NRO_ACTA: 123 })
        .unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "Acta 123");
}

#[test]
fn render_to_writer_writes_nothing_on_error() {
    let mut engine = Engine::new();
    engine.set_strict(true);
    let template = engine.compile("{{ v }}").unwrap();
    let mut buf = Vec::new();
    template
        .render_to_writer(&mut buf, &value! { v: "{{ v }}" })
        .unwrap_err();
    assert!(buf.is_empty());
}

struct BrokenWriter;

impl io::Write for BrokenWriter {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn render_to_writer_io_error() {
    let engine = Engine::new();
    let template = engine.compile("Acta {{ NRO_ACTA }}").unwrap();
    let err = template
        .render_to_writer(BrokenWriter, &value! { NRO_ACTA: 1 })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.span(), None);
    assert_eq!(
        err.to_string(),
        "failed to write rendered output: pipe closed"
    );
    assert!(err.source().is_some());
}

#[test]
fn render_root_not_a_map() {
    let result = render("[[IF x]]a[[/IF]]{{ x }}b", &Value::from("text"), false).unwrap();
    assert_eq!(result, "b");
}
