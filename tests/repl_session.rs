use insta::assert_snapshot;
use typelayout::repl::{Options, Session};

fn run_session(input: &str) -> String {
    let mut session = Session::new(Options::default());
    let mut out = Vec::new();
    session.run(input.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn interactive_session() {
    let input = "\
ATOMICO char 1 2
ATOMICO char 1 5
ATOMICO int 4 4
DESCRIBIR wenas
STRUCT wenas char int
ATOMICO atomico
DESCRIBIR wenas hellou
DESCRIBIR wenas
SALIR
";

    assert_snapshot!(run_session(input), @r###"
    Error: el tipo 'char' ya existe.
    Error: el tipo 'wenas' no está definido.
    Error: faltan argumentos o hay argumentos de mas
    Error: faltan argumentos o hay argumentos de mas
    Tipo Struct: wenas
    Tamaño empaquetado: 5 bytes
    Alineación empaquetado: 2 bytes
    Tamaño no empaquetado: 8 bytes
    Alineación no empaquetado: 2 bytes
    Tamaño óptimo: 5 bytes
    Alineación óptimo: 4 bytes
    Bytes desperdiciados (empaquetado): 0 bytes
    Bytes desperdiciados (no empaquetado): 3 bytes
    Bytes desperdiciados (óptimo): 0 bytes
    Saliendo
    "###);
}

#[test]
fn nested_types_and_errors() {
    let input = "\
ATOMICO char 1 2
ATOMICO int 4 4
ATOMICO raro 5 3
STRUCT foo char int raro
UNION bar char int raro
STRUCT foobar foo bar int
UNION broken char double
DESCRIBIR broken
DESCRIBIR raro
DESCRIBIR foobar
LISTAR
SALIR
";

    assert_snapshot!(run_session(input), @r###"
    Error: el tipo 'double' no está definido.
    Error: el tipo 'broken' no está definido.
    Tipo Atómico: raro
    Representación(Empaquetado,Optimo,Ordenado): 5 bytes
    Alineación: 3 bytes
    Bytes desperdiciados: 0 bytes
    Tipo Struct: foobar
    Tamaño empaquetado: 19 bytes
    Alineación empaquetado: 2 bytes
    Tamaño no empaquetado: 36 bytes
    Alineación no empaquetado: 2 bytes
    Tamaño óptimo: 23 bytes
    Alineación óptimo: 12 bytes
    Bytes desperdiciados (empaquetado): 0 bytes
    Bytes desperdiciados (no empaquetado): 17 bytes
    Bytes desperdiciados (óptimo): 4 bytes
    Accion LISTAR desconocida
    Saliendo
    "###);
}

#[test]
fn describing_an_undefined_type_prints_only_the_error() {
    let output = run_session("DESCRIBIR X\n");

    assert_eq!(output, "Error: el tipo 'X' no está definido.\n");
}
