use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use grafter_db::File;

fn benchmark_parser(c: &mut Criterion) {
    let db = salsa::DatabaseImpl::new();
    let files = vec![
        File::new(
            &db,
            "Simple".into(),
            r#"
            Expression <- Addition | IntegerLiteral
            Addition <- left@Expression, right@Expression
            Addition(#1, #2) -> Addition(#2, #1)
            "#
            .to_string(),
        ),
        File::new(
            &db,
            "Medium".into(),
            r#"
            // statements
            Statement <- Expression | Block | If | While
            Block <- {Statement}
            If <- condition@Expression, then@Block, [otherwise@Block]
            While <- condition@Expression, body@Block

            // expressions
            Expression <- Binary | Call | Name | IntegerLiteral | StringLiteral
            Binary <- Addition | Subtraction | Multiplication
            Addition <- left@Expression, right@Expression
            Subtraction <- left@Expression, right@Expression
            Multiplication <- left@Expression, right@Expression
            Call <- callee@Name, {args@Expression}
            Name <- $String$, $#$, $#$
            IntegerLiteral <- $int$, $String.valueOf(#)$, $Integer.parseInt(#)$
            StringLiteral <- $String$, $quote(#)$, $unquote(#)$, $IllegalArgumentException$

            java:
            Call <- &, [receiver@Expression]
            If(#1, #2, 0) -> If(#1, #2, Block); While(IntegerLiteral<"0">, #1) -> Block

            common:
            Addition(#1, IntegerLiteral<"0">) -> Copy(#1)
            Multiplication(#1, IntegerLiteral<"1">) -> Copy(#1)
            Call(Name<"print">, #1) -> Call(Name<"println">, #1)
            "#
            .to_string(),
        ),
    ];

    let mut group = c.benchmark_group("Parser Benchmark");

    for file in files {
        let code_length = file.text(&db).len() as u64;
        group.throughput(Throughput::Bytes(code_length));
        group.bench_with_input(
            BenchmarkId::new("parse_rules", file.path(&db)),
            &file,
            |b, &file| {
                b.iter(|| {
                    let program = grafter_parse::program(file.text(&db));
                    black_box(program);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
