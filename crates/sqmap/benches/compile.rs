use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqmap::{Compiler, Cond, Format, InList, InsertQuery, Record, SelectQuery, Token};

/// SELECT col0, col1, ... WHERE col0=$1 AND col1=$2 ... AND "id" IN (...)
fn build_select(n: usize) -> SelectQuery {
    let mut tokens = Vec::with_capacity(n * 2);
    for i in 0..n {
        if i > 0 {
            tokens.push(Token::and());
        }
        tokens.push(Token::Item(Cond::eq(format!("col{i}"), i as i64)));
    }
    SelectQuery::new((0..n).map(|i| format!("col{i}")))
        .where_tokens(tokens)
        .in_list([Token::Item(InList::in_list("id", 0..n as i64))])
        .limit(10)
}

fn build_insert(rows: usize) -> InsertQuery {
    let cols = ["a", "b", "c", "d"];
    InsertQuery::new(cols).rows((0..rows).map(|r| {
        cols.iter()
            .enumerate()
            .map(|(c, col)| (*col, (r * cols.len() + c) as i64))
            .collect::<Record>()
    }))
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/select");
    let compiler = Compiler::new(Format::POSTGRES, "public", "t");

    for n in [1, 5, 10, 50] {
        let query = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
            b.iter(|| black_box(compiler.select(query)));
        });
    }

    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/insert");
    let compiler = Compiler::new(Format::POSTGRES, "public", "t");

    for rows in [1, 10, 100, 1000] {
        let query = build_insert(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &query, |b, query| {
            b.iter(|| black_box(compiler.insert(query)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_select, bench_insert);
criterion_main!(benches);
