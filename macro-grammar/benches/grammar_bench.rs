use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use macro_grammar::grammars::{class_function, class_property};
use macro_grammar::{either, repeat, Grammar};
use macro_lexer::TokenStream;

fn generate_class_body(members: usize) -> String {
    let mut source = String::new();
    for i in 0..members {
        if i % 2 == 0 {
            source.push_str(&format!("private string $field{i} = null;\n"));
        } else {
            source.push_str(&format!(
                "public function method{i}(int $a, array $b = [1, 2], $c = new Foo()): ?Bar {{ return [$a, $b]; }}\n"
            ));
        }
    }
    source
}

fn bench_grammar(c: &mut Criterion) {
    let mut group = c.benchmark_group("class_members");

    let size = 1_000;
    let source = generate_class_body(size);
    let stream = TokenStream::from_source(&source).expect("generated source lexes");
    let grammar = Grammar::new(repeat(either![class_property(None), class_function(None)]))
        .expect("member grammar is valid");

    group.throughput(Throughput::Elements(size as u64));
    group.bench_function("lex_members", |b| {
        b.iter(|| TokenStream::from_source(black_box(&source)))
    });
    group.bench_function("parse_members", |b| {
        b.iter(|| {
            // Streams share their tokens, so cloning only resets the cursor.
            let mut input = stream.clone();
            let capture = grammar.parse(&mut input).expect("members parse");
            black_box(capture.items().len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_grammar);
criterion_main!(benches);
