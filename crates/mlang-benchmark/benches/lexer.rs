use codspeed_criterion_compat::{Criterion, Throughput, black_box, criterion_group, criterion_main};

static OPERATORS: &str = "
x = a + b .* c ./ d .^ e' == f ~= g <= h >= i && j || k & l | m;
x = a + b .* c ./ d .^ e' == f ~= g <= h >= i && j || k & l | m;
x = a + b .* c ./ d .^ e' == f ~= g <= h >= i && j || k & l | m;
x = a + b .* c ./ d .^ e' == f ~= g <= h >= i && j || k & l | m;
x = a + b .* c ./ d .^ e' == f ~= g <= h >= i && j || k & l | m;
x = a + b .* c ./ d .^ e' == f ~= g <= h >= i && j || k & l | m;
x = a + b .* c ./ d .^ e' == f ~= g <= h >= i && j || k & l | m;
x = a + b .* c ./ d .^ e' == f ~= g <= h >= i && j || k & l | m;
";

static LITERALS: &str = "
values = [1, 2.5, .5e-3, 3i, 'single', \"double\", 1e10, 42j];
values = [1, 2.5, .5e-3, 3i, 'single', \"double\", 1e10, 42j];
values = [1, 2.5, .5e-3, 3i, 'single', \"double\", 1e10, 42j];
values = [1, 2.5, .5e-3, 3i, 'single', \"double\", 1e10, 42j];
values = [1, 2.5, .5e-3, 3i, 'single', \"double\", 1e10, 42j];
values = [1, 2.5, .5e-3, 3i, 'single', \"double\", 1e10, 42j];
";

static COMMENTS_AND_COMMANDS: &str = "
% leading comment
hold on
format long g
x = 1; % trailing comment
%{
a block comment
%}
y = x ...
    + 2;
disp done
";

static CANDIDATES: [(&str, &str); 3] = [
    ("operators", OPERATORS),
    ("literals", LITERALS),
    ("comments_and_commands", COMMENTS_AND_COMMANDS),
];

fn tokenize(s: &str) {
    let lexed = mlang_lexer::tokenize(s);
    _ = black_box(lexed);
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for (name, source) in CANDIDATES {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| b.iter(|| tokenize(s)));
    }
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
