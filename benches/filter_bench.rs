use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use scribe_filter::config::ConnectorConfig;
use scribe_filter::domain;
use scribe_filter::lexer::Lexer;
use scribe_filter::metadata::{AttributeBasedMetadataProvider, CachingMetadataProvider, MetadataProvider};
use scribe_filter::parser::Parser;
use scribe_filter::{parse_expression, ExpressionVisitor};
use std::hint::black_box;

const TEST_CASES: [(&str, &str); 4] = [
    ("simple", r#"Name = "Acme""#),
    ("medium", r#"Name = "Acme" AND ParentId = 1 AND Id = 7"#),
    ("complex", r#"(Name = "Acme" OR Name = "Globex") AND (ParentId = 1 OR ParentId = 2) AND Id = 7"#),
    (
        "wide_or",
        r#"(Id = 1 OR Id = 2 OR Id = 3 OR Id = 4) AND (ParentId = 1 OR ParentId = 2 OR ParentId = 3 OR ParentId = 4)"#,
    ),
];

// 基准测试：词法分析性能
fn benchmark_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_performance");

    for (name, filter) in TEST_CASES {
        group.bench_with_input(BenchmarkId::new("tokenize", name), &filter, |b, &filter| {
            b.iter(|| {
                let tokens: Vec<_> = Lexer::new(black_box(filter)).collect();
                black_box(tokens)
            })
        });
    }

    group.finish();
}

// 基准测试：语法分析性能
fn benchmark_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_performance");

    for (name, filter) in TEST_CASES {
        // 预先词法分析
        let tokens: Vec<_> = Lexer::new(filter).collect();

        group.bench_with_input(BenchmarkId::new("parse", name), &tokens, |b, tokens| {
            b.iter(|| {
                let mut parser = Parser::new(black_box(tokens));
                match parser.parse() {
                    Ok(expression) => black_box(expression),
                    Err(_) => panic!("解析失败"),
                }
            })
        });
    }

    group.finish();
}

// 基准测试：表达式翻译性能
fn benchmark_visitor(c: &mut Criterion) {
    let visitor = ExpressionVisitor::new();
    let mut group = c.benchmark_group("visitor_performance");

    for (name, filter) in TEST_CASES {
        let expression = parse_expression(filter).expect("解析应该成功");

        group.bench_with_input(BenchmarkId::new("visit", name), &expression, |b, expression| {
            b.iter(|| {
                let candidates = visitor.visit(black_box(expression)).expect("翻译应该成功");
                black_box(candidates)
            })
        });
    }

    group.finish();
}

// 基准测试：元数据获取，有缓存与无缓存对比
fn benchmark_metadata(c: &mut Criterion) {
    let uncached = AttributeBasedMetadataProvider::new(domain::registry(), domain::is_domain_type);
    let cached = CachingMetadataProvider::new(AttributeBasedMetadataProvider::new(
        domain::registry(),
        domain::is_domain_type,
    ));
    let chain = ConnectorConfig::default().build_metadata_provider(domain::registry());

    let mut group = c.benchmark_group("metadata_performance");

    group.bench_function("attribute_based", |b| {
        b.iter(|| black_box(uncached.retrieve_object_definitions(black_box(true), true).expect("元数据应该可用")))
    });
    group.bench_function("caching", |b| {
        b.iter(|| black_box(cached.retrieve_object_definitions(black_box(true), true).expect("元数据应该可用")))
    });
    group.bench_function("configured_chain", |b| {
        b.iter(|| black_box(chain.retrieve_object_definition("Organization", black_box(true), true).expect("元数据应该可用")))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_lexer,
    benchmark_parser,
    benchmark_visitor,
    benchmark_metadata
);
criterion_main!(benches);
