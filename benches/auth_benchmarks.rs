use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use school_manager::auth::{hash_password, sign_token, validate_token, verify_password};
use school_manager::config::AuthConfig;
use school_manager::db::ListQuery;
use school_manager::models::{Student, Validate};

fn bench_password_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("argon2id");
    group.sample_size(10);

    group.bench_function("hash_password", |b| {
        b.iter(|| hash_password(black_box("correct horse battery staple")))
    });

    let hash = hash_password("correct horse battery staple").unwrap();
    group.bench_function("verify_password", |b| {
        b.iter(|| verify_password(black_box(&hash), black_box("correct horse battery staple")))
    });

    group.finish();
}

fn bench_tokens(c: &mut Criterion) {
    let auth = AuthConfig {
        jwt_secret: "bench-secret".to_string(),
        ..Default::default()
    };

    c.bench_function("sign_token", |b| {
        b.iter(|| sign_token(black_box(42), black_box("registrar"), black_box("admin"), &auth))
    });

    let token = sign_token(42, "registrar", "admin", &auth).unwrap();
    c.bench_function("validate_token", |b| {
        b.iter(|| validate_token(black_box(&token), &auth))
    });
}

fn bench_request_checks(c: &mut Criterion) {
    let student = Student {
        id: 0,
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@school.com".to_string(),
        class: "5A".to_string(),
    };
    c.bench_function("validate_student", |b| b.iter(|| black_box(&student).validate()));

    let params: Vec<(String, String)> = vec![
        ("class".to_string(), "5A".to_string()),
        ("sortby".to_string(), "last_name:asc".to_string()),
        ("sortby".to_string(), "first_name:desc".to_string()),
    ];
    let columns = &["first_name", "last_name", "email", "class"];
    c.bench_function("parse_list_query", |b| {
        b.iter(|| {
            ListQuery::parse(black_box(&params), columns)
                .map(|query| query.to_sql("SELECT id FROM students"))
        })
    });
}

criterion_group!(benches, bench_password_hashing, bench_tokens, bench_request_checks);
criterion_main!(benches);
