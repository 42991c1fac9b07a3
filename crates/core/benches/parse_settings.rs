use buildyard_core::policy;
use buildyard_core::settings::SettingsSchema;
use buildyard_core::validation::validate_settings;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const SAMPLE_SETTINGS: &str = r#"
[project]
name = "android"

[plugin_management]
repositories = ["google", "maven-central", "gradle-plugin-portal"]

[dependency_resolution]
mode = "fail-on-project-repos"
repositories = ["google", "maven-central"]

[[plugins]]
id = "com.android.application"
version = "8.11.1"

[[plugins]]
id = "org.jetbrains.kotlin.android"
version = "2.2.20"

[layout]
build_dir = "build"

[[modules]]
name = "app"
"#;

fn bench_parse_settings(c: &mut Criterion) {
    c.bench_function("parse_settings", |b| {
        b.iter(|| toml::from_str::<SettingsSchema>(black_box(SAMPLE_SETTINGS)))
    });
}

fn bench_parse_empty_settings(c: &mut Criterion) {
    c.bench_function("parse_empty_settings", |b| {
        b.iter(|| toml::from_str::<SettingsSchema>(black_box("")))
    });
}

fn bench_validate_settings(c: &mut Criterion) {
    let schema: SettingsSchema = toml::from_str(SAMPLE_SETTINGS).unwrap();

    c.bench_function("validate_settings", |b| {
        b.iter(|| validate_settings(black_box(&schema)))
    });
}

fn bench_resolve_repositories(c: &mut Criterion) {
    let schema: SettingsSchema = toml::from_str(SAMPLE_SETTINGS).unwrap();

    c.bench_function("resolve_repositories", |b| {
        b.iter(|| {
            let plugins = policy::plugin_repositories(black_box(&schema));
            let deps = policy::dependency_repositories(black_box(&schema));
            (plugins, deps)
        })
    });
}

fn bench_module_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("module_scaling");
    for size in [1, 16, 128].iter() {
        let mut content = String::from(SAMPLE_SETTINGS);
        for i in 0..*size {
            content.push_str(&format!("\n[[modules]]\nname = \"feature-{i}\"\n"));
        }
        group.bench_with_input(BenchmarkId::from_parameter(size), &content, |b, content| {
            b.iter(|| {
                let schema: SettingsSchema = toml::from_str(black_box(content)).unwrap();
                validate_settings(&schema)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_settings,
    bench_parse_empty_settings,
    bench_validate_settings,
    bench_resolve_repositories,
    bench_module_scaling,
);
criterion_main!(benches);
