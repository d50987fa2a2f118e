//! Rendering benchmark: registry lookup + template interpolation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lift_queries::params::ParamMap;
use lift_queries::registry::QueryRegistry;
use lift_queries::render::Renderer;
use serde_json::json;

fn bench_render(c: &mut Criterion) {
    let mut registry = QueryRegistry::new();
    registry
        .insert_source(
            "kpi_daily",
            "SELECT date, region, SUM(value) AS value\n\
             FROM `{{ kpi_table }}`\n\
             WHERE date BETWEEN '{{ start_date }}' AND '{{ end_date }}'\n\
             {% if regions %}AND region IN ({% for r in regions %}'{{ r }}'{% if not loop.last %}, {% endif %}{% endfor %})\n{% endif %}\
             GROUP BY date, region",
        )
        .unwrap();

    let renderer = Renderer::new();
    let mut params = ParamMap::new();
    params.insert("kpi_table".into(), json!("acme.kpi"));
    params.insert("start_date".into(), json!("2022-03-05"));
    params.insert("end_date".into(), json!("2022-04-05"));
    params.insert("regions".into(), json!(["berlin", "hamburg", "munich"]));

    c.bench_function("render_kpi_daily", |b| {
        b.iter(|| {
            renderer
                .render_named(black_box(&registry), black_box("kpi_daily"), black_box(&params))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
