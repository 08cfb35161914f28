use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tui_rulepanel::{Dimension, ListRowEntry, NotificationRuleItem, RulePanel};

fn rules(count: usize) -> Vec<ListRowEntry> {
    (0..count)
        .map(|n| {
            let when = if n % 3 == 0 {
                String::new()
            } else {
                format!("scope.level > {n}")
            };
            ListRowEntry::new(
                format!("rule-{n}"),
                NotificationRuleItem::new(format!("notification {n}"), when, n % 2 == 0),
            )
        })
        .collect()
}

fn laid_out_panel(count: usize) -> RulePanel {
    let mut panel = RulePanel::new();
    panel.create_editor();
    panel.list_mut().splice(rules(count));
    panel.layout(Dimension::new(800.0, 600.0));
    panel
}

// Full relayout: width reset, resolve, template broadcast.
fn bench_relayout(c: &mut Criterion) {
    let mut panel = laid_out_panel(512);
    c.bench_function("relayout_800x600", |b| {
        b.iter(|| panel.layout(black_box(Dimension::new(800.0, 600.0))));
    });
}

// Scroll churn rebinds the pooled templates without creating new ones.
fn bench_scroll_rebind(c: &mut Criterion) {
    let mut panel = laid_out_panel(512);
    c.bench_function("scroll_rebind_512_rows", |b| {
        let mut offset = 0usize;
        b.iter(|| {
            offset = (offset + 7) % 480;
            panel.list_mut().scroll_to(black_box(offset));
        });
    });
}

criterion_group!(benches, bench_relayout, bench_scroll_rebind);
criterion_main!(benches);
