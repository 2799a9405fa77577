//! Benchmarks for tree rendering and navigator bookkeeping.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use commenttree::api::Response;
use commenttree::model::{CommentNode, SortOrder, TreePage};
use commenttree::navigation::{Action, Completion, Effect, Navigator, NavigatorOptions};
use commenttree::render::{render_tree, tree_to_text, Glyphs, ReplyDrafts};

/// `roots` top-level comments, each with `replies` direct replies.
fn wide_forest(roots: i64, replies: i64) -> Vec<CommentNode> {
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..roots)
        .map(|r| {
            let root_id = r * (replies + 1) + 1;
            let mut root = CommentNode::new(root_id, 0, format!("root {root_id}"), ts);
            for c in 1..=replies {
                root.children
                    .push(CommentNode::new(root_id + c, root_id, format!("reply {}", root_id + c), ts));
            }
            root
        })
        .collect()
}

/// A single reply chain `depth` levels deep.
fn deep_chain(depth: i64) -> Vec<CommentNode> {
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut node = CommentNode::new(depth, depth - 1, "leaf", ts);
    for id in (1..depth).rev() {
        node = CommentNode::new(id, id - 1, format!("level {id}"), ts).with_child(node);
    }
    vec![node]
}

fn bench_render_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_tree");
    let nav = Navigator::new(SortOrder::CreatedDesc, NavigatorOptions::default());
    let drafts = ReplyDrafts::new();

    for (roots, replies) in [(50, 10), (50, 100)] {
        let forest = wide_forest(roots, replies);
        let nodes = (roots * (replies + 1)) as u64;
        group.throughput(Throughput::Elements(nodes));
        group.bench_with_input(BenchmarkId::new("wide", nodes), &forest, |b, forest| {
            b.iter(|| render_tree(black_box(forest), nav.view(), &drafts))
        });
    }

    for depth in [100, 2000] {
        let forest = deep_chain(depth);
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::new("deep", depth), &forest, |b, forest| {
            b.iter(|| render_tree(black_box(forest), nav.view(), &drafts))
        });
    }

    group.finish();
}

fn bench_tree_to_text(c: &mut Criterion) {
    let nav = Navigator::new(SortOrder::CreatedDesc, NavigatorOptions::default());
    let rendered = render_tree(&wide_forest(50, 10), nav.view(), &ReplyDrafts::new());

    c.bench_function("tree_to_text_550", |b| {
        b.iter(|| tree_to_text(black_box(&rendered), Glyphs::UNICODE))
    });
}

fn bench_dispatch_complete(c: &mut Criterion) {
    let page = TreePage {
        items: wide_forest(50, 10),
        page: 1,
        limit: 50,
        total: 50,
    };

    c.bench_function("load_roots_cycle", |b| {
        b.iter(|| {
            let mut nav = Navigator::new(SortOrder::CreatedDesc, NavigatorOptions::default());
            for effect in nav.dispatch(Action::LoadRoots) {
                let Effect::Fetch { ticket, .. } = effect;
                nav.complete(Completion::new(ticket, Ok(Response::Roots(page.clone()))));
            }
            black_box(nav.tree().nodes().len())
        })
    });
}

criterion_group!(benches, bench_render_tree, bench_tree_to_text, bench_dispatch_complete);
criterion_main!(benches);
