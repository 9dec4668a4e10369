use criterion::{criterion_group, criterion_main, Criterion};
use radixmux::path::clean;
use radixmux::tree::Tree;
use std::hint::black_box;

// path, result
fn clean_tests() -> Vec<(&'static str, &'static str)> {
    vec![
        // Already clean
        ("/", "/"),
        ("/abc", "/abc"),
        ("/a/b/c", "/a/b/c"),
        ("/abc/", "/abc/"),
        ("/a/b/c/", "/a/b/c/"),
        // missing root
        ("", "/"),
        ("a/", "/a/"),
        ("abc", "/abc"),
        ("abc/def", "/abc/def"),
        ("a/b/c", "/a/b/c"),
        // Remove doubled slash
        ("//", "/"),
        ("/abc//", "/abc/"),
        ("/abc/def//", "/abc/def/"),
        ("/a/b/c//", "/a/b/c/"),
        ("/abc//def//ghi", "/abc/def/ghi"),
        ("//abc", "/abc"),
        ("///abc", "/abc"),
        ("//abc//", "/abc/"),
        // Remove . elements
        (".", "/"),
        ("./", "/"),
        ("/abc/./def", "/abc/def"),
        ("/./abc/def", "/abc/def"),
        ("/abc/.", "/abc/"),
        // Remove .. elements
        ("..", "/"),
        ("../", "/"),
        ("../../", "/"),
        ("../..", "/"),
        ("../../abc", "/abc"),
        ("/abc/def/ghi/../jkl", "/abc/def/jkl"),
        ("/abc/def/../ghi/../jkl", "/abc/jkl"),
        ("/abc/def/..", "/abc"),
        ("/abc/def/../..", "/"),
        ("/abc/def/../../..", "/"),
        ("/abc/def/../../../ghi/jkl/../../../mno", "/mno"),
        // Combinations
        ("abc/./../def", "/def"),
        ("abc//./../def", "/def"),
        ("abc/../../././../def", "/def"),
    ]
}

fn bench_path_clean(c: &mut Criterion) {
    let tests = clean_tests();

    c.bench_function("path_clean", |b| {
        b.iter(|| {
            for test in &tests {
                black_box(clean(test.0));
                black_box(clean(test.1));
            }
        })
    });
}

fn bench_path_clean_long(c: &mut Criterion) {
    let mut test_paths: Vec<(String, String)> = Vec::new();
    for i in 1..1234 {
        let ss = "a".repeat(i);

        let correct_path = format!("/{}", ss);
        test_paths.push((correct_path.clone(), correct_path.clone()));
        test_paths.push((ss.clone(), correct_path.clone()));
        test_paths.push((format!("//{}", ss), correct_path.clone()));
        test_paths.push((format!("//{}/b/..", ss), correct_path.clone()));
    }

    c.bench_function("path_clean_long", |b| {
        b.iter(|| {
            for test in &test_paths {
                black_box(clean(&test.0));
                black_box(clean(&test.1));
            }
        })
    });
}

fn routes() -> Vec<&'static str> {
    vec![
        "/",
        "/cmd/:tool/:sub",
        "/cmd/:tool/",
        "/src/*filepath",
        "/search/",
        "/search/:query",
        "/user_:name",
        "/user_:name/about",
        "/files/:dir/*filepath",
        "/doc/",
        "/doc/rust_faq.html",
        "/doc/rust1.26.html",
        "/info/:user/public",
        "/info/:user/project/:project",
    ]
}

fn bench_tree_lookup(c: &mut Criterion) {
    let tree = Tree::new();
    for (i, route) in routes().into_iter().enumerate() {
        tree.add(route, i).unwrap();
    }

    let requests = [
        "/",
        "/cmd/test/",
        "/cmd/test/3",
        "/src/some/file.png",
        "/search/someth!ng+in+ünìcodé",
        "/user_rustacean/about",
        "/files/js/inc/framework.js",
        "/doc/rust_faq.html",
        "/info/gordon/project/rust",
    ];

    c.bench_function("tree_lookup", |b| {
        b.iter(|| {
            for path in &requests {
                black_box(tree.get(path, false).unwrap());
            }
        })
    });

    c.bench_function("tree_lookup_miss_with_tsr", |b| {
        b.iter(|| {
            black_box(tree.get("/doc", true).unwrap_err());
            black_box(tree.get("/search", true).unwrap_err());
        })
    });
}

fn bench_tree_add_remove(c: &mut Criterion) {
    let tree = Tree::new();
    for (i, route) in routes().into_iter().enumerate() {
        tree.add(route, i).unwrap();
    }

    c.bench_function("tree_add_remove", |b| {
        b.iter(|| {
            tree.add("/info/:user/settings", 0).unwrap();
            black_box(tree.remove("/info/:user/settings"));
        })
    });
}

criterion_group!(
    benches,
    bench_path_clean,
    bench_path_clean_long,
    bench_tree_lookup,
    bench_tree_add_remove
);
criterion_main!(benches);
