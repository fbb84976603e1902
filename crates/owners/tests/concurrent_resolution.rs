//! One resolver shared by many threads gives the same answers as serial use.

use std::thread;

use owners::{OwnersMatch, Resolver};
use test_support::TempTree;

#[test]
fn concurrent_queries_match_serial_results() {
    let tree = TempTree::new();
    tree.write("OWNERS", "**/*.rs @rust\n^[optional]\n**/*.md @docs\n");
    tree.write("core/OWNERS", "**/*.rs @core\n");
    tree.write("core/io/OWNERS", "^[optional]\n*.rs @io\n");

    let resolver = Resolver::open(tree.path());
    let paths = [
        "lib.rs",
        "core/lib.rs",
        "core/io/read.rs",
        "core/io/nested/write.rs",
        "README.md",
        "core/README.md",
        "unowned.txt",
    ];
    let serial: Vec<OwnersMatch> = paths.iter().map(|p| resolver.resolve(p).unwrap()).collect();

    let shared = &resolver;
    let parallel: Vec<OwnersMatch> = thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|path| scope.spawn(move || shared.resolve(path).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(serial, parallel);
    assert_eq!(serial[2].required, ["@core"]);
    assert_eq!(serial[2].optional, ["@io"]);
    assert!(serial[3].optional.is_empty());
}
