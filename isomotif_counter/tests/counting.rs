use std::cell::Cell;
use std::num::NonZeroUsize;
use std::sync::OnceLock;

use quickcheck::{Arbitrary, Gen, quickcheck};
use rstest::{fixture, rstest};

use isomotif_common::{Graph, MatchConfig, Multigraph, SimpleGraph};
use isomotif_counter::{Counter, CounterError, IsomorphicGraphCounter, ObjectCounter};
use isomotif_vf2::{IsomorphismTester, SearchError, VertexMapping, Vf2Tester};

fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn typed_triangle(types: [&'static str; 3]) -> Multigraph<&'static str> {
    Multigraph::from_edges(false, 3, [(0, 1, types[0]), (1, 2, types[1]), (0, 2, types[2])])
        .unwrap()
}

fn undirected(order: usize, edges: &[(usize, usize)]) -> SimpleGraph {
    SimpleGraph::from_edges(false, order, edges.iter().copied()).unwrap()
}

#[fixture]
fn triangle() -> SimpleGraph {
    undirected(3, &[(0, 1), (1, 2), (2, 0)])
}

#[fixture]
fn path() -> SimpleGraph {
    undirected(3, &[(0, 1), (1, 2)])
}

#[rstest]
fn typed_copies_collapse() {
    init_test_logger();
    let mut gc = IsomorphicGraphCounter::new();
    for _ in 0..5 {
        gc.count(typed_triangle(["type-1"; 3]));
    }
    assert_eq!(gc.sum(), 5);
    assert_eq!(gc.items().count(), 1);
    assert_eq!(gc.get_count(&typed_triangle(["type-1"; 3])), 5);
    assert_eq!(gc.get_count(&typed_triangle(["type-1", "type-2", "type-1"])), 0);
}

#[rstest]
fn typed_classes_stay_apart() {
    init_test_logger();
    let mut gc = IsomorphicGraphCounter::new();
    gc.count_all((0..5).map(|_| typed_triangle(["type-1"; 3])));
    gc.count_all((0..2).map(|_| typed_triangle(["type-2"; 3])));
    assert_eq!(gc.sum(), 7);
    assert_eq!(gc.len(), 2);
    assert_eq!(gc.get_count(&typed_triangle(["type-1"; 3])), 5);
    assert_eq!(gc.get_count(&typed_triangle(["type-2"; 3])), 2);

    let items: Vec<&Multigraph<&str>> = gc.items().collect();
    assert_eq!(
        items,
        vec![&typed_triangle(["type-1"; 3]), &typed_triangle(["type-2"; 3])]
    );
    assert_eq!(gc.max(), Some(&typed_triangle(["type-1"; 3])));
    assert_eq!(gc.min(), Some(&typed_triangle(["type-2"; 3])));
}

#[rstest]
#[case(0, Err(CounterError::InvalidCount(0)))]
#[case(1, Ok(1))]
#[case(4, Ok(4))]
fn count_n_validates(triangle: SimpleGraph, #[case] n: usize, #[case] expected: Result<usize, CounterError>) {
    let mut gc = IsomorphicGraphCounter::new();
    assert_eq!(gc.count_n(triangle, n), expected);
    assert_eq!(gc.sum(), expected.unwrap_or(0));
}

#[rstest]
fn closed_vocabulary_refuses_strangers(triangle: SimpleGraph, path: SimpleGraph) {
    init_test_logger();
    let mut gc = IsomorphicGraphCounter::with_motifs([triangle.clone()]);
    assert_eq!(gc.len(), 1);
    assert_eq!(gc.get_count(&triangle), 0);

    assert_eq!(gc.count(path.clone()), 0);
    assert_eq!(gc.count(undirected(4, &[(0, 1)])), 0);
    assert_eq!(gc.sum(), 0);
    assert_eq!(gc.len(), 1);

    assert_eq!(gc.count_n(triangle.relabel(&[1, 2, 0]).unwrap(), 3), Ok(3));
    assert_eq!(gc.sum(), 3);
    assert_eq!(gc.get_count(&path), 0);
}

#[rstest]
fn seeded_classes_count_toward_extremes(triangle: SimpleGraph, path: SimpleGraph) {
    let mut gc = IsomorphicGraphCounter::with_motifs([triangle.clone(), path.clone()]);
    gc.count(path.clone());
    assert_eq!(gc.max(), Some(&path));
    assert_eq!(gc.min(), Some(&triangle));
}

#[rstest]
fn frequency_is_share_of_sum(triangle: SimpleGraph, path: SimpleGraph) {
    let mut gc = IsomorphicGraphCounter::new();
    assert_eq!(gc.get_frequency(&triangle), 0.0);
    gc.count_n(triangle.clone(), 3).unwrap();
    gc.count(path.clone());
    assert!((gc.get_frequency(&triangle) - 0.75).abs() < f64::EPSILON);
    assert!((gc.get_frequency(&path) - 0.25).abs() < f64::EPSILON);
}

#[rstest]
fn reset_forgets_everything(triangle: SimpleGraph, path: SimpleGraph) {
    let mut gc = IsomorphicGraphCounter::with_motifs([triangle.clone()]);
    gc.count(triangle.clone());
    gc.reset();
    assert!(gc.is_empty());
    assert_eq!(gc.sum(), 0);
    assert_eq!(gc.max(), None);
    // Closed counters stay closed after a reset.
    assert_eq!(gc.count(path), 0);
}

#[rstest]
fn worker_tallies_merge(triangle: SimpleGraph, path: SimpleGraph) {
    init_test_logger();
    let mut worker_a: ObjectCounter<SimpleGraph> = ObjectCounter::new();
    worker_a.count_n(triangle.clone(), 2).unwrap();
    worker_a.count(path.clone());
    let worker_b: ObjectCounter<SimpleGraph> = [
        triangle.relabel(&[2, 1, 0]).unwrap(),
        path.relabel(&[1, 0, 2]).unwrap(),
    ]
    .into_iter()
    .collect();

    let mut total = IsomorphicGraphCounter::new();
    total.add_all(&worker_a);
    total.add_all(&worker_b);
    assert_eq!(total.len(), 2);
    assert_eq!(total.sum(), 5);
    assert_eq!(total.get_count(&triangle), 3);
    assert_eq!(total.get_count(&path), 2);

    let mut copy = IsomorphicGraphCounter::new();
    copy.add_all(&total);
    assert_eq!(copy.sum(), total.sum());
    assert_eq!(copy.len(), total.len());
}

#[rstest]
fn inconclusive_comparison_is_refused() {
    init_test_logger();
    let ring = undirected(8, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 7), (7, 0)]);
    let tester = Vf2Tester::with_config(MatchConfig::default().with_call_limit(3));
    let mut gc = IsomorphicGraphCounter::with_tester(tester);

    // Empty bucket: nothing to compare against.
    assert_eq!(gc.count(ring.clone()), 1);
    assert_eq!(gc.count(ring.relabel(&[3, 0, 6, 1, 7, 2, 5, 4]).unwrap()), 0);
    assert_eq!(gc.count(ring.clone()), 0);
    assert_eq!(
        gc.try_count(ring.clone(), NonZeroUsize::MIN),
        Err(SearchError::call_limit(3))
    );

    assert_eq!(gc.len(), 1);
    assert_eq!(gc.sum(), 1);
    assert_eq!(gc.iter().map(|(_, n)| n).collect::<Vec<_>>(), vec![1]);
    assert_eq!(gc.representative(&ring), None);
}

#[rstest]
fn inconclusive_seed_is_skipped(triangle: SimpleGraph) {
    init_test_logger();
    let tester = Vf2Tester::with_config(MatchConfig::default().with_call_limit(1));
    let gc = IsomorphicGraphCounter::with_motifs_and_tester(
        [triangle.clone(), triangle.relabel(&[2, 0, 1]).unwrap()],
        tester,
    );
    assert_eq!(gc.len(), 1);
    assert_eq!(gc.sum(), 0);
}

/// Answers "isomorphic" for any two graphs and records how often it was asked.
#[derive(Default)]
struct Gullible {
    calls: Cell<usize>,
}

impl<G: Graph> IsomorphismTester<G> for Gullible {
    fn are_isomorphic(&self, _: &G, _: &G) -> bool {
        self.calls.set(self.calls.get() + 1);
        true
    }

    fn find_isomorphism(&self, g1: &G, _: &G) -> VertexMapping {
        (0..g1.order()).map(|v| (v, v)).collect()
    }
}

#[rstest]
fn tester_runs_only_within_a_bucket(triangle: SimpleGraph, path: SimpleGraph) {
    let mut gc = IsomorphicGraphCounter::with_tester(Gullible::default());
    gc.count(triangle);
    gc.count(path.clone());
    assert_eq!(gc.tester().calls.get(), 0);

    // Same shape as `path`, so the tester is consulted and says yes.
    gc.count(undirected(3, &[(0, 2), (2, 1)]));
    assert_eq!(gc.tester().calls.get(), 1);
    assert_eq!(gc.get_count(&path), 2);
    assert_eq!(gc.len(), 2);
}

#[derive(Clone, Debug)]
struct Split {
    /// How many copies of each motif to count.
    copies: Vec<u8>,
    seed: Vec<usize>,
}

impl Arbitrary for Split {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            copies: (0..MOTIFS).map(|_| u8::arbitrary(g) % 6).collect(),
            seed: Vec::arbitrary(g),
        }
    }
}

const MOTIFS: usize = 4;

/// Pairwise non-isomorphic motifs of order 4 and size 3.
fn motifs() -> [SimpleGraph; MOTIFS] {
    [
        undirected(4, &[(0, 1), (0, 2), (0, 3)]),
        undirected(4, &[(0, 1), (1, 2), (2, 3)]),
        undirected(4, &[(0, 1), (1, 2), (2, 0)]),
        SimpleGraph::from_edges(true, 4, [(0, 1), (1, 2), (2, 3)]).unwrap(),
    ]
}

fn shuffled(seed: &[usize], salt: usize) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..4).collect();
    for i in (1..4).rev() {
        let j = seed.get(i + salt).copied().unwrap_or(salt) % (i + 1);
        perm.swap(i, j);
    }
    perm
}

quickcheck! {
    fn prop_conservation(split: Split) -> bool {
        let motifs = motifs();
        let mut gc = IsomorphicGraphCounter::new();
        let mut salt = 0;
        for (motif, &copies) in motifs.iter().zip(&split.copies) {
            for _ in 0..copies {
                salt += 1;
                let Ok(copy) = motif.relabel(&shuffled(&split.seed, salt)) else {
                    return false;
                };
                gc.count(copy);
            }
        }
        let total: usize = split.copies.iter().map(|&n| usize::from(n)).sum();
        gc.sum() == total
            && gc.len() == split.copies.iter().filter(|&&n| n > 0).count()
            && motifs
                .iter()
                .zip(&split.copies)
                .all(|(m, &n)| gc.get_count(m) == usize::from(n))
    }

    fn prop_closed_rejection_keeps_sum(split: Split) -> bool {
        let motifs = motifs();
        let mut gc = IsomorphicGraphCounter::with_motifs(motifs[..2].iter().cloned());
        let mut accepted = 0;
        for (motif, &copies) in motifs.iter().zip(&split.copies) {
            for _ in 0..copies {
                accepted += gc.count(motif.clone()).min(1);
            }
        }
        let expected: usize = split.copies[..2].iter().map(|&n| usize::from(n)).sum();
        accepted == expected && gc.sum() == expected && gc.len() == 2
    }
}
