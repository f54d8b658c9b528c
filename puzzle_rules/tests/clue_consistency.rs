//! Brute-force check that the grid clues pin down exactly the stored solution.
//!
//! The runtime never evaluates clues; this test keeps the clue text and the
//! solution from drifting apart.

use puzzle_rules::{Assignment, Candidate, Content};

/// Positions (1-based) of each codename and weapon in one candidate arrangement.
struct Arrangement<'a> {
    labels: &'a [&'a str],
    items: &'a [&'a str],
}

impl Arrangement<'_> {
    fn label_at(&self, label: &str) -> usize {
        self.labels.iter().position(|l| *l == label).map_or(0, |i| i + 1)
    }

    fn item_at(&self, item: &str) -> usize {
        self.items.iter().position(|l| *l == item).map_or(0, |i| i + 1)
    }
}

/// The eight clues from `content/iago.toml`, in order.
fn satisfies_clues(a: &Arrangement<'_>) -> bool {
    let sombra = a.label_at("Sombra");
    let corvo = a.label_at("Corvo");
    let fantasma = a.label_at("Fantasma");

    a.label_at("Colecionador") == 5
        && a.item_at("Besta") == 1
        && corvo + 1 == a.label_at("Silencioso")
        && fantasma == a.item_at("MartelodeBorracha")
        && a.item_at("FioDeNylon") == 3
        && sombra.abs_diff(fantasma) != 1
        && a.item_at("ChaveDeFenda") % 2 == 0
        && sombra < corvo
}

fn permutations<'a>(values: &[&'a str]) -> Vec<Vec<&'a str>> {
    if values.len() <= 1 {
        return vec![values.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..values.len() {
        let mut rest = values.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

#[test]
fn test_clues_have_a_unique_solution() {
    let content = Content::builtin().unwrap();
    let labels: Vec<&str> = content.grid.labels.iter().map(|e| e.id.as_str()).collect();
    let items: Vec<&str> = content.grid.items.iter().map(|e| e.id.as_str()).collect();

    let label_orders = permutations(&labels);
    let item_orders = permutations(&items);
    assert_eq!(label_orders.len() * item_orders.len(), 14_400);

    let mut solutions = Vec::new();
    for label_order in &label_orders {
        for item_order in &item_orders {
            let arrangement = Arrangement {
                labels: label_order,
                items: item_order,
            };
            if satisfies_clues(&arrangement) {
                solutions.push((label_order.clone(), item_order.clone()));
            }
        }
    }

    assert_eq!(solutions.len(), 1, "clues admit {} solutions", solutions.len());

    let (label_order, item_order) = &solutions[0];
    let mut candidate = Candidate::new();
    for (i, (label, item)) in label_order.iter().zip(item_order).enumerate() {
        candidate.set(i + 1, Assignment::new(*label, *item));
    }
    assert!(content.grid_solution().verify(&candidate));
}

#[test]
fn test_clue_count_matches_text() {
    let content = Content::builtin().unwrap();
    assert_eq!(content.grid.clues.len(), 8);
}
