//! Legal-play enumeration.
//!
//! Produces every distinct card multiset from a hand that forms a valid
//! group and may follow the current table play. Candidates are built
//! constructively per category (never by scanning all subsets) and deduped
//! by id multiset, so two physical copies of the same card never yield
//! duplicate plays.

use std::collections::BTreeSet;

use super::cards_types::{Card, Rank};
use super::combos::{CardGroup, Category};
use super::compare::can_follow;

/// Enumerate legal plays for `hand` against `table` under `trump`.
///
/// With a table play present, generation is pruned to the matching
/// category/size plus bombs. Opening enumerates every category. Output
/// order is deterministic (sorted by the groups' card ids).
pub fn legal_plays(hand: &[Card], table: Option<&CardGroup>, trump: Rank) -> Vec<CardGroup> {
    let mut gen = Generator::new(hand);

    let candidates = match table.filter(|t| t.is_valid()) {
        None => gen.all_categories(),
        Some(t) => {
            let mut v = match t.category {
                Category::Single => gen.singles(),
                Category::Pair => gen.of_a_kind(2),
                Category::Triple => gen.of_a_kind(3),
                Category::Straight => gen.runs(1, t.size()),
                Category::PairStraight => gen.runs(2, t.size()),
                Category::TripleStraight => gen.runs(3, t.size()),
                // Bombs are only ever followed by bigger bombs, generated
                // below for every shape.
                Category::Bomb | Category::JokerBomb => Vec::new(),
                Category::Invalid => return Vec::new(),
            };
            v.extend(gen.of_a_kind(4));
            v.extend(gen.joker_bombs());
            v
        }
    };

    candidates
        .into_iter()
        .map(CardGroup::classify)
        .filter(|g| g.is_valid() && can_follow(g, table, trump))
        .collect()
}

struct Generator<'a> {
    hand: &'a [Card],
    seen: BTreeSet<Vec<u8>>,
}

impl<'a> Generator<'a> {
    fn new(hand: &'a [Card]) -> Self {
        Self {
            hand,
            seen: BTreeSet::new(),
        }
    }

    fn all_categories(&mut self) -> Vec<Vec<Card>> {
        let mut out = self.singles();
        out.extend(self.of_a_kind(2));
        out.extend(self.of_a_kind(3));
        out.extend(self.of_a_kind(4));
        out.extend(self.joker_bombs());
        for copies in 1..=3usize {
            out.extend(self.all_runs(copies));
        }
        out
    }

    /// Record a candidate unless its id multiset was already produced.
    fn push_unique(&mut self, out: &mut Vec<Vec<Card>>, mut cards: Vec<Card>) {
        cards.sort();
        let key: Vec<u8> = cards.iter().map(|c| c.id()).collect();
        if self.seen.insert(key) {
            out.push(cards);
        }
    }

    fn singles(&mut self) -> Vec<Vec<Card>> {
        let mut out = Vec::new();
        for &c in self.hand {
            self.push_unique(&mut out, vec![c]);
        }
        out
    }

    /// All k-card same-rank picks for every rank (k = 2 pairs, 3 triples,
    /// 4 bombs). Jokers are excluded: multi-joker picks are joker bombs.
    fn of_a_kind(&mut self, k: usize) -> Vec<Vec<Card>> {
        let mut out = Vec::new();
        for rank in Rank::STANDARD {
            let cards: Vec<Card> = self.hand.iter().copied().filter(|c| c.rank == rank).collect();
            for combo in multiset_combinations(&cards, k) {
                self.push_unique(&mut out, combo);
            }
        }
        out
    }

    fn joker_bombs(&mut self) -> Vec<Vec<Card>> {
        let jokers: Vec<Card> = self.hand.iter().copied().filter(|c| c.is_joker()).collect();
        let mut out = Vec::new();
        for k in 2..=jokers.len() {
            for combo in multiset_combinations(&jokers, k) {
                self.push_unique(&mut out, combo);
            }
        }
        out
    }

    /// Runs of exactly `size` cards with `copies` per rank.
    fn runs(&mut self, copies: usize, size: usize) -> Vec<Vec<Card>> {
        if size % copies != 0 {
            return Vec::new();
        }
        self.runs_spanning(copies, size / copies)
    }

    /// Runs of any legal length for the copy count.
    fn all_runs(&mut self, copies: usize) -> Vec<Vec<Card>> {
        let min_span = match copies {
            1 => 5,
            2 => 3,
            _ => 2,
        };
        let mut out = Vec::new();
        for span in min_span..=13 {
            out.extend(self.runs_spanning(copies, span));
        }
        out
    }

    fn runs_spanning(&mut self, copies: usize, span: usize) -> Vec<Vec<Card>> {
        let mut out = Vec::new();
        if span > 13 {
            return out;
        }
        // Windows of `span` contiguous ranks within 2..=14.
        for lo in 2..=(15 - span as u8) {
            let mut per_rank: Vec<Vec<Vec<Card>>> = Vec::with_capacity(span);
            let mut feasible = true;
            for v in lo..lo + span as u8 {
                let rank = match Rank::from_numeric(v) {
                    Some(r) => r,
                    None => {
                        feasible = false;
                        break;
                    }
                };
                let cards: Vec<Card> =
                    self.hand.iter().copied().filter(|c| c.rank == rank).collect();
                let picks = multiset_combinations(&cards, copies);
                if picks.is_empty() {
                    feasible = false;
                    break;
                }
                per_rank.push(picks);
            }
            if !feasible {
                continue;
            }
            for combo in cartesian(&per_rank) {
                self.push_unique(&mut out, combo);
            }
        }
        out
    }
}

/// Distinct k-card picks from a multiset, deduped by card id: the classic
/// sorted skip-duplicates combination walk.
fn multiset_combinations(cards: &[Card], k: usize) -> Vec<Vec<Card>> {
    if k == 0 || cards.len() < k {
        return Vec::new();
    }
    let mut sorted: Vec<Card> = cards.to_vec();
    sorted.sort_by_key(|c| c.id());

    let mut out = Vec::new();
    let mut current = Vec::with_capacity(k);
    fn walk(sorted: &[Card], start: usize, k: usize, current: &mut Vec<Card>, out: &mut Vec<Vec<Card>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..sorted.len() {
            if i > start && sorted[i].id() == sorted[i - 1].id() {
                continue;
            }
            current.push(sorted[i]);
            walk(sorted, i + 1, k, current, out);
            current.pop();
        }
    }
    walk(&sorted, 0, k, &mut current, &mut out);
    out
}

fn cartesian(parts: &[Vec<Vec<Card>>]) -> Vec<Vec<Card>> {
    let mut acc: Vec<Vec<Card>> = vec![Vec::new()];
    for part in parts {
        let mut next = Vec::with_capacity(acc.len() * part.len());
        for prefix in &acc {
            for choice in part {
                let mut combined = prefix.clone();
                combined.extend_from_slice(choice);
                next.push(combined);
            }
        }
        acc = next;
    }
    acc
}
