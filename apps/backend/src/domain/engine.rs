//! The deal state machine.
//!
//! `GameEngine` owns the match/deal/trick context triple for one match and
//! drives the per-deal lifecycle: deal → trump → tribute → return tribute →
//! first play → trick loop → rank list → deal end → match end.
//!
//! The engine is synchronous, performs no I/O and is not thread-safe; every
//! operation mutates the contexts and returns the ordered list of emitted
//! events. Callers (the game service, under the room kernel's single-writer
//! lock) publish those events to the bus, which preserves per-match event
//! order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use time::OffsetDateTime;

use super::cards_types::{Card, Rank};
use super::combos::CardGroup;
use super::compare::{can_follow, card_value};
use super::contexts::{DealContext, DealPhase, MatchContext, MatchState, TrickContext, TrickState};
use super::deck::{Deck, CARDS_PER_PLAYER, DECK_SIZE};
use super::events::GameEvent;
use super::plays::legal_plays;
use super::seed_derivation::{derive_deal_seed, derive_starting_card_seed};
use super::state::{Seat, Team, PLAYERS};
use super::tribute::{
    validate_return_card, validate_tribute_card, TributeInfo, TributePhase, TributeScenario,
};
use crate::errors::domain::{DomainError, ValidationKind};

pub struct GameEngine {
    match_ctx: MatchContext,
    deal: Option<DealContext>,
    trick: Option<TrickContext>,
    /// Full finish order of the most recently completed deal.
    last_rankings: Option<[Seat; PLAYERS]>,
}

impl GameEngine {
    pub fn new(match_ctx: MatchContext) -> Self {
        Self {
            match_ctx,
            deal: None,
            trick: None,
            last_rankings: None,
        }
    }

    pub fn match_ctx(&self) -> &MatchContext {
        &self.match_ctx
    }

    pub fn deal(&self) -> Option<&DealContext> {
        self.deal.as_ref()
    }

    pub fn trick(&self) -> Option<&TrickContext> {
        self.trick.as_ref()
    }

    pub fn phase(&self) -> DealPhase {
        self.deal.as_ref().map(|d| d.phase).unwrap_or(DealPhase::Idle)
    }

    pub fn last_rankings(&self) -> Option<[Seat; PLAYERS]> {
        self.last_rankings
    }

    pub fn current_player(&self) -> Option<Seat> {
        match self.phase() {
            DealPhase::FirstPlay | DealPhase::InProgress => {
                self.trick.as_ref().map(|t| t.current_player)
            }
            _ => None,
        }
    }

    /// Legal plays for a seat against the current table play; empty outside
    /// the play phases.
    pub fn legal_plays_for(&self, seat: Seat) -> Vec<CardGroup> {
        let (Some(deal), Some(trick)) = (self.deal.as_ref(), self.trick.as_ref()) else {
            return Vec::new();
        };
        if !matches!(deal.phase, DealPhase::FirstPlay | DealPhase::InProgress) {
            return Vec::new();
        }
        let hand = self.match_ctx.player(seat).hand.cards();
        legal_plays(hand, trick.last_play.as_ref(), deal.trump)
    }

    // ---- Lifecycle operations -------------------------------------------

    /// Idle → Created. Records the deal number and a tentative first
    /// player; the definitive opener is fixed on entering FirstPlay.
    pub fn start_deal(
        &mut self,
        deal_number: u32,
        first_player: Seat,
    ) -> Result<Vec<GameEvent>, DomainError> {
        if self.match_ctx.state == MatchState::Finished {
            return Err(phase_err("match already finished"));
        }
        if let Some(deal) = &self.deal {
            if deal.phase != DealPhase::Finished {
                return Err(phase_err(format!(
                    "cannot start deal {deal_number} while deal {} is {:?}",
                    deal.deal_number, deal.phase
                )));
            }
        }

        self.match_ctx.state = MatchState::InProgress;
        self.match_ctx.current_deal_number = deal_number;
        self.deal = Some(DealContext::new(deal_number, first_player, self.last_rankings));
        self.trick = None;

        Ok(vec![GameEvent::DealStarted {
            match_id: self.match_ctx.match_id,
            deal_number,
            first_player,
        }])
    }

    /// Created → CardsDealt. Builds a fresh seeded deck, shuffles and deals
    /// 27 cards per seat; for the first deal picks the starting card.
    pub fn deal_cards(&mut self) -> Result<Vec<GameEvent>, DomainError> {
        let match_id = self.match_ctx.match_id;
        let seed = self.match_ctx.seed;
        let deal = self.deal_in_phase_mut(DealPhase::Created, "DealCards")?;

        let mut deck = Deck::shuffled(derive_deal_seed(seed, deal.deal_number));
        if deal.is_first_deal {
            let mut rng = ChaCha8Rng::seed_from_u64(derive_starting_card_seed(seed));
            let index = rng.random_range(0..DECK_SIZE);
            let card = deck.cards()[index];
            let holder = Seat::ALL[index / CARDS_PER_PLAYER];
            deal.starting_card = Some((card, holder));
            deal.first_player = holder;
        }
        deal.phase = DealPhase::CardsDealt;
        let deal_number = deal.deal_number;

        let hands = deck.deal(PLAYERS);
        let mut dealt = BTreeMap::new();
        for (seat, cards) in Seat::ALL.into_iter().zip(hands) {
            dealt.insert(seat, cards.clone());
            self.match_ctx.player_mut(seat).hand = cards.into();
        }

        Ok(vec![GameEvent::CardsDealt {
            match_id,
            deal_number,
            hands: dealt,
        }])
    }

    /// CardsDealt → TrumpDecision. Trump is the winning team's current
    /// level; Two for the first deal.
    pub fn determine_trump(&mut self) -> Result<Vec<GameEvent>, DomainError> {
        let match_id = self.match_ctx.match_id;
        let trump = match self.last_rankings {
            Some(rankings) => self.match_ctx.team_level(rankings[0].team()),
            None => Rank::Two,
        };
        let deal = self.deal_in_phase_mut(DealPhase::CardsDealt, "DetermineTrump")?;
        deal.trump = trump;
        deal.current_level = trump;
        deal.phase = DealPhase::TrumpDecision;

        Ok(vec![GameEvent::TrumpDetermined { match_id, trump }])
    }

    /// TrumpDecision → Tribute, or straight to FirstPlay on the first deal
    /// and under immunity.
    pub fn start_tribute(&mut self) -> Result<Vec<GameEvent>, DomainError> {
        let match_id = self.match_ctx.match_id;
        let mut big_jokers = BTreeMap::new();
        for seat in Seat::ALL {
            big_jokers.insert(seat, self.match_ctx.player(seat).hand.big_jokers());
        }

        let deal = self.deal_in_phase_mut(DealPhase::TrumpDecision, "StartTribute")?;
        let rankings = if deal.is_first_deal { None } else { deal.last_rankings };
        deal.tribute = TributeInfo::initialize(rankings, &big_jokers);

        if deal.tribute.is_completed() {
            return Ok(self.enter_first_play());
        }

        deal.phase = DealPhase::Tribute;
        Ok(vec![GameEvent::TributeRequested {
            match_id,
            scenario: deal.tribute.scenario,
            requests: deal.tribute.tribute_requests.clone(),
        }])
    }

    /// Tribute → TributeSelection (Double-Down) / ReturnTribute / stays in
    /// Tribute while obligations are outstanding.
    pub fn give_tribute(
        &mut self,
        from: Seat,
        to: Seat,
        card: Card,
    ) -> Result<Vec<GameEvent>, DomainError> {
        let match_id = self.match_ctx.match_id;
        let trump = self.deal_in_phase(DealPhase::Tribute, "GiveTribute")?.trump;

        {
            let deal = self.deal.as_ref().expect("checked above");
            let info = &deal.tribute;
            if info.tribute_requests.get(&from) != Some(&to) {
                return Err(DomainError::validation(
                    ValidationKind::TributePair,
                    format!("No outstanding tribute from seat {from:?} to {to:?}"),
                ));
            }
            if info.given_tributes.contains_key(&from) {
                return Err(DomainError::validation(
                    ValidationKind::TributePair,
                    format!("Seat {from:?} already paid tribute"),
                ));
            }
        }

        let giver_hand = &mut self.match_ctx.player_mut(from).hand;
        if !giver_hand.contains(card) {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                "Card not in hand",
            ));
        }
        validate_tribute_card(giver_hand.cards(), card, trump)?;
        giver_hand.remove_first(card);

        let double_down = {
            let deal = self.deal.as_mut().expect("checked above");
            let double_down = deal.tribute.scenario == TributeScenario::DoubleDown;
            deal.tribute.given_tributes.insert(from, card);
            deal.tribute.phase = TributePhase::Giving;
            if double_down {
                // Pooled until 1st picks; nobody holds the card meanwhile.
                deal.tribute.available_cards.insert(from, card);
            } else {
                deal.tribute.actual_receivers.insert(from, to);
            }
            double_down
        };
        if !double_down {
            self.match_ctx.player_mut(to).hand.add(card);
        }

        let mut events = vec![GameEvent::TributeGiven {
            match_id,
            from,
            to,
            card,
        }];

        let deal = self.deal.as_mut().expect("checked above");
        if deal.tribute.all_tributes_given() {
            if double_down {
                deal.phase = DealPhase::TributeSelection;
                deal.tribute.phase = TributePhase::Selection;
                let chooser = deal
                    .last_rankings
                    .map(|r| r[0])
                    .unwrap_or(Seat::East);
                events.push(GameEvent::TributeSelectionRequested {
                    match_id,
                    chooser,
                    pool: deal.tribute.available_cards.clone(),
                });
            } else {
                deal.phase = DealPhase::ReturnTribute;
                deal.tribute.phase = TributePhase::Returning;
            }
        }

        Ok(events)
    }

    /// TributeSelection → ReturnTribute. 1st takes the chosen giver's card;
    /// 2nd automatically receives the other; return obligations are rebound
    /// to the actual givers. Only 1st may choose.
    pub fn select_tribute_card(
        &mut self,
        chooser: Seat,
        giver: Seat,
    ) -> Result<Vec<GameEvent>, DomainError> {
        let match_id = self.match_ctx.match_id;
        self.deal_in_phase(DealPhase::TributeSelection, "SelectTributeCard")?;

        let (first, second, chosen, other_giver, other_card) = {
            let deal = self.deal.as_ref().expect("checked above");
            let rankings = deal
                .last_rankings
                .ok_or_else(|| DomainError::invariant("selection without rankings"))?;
            if chooser != rankings[0] {
                return Err(DomainError::validation(
                    ValidationKind::OutOfTurn,
                    "Only the deal winner picks from the tribute pool",
                ));
            }
            let chosen = *deal.tribute.available_cards.get(&giver).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::TributePair,
                    format!("Seat {giver:?} has no tribute in the selection pool"),
                )
            })?;
            let (&other_giver, &other_card) = deal
                .tribute
                .available_cards
                .iter()
                .find(|(s, _)| **s != giver)
                .ok_or_else(|| DomainError::invariant("selection pool missing second tribute"))?;
            (rankings[0], rankings[1], chosen, other_giver, other_card)
        };

        self.match_ctx.player_mut(first).hand.add(chosen);
        self.match_ctx.player_mut(second).hand.add(other_card);

        let deal = self.deal.as_mut().expect("checked above");
        deal.tribute.available_cards.clear();
        deal.tribute.selected_cards.insert(first, chosen);
        deal.tribute.selected_cards.insert(second, other_card);
        deal.tribute.actual_receivers.insert(giver, first);
        deal.tribute.actual_receivers.insert(other_giver, second);
        deal.tribute.return_requests.clear();
        deal.tribute.return_requests.insert(first, giver);
        deal.tribute.return_requests.insert(second, other_giver);
        deal.tribute.phase = TributePhase::Returning;
        deal.phase = DealPhase::ReturnTribute;

        Ok(vec![GameEvent::TributeCardSelected {
            match_id,
            chooser: first,
            giver,
            card: chosen,
        }])
    }

    /// ReturnTribute → FirstPlay once every return is satisfied.
    pub fn give_return_tribute(
        &mut self,
        from: Seat,
        to: Seat,
        card: Card,
    ) -> Result<Vec<GameEvent>, DomainError> {
        let match_id = self.match_ctx.match_id;
        self.deal_in_phase(DealPhase::ReturnTribute, "GiveReturnTribute")?;

        {
            let info = &self.deal.as_ref().expect("checked above").tribute;
            if info.return_requests.get(&from) != Some(&to) {
                return Err(DomainError::validation(
                    ValidationKind::TributePair,
                    format!("No outstanding return tribute from seat {from:?} to {to:?}"),
                ));
            }
            if info.returned_tributes.contains_key(&from) {
                return Err(DomainError::validation(
                    ValidationKind::TributePair,
                    format!("Seat {from:?} already returned tribute"),
                ));
            }
        }
        validate_return_card(card)?;

        let giver_hand = &mut self.match_ctx.player_mut(from).hand;
        if !giver_hand.remove_first(card) {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                "Card not in hand",
            ));
        }
        self.match_ctx.player_mut(to).hand.add(card);

        let deal = self.deal.as_mut().expect("checked above");
        deal.tribute.returned_tributes.insert(from, card);

        let mut events = vec![GameEvent::TributeGiven {
            match_id,
            from,
            to,
            card,
        }];

        if deal.tribute.all_returns_given() {
            deal.tribute.phase = TributePhase::Completed;
            events.extend(self.enter_first_play());
        }
        Ok(events)
    }

    /// Play a combination. FirstPlay transitions to InProgress on the first
    /// successful play; finished players are recorded and skipped; trick and
    /// deal completion cascade from here.
    pub fn play_cards(&mut self, seat: Seat, cards: Vec<Card>) -> Result<Vec<GameEvent>, DomainError> {
        let match_id = self.match_ctx.match_id;
        let phase = self.phase();
        if !matches!(phase, DealPhase::FirstPlay | DealPhase::InProgress) {
            return Err(phase_err(format!("cannot play cards in {phase:?}")));
        }
        let trick = self
            .trick
            .as_ref()
            .ok_or_else(|| DomainError::invariant("play phase without trick context"))?;
        if trick.current_player != seat {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                "Out of turn",
            ));
        }
        if cards.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidCombination,
                "A play must contain at least one card",
            ));
        }
        if !self.match_ctx.player(seat).hand.contains_all(&cards) {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                "Card not in hand",
            ));
        }

        let group = CardGroup::classify(cards);
        if !group.is_valid() {
            return Err(DomainError::validation(
                ValidationKind::InvalidCombination,
                "Not a valid combination",
            ));
        }
        let trump = self.deal.as_ref().expect("phase checked").trump;
        if !can_follow(&group, trick.last_play.as_ref(), trump) {
            return Err(DomainError::validation(
                ValidationKind::CannotBeat,
                "Combination does not beat the table play",
            ));
        }

        // All checks passed; mutate.
        self.match_ctx
            .player_mut(seat)
            .hand
            .remove_all(&group.cards)?;

        let mut events = vec![GameEvent::CardsPlayed {
            match_id,
            seat,
            cards: group.cards.clone(),
            category: group.category,
        }];

        let trick = self.trick.as_mut().expect("checked above");
        trick.last_play = Some(group.clone());
        trick.last_player = Some(seat);
        trick.history.push((seat, group));

        let deal = self.deal.as_mut().expect("phase checked");
        if deal.phase == DealPhase::FirstPlay {
            deal.phase = DealPhase::InProgress;
        }

        if self.match_ctx.player(seat).hand.is_empty() {
            let deal = self.deal.as_mut().expect("phase checked");
            deal.rank_list.push(seat);
            events.push(GameEvent::PlayerFinished {
                match_id,
                seat,
                position: deal.rank_list.len(),
            });

            if deal.rank_list.len() >= PLAYERS - 1 {
                events.extend(self.finish_deal()?);
                return Ok(events);
            }
        }

        events.extend(self.settle_trick_after(seat));
        Ok(events)
    }

    /// Record a pass. Forbidden during FirstPlay and against an empty table.
    pub fn pass(&mut self, seat: Seat) -> Result<Vec<GameEvent>, DomainError> {
        let match_id = self.match_ctx.match_id;
        match self.phase() {
            DealPhase::FirstPlay => {
                return Err(DomainError::validation(
                    ValidationKind::PassForbidden,
                    "The opening play may not be passed",
                ))
            }
            DealPhase::InProgress => {}
            phase => return Err(phase_err(format!("cannot pass in {phase:?}"))),
        }
        let trick = self
            .trick
            .as_mut()
            .ok_or_else(|| DomainError::invariant("play phase without trick context"))?;
        if trick.current_player != seat {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                "Out of turn",
            ));
        }
        if trick.last_play.is_none() {
            return Err(DomainError::validation(
                ValidationKind::PassWithoutLead,
                "Cannot pass when leading a trick",
            ));
        }

        trick.passed.insert(seat);
        let mut events = vec![GameEvent::PlayerPassed { match_id, seat }];
        events.extend(self.settle_trick_after(seat));
        Ok(events)
    }

    // ---- Internals ------------------------------------------------------

    /// After an action by `seat`: finish the trick when only the last
    /// player remains active, otherwise pass the turn on.
    fn settle_trick_after(&mut self, seat: Seat) -> Vec<GameEvent> {
        let match_id = self.match_ctx.match_id;

        let (trick_over, last_player, trick_number) = {
            let deal = self.deal.as_ref().expect("settle without deal");
            let trick = self.trick.as_ref().expect("settle without trick");
            let active: Vec<Seat> = Seat::ALL
                .into_iter()
                .filter(|s| !deal.has_finished(*s) && !trick.passed.contains(s))
                .collect();
            let over = match trick.last_player {
                Some(lp) => active.iter().all(|s| *s == lp),
                None => false,
            };
            (over, trick.last_player, trick.trick_number)
        };

        if !trick_over {
            let next = self.next_active_after(seat);
            self.trick.as_mut().expect("checked").current_player = next;
            return Vec::new();
        }

        let winner = last_player.expect("trick over requires a play");

        let played: Vec<Card> = {
            let trick = self.trick.as_mut().expect("checked");
            trick.state = TrickState::Finished;
            trick.winner = Some(winner);
            trick.history.drain(..).flat_map(|(_, g)| g.cards).collect()
        };

        let winner_finished = {
            let deal = self.deal.as_mut().expect("checked");
            deal.discard.extend(played);
            deal.trick_count += 1;
            deal.has_finished(winner)
        };

        // A finished winner leads through the nearest live seat downstream.
        let start = if winner_finished {
            self.next_unfinished_after(winner)
        } else {
            winner
        };
        self.trick = Some(TrickContext::new(trick_number + 1, start));

        vec![GameEvent::TrickWon {
            match_id,
            winner,
            trick_number,
        }]
    }

    fn next_active_after(&self, seat: Seat) -> Seat {
        let deal = self.deal.as_ref().expect("turn math without deal");
        let trick = self.trick.as_ref().expect("turn math without trick");
        for step in 1..=PLAYERS {
            let s = seat.nth_next(step);
            if !deal.has_finished(s) && !trick.passed.contains(&s) {
                return s;
            }
        }
        seat
    }

    fn next_unfinished_after(&self, seat: Seat) -> Seat {
        let deal = self.deal.as_ref().expect("turn math without deal");
        for step in 1..=PLAYERS {
            let s = seat.nth_next(step);
            if !deal.has_finished(s) {
                return s;
            }
        }
        seat
    }

    /// RankList → Finished: emit the ranking, advance the winning team's
    /// level, and close the match when the level would pass Ace.
    fn finish_deal(&mut self) -> Result<Vec<GameEvent>, DomainError> {
        let match_id = self.match_ctx.match_id;
        let deal = self.deal.as_mut().expect("finish without deal");
        deal.phase = DealPhase::RankList;

        let full = deal
            .full_rankings()
            .ok_or_else(|| DomainError::invariant("deal finished with fewer than 3 ranked players"))?;
        let rank_list = deal.rank_list.clone();
        let deal_number = deal.deal_number;
        let winner_team = full[0].team();

        // Partner's finishing position decides the advance: 2nd → 3 ranks,
        // 3rd → 2, 4th → 1.
        let partner = full[0].partner();
        let partner_pos = full
            .iter()
            .position(|s| *s == partner)
            .ok_or_else(|| DomainError::invariant("partner missing from rankings"))?;
        let steps = match partner_pos {
            1 => 3,
            2 => 2,
            _ => 1,
        };

        deal.phase = DealPhase::Finished;
        self.last_rankings = Some(full);
        self.trick = None;

        let mut events = vec![GameEvent::DealEnded {
            match_id,
            deal_number,
            rank_list,
            winner_team,
        }];

        let mut level = Some(self.match_ctx.team_level(winner_team));
        for _ in 0..steps {
            level = level.and_then(Rank::successor);
        }
        match level {
            Some(level) => self.match_ctx.set_team_level(winner_team, level),
            None => {
                // Advancing past Ace ends the match.
                self.match_ctx.state = MatchState::Finished;
                self.match_ctx.winner_team = Some(winner_team);
                self.match_ctx.end_time = Some(OffsetDateTime::now_utc());
                let mut score = BTreeMap::new();
                score.insert(winner_team, 1u8);
                score.insert(winner_team.opponent(), 0u8);
                events.push(GameEvent::MatchEnded {
                    match_id,
                    winner_team,
                    score,
                });
            }
        }

        Ok(events)
    }

    /// Transition into FirstPlay: fix the opener per the first-player rules
    /// and open trick 1.
    fn enter_first_play(&mut self) -> Vec<GameEvent> {
        let opener = self.opening_player();
        let deal = self.deal.as_mut().expect("first play without deal");
        deal.phase = DealPhase::FirstPlay;
        deal.first_player = opener;
        self.trick = Some(TrickContext::new(1, opener));
        Vec::new()
    }

    /// First deal: holder of the starting card. Later deals: immune → 1st;
    /// Double-Down → receiver of the larger tribute card under the new
    /// trump, ties to the clockwise neighbor of 1st; SingleLast → 4th;
    /// PartnerLast → 3rd. Missing data defaults to East.
    fn opening_player(&self) -> Seat {
        let Some(deal) = self.deal.as_ref() else {
            return Seat::East;
        };
        if deal.is_first_deal {
            return deal.starting_card.map(|(_, s)| s).unwrap_or(Seat::East);
        }
        let Some(rankings) = deal.last_rankings else {
            return Seat::East;
        };
        let info = &deal.tribute;
        if info.has_immunity || info.scenario == TributeScenario::None {
            return rankings[0];
        }
        match info.scenario {
            TributeScenario::DoubleDown => {
                let mut givers = info.given_tributes.iter();
                let (Some((&g1, &c1)), Some((&g2, &c2))) = (givers.next(), givers.next()) else {
                    return Seat::East;
                };
                let receiver_of = |giver: Seat| info.actual_receivers.get(&giver).copied();
                match card_value(c1, deal.trump).cmp(&card_value(c2, deal.trump)) {
                    Ordering::Greater => receiver_of(g1).unwrap_or(Seat::East),
                    Ordering::Less => receiver_of(g2).unwrap_or(Seat::East),
                    Ordering::Equal => rankings[0].next(),
                }
            }
            TributeScenario::SingleLast => rankings[3],
            TributeScenario::PartnerLast => rankings[2],
            TributeScenario::None => rankings[0],
        }
    }

    fn deal_in_phase(
        &self,
        phase: DealPhase,
        op: &'static str,
    ) -> Result<&DealContext, DomainError> {
        match self.deal.as_ref() {
            Some(deal) if deal.phase == phase => Ok(deal),
            Some(deal) => Err(phase_err(format!(
                "{op} requires phase {phase:?}, deal is {:?}",
                deal.phase
            ))),
            None => Err(phase_err(format!("{op} requires phase {phase:?}, no deal"))),
        }
    }

    fn deal_in_phase_mut(
        &mut self,
        phase: DealPhase,
        op: &'static str,
    ) -> Result<&mut DealContext, DomainError> {
        self.deal_in_phase(phase, op)?;
        Ok(self.deal.as_mut().expect("checked above"))
    }

    /// Winner team of the previous deal, used for trump/level lookups.
    pub fn previous_winner_team(&self) -> Option<Team> {
        self.last_rankings.map(|r| r[0].team())
    }
}

fn phase_err(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::PhaseMismatch, detail)
}

// State-rigging accessors for tests; production code never reaches into the
// context triple directly.
#[cfg(test)]
impl GameEngine {
    pub(crate) fn set_last_rankings_for_test(&mut self, rankings: [Seat; PLAYERS]) {
        self.last_rankings = Some(rankings);
    }

    pub(crate) fn set_hand_for_test(&mut self, seat: Seat, cards: Vec<Card>) {
        self.match_ctx.player_mut(seat).hand = cards.into();
    }

    pub(crate) fn match_ctx_mut_for_test(&mut self) -> &mut MatchContext {
        &mut self.match_ctx
    }

    pub(crate) fn deal_mut_for_test(&mut self) -> &mut DealContext {
        self.deal.as_mut().expect("deal context")
    }

    pub(crate) fn trick_mut_for_test(&mut self) -> &mut TrickContext {
        self.trick.as_mut().expect("trick context")
    }
}
