//! Shared fixtures for the integration tests.
//!
//! `Script` queues answers for one seat. Each question pops the next answer;
//! an empty queue falls back to `AutoInteraction`, so tests only script the
//! decisions they care about. Treasure selection is never scripted: all
//! Treasures are played.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use dominion_engine::cards::{Card, CardId, CardType};
use dominion_engine::core::{EntityId, GameConfig, PlayerId};
use dominion_engine::expansions::dominion::{
    CELLAR, LABORATORY, MARKET, MILITIA, MOAT, REMODEL, SMITHY, VILLAGE, WITCH, WORKSHOP,
};
use dominion_engine::expansions::{CornucopiaSet, DominionSet, GuildsSet, HinterlandsSet, IntrigueSet, ProsperitySet};
use dominion_engine::interaction::{AutoInteraction, CardView, Interaction, StackView};
use dominion_engine::rules::{Game, GameBuilder};
use dominion_engine::supply::FixedKingdom;
use dominion_engine::zones::Zone;

pub const NAMES: [&str; 6] = ["Ada", "Brook", "Cyd", "Dale", "Emry", "Fen"];

/// Ten Dominion kinds with no setup hooks and one Reaction.
pub const STANDARD_KINGDOM: [CardId; 10] =
    [CELLAR, MOAT, VILLAGE, WORKSHOP, MILITIA, SMITHY, REMODEL, MARKET, WITCH, LABORATORY];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    /// The first offered card, or the named pile, of this kind.
    Pick(CardId),
    /// One offered card per listed kind, in order.
    PickMany(Vec<CardId>),
    /// Decline an optional choice.
    Skip,
    Yes,
    /// Wait, then answer yes. Keeps a concurrent victim busy.
    YesAfter(Duration),
    No,
    Option(usize),
    Number(i64),
}

#[derive(Debug, Default)]
struct ScriptState {
    answers: VecDeque<Answer>,
    prompts: Vec<String>,
    messages: Vec<String>,
}

/// Handle shared between a test and the seat it scripts.
#[derive(Clone, Debug, Default)]
pub struct Script {
    state: Arc<Mutex<ScriptState>>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, answer: Answer) -> &Self {
        self.state.lock().answers.push_back(answer);
        self
    }

    pub fn interaction(&self) -> ScriptedInteraction {
        ScriptedInteraction {
            script: self.clone(),
            fallback: AutoInteraction::new(),
        }
    }

    pub fn pending(&self) -> usize {
        self.state.lock().answers.len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.state.lock().prompts.clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.state.lock().messages.clone()
    }

    /// Whether any delivered message contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.state.lock().messages.iter().any(|message| message.contains(needle))
    }

    fn next(&self, prompt: &str) -> Option<Answer> {
        let mut state = self.state.lock();
        state.prompts.push(prompt.to_string());
        state.answers.pop_front()
    }
}

pub struct ScriptedInteraction {
    script: Script,
    fallback: AutoInteraction,
}

fn first_of(options: &[CardView], kind: CardId, taken: &[EntityId]) -> Option<EntityId> {
    options
        .iter()
        .find(|view| view.kind == kind && !taken.contains(&view.id))
        .map(|view| view.id)
}

impl Interaction for ScriptedInteraction {
    fn send(&mut self, message: &str) {
        self.script.state.lock().messages.push(message.to_string());
    }

    fn choose_card_from_hand(&mut self, prompt: &str, options: &[CardView], force: bool) -> Option<EntityId> {
        match self.script.next(prompt) {
            None => self.fallback.choose_card_from_hand(prompt, options, force),
            Some(Answer::Pick(kind)) => first_of(options, kind, &[]),
            Some(Answer::Skip) => None,
            Some(other) => panic!("unexpected {other:?} for card prompt: {prompt}"),
        }
    }

    fn choose_cards_from_hand(
        &mut self,
        prompt: &str,
        options: &[CardView],
        force: bool,
        max_count: Option<usize>,
    ) -> Vec<EntityId> {
        match self.script.next(prompt) {
            None => self.fallback.choose_cards_from_hand(prompt, options, force, max_count),
            Some(Answer::PickMany(kinds)) => {
                let mut picked = Vec::new();
                for kind in kinds {
                    if let Some(id) = first_of(options, kind, &picked) {
                        picked.push(id);
                    }
                }
                picked
            }
            Some(Answer::Skip) => Vec::new(),
            Some(other) => panic!("unexpected {other:?} for multi-card prompt: {prompt}"),
        }
    }

    fn choose_kind_from_supply(&mut self, prompt: &str, options: &[StackView], force: bool) -> Option<CardId> {
        match self.script.next(prompt) {
            None => self.fallback.choose_kind_from_supply(prompt, options, force),
            Some(Answer::Pick(kind)) => Some(kind),
            Some(Answer::Skip) => None,
            Some(other) => panic!("unexpected {other:?} for supply prompt: {prompt}"),
        }
    }

    fn yes_or_no(&mut self, prompt: &str) -> bool {
        match self.script.next(prompt) {
            None => self.fallback.yes_or_no(prompt),
            Some(Answer::Yes) => true,
            Some(Answer::YesAfter(delay)) => {
                std::thread::sleep(delay);
                true
            }
            Some(Answer::No) => false,
            Some(other) => panic!("unexpected {other:?} for yes/no prompt: {prompt}"),
        }
    }

    fn from_range(&mut self, prompt: &str, min: i64, max: i64, force: bool) -> Option<i64> {
        match self.script.next(prompt) {
            None => self.fallback.from_range(prompt, min, max, force),
            Some(Answer::Number(n)) => Some(n),
            Some(Answer::Skip) => None,
            Some(other) => panic!("unexpected {other:?} for range prompt: {prompt}"),
        }
    }

    fn from_options(&mut self, prompt: &str, options: &[String], force: bool) -> Option<usize> {
        match self.script.next(prompt) {
            None => self.fallback.from_options(prompt, options, force),
            Some(Answer::Option(index)) => Some(index),
            Some(Answer::Skip) => None,
            Some(other) => panic!("unexpected {other:?} for options prompt: {prompt}"),
        }
    }
}

/// A built game plus one script per seat, indexed by seat.
pub struct Fixture {
    pub game: Game,
    pub scripts: Vec<Script>,
}

impl Fixture {
    pub fn new(config: GameConfig, players: usize, kingdom: &[CardId]) -> Self {
        let scripts: Vec<Script> = (0..players).map(|_| Script::new()).collect();
        let mut builder = GameBuilder::new(config);
        for (seat, script) in scripts.iter().enumerate() {
            builder = builder.player(NAMES[seat], script.interaction());
        }
        let game = builder
            .expansion(DominionSet)
            .expansion(IntrigueSet)
            .expansion(HinterlandsSet)
            .expansion(ProsperitySet)
            .expansion(CornucopiaSet)
            .expansion(GuildsSet)
            .kingdom(FixedKingdom(kingdom.to_vec()))
            .build()
            .unwrap();
        Self { game, scripts }
    }

    /// Two players, the standard kingdom.
    pub fn standard(seed: u64) -> Self {
        Self::new(GameConfig::new(seed), 2, &STANDARD_KINGDOM)
    }

    /// The player whose turn comes first.
    pub fn first(&self) -> PlayerId {
        self.game.current_player()
    }

    pub fn second(&self) -> PlayerId {
        self.game.others(self.first())[0]
    }

    pub fn script(&self, player: PlayerId) -> &Script {
        &self.scripts[player.index()]
    }

    pub fn name(&self, player: PlayerId) -> String {
        self.game.player(player).name().to_string()
    }

    /// Replace a player's hand. The old hand goes under the deck.
    pub fn set_hand(&mut self, player: PlayerId, kinds: &[CardId]) -> Vec<Card> {
        let mat = &mut self.game.player_mut(player).mat;
        let old = mat.drain(Zone::Hand);
        let deck = mat.zone_mut(Zone::Deck);
        let rest = std::mem::replace(deck, old);
        deck.extend(rest);
        self.give(player, Zone::Hand, kinds)
    }

    /// Stack cards on top of a player's deck; the first kind is drawn first.
    pub fn stack_deck(&mut self, player: PlayerId, kinds: &[CardId]) -> Vec<Card> {
        let cards = self.mint(player, kinds);
        let deck = self.game.player_mut(player).mat.zone_mut(Zone::Deck);
        deck.extend(cards.iter().rev().copied());
        cards
    }

    /// Add fresh cards to the top of one of a player's zones.
    pub fn give(&mut self, player: PlayerId, zone: Zone, kinds: &[CardId]) -> Vec<Card> {
        let cards = self.mint(player, kinds);
        let mat = &mut self.game.player_mut(player).mat;
        for card in &cards {
            mat.push(zone, *card);
        }
        cards
    }

    fn mint(&mut self, player: PlayerId, kinds: &[CardId]) -> Vec<Card> {
        let mut supply = self.game.supply();
        kinds
            .iter()
            .map(|kind| supply.mint(*kind).unwrap().owned_by(player))
            .collect()
    }

    pub fn kinds_in(&self, player: PlayerId, zone: Zone) -> Vec<CardId> {
        self.game.player(player).mat.zone(zone).iter().map(|card| card.kind).collect()
    }

    pub fn count_in(&self, player: PlayerId, zone: Zone, kind: CardId) -> usize {
        self.game
            .player(player)
            .mat
            .zone(zone)
            .iter()
            .filter(|card| card.kind == kind)
            .count()
    }

    /// Id of the first card of `kind` in the player's hand.
    pub fn in_hand(&self, player: PlayerId, kind: CardId) -> EntityId {
        self.game
            .player(player)
            .mat
            .zone(Zone::Hand)
            .iter()
            .find(|card| card.kind == kind)
            .map(|card| card.id)
            .unwrap()
    }

    /// Play the first card of `kind` from the active player's hand.
    pub fn play(&mut self, kind: CardId) {
        let player = self.game.active_player().unwrap();
        let id = self.in_hand(player, kind);
        self.game.play_action(id).unwrap();
    }

    /// Play every Treasure in the active player's hand.
    pub fn play_all_treasures(&mut self) {
        let player = self.game.active_player().unwrap();
        let registry = self.game.registry().clone();
        let ids: Vec<EntityId> = self
            .game
            .player(player)
            .mat
            .zone(Zone::Hand)
            .iter()
            .filter(|card| registry.is(card.kind, CardType::Treasure))
            .map(|card| card.id)
            .collect();
        self.game.play_treasures(&ids).unwrap();
    }

    pub fn log_contains(&self, needle: &str) -> bool {
        self.game.log().contains(needle)
    }
}
