//! The game: roster, table, turn order and the turn API.
//!
//! A turn can be driven two ways. `take_turn` asks the active player's
//! `Interaction` for every decision and runs the turn to completion. The
//! fine-grained calls (`begin_turn`, `play_action`, `play_treasures`, `buy`,
//! `end_action_phase`, `end_buy_phase`, `cleanup`) let a caller script a turn
//! step by step; `take_turn` is built from them.

use std::sync::Arc;

use parking_lot::MutexGuard;

use crate::cards::{Card, CardId, CardRegistry, CardType};
use crate::core::{EngineError, EntityId, GameConfig, GameRng, PlayerId, PlayerMap, Result};
use crate::expansions::{EndCondition, Expansion};
use crate::hooks::{HookScope, HookTable};
use crate::interaction::{CardView, PlayerView, StackView, TurnView};
use crate::supply::Supply;
use crate::zones::{Zone, ZonePosition};

use super::log::{article, name_list, plural, GameLog};
use super::outcome::{GameOutcome, GameResult};
use super::player::Player;
use super::scope::{GainOptions, PlayerScope, SupplyFilter};
use super::table::Table;
use super::turn::{Phase, Turn};

pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) table: Table,
    pub(crate) players: PlayerMap<Player>,
    /// Seats in the order they take turns.
    pub(crate) turn_order: Vec<PlayerId>,
    pub(crate) turn: Option<Turn>,
    pub(crate) expansions: Vec<Arc<dyn Expansion>>,
    pub(crate) end_conditions: Vec<EndCondition>,
    pub(crate) rng: GameRng,
    /// Index into `turn_order` of the player whose turn is current or next.
    pub(crate) seat: usize,
    pub(crate) turns_taken: u32,
    pub(crate) outcome: Option<GameOutcome>,
}

impl Game {
    // Accessors

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<CardRegistry> {
        self.table.registry()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Lock the Supply.
    pub fn supply(&self) -> MutexGuard<'_, Supply> {
        self.table.supply()
    }

    pub fn log(&self) -> &GameLog {
        self.table.log()
    }

    pub fn broadcast(&self, message: impl Into<String>) {
        self.table.broadcast(message);
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter()
    }

    pub fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    /// The player whose turn is in progress, or who moves next.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn_order[self.seat]
    }

    pub fn turn(&self) -> Option<&Turn> {
        self.turn.as_ref()
    }

    pub fn turn_mut(&mut self) -> Option<&mut Turn> {
        self.turn.as_mut()
    }

    /// Owner of the turn in progress.
    pub fn active_player(&self) -> Result<PlayerId> {
        self.turn.as_ref().map(Turn::player).ok_or(EngineError::NoActiveTurn)
    }

    /// Every other player, in turn order starting after `player`.
    #[must_use]
    pub fn others(&self, player: PlayerId) -> Vec<PlayerId> {
        let count = self.turn_order.len();
        let start = self.turn_order.iter().position(|id| *id == player).unwrap_or(0);
        (1..count).map(|offset| self.turn_order[(start + offset) % count]).collect()
    }

    #[must_use]
    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    pub fn expansion_names(&self) -> Vec<&'static str> {
        self.expansions.iter().map(|expansion| expansion.name()).collect()
    }

    pub fn rng(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Scope for any player. Carries the turn only if it is theirs.
    pub fn scope(&mut self, player: PlayerId) -> PlayerScope<'_> {
        let turn = self.turn.as_mut().filter(|turn| turn.player() == player);
        PlayerScope::new(self.players.get_mut(player), turn, &self.table)
    }

    pub fn active_scope(&mut self) -> Result<PlayerScope<'_>> {
        let player = self.active_player()?;
        Ok(self.scope(player))
    }

    /// Run `f` against the game or current turn hook table.
    pub fn with_hooks<R>(&mut self, scope: HookScope, f: impl FnOnce(&mut HookTable) -> R) -> Result<R> {
        match scope {
            HookScope::Game => Ok(f(&mut *self.table.hooks())),
            HookScope::Turn => self
                .turn
                .as_mut()
                .map(|turn| f(&mut turn.hooks))
                .ok_or(EngineError::NoActiveTurn),
        }
    }

    fn active_turn(&mut self) -> Result<&mut Turn> {
        self.turn.as_mut().ok_or(EngineError::NoActiveTurn)
    }

    fn card_in_hand(&self, player: PlayerId, id: EntityId) -> Result<Card> {
        self.players[player]
            .mat
            .zone(Zone::Hand)
            .iter()
            .find(|card| card.id == id)
            .copied()
            .ok_or(EngineError::CardNotInZone { card: id, zone: Zone::Hand })
    }

    /// Catch every player up, then let a bounded log forget what all of
    /// them have seen.
    pub(crate) fn deliver_all(&mut self) {
        let log = self.table.log();
        let mut delivered = usize::MAX;
        for (_, player) in self.players.iter_mut() {
            player.deliver(log);
            delivered = delivered.min(player.log_cursor());
        }
        log.trim(delivered);
    }

    // Turn API

    /// Start the next player's turn.
    pub fn begin_turn(&mut self) -> Result<PlayerId> {
        let player = self.current_player();
        if self.outcome.is_some() {
            return Err(EngineError::CannotPlay {
                player,
                reason: "the game is over".into(),
            });
        }
        if let Some(turn) = &self.turn {
            return Err(EngineError::WrongPhase {
                expected: Phase::Finished,
                actual: turn.phase(),
            });
        }
        self.turn = Some(Turn::new(player));
        let name = self.players[player].name().to_string();
        let number = self.players[player].turns_played() + 1;
        tracing::debug!(player = %name, turn = number, "turn started");
        self.broadcast(format!("--- {name}'s turn {number} ---"));
        self.active_scope()?.fire_pre_turn_hooks()?;
        Ok(player)
    }

    /// Play an Action card from the active player's hand.
    pub fn play_action(&mut self, id: EntityId) -> Result<()> {
        let player = self.active_player()?;
        let turn = self.active_turn()?;
        turn.require(Phase::Action)?;
        if turn.actions == 0 {
            return Err(EngineError::CannotPlay {
                player,
                reason: "no actions left".into(),
            });
        }
        let card = self.card_in_hand(player, id)?;
        if !self.table.is(card.kind, CardType::Action) {
            return Err(EngineError::CannotPlay {
                player,
                reason: format!("{} is not an Action card", self.table.name(card.kind)),
            });
        }

        self.players[player]
            .mat
            .move_card(id, Zone::Hand, Zone::Played, ZonePosition::Top)?;
        self.active_turn()?.actions -= 1;
        self.play_without_side_effects(card)
    }

    /// Resolve an Action card without spending an action or moving it.
    /// Used by cards that play other cards.
    pub fn play_without_side_effects(&mut self, card: Card) -> Result<()> {
        let player = self.active_player()?;
        self.broadcast(format!(
            "{} played {}.",
            self.players[player].name(),
            article(&self.table.name(card.kind))
        ));
        self.active_turn()?.record_play(card.kind, true);
        self.resolve_play(card)
    }

    /// Static bonus, then the card's own effect, then its attack.
    fn resolve_play(&mut self, card: Card) -> Result<()> {
        let registry = Arc::clone(self.table.registry());
        let entry = registry.get(card.kind).ok_or(EngineError::UnknownCard(card.kind))?;
        let bonus = entry.definition.bonus;
        {
            let mut scope = self.active_scope()?;
            scope.draw(bonus.cards as usize);
            let turn = scope.turn_mut()?;
            turn.actions += bonus.actions;
            turn.buys += bonus.buys;
            turn.coins += bonus.coins;
        }
        if let Some(playable) = entry.playable() {
            playable.action(self, card)?;
        }
        if let Some(attacking) = entry.attacking() {
            self.resolve_attack(attacking.as_ref(), card)?;
        }
        Ok(())
    }

    pub fn end_action_phase(&mut self) -> Result<()> {
        self.active_turn()?.advance(Phase::Buy)
    }

    /// Play one Treasure from hand.
    pub fn play_treasure(&mut self, id: EntityId) -> Result<()> {
        let card = self.treasure_in_hand(id)?;
        let player = self.active_player()?;
        self.players[player]
            .mat
            .move_card(id, Zone::Hand, Zone::Played, ZonePosition::Top)?;
        self.resolve_treasure(card)
    }

    fn treasure_in_hand(&mut self, id: EntityId) -> Result<Card> {
        let player = self.active_player()?;
        self.active_turn()?.require(Phase::Buy)?;
        let card = self.card_in_hand(player, id)?;
        if !self.table.is(card.kind, CardType::Treasure) {
            return Err(EngineError::CannotPlay {
                player,
                reason: format!("{} is not a Treasure", self.table.name(card.kind)),
            });
        }
        Ok(card)
    }

    fn resolve_treasure(&mut self, card: Card) -> Result<()> {
        let registry = Arc::clone(self.table.registry());
        let def = registry.definition(card.kind)?;
        let mut scope = self.active_scope()?;
        let value = match registry.get(card.kind).and_then(|entry| entry.valued()) {
            Some(valued) => valued.value(&scope, card),
            None => def.value.unwrap_or(0),
        };
        let turn = scope.turn_mut()?;
        turn.coins += value;
        turn.record_play(card.kind, def.is(CardType::Action));
        scope.fire_treasure_hooks(card)
    }

    /// Play Treasures from hand, then fire post-treasure hooks.
    ///
    /// Expansions may reorder the Treasures first ("play this last").
    pub fn play_treasures(&mut self, ids: &[EntityId]) -> Result<()> {
        let player = self.active_player()?;
        let mut treasures = Vec::with_capacity(ids.len());
        for id in ids {
            treasures.push(self.treasure_in_hand(*id)?);
        }
        let name = self.players[player].name().to_string();
        if treasures.is_empty() {
            self.broadcast(format!("{name} did not play any Treasures."));
        } else {
            let registry = Arc::clone(self.table.registry());
            for expansion in &self.expansions {
                expansion.order_treasures(&registry, &mut treasures);
            }
            let names: Vec<String> = treasures.iter().map(|card| registry.name(card.kind)).collect();
            self.broadcast(format!("{name} played Treasures: {}.", name_list(&names)));
            for card in treasures {
                self.players[player]
                    .mat
                    .move_card(card.id, Zone::Hand, Zone::Played, ZonePosition::Top)?;
                self.resolve_treasure(card)?;
            }
        }
        self.active_scope()?.fire_post_treasure_hooks()
    }

    /// Run each expansion's Buy-phase opener, then fire pre-buy hooks for
    /// every Supply pile, once per turn. Called by the first `buy`; call it
    /// earlier to show buyers the adjusted costs.
    pub fn open_buying(&mut self) -> Result<()> {
        let turn = self.active_turn()?;
        turn.require(Phase::Buy)?;
        if !turn.open_buying() {
            return Ok(());
        }
        for expansion in self.expansions.clone() {
            expansion.pre_buy_phase(self)?;
        }
        let kinds = self.supply().kinds().to_vec();
        let mut scope = self.active_scope()?;
        for kind in kinds {
            scope.fire_pre_buy_hooks(kind)?;
        }
        Ok(())
    }

    /// Buy one card.
    pub fn buy(&mut self, kind: CardId) -> Result<Card> {
        self.open_buying()?;
        let player = self.active_player()?;
        let name = self.table.name(kind);
        let cannot = |reason: String| EngineError::CannotBuy { player, reason };

        let (cost, empty) = {
            let supply = self.table.supply();
            (supply.cost(kind)?, supply.is_empty(kind))
        };
        let turn = self.active_turn()?;
        if turn.buys == 0 {
            return Err(cannot("no buys left".into()));
        }
        if turn.is_forbidden(kind) {
            return Err(cannot(format!("{name} cannot be bought this turn")));
        }
        if empty {
            return Err(cannot(format!("the {name} pile is empty")));
        }
        if cost > turn.coins {
            return Err(cannot(format!("{name} costs {cost}, only {} available", turn.coins)));
        }
        turn.buys -= 1;
        turn.spend_coins(cost);
        turn.record_buy(kind);

        let mut scope = self.active_scope()?;
        scope.broadcast(format!("{} bought {}.", scope.name(), article(&name)));
        let card = scope
            .gain_with(kind, GainOptions::default().quiet())?
            .ok_or_else(|| cannot(format!("the {name} pile is empty")))?;
        scope.fire_post_buy_hooks(card)?;
        Ok(card)
    }

    pub fn end_buy_phase(&mut self) -> Result<()> {
        self.active_turn()?.advance(Phase::Cleanup)
    }

    /// Finish the turn: pre-cleanup hooks, discard and redraw, reset costs,
    /// pass to the next player and check whether the game has ended.
    pub fn cleanup(&mut self) -> Result<()> {
        let player = self.active_player()?;
        self.active_turn()?.require(Phase::Cleanup)?;
        let hand_size = self.config.hand_size;
        {
            let mut scope = self.active_scope()?;
            scope.fire_pre_cleanup_hooks()?;
            scope.cleanup(hand_size);
        }
        self.supply().reset_costs();
        self.active_turn()?.advance(Phase::Finished)?;
        self.turn = None;
        self.players[player].finish_turn();
        self.turns_taken += 1;
        self.seat = (self.seat + 1) % self.turn_order.len();
        self.deliver_all();

        if let Some(reason) = self.check_end() {
            self.finish(reason);
        }
        Ok(())
    }

    /// Run one whole turn, asking the active player for every decision.
    pub fn take_turn(&mut self) -> Result<()> {
        self.begin_turn()?;
        self.action_phase()?;
        self.end_action_phase()?;
        self.buy_phase()?;
        self.end_buy_phase()?;
        self.cleanup()
    }

    fn action_phase(&mut self) -> Result<()> {
        loop {
            let mut scope = self.active_scope()?;
            let actions = scope.turn()?.actions;
            if actions == 0 {
                scope.send("No actions left. Ending action phase.");
                return Ok(());
            }
            let registry = scope.registry();
            let has_action = scope
                .mat()
                .zone(Zone::Hand)
                .iter()
                .any(|card| registry.is(card.kind, CardType::Action));
            if !has_action {
                scope.send("No Action cards to play. Ending action phase.");
                return Ok(());
            }
            let prompt = format!("You have {}. Select an Action card to play.", plural(actions, "action"));
            match scope.choose_type_from_hand(&prompt, CardType::Action, false)? {
                Some(card) => self.play_action(card.id)?,
                None => {
                    scope.send("Action phase forfeited.");
                    return Ok(());
                }
            }
        }
    }

    fn buy_phase(&mut self) -> Result<()> {
        let treasures = self
            .active_scope()?
            .choose_treasures("Which Treasures would you like to play this turn?")?;
        let ids: Vec<EntityId> = treasures.iter().map(|card| card.id).collect();
        self.play_treasures(&ids)?;
        self.open_buying()?;

        loop {
            let mut scope = self.active_scope()?;
            let turn = scope.turn()?;
            let (buys, coins) = (turn.buys, turn.coins);
            let filter = SupplyFilter::up_to(coins).excluding(turn.forbidden().to_vec());
            if buys == 0 {
                scope.send("No buys left. Ending buy phase.");
                return Ok(());
            }
            let prompt = format!(
                "You have {coins} $ to spend and {}. Select a card to buy.",
                plural(buys, "buy")
            );
            match scope.choose_from_supply(&prompt, &filter, false)? {
                Some(kind) => {
                    self.buy(kind)?;
                }
                None => {
                    scope.send("Buy phase forfeited.");
                    return Ok(());
                }
            }
        }
    }

    /// Play turns until an end condition fires.
    pub fn run(&mut self) -> Result<GameOutcome> {
        loop {
            if let Some(outcome) = &self.outcome {
                return Ok(outcome.clone());
            }
            self.take_turn()?;
        }
    }

    /// The first end condition that holds, if any.
    #[must_use]
    pub fn check_end(&self) -> Option<String> {
        if let Some(reason) = self.end_conditions.iter().find_map(|condition| condition(self)) {
            return Some(reason);
        }
        match self.config.max_turns {
            Some(limit) if self.turns_taken >= limit => Some(format!("The limit of {limit} turns was reached.")),
            _ => None,
        }
    }

    /// Current score of every player.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<i32> {
        let registry = self.table.registry();
        self.players.map(|_, player| {
            self.expansions
                .iter()
                .map(|expansion| expansion.score(player, registry))
                .sum()
        })
    }

    fn finish(&mut self, reason: String) {
        let outcome = GameOutcome::new(reason, self.scores());
        self.broadcast(format!("Game over! {}", outcome.reason));
        for (id, player) in self.players.iter() {
            self.broadcast(format!("{}: {}", player.name(), plural(outcome.scores[id], "point")));
        }
        let names: Vec<&str> = outcome
            .result
            .winners()
            .into_iter()
            .map(|id| self.players[id].name())
            .collect();
        match &outcome.result {
            GameResult::Winner(_) => self.broadcast(format!("{} won the game!", name_list(&names))),
            GameResult::Winners(_) => self.broadcast(format!("{} tied for the win!", name_list(&names))),
        }
        tracing::info!(reason = %outcome.reason, turns = self.turns_taken, "game over");
        self.deliver_all();
        self.outcome = Some(outcome);
    }

    // Views

    pub fn supply_view(&self) -> Vec<StackView> {
        self.supply().snapshot()
    }

    pub fn trash_view(&self) -> Vec<StackView> {
        self.supply().trash_snapshot()
    }

    pub fn player_view(&self, id: PlayerId) -> Result<PlayerView> {
        let player = &self.players[id];
        let registry = self.table.registry();
        Ok(PlayerView {
            name: player.name().to_string(),
            deck_size: player.mat.count(Zone::Deck),
            hand: CardView::list(player.mat.zone(Zone::Hand), registry)?,
            discard: CardView::list(player.mat.zone(Zone::Discard), registry)?,
            played: CardView::list(player.mat.zone(Zone::Played), registry)?,
            set_aside: CardView::list(player.mat.zone(Zone::SetAside), registry)?,
            coffers: player.coffers(),
            turns_played: player.turns_played(),
        })
    }

    pub fn turn_view(&self) -> Option<TurnView> {
        let turn = self.turn.as_ref()?;
        Some(TurnView {
            player: self.players[turn.player()].name().to_string(),
            phase: turn.phase().to_string(),
            actions: turn.actions,
            buys: turn.buys,
            coins: turn.coins,
            coffers: self.players[turn.player()].coffers(),
        })
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("players", &self.players)
            .field("turn_order", &self.turn_order)
            .field("turn", &self.turn)
            .field("turns_taken", &self.turns_taken)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
