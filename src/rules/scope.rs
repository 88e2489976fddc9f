//! Player-local operations.
//!
//! A `PlayerScope` borrows one player, the shared `Table` and, when it is
//! that player's turn, their `Turn`. Card effects manipulate players only
//! through a scope, so the same code runs for the active player and for an
//! attack victim resolving in its own task.

use crate::cards::{Card, CardId, CardRegistry, CardType};
use crate::core::{EngineError, EntityId, PlayerId, Result};
use crate::hooks::{fire, Gained, Hook, HookRegistry, HookScope, HookTable};
use crate::interaction::{CardView, StackView};
use crate::zones::{PlayerMat, Zone, ZonePosition};

use super::log::{article, name_list};
use super::player::Player;
use super::table::Table;
use super::turn::Turn;

/// How a card is gained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GainOptions {
    pub destination: Zone,
    /// Take the card from its pile. Otherwise a fresh copy is minted.
    pub from_supply: bool,
    /// Fire post-gain hooks.
    pub hooks: bool,
    /// Broadcast "X gained a Y."
    pub announce: bool,
}

impl Default for GainOptions {
    fn default() -> Self {
        Self {
            destination: Zone::Discard,
            from_supply: true,
            hooks: true,
            announce: true,
        }
    }
}

impl GainOptions {
    #[must_use]
    pub fn to(destination: Zone) -> Self {
        Self {
            destination,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn minted(mut self) -> Self {
        self.from_supply = false;
        self
    }

    #[must_use]
    pub fn without_hooks(mut self) -> Self {
        self.hooks = false;
        self
    }

    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.announce = false;
        self
    }
}

/// Which Supply piles a choice may offer. Empty piles are never offered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SupplyFilter {
    pub max_cost: Option<u32>,
    /// Offer only piles costing exactly `max_cost`.
    pub exact_cost: bool,
    pub card_type: Option<CardType>,
    pub exclude: Vec<CardId>,
}

impl SupplyFilter {
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn up_to(max_cost: u32) -> Self {
        Self {
            max_cost: Some(max_cost),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn exactly(cost: u32) -> Self {
        Self {
            max_cost: Some(cost),
            exact_cost: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn of_type(mut self, card_type: CardType) -> Self {
        self.card_type = Some(card_type);
        self
    }

    #[must_use]
    pub fn excluding(mut self, kinds: impl IntoIterator<Item = CardId>) -> Self {
        self.exclude.extend(kinds);
        self
    }

    fn accepts_cost(&self, view: &StackView) -> bool {
        if view.remaining == Some(0) || self.exclude.contains(&view.kind) {
            return false;
        }
        match (self.max_cost, self.exact_cost) {
            (Some(cost), true) => view.cost == cost,
            (Some(cost), false) => view.cost <= cost,
            (None, _) => true,
        }
    }

    #[must_use]
    pub fn accepts(&self, view: &StackView) -> bool {
        self.accepts_cost(view) && self.card_type.map_or(true, |card_type| view.is(card_type))
    }
}

pub struct PlayerScope<'g> {
    player: &'g mut Player,
    turn: Option<&'g mut Turn>,
    table: &'g Table,
}

impl<'g> PlayerScope<'g> {
    pub fn new(player: &'g mut Player, turn: Option<&'g mut Turn>, table: &'g Table) -> Self {
        Self { player, turn, table }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.player.id()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.player.name()
    }

    pub fn player(&self) -> &Player {
        self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        self.player
    }

    pub fn mat(&self) -> &PlayerMat {
        &self.player.mat
    }

    pub fn mat_mut(&mut self) -> &mut PlayerMat {
        &mut self.player.mat
    }

    pub fn table(&self) -> &'g Table {
        self.table
    }

    pub fn registry(&self) -> &'g CardRegistry {
        let table: &'g Table = self.table;
        table.registry()
    }

    #[must_use]
    pub fn card_name(&self, kind: CardId) -> String {
        self.table.name(kind)
    }

    /// Whether this scope carries the player's turn.
    #[must_use]
    pub fn has_turn(&self) -> bool {
        self.turn.is_some()
    }

    pub fn turn(&self) -> Result<&Turn> {
        self.turn.as_deref().ok_or(EngineError::NoActiveTurn)
    }

    pub fn turn_mut(&mut self) -> Result<&mut Turn> {
        self.turn.as_deref_mut().ok_or(EngineError::NoActiveTurn)
    }

    pub fn broadcast(&self, message: impl Into<String>) {
        self.table.broadcast(message);
    }

    /// Current cost of a kind: the Supply's modified cost, or the printed
    /// cost for kinds without a pile.
    pub fn cost_of(&self, kind: CardId) -> Result<u32> {
        let cost = self.table.supply().cost(kind);
        cost.or_else(|_| self.registry().definition(kind).map(|def| def.cost))
    }

    /// Run `f` against the game hook table or this player's turn table.
    pub fn with_hooks<R>(&mut self, scope: HookScope, f: impl FnOnce(&mut HookTable) -> R) -> Result<R> {
        match scope {
            HookScope::Game => Ok(f(&mut *self.table.hooks())),
            HookScope::Turn => self
                .turn
                .as_deref_mut()
                .map(|turn| f(&mut turn.hooks))
                .ok_or(EngineError::NoActiveTurn),
        }
    }

    /// Message for this player only, after any pending public messages.
    pub fn send(&mut self, message: &str) {
        self.flush_log();
        self.player.interaction().send(message);
    }

    pub fn flush_log(&mut self) {
        self.player.deliver(self.table.log());
    }

    fn names(&self, cards: &[Card]) -> Vec<String> {
        cards.iter().map(|card| self.card_name(card.kind)).collect()
    }

    // Zone movement

    /// Draw up to `n` cards. Fewer come back when deck and discard run out.
    pub fn draw(&mut self, n: usize) -> Vec<Card> {
        if n == 0 {
            return Vec::new();
        }
        let (mat, rng) = self.player.mat_and_rng();
        let draw = mat.draw(n, rng);
        if draw.shuffled {
            tracing::debug!(player = %self.name(), "shuffled discard pile into deck");
        }
        if draw.cards.len() < n {
            tracing::debug!(player = %self.name(), wanted = n, drew = draw.cards.len(), "deck exhausted");
        }
        if !draw.cards.is_empty() {
            let message = format!("You drew: {}.", name_list(&self.names(&draw.cards)));
            self.send(&message);
        }
        draw.cards
    }

    /// Gain a card from the Supply to the discard pile.
    pub fn gain(&mut self, kind: CardId) -> Result<Option<Card>> {
        self.gain_with(kind, GainOptions::default())
    }

    pub fn gain_to(&mut self, kind: CardId, destination: Zone) -> Result<Option<Card>> {
        self.gain_with(kind, GainOptions::to(destination))
    }

    /// Gain one card. An empty pile is reported publicly and yields
    /// `Ok(None)`. The returned card is the one left standing after
    /// post-gain hooks, which may have replaced it.
    pub fn gain_with(&mut self, kind: CardId, options: GainOptions) -> Result<Option<Card>> {
        let drawn = if options.from_supply {
            self.table.supply().draw(kind)
        } else {
            self.table.supply().mint(kind)
        };
        let card = match drawn {
            Ok(card) => card.owned_by(self.id()),
            Err(err) if err.is_exhaustion() => {
                tracing::debug!(player = %self.name(), %kind, "gain absorbed: pile is empty");
                self.broadcast(format!(
                    "{} could not gain {} since that supply pile is empty.",
                    self.name(),
                    article(&self.card_name(kind))
                ));
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        self.player.mat.push(options.destination, card);
        if options.announce {
            self.broadcast(format!("{} gained {}.", self.name(), article(&self.card_name(kind))));
        }
        if !options.hooks {
            return Ok(Some(card));
        }
        let mut gained = Gained {
            card,
            zone: options.destination,
        };
        self.fire_post_gain_hooks(&mut gained)?;
        Ok(Some(gained.card))
    }

    /// Gain up to `quantity` copies, stopping at the first empty pile.
    pub fn gain_many(&mut self, kind: CardId, quantity: usize, from_supply: bool) -> Result<Vec<Card>> {
        let options = GainOptions {
            from_supply,
            ..GainOptions::default()
        };
        let mut gained = Vec::with_capacity(quantity);
        for _ in 0..quantity {
            match self.gain_with(kind, options)? {
                Some(card) => gained.push(card),
                None => break,
            }
        }
        Ok(gained)
    }

    /// Gain the most recently trashed card of `kind`.
    pub fn gain_from_trash(&mut self, kind: CardId, destination: Zone) -> Result<Option<Card>> {
        let taken = self.table.supply().take_from_trash(kind);
        let Some(card) = taken else {
            return Ok(None);
        };
        let card = card.owned_by(self.id());
        self.player.mat.push(destination, card);
        self.broadcast(format!(
            "{} gained {} from the trash.",
            self.name(),
            article(&self.card_name(kind))
        ));
        let mut gained = Gained {
            card,
            zone: destination,
        };
        self.fire_post_gain_hooks(&mut gained)?;
        Ok(Some(gained.card))
    }

    /// Discard a card from hand.
    pub fn discard(&mut self, id: EntityId) -> Result<Card> {
        let card = self.player.mat.remove(Zone::Hand, id)?;
        self.discard_card(card)?;
        Ok(card)
    }

    /// Discard a card that is in no zone (revealed, set aside, taken from
    /// the deck).
    pub fn discard_card(&mut self, card: Card) -> Result<()> {
        self.player.mat.push(Zone::Discard, card);
        self.fire_scoped(
            |hooks| &mut hooks.post_discard,
            Some(card.kind),
            |scope, hook| (hook.callback())(scope, card),
        )
    }

    /// Trash a card from hand.
    pub fn trash(&mut self, id: EntityId) -> Result<Card> {
        self.trash_from(Zone::Hand, id)
    }

    pub fn trash_from(&mut self, zone: Zone, id: EntityId) -> Result<Card> {
        let card = self.player.mat.remove(zone, id)?;
        self.trash_card(card);
        Ok(card)
    }

    /// Trash a card that is in no zone.
    pub fn trash_card(&mut self, card: Card) {
        self.table.supply().trash(card);
        self.broadcast(format!("{} trashed {}.", self.name(), article(&self.card_name(card.kind))));
    }

    /// Take the top card of the deck into no zone, reshuffling if needed.
    pub fn take_from_deck(&mut self) -> Option<Card> {
        let (mat, rng) = self.player.mat_and_rng();
        mat.take_from_deck(rng)
    }

    pub fn put_on_deck(&mut self, card: Card) {
        self.player.mat.put(Zone::Deck, card, ZonePosition::Top);
    }

    /// Put a card into a zone.
    pub fn place(&mut self, card: Card, zone: Zone) {
        self.player.mat.push(zone, card);
    }

    pub fn reveal(&self, cards: &[Card]) {
        self.broadcast(format!("{} revealed {}.", self.name(), name_list(&self.names(cards))));
    }

    pub fn reveal_hand(&self) {
        let hand = self.mat().zone(Zone::Hand).to_vec();
        self.broadcast(format!("{} revealed their hand: {}.", self.name(), name_list(&self.names(&hand))));
    }

    /// Discard hand and play area, then draw a new hand.
    pub fn cleanup(&mut self, hand_size: usize) -> Vec<Card> {
        let mat = &mut self.player.mat;
        let mut leaving = mat.drain(Zone::Played);
        leaving.extend(mat.drain(Zone::Hand));
        mat.zone_mut(Zone::Discard).extend(leaving);
        self.draw(hand_size)
    }

    // Hooks

    /// Fire game-scope then turn-scope hooks of one trigger class.
    ///
    /// `kind = None` fires every hook of the class.
    fn fire_scoped<F: ?Sized>(
        &mut self,
        select: fn(&mut HookTable) -> &mut HookRegistry<F>,
        kind: Option<CardId>,
        call: impl FnMut(&mut Self, &Hook<F>) -> Result<()>,
    ) -> Result<()> {
        self.fire_claimed(select, |registry| registry.claim(kind), call)
    }

    /// Hooks are claimed under the table lock and run after it is released,
    /// so a callback may gain, discard or register more hooks, and another
    /// victim resolving an attack at the same time still sees every
    /// persistent hook.
    fn fire_claimed<F: ?Sized>(
        &mut self,
        select: fn(&mut HookTable) -> &mut HookRegistry<F>,
        claim: impl Fn(&mut HookRegistry<F>) -> Vec<Hook<F>>,
        mut call: impl FnMut(&mut Self, &Hook<F>) -> Result<()>,
    ) -> Result<()> {
        let claimed = claim(select(&mut self.table.hooks()));
        if !claimed.is_empty() {
            let (unfired, result) = fire(claimed, |hook| call(self, hook));
            if !unfired.is_empty() {
                select(&mut self.table.hooks()).restore(unfired);
            }
            result?;
        }

        let claimed = match self.turn.as_deref_mut() {
            Some(turn) => claim(select(&mut turn.hooks)),
            None => return Ok(()),
        };
        if claimed.is_empty() {
            return Ok(());
        }
        let (unfired, result) = fire(claimed, |hook| call(self, hook));
        if let Some(turn) = self.turn.as_deref_mut() {
            select(&mut turn.hooks).restore(unfired);
        }
        result
    }

    /// Fire this player's pre-turn hooks.
    pub(crate) fn fire_pre_turn_hooks(&mut self) -> Result<()> {
        let player = self.player.id();
        self.fire_claimed(
            |hooks| &mut hooks.pre_turn,
            |registry| registry.claim_for(player),
            |scope, hook| (hook.callback())(scope),
        )
    }

    pub(crate) fn fire_treasure_hooks(&mut self, card: Card) -> Result<()> {
        self.fire_scoped(
            |hooks| &mut hooks.treasure,
            Some(card.kind),
            |scope, hook| (hook.callback())(scope, card),
        )
    }

    pub(crate) fn fire_post_treasure_hooks(&mut self) -> Result<()> {
        self.fire_scoped(|hooks| &mut hooks.post_treasure, None, |scope, hook| (hook.callback())(scope))
    }

    pub(crate) fn fire_pre_buy_hooks(&mut self, kind: CardId) -> Result<()> {
        self.fire_scoped(
            |hooks| &mut hooks.pre_buy,
            Some(kind),
            |scope, hook| (hook.callback())(scope, kind),
        )
    }

    pub(crate) fn fire_post_buy_hooks(&mut self, card: Card) -> Result<()> {
        self.fire_scoped(
            |hooks| &mut hooks.post_buy,
            Some(card.kind),
            |scope, hook| (hook.callback())(scope, card),
        )
    }

    pub(crate) fn fire_pre_cleanup_hooks(&mut self) -> Result<()> {
        self.fire_scoped(|hooks| &mut hooks.pre_cleanup, None, |scope, hook| (hook.callback())(scope))
    }

    /// Post-gain hooks are keyed by the kind originally gained. Each sees
    /// the event as the previous one left it.
    fn fire_post_gain_hooks(&mut self, gained: &mut Gained) -> Result<()> {
        let kind = gained.card.kind;
        self.fire_scoped(
            |hooks| &mut hooks.post_gain,
            Some(kind),
            |scope, hook| {
                let before = *gained;
                (hook.callback())(scope, &mut *gained)?;
                scope.relocate(before, *gained)
            },
        )
    }

    /// Apply a hook's change of destination to the card on the mat.
    fn relocate(&mut self, before: Gained, after: Gained) -> Result<()> {
        let same_card = before.card.id == after.card.id;
        if same_card && before.zone != after.zone && self.player.mat.contains(before.zone, before.card.id) {
            self.player
                .mat
                .move_card(before.card.id, before.zone, after.zone, ZonePosition::Top)?;
        }
        Ok(())
    }

    // Choices

    fn invalid(&self, reason: impl Into<String>) -> EngineError {
        EngineError::InvalidChoice {
            player: self.name().to_string(),
            reason: reason.into(),
        }
    }

    fn views(&self, cards: &[Card]) -> Result<Vec<CardView>> {
        CardView::list(cards, self.registry())
    }

    fn validate_card(&self, choice: Option<EntityId>, candidates: &[Card], force: bool) -> Result<Option<Card>> {
        match choice {
            None if force => Err(self.invalid("a card must be chosen")),
            None => Ok(None),
            Some(id) => candidates
                .iter()
                .find(|card| card.id == id)
                .copied()
                .map(Some)
                .ok_or_else(|| self.invalid(format!("card {id} was not offered"))),
        }
    }

    fn validate_kind(&self, choice: Option<CardId>, candidates: &[StackView], force: bool) -> Result<Option<CardId>> {
        match choice {
            None if force => Err(self.invalid("a card must be chosen")),
            None => Ok(None),
            Some(kind) if candidates.iter().any(|view| view.kind == kind) => Ok(Some(kind)),
            Some(kind) => Err(self.invalid(format!("{} was not offered", self.card_name(kind)))),
        }
    }

    /// Choose one of `candidates`. Nothing is asked when there are none.
    pub fn choose_card(&mut self, prompt: &str, candidates: &[Card], force: bool) -> Result<Option<Card>> {
        if candidates.is_empty() {
            return Ok(None);
        }
        let views = self.views(candidates)?;
        self.flush_log();
        let choice = self.player.interaction().choose_card_from_hand(prompt, &views, force);
        self.validate_card(choice, candidates, force)
    }

    /// Choose one card in hand matching `filter`.
    pub fn choose_from_hand(&mut self, prompt: &str, filter: impl Fn(&Card) -> bool, force: bool) -> Result<Option<Card>> {
        let candidates: Vec<Card> = self.mat().zone(Zone::Hand).iter().filter(|card| filter(card)).copied().collect();
        self.choose_card(prompt, &candidates, force)
    }

    /// Choose one card of a type from hand.
    pub fn choose_type_from_hand(&mut self, prompt: &str, card_type: CardType, force: bool) -> Result<Option<Card>> {
        let registry = self.registry();
        let hand = self.mat().zone(Zone::Hand).to_vec();
        let candidates: Vec<Card> = hand.iter().filter(|card| registry.is(card.kind, card_type)).copied().collect();
        if candidates.is_empty() {
            return Ok(None);
        }
        let views = self.views(&hand)?;
        self.flush_log();
        let choice = self
            .player
            .interaction()
            .choose_type_from_hand(prompt, &views, card_type, force);
        self.validate_card(choice, &candidates, force)
    }

    /// Choose any number of `candidates`, at most `max_count`.
    pub fn choose_cards(
        &mut self,
        prompt: &str,
        candidates: &[Card],
        force: bool,
        max_count: Option<usize>,
    ) -> Result<Vec<Card>> {
        if candidates.is_empty() || max_count == Some(0) {
            return Ok(Vec::new());
        }
        let views = self.views(candidates)?;
        self.flush_log();
        let ids = self
            .player
            .interaction()
            .choose_cards_from_hand(prompt, &views, force, max_count);
        self.validate_cards(&ids, candidates, force, max_count)
    }

    fn validate_cards(
        &self,
        ids: &[EntityId],
        candidates: &[Card],
        force: bool,
        max_count: Option<usize>,
    ) -> Result<Vec<Card>> {
        if force && ids.is_empty() {
            return Err(self.invalid("at least one card must be chosen"));
        }
        if let Some(max) = max_count {
            if ids.len() > max {
                return Err(self.invalid(format!("chose {} cards, at most {max} allowed", ids.len())));
            }
        }
        let mut chosen: Vec<Card> = Vec::with_capacity(ids.len());
        for id in ids {
            if chosen.iter().any(|card| card.id == *id) {
                return Err(self.invalid(format!("card {id} chosen twice")));
            }
            let card = candidates
                .iter()
                .find(|card| card.id == *id)
                .ok_or_else(|| self.invalid(format!("card {id} was not offered")))?;
            chosen.push(*card);
        }
        Ok(chosen)
    }

    /// Choose exactly `count` of `candidates`, or all of them if fewer.
    pub fn choose_exactly(&mut self, prompt: &str, candidates: &[Card], count: usize) -> Result<Vec<Card>> {
        let count = count.min(candidates.len());
        if count == candidates.len() {
            return Ok(candidates.to_vec());
        }
        let chosen = self.choose_cards(prompt, candidates, true, Some(count))?;
        if chosen.len() != count {
            return Err(self.invalid(format!("chose {} cards, exactly {count} required", chosen.len())));
        }
        Ok(chosen)
    }

    pub fn choose_many_from_hand(
        &mut self,
        prompt: &str,
        filter: impl Fn(&Card) -> bool,
        force: bool,
        max_count: Option<usize>,
    ) -> Result<Vec<Card>> {
        let candidates: Vec<Card> = self.mat().zone(Zone::Hand).iter().filter(|card| filter(card)).copied().collect();
        self.choose_cards(prompt, &candidates, force, max_count)
    }

    /// Which Treasures in hand to play, in order.
    pub fn choose_treasures(&mut self, prompt: &str) -> Result<Vec<Card>> {
        let registry = self.registry();
        let candidates: Vec<Card> = self
            .mat()
            .zone(Zone::Hand)
            .iter()
            .filter(|card| registry.is(card.kind, CardType::Treasure))
            .copied()
            .collect();
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let views = self.views(&candidates)?;
        self.flush_log();
        let ids = self.player.interaction().choose_treasures(prompt, &views);
        self.validate_cards(&ids, &candidates, false, None)
    }

    /// Choose a Supply pile. Only non-empty piles passing `filter` are
    /// offered.
    pub fn choose_from_supply(&mut self, prompt: &str, filter: &SupplyFilter, force: bool) -> Result<Option<CardId>> {
        let offered: Vec<StackView> = self
            .table
            .supply()
            .snapshot()
            .into_iter()
            .filter(|view| filter.accepts_cost(view))
            .collect();
        let candidates: Vec<StackView> = offered.iter().filter(|view| filter.accepts(view)).cloned().collect();
        if candidates.is_empty() {
            return Ok(None);
        }
        self.flush_log();
        let interaction = self.player.interaction();
        let choice = match filter.card_type {
            Some(card_type) => interaction.choose_type_from_supply(prompt, &offered, card_type, force),
            None => interaction.choose_kind_from_supply(prompt, &candidates, force),
        };
        self.validate_kind(choice, &candidates, force)
    }

    /// Choose a kind from the trash.
    pub fn choose_from_trash(&mut self, prompt: &str, card_type: Option<CardType>, force: bool) -> Result<Option<CardId>> {
        let offered = self.table.supply().trash_snapshot();
        let candidates: Vec<StackView> = offered
            .iter()
            .filter(|view| card_type.map_or(true, |t| view.is(t)))
            .cloned()
            .collect();
        if candidates.is_empty() {
            return Ok(None);
        }
        self.flush_log();
        let interaction = self.player.interaction();
        let choice = match card_type {
            Some(card_type) => interaction.choose_type_from_trash(prompt, &offered, card_type, force),
            None => interaction.choose_kind_from_supply(prompt, &candidates, force),
        };
        self.validate_kind(choice, &candidates, force)
    }

    pub fn yes_or_no(&mut self, prompt: &str) -> bool {
        self.flush_log();
        self.player.interaction().yes_or_no(prompt)
    }

    pub fn from_range(&mut self, prompt: &str, min: i64, max: i64, force: bool) -> Result<Option<i64>> {
        self.flush_log();
        match self.player.interaction().from_range(prompt, min, max, force) {
            None if force => Err(self.invalid("a number must be chosen")),
            None => Ok(None),
            Some(n) if (min..=max).contains(&n) => Ok(Some(n)),
            Some(n) => Err(self.invalid(format!("{n} is outside {min}..={max}"))),
        }
    }

    /// Choose one of `options` by index.
    pub fn from_options(&mut self, prompt: &str, options: &[String], force: bool) -> Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }
        self.flush_log();
        match self.player.interaction().from_options(prompt, options, force) {
            None if force => Err(self.invalid("an option must be chosen")),
            None => Ok(None),
            Some(index) if index < options.len() => Ok(Some(index)),
            Some(index) => Err(self.invalid(format!("option {index} does not exist"))),
        }
    }
}

impl std::fmt::Debug for PlayerScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerScope")
            .field("player", &self.player.id())
            .field("has_turn", &self.turn.is_some())
            .finish_non_exhaustive()
    }
}
