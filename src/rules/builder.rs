//! Game construction.

use std::sync::Arc;

use crate::cards::{CardId, CardRegistry, CardType};
use crate::core::{EngineError, GameConfig, GameRng, PlayerId, PlayerMap, Result};
use crate::expansions::base::{BaseSet, COPPER, ESTATE};
use crate::expansions::Expansion;
use crate::interaction::Interaction;
use crate::supply::{KingdomPolicy, RandomKingdom, StackSize, Supply, KINGDOM_SIZE};
use crate::zones::Zone;

use super::game::Game;
use super::log::{name_list, GameLog};
use super::player::Player;
use super::table::Table;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

/// Starting deck of every player.
const STARTING_DECK: [(CardId, usize); 2] = [(COPPER, 7), (ESTATE, 3)];

/// Builds a `Game` from players, expansions and a kingdom policy.
///
/// The base set is always included, added first if not given.
///
/// ```
/// use dominion_engine::core::GameConfig;
/// use dominion_engine::expansions::DominionSet;
/// use dominion_engine::interaction::AutoInteraction;
/// use dominion_engine::rules::GameBuilder;
///
/// let game = GameBuilder::new(GameConfig::new(11))
///     .player("Ada", AutoInteraction::new())
///     .player("Brook", AutoInteraction::new())
///     .expansion(DominionSet)
///     .build()
///     .unwrap();
///
/// assert_eq!(game.player_count(), 2);
/// assert_eq!(game.supply().kingdom().len(), 10);
/// ```
pub struct GameBuilder {
    config: GameConfig,
    players: Vec<(String, Box<dyn Interaction>)>,
    expansions: Vec<Arc<dyn Expansion>>,
    kingdom: Option<Box<dyn KingdomPolicy>>,
}

impl GameBuilder {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            players: Vec::new(),
            expansions: Vec::new(),
            kingdom: None,
        }
    }

    /// Seat a player (builder pattern). Seats follow call order.
    #[must_use]
    pub fn player(self, name: impl Into<String>, interaction: impl Interaction + 'static) -> Self {
        self.boxed_player(name, Box::new(interaction))
    }

    #[must_use]
    pub fn boxed_player(mut self, name: impl Into<String>, interaction: Box<dyn Interaction>) -> Self {
        self.players.push((name.into(), interaction));
        self
    }

    #[must_use]
    pub fn expansion(mut self, expansion: impl Expansion + 'static) -> Self {
        self.expansions.push(Arc::new(expansion));
        self
    }

    /// Replace the default `RandomKingdom` (builder pattern).
    #[must_use]
    pub fn kingdom(mut self, policy: impl KingdomPolicy + 'static) -> Self {
        self.kingdom = Some(Box::new(policy));
        self
    }

    pub fn build(self) -> Result<Game> {
        let count = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(EngineError::PlayerCount(count));
        }
        let config = self.config;
        let mut expansions = self.expansions;
        if !expansions.iter().any(|expansion| expansion.name() == BaseSet::NAME) {
            expansions.insert(0, Arc::new(BaseSet));
        }

        let mut registry = CardRegistry::new();
        for expansion in &expansions {
            expansion.register_cards(&mut registry)?;
        }
        let registry = Arc::new(registry);

        let mut rng = GameRng::new(config.seed);
        let mut setup_rng = rng.derive("supply");
        let candidates: Vec<CardId> = expansions.iter().flat_map(|expansion| expansion.kingdom_cards()).collect();
        let policy = self
            .kingdom
            .unwrap_or_else(|| Box::new(RandomKingdom::new(config.kingdom.clone())));
        let mut kingdom = policy.select(&candidates, &registry, &mut setup_rng)?;

        let mut extras = Vec::new();
        for expansion in &expansions {
            for extra in expansion.additional_kingdom_cards(&kingdom, &candidates, &registry, &mut setup_rng) {
                if kingdom.contains(&extra.kind) {
                    tracing::warn!(kind = %extra.kind, role = extra.role, "extra kingdom pile already selected");
                    continue;
                }
                kingdom.push(extra.kind);
                extras.push(extra);
            }
        }

        let mut supply = Supply::new(Arc::clone(&registry));
        for kind in &kingdom {
            let size = if registry.is(*kind, CardType::Victory) {
                if count == 2 {
                    8
                } else {
                    12
                }
            } else {
                KINGDOM_SIZE as u32
            };
            supply.add_kingdom_stack(*kind, StackSize::Finite(size))?;
        }
        for extra in &extras {
            supply.assign_role(extra.kind, extra.role)?;
        }
        for expansion in &expansions {
            for (kind, size) in expansion.basic_piles(count, &kingdom, &registry, &mut setup_rng) {
                supply.add_stack(kind, size)?;
            }
        }

        let mut players = Vec::with_capacity(count);
        for (seat, (name, interaction)) in self.players.into_iter().enumerate() {
            let id = PlayerId::new(seat as u8);
            let mut player = Player::new(id, name, interaction, rng.split());
            for (kind, copies) in STARTING_DECK {
                for _ in 0..copies {
                    let card = supply.mint(kind)?.owned_by(id);
                    player.mat.push(Zone::Deck, card);
                }
            }
            let (mat, player_rng) = player.mat_and_rng();
            mat.shuffle_deck(player_rng);
            mat.draw(config.hand_size, player_rng);
            players.push(player);
        }

        let kingdom_names: Vec<String> = kingdom.iter().map(|kind| registry.name(*kind)).collect();
        let table = Table::new(supply).with_log(GameLog::with_retention(config.log_retention));
        let mut game = Game {
            config,
            table,
            players: PlayerMap::from_vec(players),
            turn_order: PlayerId::all(count).collect(),
            turn: None,
            expansions: expansions.clone(),
            end_conditions: Vec::new(),
            rng,
            seat: 0,
            turns_taken: 0,
            outcome: None,
        };
        for expansion in &expansions {
            expansion.setup(&mut game)?;
        }
        game.end_conditions = expansions.iter().flat_map(|expansion| expansion.end_conditions()).collect();
        let mut order = std::mem::take(&mut game.turn_order);
        game.rng.shuffle(&mut order);
        game.turn_order = order;

        tracing::info!(
            players = count,
            seed = game.config.seed,
            expansions = ?game.expansion_names(),
            "game created"
        );
        game.broadcast(format!("Kingdom: {}.", name_list(&kingdom_names)));
        for extra in &extras {
            game.broadcast(format!("{}: {}.", extra.role, game.registry().name(extra.kind)));
        }
        let order: Vec<&str> = game.turn_order.iter().map(|id| game.players[*id].name()).collect();
        game.broadcast(format!("Turn order: {}.", name_list(&order)));
        Ok(game)
    }
}
