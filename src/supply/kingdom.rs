//! Kingdom selection policies.
//!
//! A policy turns the pool of kingdom kinds offered by the active
//! expansions into ten distinct kinds, or more when the configuration
//! requires more. `RandomKingdom` samples
//! under the constraints of a `KingdomConfig`; `FixedKingdom` replays an
//! explicit list (tests, tournaments, recommended sets).

use rustc_hash::FxHashSet;

use crate::cards::{CardDefinition, CardId, CardRegistry, CardType};
use crate::core::{EngineError, GameRng, KingdomConfig, Result};

/// Number of kingdom piles in every game.
pub const KINGDOM_SIZE: usize = 10;

pub trait KingdomPolicy: Send + Sync {
    /// Choose the kingdom from `candidates`.
    fn select(&self, candidates: &[CardId], registry: &CardRegistry, rng: &mut GameRng) -> Result<Vec<CardId>>;
}

/// An explicit list of ten kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedKingdom(pub Vec<CardId>);

impl KingdomPolicy for FixedKingdom {
    fn select(&self, candidates: &[CardId], _registry: &CardRegistry, _rng: &mut GameRng) -> Result<Vec<CardId>> {
        let distinct: FxHashSet<CardId> = self.0.iter().copied().collect();
        if self.0.len() != KINGDOM_SIZE || distinct.len() != KINGDOM_SIZE {
            return Err(EngineError::KingdomSelection(format!(
                "expected {KINGDOM_SIZE} distinct kinds, got {}",
                distinct.len()
            )));
        }
        if let Some(missing) = self.0.iter().find(|kind| !candidates.contains(kind)) {
            return Err(EngineError::KingdomSelection(format!(
                "{missing} is not offered by the selected expansions"
            )));
        }
        Ok(self.0.clone())
    }
}

/// Effects a random kingdom can be required to contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Effect {
    PlusTwoActions,
    Drawer,
    Buy,
    Trashing,
}

impl Effect {
    fn satisfied_by(self, def: &CardDefinition) -> bool {
        match self {
            Self::PlusTwoActions => def.bonus.actions >= 2,
            Self::Drawer => def.bonus.cards >= 1,
            Self::Buy => def.bonus.buys >= 1,
            Self::Trashing => def.trashes(),
        }
    }
}

/// Constrained random sampling.
///
/// Order of work: required kinds, then Attack filtering, then one kind per
/// required effect (effects visited in random order, skipped when already
/// met), then two kinds at each cost 2-5 if asked, then uniform sampling
/// for whatever slots remain. Constraints that need more than ten piles
/// win over the size.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RandomKingdom {
    pub config: KingdomConfig,
}

impl RandomKingdom {
    #[must_use]
    pub fn new(config: KingdomConfig) -> Self {
        Self { config }
    }

    fn required_effects(&self) -> Vec<Effect> {
        let config = &self.config;
        [
            (config.require_plus_two_action, Effect::PlusTwoActions),
            (config.require_drawer, Effect::Drawer),
            (config.require_buy, Effect::Buy),
            (config.require_trashing, Effect::Trashing),
        ]
        .into_iter()
        .filter_map(|(on, effect)| on.then_some(effect))
        .collect()
    }
}

impl KingdomPolicy for RandomKingdom {
    fn select(&self, candidates: &[CardId], registry: &CardRegistry, rng: &mut GameRng) -> Result<Vec<CardId>> {
        let mut pool: Vec<CardId> = Vec::with_capacity(candidates.len());
        for kind in candidates {
            if !pool.contains(kind) {
                pool.push(*kind);
            }
        }
        let mut selected: Vec<CardId> = Vec::with_capacity(KINGDOM_SIZE);

        for required in &self.config.required {
            let index = pool.iter().position(|kind| kind == required).ok_or_else(|| {
                EngineError::KingdomSelection(format!(
                    "required card {} is not offered by the selected expansions",
                    registry.name(*required)
                ))
            })?;
            selected.push(pool.remove(index));
        }

        if self.config.disable_attacks {
            pool.retain(|kind| !registry.is(*kind, CardType::Attack));
        }

        let mut effects = self.required_effects();
        rng.shuffle(&mut effects);
        for effect in effects {
            let met = selected
                .iter()
                .filter_map(|kind| registry.definition(*kind).ok())
                .any(|def| effect.satisfied_by(def));
            if met {
                continue;
            }
            let matching: Vec<CardId> = pool
                .iter()
                .copied()
                .filter(|kind| registry.definition(*kind).is_ok_and(|def| effect.satisfied_by(def)))
                .collect();
            match rng.choose(&matching) {
                Some(kind) => {
                    pool.retain(|k| k != kind);
                    selected.push(*kind);
                }
                None => tracing::warn!(?effect, "no kingdom card satisfies a required effect"),
            }
        }

        if self.config.distribute_cost {
            for cost in 2..=5 {
                let cost_of = |kind: CardId| registry.definition(kind).map(|def| def.cost).ok();
                let have = selected.iter().filter(|k| cost_of(**k) == Some(cost)).count();
                let available: Vec<CardId> = pool.iter().copied().filter(|k| cost_of(*k) == Some(cost)).collect();
                for kind in rng.sample(&available, 2usize.saturating_sub(have)) {
                    pool.retain(|k| *k != kind);
                    selected.push(kind);
                }
            }
        }

        let open = KINGDOM_SIZE.saturating_sub(selected.len());
        selected.extend(rng.sample(&pool, open));

        if selected.len() > KINGDOM_SIZE {
            tracing::warn!(
                piles = selected.len(),
                "required cards and effects exceed the usual kingdom size; keeping every pile"
            );
        } else if selected.len() < KINGDOM_SIZE {
            return Err(EngineError::KingdomSelection(format!(
                "only {} of {KINGDOM_SIZE} kingdom piles could be filled",
                selected.len()
            )));
        }
        Ok(selected)
    }
}
